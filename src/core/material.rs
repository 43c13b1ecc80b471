// Copyright @yucwang 2026

use std::fmt;

/// Material tag of a model. Unknown names are kept as `Other` and carry no
/// field requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Material {
    Matte,
    Mirror,
    Water,
    Glass,
    Other(String),
}

impl Material {
    pub fn from_name(name: &str) -> Material {
        match name {
            "matte" => Material::Matte,
            "mirror" => Material::Mirror,
            "water" => Material::Water,
            "glass" => Material::Glass,
            other => Material::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Material::Matte => "matte",
            Material::Mirror => "mirror",
            Material::Water => "water",
            Material::Glass => "glass",
            Material::Other(name) => name,
        }
    }

    /// Spectrum fields a model with this material must supply.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Material::Matte => &["diffuse"],
            Material::Mirror => &["specular"],
            Material::Water | Material::Glass => &["reflectance", "transmittance"],
            Material::Other(_) => &[],
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Material;

    #[test]
    fn test_material_round_trip_names() {
        for name in ["matte", "mirror", "water", "glass", "plastic"].iter() {
            assert_eq!(Material::from_name(name).name(), *name);
        }
        assert_eq!(Material::from_name("plastic"), Material::Other("plastic".to_string()));
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(Material::Matte.required_fields(), &["diffuse"]);
        assert_eq!(Material::Mirror.required_fields(), &["specular"]);
        assert_eq!(Material::Glass.required_fields(), &["reflectance", "transmittance"]);
        assert_eq!(Material::Water.required_fields(), &["reflectance", "transmittance"]);
        assert!(Material::from_name("gold").required_fields().is_empty());
    }
}
