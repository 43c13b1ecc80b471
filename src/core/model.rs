// Copyright @yucwang 2026

use std::path::{Path, PathBuf};

use crate::core::directive::{assign, Directive, DirectiveErrorKind};
use crate::core::field_scanner::FieldScanner;
use crate::core::material::Material;
use crate::math::constants::{Matrix4f, Vector3f};
use crate::math::transform::{rotation_matrix_xyz, scaling_matrix, translation_matrix};

#[derive(Debug, Clone, PartialEq)]
pub struct ModelInstance {
    pub file_path: String,
    pub translation: Matrix4f,
    pub rotation: Matrix4f,
    pub scaling: Matrix4f,
    pub material: Option<Material>,
    pub diffuse: Option<Vector3f>,
    pub specular: Option<Vector3f>,
    pub reflectance: Option<Vector3f>,
    pub transmittance: Option<Vector3f>,
}

impl ModelInstance {
    pub fn new(file_path: String) -> Self {
        Self {
            file_path,
            translation: Matrix4f::identity(),
            rotation: Matrix4f::identity(),
            scaling: Matrix4f::identity(),
            material: None,
            diffuse: None,
            specular: None,
            reflectance: None,
            transmittance: None,
        }
    }

    /// Object to world matrix: scale first, then rotate, then translate.
    pub fn model_matrix(&self) -> Matrix4f {
        self.translation * self.rotation * self.scaling
    }

    pub fn material_name(&self) -> Option<&str> {
        self.material.as_ref().map(|m| m.name())
    }

    /// Relative model paths are taken relative to the scene file directory.
    pub fn resolve_path(&self, base_dir: &Path) -> PathBuf {
        let path = Path::new(&self.file_path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    fn spectrum(&self, name: &str) -> Option<&Vector3f> {
        match name {
            "diffuse" => self.diffuse.as_ref(),
            "specular" => self.specular.as_ref(),
            "reflectance" => self.reflectance.as_ref(),
            "transmittance" => self.transmittance.as_ref(),
            _ => None,
        }
    }

    /// Spectrum fields required by the material but not supplied.
    pub fn missing_material_fields(&self) -> Vec<&'static str> {
        match &self.material {
            Some(material) => material.required_fields()
                .iter()
                .copied()
                .filter(|field| self.spectrum(field).is_none())
                .collect(),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ModelField {
    File,
    Translate,
    Rotate,
    Scale,
    Material,
    Diffuse,
    Specular,
    Reflectance,
    Transmittance,
}

const MODEL_FIELDS: &[(&str, ModelField)] = &[
    ("file", ModelField::File),
    ("translate", ModelField::Translate),
    ("rotate", ModelField::Rotate),
    ("scale", ModelField::Scale),
    ("material", ModelField::Material),
    ("diffuse", ModelField::Diffuse),
    ("specular", ModelField::Specular),
    ("reflectance", ModelField::Reflectance),
    ("transmittance", ModelField::Transmittance),
];

/// Parses the sub-fields of a `Model` line starting at `offset`.
///
/// A missing `file` and any spectrum the material requires are reported
/// together in one `MissingFields` error.
pub fn parse_model(line: &str, offset: usize) -> Result<ModelInstance, DirectiveErrorKind> {
    let d = Directive::Model;
    let mut file = None;
    let mut translate = None;
    let mut rotate = None;
    let mut scale = None;
    let mut material = None;
    let mut diffuse = None;
    let mut specular = None;
    let mut reflectance = None;
    let mut transmittance = None;

    let mut scanner = FieldScanner::new(line, offset);
    while let Some((keyword, field)) = scanner.next_field(MODEL_FIELDS) {
        match field {
            ModelField::File => assign(&mut file, scanner.string(keyword)?, d, keyword),
            ModelField::Translate => assign(&mut translate, scanner.vector3(keyword)?, d, keyword),
            ModelField::Rotate => assign(&mut rotate, scanner.vector3(keyword)?, d, keyword),
            ModelField::Scale => assign(&mut scale, scanner.vector3(keyword)?, d, keyword),
            ModelField::Material => assign(&mut material, scanner.string(keyword)?, d, keyword),
            ModelField::Diffuse => assign(&mut diffuse, scanner.vector3(keyword)?, d, keyword),
            ModelField::Specular => assign(&mut specular, scanner.vector3(keyword)?, d, keyword),
            ModelField::Reflectance => assign(&mut reflectance, scanner.vector3(keyword)?, d, keyword),
            ModelField::Transmittance => assign(&mut transmittance, scanner.vector3(keyword)?, d, keyword),
        }
    }

    let has_file = file.is_some();
    let mut model = ModelInstance::new(file.unwrap_or_default());
    if let Some(t) = translate {
        model.translation = translation_matrix(&t);
    }
    if let Some(r) = rotate {
        model.rotation = rotation_matrix_xyz(&r);
    }
    if let Some(s) = scale {
        model.scaling = scaling_matrix(&s);
    }
    model.material = material.map(|name: String| Material::from_name(&name));
    model.diffuse = diffuse;
    model.specular = specular;
    model.reflectance = reflectance;
    model.transmittance = transmittance;

    let mut missing = Vec::new();
    if !has_file {
        missing.push("file");
    }
    missing.extend(model.missing_material_fields());

    if missing.is_empty() {
        Ok(model)
    } else {
        Err(DirectiveErrorKind::MissingFields(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_only_matrix() {
        let model = parse_model("Model file[cube.obj] translate[1 2 3] rotate[0 0 0] scale[1 1 1]", 5).unwrap();
        let mut expected = Matrix4f::identity();
        expected[(0, 3)] = 1.0;
        expected[(1, 3)] = 2.0;
        expected[(2, 3)] = 3.0;
        assert_eq!(model.translation, expected);
        assert_eq!(model.rotation, Matrix4f::identity());
        assert_eq!(model.scaling, Matrix4f::identity());
        assert_eq!(model.model_matrix(), expected);
        assert_eq!(model.file_path, "cube.obj");
        assert!(model.material.is_none());
    }

    #[test]
    fn test_absent_transforms_default_to_identity() {
        let model = parse_model("Model file[a b.obj]", 5).unwrap();
        assert_eq!(model.file_path, "a b.obj");
        assert_eq!(model.model_matrix(), Matrix4f::identity());
        assert!(model.diffuse.is_none());
    }

    #[test]
    fn test_model_matrix_order() {
        let model = parse_model("Model scale[2 2 2] translate[1 0 0] rotate[0 0 90] file[m.obj]", 5).unwrap();
        let p = model.model_matrix() * Vector3f::new(1.0, 0.0, 0.0).push(1.0);
        // Scaled to (2,0,0), rotated to (0,2,0), translated to (1,2,0).
        assert!((p.xyz() - Vector3f::new(1.0, 2.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_matte_requires_diffuse() {
        let err = parse_model("Model file[x.obj] material[matte]", 5).unwrap_err();
        assert_eq!(err, DirectiveErrorKind::MissingFields(vec!["diffuse"]));
        assert!(err.to_string().contains("diffuse"));

        let model = parse_model("Model file[x.obj] material[matte] diffuse[0.5 0.5 0.5]", 5).unwrap();
        assert_eq!(model.material, Some(Material::Matte));
        assert_eq!(model.diffuse, Some(Vector3f::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_mirror_and_dielectric_requirements() {
        let err = parse_model("Model file[x.obj] material[mirror] diffuse[1 1 1]", 5).unwrap_err();
        assert_eq!(err, DirectiveErrorKind::MissingFields(vec!["specular"]));

        let err = parse_model("Model file[x.obj] material[glass] reflectance[1 1 1]", 5).unwrap_err();
        assert_eq!(err, DirectiveErrorKind::MissingFields(vec!["transmittance"]));

        let model = parse_model("Model material[water] transmittance[1 1 1] reflectance[0.1 0.1 0.1] file[w.obj]", 5).unwrap();
        assert_eq!(model.material_name(), Some("water"));
    }

    #[test]
    fn test_other_materials_are_permissive() {
        let model = parse_model("Model file[x.obj] material[gold]", 5).unwrap();
        assert_eq!(model.material, Some(Material::Other("gold".to_string())));
    }

    #[test]
    fn test_missing_file_collected_with_material_fields() {
        let err = parse_model("Model material[matte] translate[0 0 0]", 5).unwrap_err();
        assert_eq!(err, DirectiveErrorKind::MissingFields(vec!["file", "diffuse"]));
    }

    #[test]
    fn test_malformed_vector_fails_directive() {
        let err = parse_model("Model file[x.obj] scale[1 1", 5).unwrap_err();
        assert!(matches!(err, DirectiveErrorKind::Scan(_)));
    }

    #[test]
    fn test_resolve_path() {
        let model = ModelInstance::new("meshes/a.obj".to_string());
        assert_eq!(model.resolve_path(Path::new("/scenes")), PathBuf::from("/scenes/meshes/a.obj"));
    }
}
