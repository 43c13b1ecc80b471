// Copyright @yucwang 2026

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use wavefront_obj::{obj, ParseError};

use crate::core::model::ModelInstance;
use crate::math::constants::{Float, Vector3f};
use crate::math::transform::Transform;
use crate::shapes::triangle::Triangle;

#[derive(Debug)]
pub enum ObjLoadError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(ParseError),
    VertexOutOfRange { index: usize, count: usize },
}

impl From<ParseError> for ObjLoadError {
    fn from(err: ParseError) -> Self {
        ObjLoadError::Parse(err)
    }
}

impl fmt::Display for ObjLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjLoadError::Io { path, source } => write!(f, "io error reading {}: {}", path.display(), source),
            ObjLoadError::Parse(err) => write!(f, "parse error: {}", err),
            ObjLoadError::VertexOutOfRange { index, count } =>
                write!(f, "face references vertex {} but the object has {}", index, count),
        }
    }
}

impl std::error::Error for ObjLoadError {}

pub fn load_obj_from_str<S: AsRef<str>>(input: S) -> Result<obj::ObjSet, ParseError> {
    obj::parse(triangulate_faces(input.as_ref()))
}

pub fn load_obj_from_file<P: AsRef<Path>>(path: P) -> Result<obj::ObjSet, ObjLoadError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .map_err(|source| ObjLoadError::Io { path: path.to_path_buf(), source })?;
    Ok(load_obj_from_str(data)?)
}

/// Object-space triangles of every object in the set.
pub fn collect_triangles(obj_set: &obj::ObjSet) -> Result<Vec<Triangle>, ObjLoadError> {
    let mut triangles = Vec::new();
    for object in &obj_set.objects {
        let vertex = |index: usize| -> Result<Vector3f, ObjLoadError> {
            object.vertices.get(index)
                .map(|v| Vector3f::new(v.x as Float, v.y as Float, v.z as Float))
                .ok_or(ObjLoadError::VertexOutOfRange { index, count: object.vertices.len() })
        };
        for geometry in &object.geometry {
            for shape in &geometry.shapes {
                if let obj::Primitive::Triangle(a, b, c) = shape.primitive {
                    triangles.push(Triangle::new(vertex(a.0)?, vertex(b.0)?, vertex(c.0)?));
                }
            }
        }
    }
    Ok(triangles)
}

/// Loads the OBJ file of `model` and places its triangles in world space
/// with the model's matrix.
pub fn load_model_triangles(model: &ModelInstance, base_dir: &Path) -> Result<Vec<Triangle>, ObjLoadError> {
    let path = model.resolve_path(base_dir);
    log::info!("Loading model mesh from: {}.", path.display());
    let obj_set = load_obj_from_file(&path)?;
    let transform = Transform::new(model.model_matrix());

    let mut triangles = collect_triangles(&obj_set)?;
    for triangle in triangles.iter_mut() {
        triangle.apply_transform_matrix(&transform);
    }
    Ok(triangles)
}

/// Fan-triangulates polygon faces, which the OBJ parser rejects.
fn triangulate_faces(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for line in input.lines() {
        let trimmed = line.trim_start();
        let is_face = trimmed.starts_with("f ") || trimmed.starts_with("f\t");
        let corners: Vec<&str> = trimmed.split_whitespace().skip(1).collect();
        if is_face && corners.len() > 3 {
            for pair in corners[1..].windows(2) {
                out.push_str(&format!("f {} {} {}\n", corners[0], pair[0], pair[1]));
            }
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const QUAD: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
";

    #[test]
    fn test_quad_is_fan_triangulated() {
        let obj_set = load_obj_from_str(QUAD).expect("failed to parse obj");
        let triangles = collect_triangles(&obj_set).unwrap();
        assert_eq!(triangles.len(), 2);
        let (p0, p1, p2) = triangles[1].vertices();
        assert_eq!(p0, Vector3f::new(0.0, 0.0, 0.0));
        assert_eq!(p1, Vector3f::new(1.0, 1.0, 0.0));
        assert_eq!(p2, Vector3f::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_load_model_triangles_applies_model_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("quad.obj")).unwrap();
        file.write_all(QUAD.as_bytes()).unwrap();
        drop(file);

        let model = crate::core::model::parse_model("Model file[quad.obj] translate[0 0 -3] scale[2 2 2]", 5).unwrap();
        let triangles = load_model_triangles(&model, dir.path()).unwrap();
        let (_, p1, _) = triangles[0].vertices();
        assert!((p1 - Vector3f::new(2.0, 0.0, -3.0)).norm() < 1e-5);
    }

    #[test]
    fn test_missing_model_file() {
        let model = ModelInstance::new("does_not_exist.obj".to_string());
        let err = load_model_triangles(&model, Path::new("/nonexistent")).unwrap_err();
        assert!(matches!(err, ObjLoadError::Io { .. }));
    }
}
