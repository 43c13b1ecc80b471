// Copyright @yucwang 2026

use std::fmt;

use nalgebra::Point3;

use crate::core::directive::{assign, collect_missing, Directive, DirectiveErrorKind};
use crate::core::field_scanner::FieldScanner;
use crate::math::constants::{deg_to_rad, world_up, Float, Matrix4f, Vector3f, EPSILON};
use crate::math::ray::Ray3f;
use crate::math::transform::rotate_about;

#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    NonPositiveFilm { width: u32, height: u32 },
    FieldOfViewOutOfRange(Float),
    ZeroViewDirection,
    /// The view direction is parallel to the world up axis, so no right
    /// vector can be derived from it.
    DegenerateBasis,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NonPositiveFilm { width, height } =>
                write!(f, "film size {}x{} must be positive", width, height),
            CameraError::FieldOfViewOutOfRange(fov) =>
                write!(f, "vertical field of view {} is outside (0, 180) degrees", fov),
            CameraError::ZeroViewDirection => write!(f, "view direction has zero length"),
            CameraError::DegenerateBasis =>
                write!(f, "view direction is parallel to the world up axis (0, 1, 0)"),
        }
    }
}

impl std::error::Error for CameraError {}

/// Inputs of the camera geometry builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub film_width: u32,
    pub film_height: u32,
    /// Degrees.
    pub vertical_fov: Float,
    pub origin: Vector3f,
    pub view_direction: Vector3f,
}

/// Orthonormal frame and image plane derived from [`CameraParams`].
///
/// The image plane sits one unit along the view direction. A point on it is
/// `top_left_corner + u * horizontal_edge + v * vertical_edge` for
/// `(u, v)` in `[0, 1] x [0, 1]`, with `v` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraGeometry {
    pub aspect_ratio: Float,
    pub lens_width: Float,
    pub lens_height: Float,
    pub right: Vector3f,
    pub up: Vector3f,
    pub top_left_corner: Vector3f,
    pub horizontal_edge: Vector3f,
    pub vertical_edge: Vector3f,
}

impl CameraGeometry {
    /// Builds the frame for `params`. `params.view_direction` is normalized
    /// here, so callers may pass any non-zero vector.
    pub fn build(params: &CameraParams) -> Result<CameraGeometry, CameraError> {
        let params = validate(params)?;
        let view = params.view_direction;

        let right = view.cross(&world_up());
        if right.norm() < EPSILON {
            return Err(CameraError::DegenerateBasis);
        }
        let right = right.normalize();
        let up = right.cross(&view).normalize();

        let aspect_ratio = params.film_width as Float / params.film_height as Float;
        let theta = deg_to_rad(params.vertical_fov);
        let lens_height = (0.5 * theta).tan();
        let lens_width = lens_height * aspect_ratio;

        let top_left_corner = params.origin
            + (-0.5 * lens_width) * right
            + (0.5 * lens_height) * up
            + view;

        Ok(CameraGeometry {
            aspect_ratio,
            lens_width,
            lens_height,
            right,
            up,
            top_left_corner,
            horizontal_edge: lens_width * right,
            vertical_edge: lens_height * (-up),
        })
    }
}

fn validate(params: &CameraParams) -> Result<CameraParams, CameraError> {
    if params.film_width == 0 || params.film_height == 0 {
        return Err(CameraError::NonPositiveFilm { width: params.film_width, height: params.film_height });
    }
    let fov = params.vertical_fov;
    if !(fov > 0.0 && fov < 180.0) {
        return Err(CameraError::FieldOfViewOutOfRange(fov));
    }
    let length = params.view_direction.norm();
    if !length.is_finite() || length < EPSILON {
        return Err(CameraError::ZeroViewDirection);
    }

    let mut normalized = *params;
    normalized.view_direction = params.view_direction / length;
    Ok(normalized)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    params: CameraParams,
    geometry: CameraGeometry,
}

impl Camera {
    pub fn new(params: CameraParams) -> Result<Self, CameraError> {
        let geometry = CameraGeometry::build(&params)?;
        let params = validate(&params)?;
        Ok(Self { params, geometry })
    }

    /// Replaces the inputs and rebuilds the derived frame. On error the
    /// camera is left as it was.
    pub fn recompute(&mut self, params: CameraParams) -> Result<(), CameraError> {
        *self = Camera::new(params)?;
        Ok(())
    }

    /// Rebuilds the derived frame from the current inputs.
    pub fn update(&mut self) -> Result<(), CameraError> {
        self.recompute(self.params)
    }

    pub fn translate(&mut self, delta: &Vector3f) -> Result<(), CameraError> {
        let mut params = self.params;
        params.origin += delta;
        self.recompute(params)
    }

    pub fn set_view_direction(&mut self, direction: Vector3f) -> Result<(), CameraError> {
        let mut params = self.params;
        params.view_direction = direction;
        self.recompute(params)
    }

    /// Free-look rotation: `yaw` turns about the camera's down axis
    /// (positive yaw looks right), `pitch` about its right axis (positive
    /// pitch looks up). Both in radians.
    pub fn rotate(&mut self, yaw: Float, pitch: Float) -> Result<(), CameraError> {
        let view = self.params.view_direction;
        let view = rotate_about(&view, &(-self.geometry.up), yaw);
        let view = rotate_about(&view, &self.geometry.right, pitch);
        self.set_view_direction(view)
    }

    pub fn params(&self) -> &CameraParams {
        &self.params
    }

    pub fn geometry(&self) -> &CameraGeometry {
        &self.geometry
    }

    pub fn film_width(&self) -> u32 {
        self.params.film_width
    }

    pub fn film_height(&self) -> u32 {
        self.params.film_height
    }

    pub fn vertical_fov(&self) -> Float {
        self.params.vertical_fov
    }

    pub fn origin(&self) -> Vector3f {
        self.params.origin
    }

    pub fn view_direction(&self) -> Vector3f {
        self.params.view_direction
    }

    pub fn aspect_ratio(&self) -> Float {
        self.geometry.aspect_ratio
    }

    pub fn right(&self) -> Vector3f {
        self.geometry.right
    }

    pub fn up(&self) -> Vector3f {
        self.geometry.up
    }

    pub fn top_left_corner(&self) -> Vector3f {
        self.geometry.top_left_corner
    }

    pub fn horizontal_edge(&self) -> Vector3f {
        self.geometry.horizontal_edge
    }

    pub fn vertical_edge(&self) -> Vector3f {
        self.geometry.vertical_edge
    }

    pub fn image_plane_point(&self, u: Float, v: Float) -> Vector3f {
        self.geometry.top_left_corner + u * self.geometry.horizontal_edge + v * self.geometry.vertical_edge
    }

    pub fn primary_ray(&self, u: Float, v: Float) -> Ray3f {
        let origin = self.params.origin;
        Ray3f::new(origin, self.image_plane_point(u, v) - origin)
    }

    /// Right-handed look-at view matrix followed by an OpenGL style
    /// perspective projection. The frustum is the one spanned by the image
    /// plane, so rasterized and ray traced views cover the same region.
    pub fn view_projection_matrix(&self, near: Float, far: Float) -> Matrix4f {
        let eye = Point3::from(self.params.origin);
        let target = Point3::from(self.params.origin + self.params.view_direction);
        let view = Matrix4f::look_at_rh(&eye, &target, &world_up());
        // The image plane sits one unit away and is lens_height tall.
        let fovy = 2.0 * (0.5 * self.geometry.lens_height).atan();
        let projection = Matrix4f::new_perspective(self.geometry.aspect_ratio, fovy, near, far);
        projection * view
    }

    /// Camera block as laid out for a uniform buffer: origin, top left
    /// corner, horizontal edge and vertical edge, each padded to four floats.
    pub fn uniform_data(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        let rows = [self.params.origin,
                    self.geometry.top_left_corner,
                    self.geometry.horizontal_edge,
                    self.geometry.vertical_edge];
        for (i, v) in rows.iter().enumerate() {
            out[i * 4] = v.x;
            out[i * 4 + 1] = v.y;
            out[i * 4 + 2] = v.z;
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
enum CameraField {
    Position,
    ViewDirection,
    VerticalFov,
    Width,
    Height,
}

const CAMERA_FIELDS: &[(&str, CameraField)] = &[
    ("position", CameraField::Position),
    ("view_direction", CameraField::ViewDirection),
    ("vertical_fov", CameraField::VerticalFov),
    ("width", CameraField::Width),
    ("height", CameraField::Height),
];

/// Parses the sub-fields of a `Camera` line starting at `offset`.
pub fn parse_camera(line: &str, offset: usize) -> Result<Camera, DirectiveErrorKind> {
    let mut position = None;
    let mut view_direction = None;
    let mut vertical_fov = None;
    let mut width = None;
    let mut height = None;

    let mut scanner = FieldScanner::new(line, offset);
    while let Some((keyword, field)) = scanner.next_field(CAMERA_FIELDS) {
        match field {
            CameraField::Position =>
                assign(&mut position, scanner.vector3(keyword)?, Directive::Camera, keyword),
            CameraField::ViewDirection =>
                assign(&mut view_direction, scanner.vector3(keyword)?, Directive::Camera, keyword),
            CameraField::VerticalFov =>
                assign(&mut vertical_fov, scanner.scalar(keyword)?, Directive::Camera, keyword),
            CameraField::Width =>
                assign(&mut width, scanner.unsigned(keyword)?, Directive::Camera, keyword),
            CameraField::Height =>
                assign(&mut height, scanner.unsigned(keyword)?, Directive::Camera, keyword),
        }
    }

    match (position, view_direction, vertical_fov, width, height) {
        (Some(origin), Some(view_direction), Some(vertical_fov), Some(film_width), Some(film_height)) => {
            let camera = Camera::new(CameraParams {
                film_width,
                film_height,
                vertical_fov,
                origin,
                view_direction,
            })?;
            Ok(camera)
        }
        _ => Err(DirectiveErrorKind::MissingFields(collect_missing(&[
            ("position", position.is_some()),
            ("view_direction", view_direction.is_some()),
            ("vertical_fov", vertical_fov.is_some()),
            ("width", width.is_some()),
            ("height", height.is_some()),
        ]))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field_scanner::ScanError;

    const TOL: Float = 1e-5;

    fn params(view_direction: Vector3f) -> CameraParams {
        CameraParams {
            film_width: 640,
            film_height: 480,
            vertical_fov: 60.0,
            origin: Vector3f::new(1.0, 2.0, 3.0),
            view_direction,
        }
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let directions = [
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.3, -0.7, 0.2),
            Vector3f::new(-2.0, 5.0, 1.0),
            Vector3f::new(0.0, -0.2, 1.0),
        ];
        for dir in directions.iter() {
            let camera = Camera::new(params(*dir)).unwrap();
            let (r, u, v) = (camera.right(), camera.up(), camera.view_direction());
            assert!(r.dot(&u).abs() < TOL);
            assert!(r.dot(&v).abs() < TOL);
            assert!(u.dot(&v).abs() < TOL);
            assert!((r.norm() - 1.0).abs() < TOL);
            assert!((u.norm() - 1.0).abs() < TOL);
            assert!((v.norm() - 1.0).abs() < TOL);
            // Right handed: right x up == -view.
            assert!((r.cross(&u) + v).norm() < TOL);
        }
    }

    #[test]
    fn test_image_plane_corners_are_symmetric() {
        let camera = Camera::new(params(Vector3f::new(0.3, -0.2, -1.0))).unwrap();
        let c00 = camera.image_plane_point(0.0, 0.0);
        let c10 = camera.image_plane_point(1.0, 0.0);
        let c01 = camera.image_plane_point(0.0, 1.0);
        let c11 = camera.image_plane_point(1.0, 1.0);

        let normal = (c10 - c00).cross(&(c01 - c00));
        assert!(normal.dot(&(c11 - c00)).abs() < 1e-4);

        let center = 0.25 * (c00 + c10 + c01 + c11);
        assert!((center - (camera.origin() + camera.view_direction())).norm() < TOL);

        let width = (c10 - c00).norm();
        let height = (c01 - c00).norm();
        assert!((width / height - camera.aspect_ratio()).abs() < TOL);
        assert!(((c11 - c00).norm() - (c10 - c01).norm()).abs() < TOL);
    }

    #[test]
    fn test_build_is_idempotent() {
        let p = params(Vector3f::new(0.1, 0.2, -0.9));
        let a = CameraGeometry::build(&p).unwrap();
        let b = CameraGeometry::build(&p).unwrap();
        assert_eq!(a, b);

        let mut camera = Camera::new(p).unwrap();
        let before = *camera.geometry();
        camera.update().unwrap();
        assert_eq!(before, *camera.geometry());
    }

    #[test]
    fn test_unit_film_ninety_degrees() {
        let camera = Camera::new(CameraParams {
            film_width: 2,
            film_height: 2,
            vertical_fov: 90.0,
            origin: Vector3f::zeros(),
            view_direction: Vector3f::new(0.0, 0.0, -1.0),
        }).unwrap();

        assert_eq!(camera.aspect_ratio(), 1.0);
        assert!((camera.geometry().lens_height - 1.0).abs() < TOL);
        assert!((camera.top_left_corner() - Vector3f::new(-0.5, 0.5, -1.0)).norm() < TOL);
        assert!((camera.horizontal_edge() - Vector3f::new(1.0, 0.0, 0.0)).norm() < TOL);
        assert!((camera.vertical_edge() - Vector3f::new(0.0, -1.0, 0.0)).norm() < TOL);

        let ray = camera.primary_ray(0.5, 0.5);
        assert!((ray.dir() - Vector3f::new(0.0, 0.0, -1.0)).norm() < TOL);
    }

    #[test]
    fn test_view_direction_is_normalized() {
        let camera = Camera::new(params(Vector3f::new(0.0, 0.0, -7.0))).unwrap();
        assert!((camera.view_direction() - Vector3f::new(0.0, 0.0, -1.0)).norm() < TOL);
    }

    #[test]
    fn test_degenerate_and_invalid_inputs() {
        assert_eq!(Camera::new(params(Vector3f::new(0.0, 3.0, 0.0))).unwrap_err(), CameraError::DegenerateBasis);
        assert_eq!(Camera::new(params(Vector3f::new(0.0, -1.0, 0.0))).unwrap_err(), CameraError::DegenerateBasis);
        assert_eq!(Camera::new(params(Vector3f::zeros())).unwrap_err(), CameraError::ZeroViewDirection);

        let mut p = params(Vector3f::new(0.0, 0.0, -1.0));
        p.vertical_fov = 180.0;
        assert_eq!(Camera::new(p).unwrap_err(), CameraError::FieldOfViewOutOfRange(180.0));
        p.vertical_fov = 45.0;
        p.film_height = 0;
        assert!(matches!(Camera::new(p), Err(CameraError::NonPositiveFilm { .. })));
    }

    #[test]
    fn test_recompute_keeps_camera_on_error() {
        let mut camera = Camera::new(params(Vector3f::new(0.0, 0.0, -1.0))).unwrap();
        let before = camera;
        assert!(camera.set_view_direction(Vector3f::new(0.0, 1.0, 0.0)).is_err());
        assert_eq!(camera, before);

        camera.translate(&Vector3f::new(1.0, 0.0, 0.0)).unwrap();
        assert!((camera.origin() - Vector3f::new(2.0, 2.0, 3.0)).norm() < TOL);
        assert!((camera.top_left_corner() - before.top_left_corner() - Vector3f::new(1.0, 0.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn test_rotate_yaw_turns_right() {
        let mut camera = Camera::new(params(Vector3f::new(0.0, 0.0, -1.0))).unwrap();
        camera.rotate(0.5 * std::f32::consts::PI, 0.0).unwrap();
        assert!((camera.view_direction() - Vector3f::new(1.0, 0.0, 0.0)).norm() < 1e-4);

        let mut camera = Camera::new(params(Vector3f::new(0.0, 0.0, -1.0))).unwrap();
        camera.rotate(0.0, 0.25 * std::f32::consts::PI).unwrap();
        assert!(camera.view_direction().y > 0.7);
    }

    #[test]
    fn test_view_projection_matches_image_plane() {
        let camera = Camera::new(CameraParams {
            film_width: 2,
            film_height: 2,
            vertical_fov: 90.0,
            origin: Vector3f::zeros(),
            view_direction: Vector3f::new(0.0, 0.0, -1.0),
        }).unwrap();
        let vp = camera.view_projection_matrix(0.1, 100.0);
        let project = |p: Vector3f| {
            let clip = vp * p.push(1.0);
            clip.xyz() / clip.w
        };

        let top = project(camera.image_plane_point(0.5, 0.0));
        assert!(top.x.abs() < 1e-4);
        assert!((top.y - 1.0).abs() < 1e-4);

        let left = project(camera.image_plane_point(0.0, 0.5));
        assert!((left.x + 1.0).abs() < 1e-4);
        assert!(left.y.abs() < 1e-4);

        let bottom_right = project(camera.image_plane_point(1.0, 1.0));
        assert!((bottom_right.x - 1.0).abs() < 1e-4);
        assert!((bottom_right.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_uniform_data_layout() {
        let camera = Camera::new(params(Vector3f::new(0.0, 0.0, -1.0))).unwrap();
        let data = camera.uniform_data();
        assert_eq!(&data[0..4], &[1.0f32, 2.0, 3.0, 0.0]);
        assert_eq!(data[4], camera.top_left_corner().x);
        assert_eq!(data[9], camera.horizontal_edge().y);
        assert_eq!(data[14], camera.vertical_edge().z);
        assert_eq!(data[15], 0.0);
    }

    #[test]
    fn test_view_projection_centers_view_axis() {
        let camera = Camera::new(params(Vector3f::new(0.0, 0.0, -1.0))).unwrap();
        let vp = camera.view_projection_matrix(0.01, 100.0);
        let p = camera.origin() + 5.0 * camera.view_direction();
        let clip = vp * p.push(1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < TOL);
        assert!(ndc.y.abs() < TOL);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_parse_camera_any_order() {
        let line = "Camera height[2] width[4] vertical_fov[90] view_direction[0 0 -1] position[0 1 0]";
        let camera = parse_camera(line, 6).unwrap();
        assert_eq!(camera.film_width(), 4);
        assert_eq!(camera.film_height(), 2);
        assert_eq!(camera.aspect_ratio(), 2.0);
        assert_eq!(camera.origin(), Vector3f::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_camera_integral_float_film_size() {
        let line = "Camera position[0 0 0] view_direction[0 0 -1] vertical_fov[60] width[640.0] height[480]";
        let camera = parse_camera(line, 6).unwrap();
        assert_eq!(camera.film_width(), 640);
        assert_eq!(camera.film_height(), 480);
    }

    #[test]
    fn test_parse_camera_reports_every_missing_field() {
        let err = parse_camera("Camera position[0 0 0] width[2]", 6).unwrap_err();
        assert_eq!(err, DirectiveErrorKind::MissingFields(vec!["view_direction", "vertical_fov", "height"]));
    }

    #[test]
    fn test_parse_camera_propagates_scan_and_geometry_errors() {
        let err = parse_camera("Camera position[0 0 x] view_direction[0 0 -1] vertical_fov[45] width[2] height[2]", 6).unwrap_err();
        assert!(matches!(err, DirectiveErrorKind::Scan(ScanError::InvalidNumber { keyword: "position", .. })));

        let err = parse_camera("Camera position[0 0 0] view_direction[0 1 0] vertical_fov[45] width[2] height[2]", 6).unwrap_err();
        assert_eq!(err, DirectiveErrorKind::Camera(CameraError::DegenerateBasis));
    }
}
