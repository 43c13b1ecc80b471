// Copyright @yucwang 2021

use crate::core::model::ModelInstance;
use crate::core::rng::LcgRng;
use crate::core::scene::SceneDescription;
use crate::core::shape::Shape;
use crate::io::obj_utils::{load_model_triangles, ObjLoadError};
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;
use crate::shapes::sphere::Sphere;
use crate::shapes::triangle::Triangle;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

pub use super::renderer::Renderer;

const UNLIT_GREY: Float = 0.5;

/// World-space triangles of one model plus the flat color it is shown with.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    triangles: Vec<Triangle>,
    albedo: Vector3f,
}

impl MeshInstance {
    pub fn new(triangles: Vec<Triangle>, albedo: Vector3f) -> Self {
        Self { triangles, albedo }
    }

    pub fn from_model(model: &ModelInstance, base_dir: &Path) -> Result<Self, ObjLoadError> {
        let triangles = load_model_triangles(model, base_dir)?;
        Ok(Self::new(triangles, preview_albedo(model)))
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn albedo(&self) -> Vector3f {
        self.albedo
    }
}

/// Diffuse color if the model has one, else specular, else grey.
pub fn preview_albedo(model: &ModelInstance) -> Vector3f {
    model.diffuse
        .or(model.specular)
        .unwrap_or_else(|| Vector3f::new(UNLIT_GREY, UNLIT_GREY, UNLIT_GREY))
}

/// Flat-shaded primary-ray renderer used to eyeball a parsed scene.
pub struct PreviewRenderer {
    spp: u32,
    seed: u64,
}

impl PreviewRenderer {
    pub fn new(spp: u32, seed: u64) -> Self {
        Self { spp: spp.max(1), seed }
    }

    pub fn spp(&self) -> u32 {
        self.spp
    }

    fn shade(ray: &Ray3f, lights: &[(Sphere, Vector3f)], meshes: &[MeshInstance]) -> Vector3f {
        let mut nearest = ray.max_t;
        let mut color = Vector3f::zeros();

        for (sphere, emittance) in lights {
            if let Some(hit) = sphere.ray_intersection(ray) {
                if hit.t < nearest {
                    nearest = hit.t;
                    color = *emittance;
                }
            }
        }

        for mesh in meshes {
            for triangle in mesh.triangles() {
                if let Some(hit) = triangle.ray_intersection(ray) {
                    if hit.t < nearest {
                        nearest = hit.t;
                        color = mesh.albedo() * hit.geo_normal.dot(&ray.dir()).abs();
                    }
                }
            }
        }

        color
    }

    fn render_row(&self, scene: &SceneDescription, lights: &[(Sphere, Vector3f)],
                  meshes: &[MeshInstance], y: usize) -> Vec<Vector3f> {
        let camera = scene.camera();
        let width = camera.film_width() as usize;
        let height = camera.film_height() as usize;
        let inv_spp = 1.0 / (self.spp as Float);

        (0..width).map(|x| {
            let mut rng = LcgRng::for_pixel(self.seed, x, y);
            let mut color = Vector3f::zeros();
            for _sample in 0..self.spp {
                let jitter = rng.uniform_2d();
                let u = (x as Float + jitter.x) / width as Float;
                let v = (y as Float + jitter.y) / height as Float;
                color += Self::shade(&camera.primary_ray(u, v), lights, meshes);
            }
            color * inv_spp
        }).collect()
    }
}

impl Renderer for PreviewRenderer {
    fn render(&self, scene: &SceneDescription, meshes: &[MeshInstance]) -> Bitmap {
        let width = scene.camera().film_width() as usize;
        let height = scene.camera().film_height() as usize;
        let mut bitmap = Bitmap::new(width, height);
        if width == 0 || height == 0 {
            return bitmap;
        }

        let lights: Vec<(Sphere, Vector3f)> = scene.spherical_lights().iter()
            .map(|light| (Sphere::from_light(light), light.emittance_rgb()))
            .collect();
        log::info!("Preview rendering {}x{} at {} spp, {} lights, {} meshes.",
                   width, height, self.spp, lights.len(), meshes.len());

        let progress = ProgressBar::new(height as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_row = Arc::new(AtomicUsize::new(0));
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(height);
        let (tx, rx) = mpsc::channel::<(usize, Vec<Vector3f>)>();
        let lights_ref: &[(Sphere, Vector3f)] = &lights;

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_row = Arc::clone(&next_row);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let y = next_row.fetch_add(1, Ordering::Relaxed);
                        if y >= height {
                            break;
                        }
                        let row = self.render_row(scene, lights_ref, meshes, y);
                        if tx.send((y, row)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for (y, row) in rx.iter() {
                bitmap.set_row(y, &row);
                progress.inc(1);
            }
        });
        progress.finish_and_clear();
        bitmap
    }
}
