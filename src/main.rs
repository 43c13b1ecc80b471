// Copyright 2020 TwoCookingMice

use brhan::core::scene_loader::{load_scene_with_settings, SceneLoadResult};
use brhan::core::settings::LoaderSettings;
use brhan::io::exr_utils;
use brhan::renderers::preview::{MeshInstance, PreviewRenderer, Renderer};

use clap::{CommandFactory, Parser};
use console::style;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "brhan")]
#[command(about = "Load a brhan scene file and report what it describes")]
struct Cli {
    /// Scene description file
    #[arg(value_name = "SCENE")]
    scene: String,

    /// Fail the load on directives that are not recognised
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Stop at the first directive that fails to parse
    #[arg(long, default_value_t = false)]
    fail_fast: bool,

    /// Render a flat-shaded preview into this EXR file
    #[arg(long, value_name = "OUT.exr")]
    preview: Option<PathBuf>,

    /// Samples per pixel for the preview
    #[arg(long, default_value_t = 4)]
    spp: u32,

    /// Seed for the preview's pixel jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl Cli {
    fn loader_settings(&self) -> LoaderSettings {
        let mut settings = if self.strict {
            LoaderSettings::strict()
        } else {
            LoaderSettings::default()
        };
        settings.fail_fast = self.fail_fast;
        settings
    }
}

fn print_summary(result: &SceneLoadResult) {
    let scene = &result.scene;
    let camera = scene.camera();
    println!("{} {}x{}, fov {}, origin ({}, {}, {}), looking at ({}, {}, {})",
             style("camera").cyan().bold(),
             camera.film_width(), camera.film_height(), camera.vertical_fov(),
             camera.origin().x, camera.origin().y, camera.origin().z,
             camera.view_direction().x, camera.view_direction().y, camera.view_direction().z);

    for (index, model) in scene.models().iter().enumerate() {
        println!("{} #{} {} [{}]",
                 style("model").green().bold(), index, model.file_path,
                 model.material_name().unwrap_or("no material"));
    }
    for (index, light) in scene.spherical_lights().iter().enumerate() {
        let center = light.center();
        println!("{} #{} center ({}, {}, {}), radius {}",
                 style("light").yellow().bold(), index,
                 center.x, center.y, center.z, light.radius());
    }
    for diagnostic in &result.diagnostics {
        println!("{} {}", style("skipped").red().bold(), diagnostic);
    }
}

fn render_preview(result: &SceneLoadResult, output: &Path, spp: u32, seed: u64) -> bool {
    let mut meshes = Vec::with_capacity(result.scene.models().len());
    for model in result.scene.models() {
        match MeshInstance::from_model(model, &result.base_dir) {
            Ok(mesh) => meshes.push(mesh),
            Err(e) => log::warn!("Model {} left out of the preview: {}.", model.file_path, e),
        }
    }

    let image = PreviewRenderer::new(spp, seed).render(&result.scene, &meshes);
    match exr_utils::write_exr_to_file(&image, output) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to write preview {}: {}.", output.display(), e);
            false
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.scene.trim().is_empty() {
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    }

    let result = match load_scene_with_settings(&cli.scene, &cli.loader_settings()) {
        Ok(result) => result,
        Err(e) => {
            log::error!("Failed to load scene {}: {}.", cli.scene, e);
            return ExitCode::FAILURE;
        }
    };

    print_summary(&result);

    if let Some(output) = &cli.preview {
        if !render_preview(&result, output, cli.spp, cli.seed) {
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
