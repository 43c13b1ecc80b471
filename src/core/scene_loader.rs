// Copyright @yucwang 2026

use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::core::directive::{split_keyword, Directive, DirectiveError};
use crate::core::model::parse_model;
use crate::core::scene::SceneDescription;
use crate::core::settings::{LoaderSettings, UnknownDirectivePolicy};
use crate::emitters::spherical::parse_spherical_light;
use crate::sensors::pinhole::parse_camera;

#[derive(Debug)]
pub enum SceneLoadError {
    EmptyPath,
    Io { path: PathBuf, source: std::io::Error },
    /// No camera was built. Holds the failure of the last `Camera` line, if
    /// there was one.
    MissingCamera(Option<DirectiveError>),
    Directive(DirectiveError),
    UnknownDirective { line_number: usize, keyword: String },
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneLoadError::EmptyPath =>
                write!(f, "the only input parameter needed is the path to the scene description file"),
            SceneLoadError::Io { path, source } =>
                write!(f, "failed to read {}: {}", path.display(), source),
            SceneLoadError::MissingCamera(None) =>
                write!(f, "missing camera: the scene has no Camera directive"),
            SceneLoadError::MissingCamera(Some(err)) =>
                write!(f, "missing camera: {}", err),
            SceneLoadError::Directive(err) => write!(f, "{}", err),
            SceneLoadError::UnknownDirective { line_number, keyword } =>
                write!(f, "unknown directive '{}' on line {}", keyword, line_number),
        }
    }
}

impl std::error::Error for SceneLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneLoadError::Io { source, .. } => Some(source),
            SceneLoadError::Directive(err) => Some(err),
            SceneLoadError::MissingCamera(Some(err)) => Some(err),
            _ => None,
        }
    }
}

impl From<DirectiveError> for SceneLoadError {
    fn from(err: DirectiveError) -> Self {
        SceneLoadError::Directive(err)
    }
}

pub struct SceneLoadResult {
    pub scene: SceneDescription,
    /// Directives that failed and were skipped, in file order.
    pub diagnostics: Vec<DirectiveError>,
    /// Directory that relative model paths resolve against.
    pub base_dir: PathBuf,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneDescription, SceneLoadError> {
    let result = load_scene_with_settings(path, &LoaderSettings::default())?;
    Ok(result.scene)
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P, settings: &LoaderSettings) -> Result<SceneLoadResult, SceneLoadError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(SceneLoadError::EmptyPath);
    }

    log::info!("Loading scene description from: {}.", path.display());
    let file = File::open(path).map_err(|source| SceneLoadError::Io { path: path.to_path_buf(), source })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();

    let mut result = parse_scene_from_reader(BufReader::new(file), settings)
        .map_err(|err| match err {
            SceneLoadError::Io { source, .. } => SceneLoadError::Io { path: path.to_path_buf(), source },
            other => other,
        })?;
    result.base_dir = base_dir;
    Ok(result)
}

pub fn parse_scene(text: &str, settings: &LoaderSettings) -> Result<SceneLoadResult, SceneLoadError> {
    parse_scene_from_reader(text.as_bytes(), settings)
}

/// Reads directives line by line. A directive that fails is logged and
/// skipped unless `settings.fail_fast` is set; the scene as a whole only
/// fails when no camera could be built.
pub fn parse_scene_from_reader<R: BufRead>(mut reader: R, settings: &LoaderSettings) -> Result<SceneLoadResult, SceneLoadError> {
    let mut camera = None;
    let mut camera_error = None;
    let mut models = Vec::new();
    let mut spherical_lights = Vec::new();
    let mut diagnostics = Vec::new();

    let mut buffer = Vec::new();
    let mut line_number = 0;
    loop {
        buffer.clear();
        let read = reader.read_until(b'\n', &mut buffer)
            .map_err(|source| SceneLoadError::Io { path: PathBuf::new(), source })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        // Bytes that are not UTF-8 become U+FFFD instead of failing the load.
        let decoded = String::from_utf8_lossy(&buffer);
        if matches!(decoded, Cow::Owned(_)) {
            log::warn!("Line {} is not valid UTF-8, invalid bytes were replaced.", line_number);
        }
        let decoded: &str = &decoded;
        let line = decoded.strip_suffix('\n').unwrap_or(decoded);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let line = if line_number == 1 {
            line.strip_prefix('\u{FEFF}').unwrap_or(line)
        } else {
            line
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (keyword, offset) = split_keyword(line);
        let directive = match Directive::from_keyword(keyword) {
            Some(directive) => directive,
            None => {
                match settings.unknown_directives {
                    UnknownDirectivePolicy::Ignore =>
                        log::debug!("Ignoring unknown directive '{}' on line {}.", keyword, line_number),
                    UnknownDirectivePolicy::Warn =>
                        log::warn!("Ignoring unknown directive '{}' on line {}.", keyword, line_number),
                    UnknownDirectivePolicy::Error =>
                        return Err(SceneLoadError::UnknownDirective { line_number, keyword: keyword.to_string() }),
                }
                continue;
            }
        };

        let outcome = match directive {
            Directive::Camera => parse_camera(line, offset).map(|parsed| {
                if camera.is_some() {
                    log::warn!("Camera redefined on line {}, keeping the later one.", line_number);
                }
                camera = Some(parsed);
            }),
            Directive::Model => parse_model(line, offset).map(|model| models.push(model)),
            Directive::SphericalLight => parse_spherical_light(line, offset).map(|light| spherical_lights.push(light)),
            Directive::Sphere => {
                log::debug!("Skipping Sphere directive on line {}.", line_number);
                Ok(())
            }
        };

        if let Err(kind) = outcome {
            let err = DirectiveError::new(directive, line_number, line, kind);
            log::error!("{}", err);
            if settings.fail_fast {
                return Err(err.into());
            }
            if directive == Directive::Camera {
                camera_error = Some(err.clone());
            }
            diagnostics.push(err);
        }
    }

    let camera = match camera {
        Some(camera) => camera,
        None => return Err(SceneLoadError::MissingCamera(camera_error)),
    };

    log::info!("Scene loaded: {} model(s), {} spherical light(s), {} skipped directive(s).",
               models.len(), spherical_lights.len(), diagnostics.len());

    Ok(SceneLoadResult {
        scene: SceneDescription::new(camera, models, spherical_lights),
        diagnostics,
        base_dir: PathBuf::from("."),
    })
}
