// Copyright @yucwang 2026

use std::fmt;

use crate::core::field_scanner::ScanError;
use crate::sensors::pinhole::CameraError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Camera,
    Model,
    SphericalLight,
    Sphere,
}

const DIRECTIVES: &[(&str, Directive)] = &[
    ("Camera", Directive::Camera),
    ("Model", Directive::Model),
    ("SphericalLight", Directive::SphericalLight),
    ("Sphere", Directive::Sphere),
];

impl Directive {
    pub fn keyword(self) -> &'static str {
        match self {
            Directive::Camera => "Camera",
            Directive::Model => "Model",
            Directive::SphericalLight => "SphericalLight",
            Directive::Sphere => "Sphere",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Directive> {
        DIRECTIVES.iter()
            .find(|(name, _)| *name == keyword)
            .map(|&(_, directive)| directive)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Splits a directive line into its leading keyword and the byte offset
/// where its sub-fields start.
pub fn split_keyword(line: &str) -> (&str, usize) {
    let start = line.len() - line.trim_start().len();
    let rest = &line[start..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    (&rest[..end], start + end)
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveErrorKind {
    MissingFields(Vec<&'static str>),
    Scan(ScanError),
    Camera(CameraError),
}

impl fmt::Display for DirectiveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveErrorKind::MissingFields(fields) =>
                write!(f, "missing required field(s): {}", fields.join(", ")),
            DirectiveErrorKind::Scan(err) => write!(f, "{}", err),
            DirectiveErrorKind::Camera(err) => write!(f, "{}", err),
        }
    }
}

impl From<ScanError> for DirectiveErrorKind {
    fn from(err: ScanError) -> Self {
        DirectiveErrorKind::Scan(err)
    }
}

impl From<CameraError> for DirectiveErrorKind {
    fn from(err: CameraError) -> Self {
        DirectiveErrorKind::Camera(err)
    }
}

/// A directive line that could not be turned into a record.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveError {
    pub directive: Directive,
    pub line_number: usize,
    pub line: String,
    pub kind: DirectiveErrorKind,
}

impl DirectiveError {
    pub fn new(directive: Directive, line_number: usize, line: &str, kind: DirectiveErrorKind) -> Self {
        Self { directive, line_number, line: line.to_string(), kind }
    }

    pub fn missing_fields(&self) -> &[&'static str] {
        match &self.kind {
            DirectiveErrorKind::MissingFields(fields) => fields,
            _ => &[],
        }
    }
}

impl fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} directive on line {}: {} (line: '{}')",
               self.directive, self.line_number, self.kind, self.line)
    }
}

impl std::error::Error for DirectiveError {}

/// Stores `value`, warning when the field was already given on this line.
pub(crate) fn assign<T>(slot: &mut Option<T>, value: T, directive: Directive, keyword: &str) {
    if slot.is_some() {
        log::warn!("{} field '{}' given more than once, keeping the last value", directive, keyword);
    }
    *slot = Some(value);
}

/// Names of the fields flagged as absent, in the given order.
pub(crate) fn collect_missing(fields: &[(&'static str, bool)]) -> Vec<&'static str> {
    fields.iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_keyword_lookup() {
        assert_eq!(Directive::from_keyword("Camera"), Some(Directive::Camera));
        assert_eq!(Directive::from_keyword("SphericalLight"), Some(Directive::SphericalLight));
        assert_eq!(Directive::from_keyword("Sphere"), Some(Directive::Sphere));
        assert_eq!(Directive::from_keyword("Cameras"), None);
        assert_eq!(Directive::from_keyword("camera"), None);
    }

    #[test]
    fn test_split_keyword() {
        assert_eq!(split_keyword("Model file[a.obj]"), ("Model", 5));
        assert_eq!(split_keyword("  Camera  width[2]"), ("Camera", 8));
        assert_eq!(split_keyword("Sphere"), ("Sphere", 6));
    }

    #[test]
    fn test_error_display_lists_fields() {
        let err = DirectiveError::new(Directive::Model, 3, "Model material[matte]",
                                      DirectiveErrorKind::MissingFields(vec!["file", "diffuse"]));
        let text = err.to_string();
        assert!(text.contains("line 3"));
        assert!(text.contains("file, diffuse"));
        assert!(text.contains("Model material[matte]"));
        assert_eq!(err.missing_fields(), &["file", "diffuse"]);
    }

    #[test]
    fn test_collect_missing_keeps_order() {
        let missing = collect_missing(&[("a", true), ("b", false), ("c", false)]);
        assert_eq!(missing, vec!["b", "c"]);
    }
}
