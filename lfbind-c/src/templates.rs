//! Template documents with named insertion points.
//!
//! Templates are opaque text; generation substitutes literal tokens and
//! assumes each token appears exactly once.
use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;

/// Tokens the interface template must carry.
pub const INTERFACE_PLACEHOLDERS: &[&str] = &["PACKAGE", "STRUCT", "FUNCTIONS", "TAGS"];
/// Tokens the implementation template must carry.
pub const IMPLEMENTATION_PLACEHOLDERS: &[&str] = &["PACKAGE", "VARIABLES", "STRUCT", "FUNCTIONS"];

/// A required placeholder token is absent from a template.
#[derive(Error, Debug)]
#[error("template is missing the {0} placeholder")]
pub struct TemplateError(pub &'static str);

/// The two template documents consumed by one generation run.
pub struct Templates {
    pub interface: String,
    pub implementation: String,
}

impl Templates {
    /// Templates shipped with the tool, following the stock module
    /// header/source layout.
    pub fn builtin() -> Self {
        Self {
            interface: include_str!("../templates/template.h").to_string(),
            implementation: include_str!("../templates/template.c").to_string(),
        }
    }

    /// Read `template.h` and `template.c` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let header = dir.join("template.h");
        let source = dir.join("template.c");
        Ok(Self {
            interface: std::fs::read_to_string(&header)
                .with_context(|| format!("failed to read template: {}", header.display()))?,
            implementation: std::fs::read_to_string(&source)
                .with_context(|| format!("failed to read template: {}", source.display()))?,
        })
    }
}

/// Check every required token up front, so a bad template never produces
/// a partially substituted document.
pub(crate) fn ensure_placeholders(
    template: &str,
    required: &[&'static str],
) -> Result<(), TemplateError> {
    for token in required {
        if !template.contains(token) {
            return Err(TemplateError(token));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_carry_all_placeholders() {
        let templates = Templates::builtin();
        ensure_placeholders(&templates.interface, INTERFACE_PLACEHOLDERS).unwrap();
        ensure_placeholders(&templates.implementation, IMPLEMENTATION_PLACEHOLDERS).unwrap();
    }

    #[test]
    fn test_missing_token_is_reported() {
        let err = ensure_placeholders("PACKAGE STRUCT FUNCTIONS", INTERFACE_PLACEHOLDERS)
            .unwrap_err();
        assert_eq!(err.0, "TAGS");
    }

    #[test]
    fn test_from_dir_reads_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("template.h"), "header").unwrap();
        std::fs::write(dir.path().join("template.c"), "source").unwrap();

        let templates = Templates::from_dir(dir.path()).unwrap();
        assert_eq!(templates.interface, "header");
        assert_eq!(templates.implementation, "source");
    }

    #[test]
    fn test_from_dir_fails_on_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("template.h"), "header").unwrap();

        assert!(Templates::from_dir(dir.path()).is_err());
    }
}
