use crate::error::SvgToolboxError;
use std::path::{Component, Path, PathBuf};

// Caps hostile inputs before they reach the filesystem.
const MAX_PATH_LENGTH: usize = 4096;

fn validate_file_path(
    path: &Path,
    base_directory: Option<&Path>,
) -> Result<PathBuf, SvgToolboxError> {
    let raw = path.as_os_str();
    if raw.is_empty() {
        return Err(SvgToolboxError::UnsafePath(
            "path must be non-empty".to_string(),
        ));
    }
    if raw.len() > MAX_PATH_LENGTH {
        return Err(SvgToolboxError::UnsafePath(format!(
            "path length exceeds {MAX_PATH_LENGTH} characters"
        )));
    }
    if path.to_string_lossy().contains('\0') {
        return Err(SvgToolboxError::UnsafePath(
            "path contains null bytes".to_string(),
        ));
    }
    if path
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(SvgToolboxError::UnsafePath(
            "path traversal detected: \"..\" components are not allowed".to_string(),
        ));
    }

    let absolute = std::path::absolute(path)?;

    if let Some(base) = base_directory {
        let base = std::path::absolute(base)?;
        if !absolute.starts_with(&base) {
            return Err(SvgToolboxError::UnsafePath(format!(
                "path escapes the allowed directory {}",
                base.display()
            )));
        }
    }

    Ok(absolute)
}

fn check_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), SvgToolboxError> {
    if allowed_extensions.is_empty() {
        return Ok(());
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if allowed_extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
    {
        return Ok(());
    }
    Err(SvgToolboxError::UnsafePath(format!(
        "extension {:?} is not allowed (expected one of {})",
        extension,
        allowed_extensions.join(", ")
    )))
}

/// Validates a path for reading: non-empty, bounded length, no NUL bytes,
/// no `..` components, optionally restricted to a set of extensions.
/// Returns the absolutized path.
pub fn validate_read_path(
    path: impl AsRef<Path>,
    allowed_extensions: &[&str],
) -> Result<PathBuf, SvgToolboxError> {
    let validated = validate_file_path(path.as_ref(), None)?;
    check_extension(&validated, allowed_extensions)?;
    Ok(validated)
}

/// Validates a path for writing. Beyond the read checks, the path may be
/// confined to `base_directory`, and missing parent directories are created.
pub fn validate_write_path(
    path: impl AsRef<Path>,
    allowed_extensions: &[&str],
    base_directory: Option<&Path>,
) -> Result<PathBuf, SvgToolboxError> {
    let validated = validate_file_path(path.as_ref(), base_directory)?;
    check_extension(&validated, allowed_extensions)?;
    if let Some(parent) = validated.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_path() {
        assert!(matches!(
            validate_read_path("", &[]),
            Err(SvgToolboxError::UnsafePath(_))
        ));
    }

    #[test]
    fn rejects_parent_dir_components() {
        assert!(matches!(
            validate_read_path("../etc/passwd", &[]),
            Err(SvgToolboxError::UnsafePath(_))
        ));
        assert!(matches!(
            validate_read_path("images/../../secret.svg", &[]),
            Err(SvgToolboxError::UnsafePath(_))
        ));
    }

    #[test]
    fn rejects_disallowed_extension() {
        assert!(matches!(
            validate_read_path("picture.jpeg", &["svg"]),
            Err(SvgToolboxError::UnsafePath(_))
        ));
        assert!(validate_read_path("picture.SVG", &["svg"]).is_ok());
    }

    #[test]
    fn absolutizes_relative_paths() {
        let validated = validate_read_path("drawing.svg", &["svg"]).unwrap();
        assert!(validated.is_absolute());
    }

    #[test]
    fn write_path_is_confined_to_base_directory() {
        let base = tempfile::tempdir().unwrap();
        let inside = base.path().join("out/diff.png");
        assert!(validate_write_path(&inside, &["png"], Some(base.path())).is_ok());
        // Parent directories were created on the way.
        assert!(inside.parent().unwrap().exists());

        let outside = std::env::temp_dir().join("svg-toolbox-escape.png");
        assert!(matches!(
            validate_write_path(&outside, &["png"], Some(base.path())),
            Err(SvgToolboxError::UnsafePath(_))
        ));
    }
}
