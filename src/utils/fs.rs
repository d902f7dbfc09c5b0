use std::path::Path;
use tokio::fs;
use crate::utils::{EditorError, EditorResult, ValidationError};

/// An image file as read from disk, before decoding.
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// File name without directories, kept for display and logging
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Reads an image file from disk after validating the path.
pub async fn read_image_file(path: impl AsRef<Path>) -> EditorResult<ImageFile> {
    let path = path.as_ref();
    validate_input_path(path).await?;

    let bytes = fs::read(path)
        .await
        .map_err(|e| EditorError::IO(format!("Failed to read {}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ImageFile { file_name, bytes })
}

/// Validates that the input path exists and is a regular file
pub async fn validate_input_path(path: &Path) -> EditorResult<()> {
    let metadata = match fs::metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ValidationError::path_not_found(path).into());
        }
        Err(e) => return Err(EditorError::from(e)),
    };

    if !metadata.is_file() {
        return Err(ValidationError::not_a_file(path).into());
    }

    Ok(())
}

/// Writes export output, creating the parent directory if needed.
pub async fn write_output_file(path: impl AsRef<Path>, bytes: &[u8]) -> EditorResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::PathError;

    #[tokio::test]
    async fn reads_file_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, b"bytes").unwrap();

        let file = read_image_file(&path).await.unwrap();
        assert_eq!(file.file_name, "cat.png");
        assert_eq!(file.bytes, b"bytes");
    }

    #[tokio::test]
    async fn missing_and_directory_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let err = read_image_file(dir.path().join("nope.png")).await.unwrap_err();
        assert!(matches!(
            err,
            EditorError::Validation(ValidationError::Path(PathError::NotFound(_)))
        ));

        let err = read_image_file(dir.path()).await.unwrap_err();
        assert!(matches!(
            err,
            EditorError::Validation(ValidationError::Path(PathError::NotFile(_)))
        ));
    }

    #[tokio::test]
    async fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("edited.png");
        write_output_file(&path, b"png").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"png");
    }
}
