use crate::errors::AppError;
use crate::models::ParsedFile;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// File name of the assembled preview inside an exported project.
pub const PREVIEW_FILE_NAME: &str = "preview.html";

/// Writes the generated files and the assembled preview under
/// `output_directory`. Returns the number of project files written.
pub async fn save_project(
    files: &[ParsedFile],
    preview: &str,
    output_directory: &Path,
) -> Result<usize, AppError> {
    fs::create_dir_all(output_directory).await?;

    let mut saved_files = 0;
    for file in files {
        let Some(relative) = safe_relative_path(&file.path) else {
            log::warn!("Skipping file with unsafe path: {}", file.path);
            continue;
        };

        let target = output_directory.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, &file.content).await?;
        log::debug!("Saved {}", target.display());
        saved_files += 1;
    }

    if !preview.is_empty() {
        save_preview(preview, &output_directory.join(PREVIEW_FILE_NAME)).await?;
    }

    Ok(saved_files)
}

pub async fn save_preview(preview: &str, target: &Path) -> Result<(), AppError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(target, preview).await?;
    log::debug!("Saved preview to {}", target.display());
    Ok(())
}

/// Rejects absolute paths and any path that climbs out of the project root.
fn safe_relative_path(path: &str) -> Option<PathBuf> {
    let candidate = Path::new(path);
    let mut relative = PathBuf::new();
    for component in candidate.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}
