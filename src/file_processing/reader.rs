use crate::errors::AppError;
use crate::file_processing::response_parser::language_for_path;
use crate::models::ParsedFile;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Maximum allowed file size (10 MB).
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const TEXT_EXTENSIONS: [&str; 19] = [
    "txt", "rs", "ts", "js", "go", "json", "py", "cpp", "c", "h", "hpp", "css", "html", "md",
    "yaml", "yml", "toml", "xml", "tsx",
];

/// Reads the given files and directories into project files.
///
/// Paths of files found inside a directory are relative to that directory;
/// explicitly listed files keep only their file name.
pub async fn read_project(paths: &[String], ignore: &[String]) -> Result<Vec<ParsedFile>, AppError> {
    let mut project = Vec::new();
    for (root, path) in get_project_files(paths, ignore) {
        project.push(read_project_file(&root, &path).await?);
    }
    Ok(project)
}

async fn read_project_file(root: &Path, path: &Path) -> Result<ParsedFile, AppError> {
    let metadata = fs::metadata(path).await?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(AppError::InvalidInput(format!(
            "File too large: {} (max {} bytes)",
            path.display(),
            MAX_FILE_SIZE
        )));
    }

    let content = fs::read_to_string(path).await?;
    let relative = path
        .strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    Ok(ParsedFile {
        language: language_for_path(&relative).to_string(),
        path: relative,
        content,
    })
}

/// Resolves the list of files to read, as `(root, file)` pairs.
pub fn get_project_files(paths: &[String], ignore_paths: &[String]) -> Vec<(PathBuf, PathBuf)> {
    let ignored: HashSet<_> = ignore_paths.iter().map(PathBuf::from).collect();
    let mut files = Vec::new();

    for path in paths {
        let path = PathBuf::from(path);
        if path.is_file() && !is_ignored(&path, &ignored) {
            let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
            files.push((root, path));
        } else if path.is_dir() {
            for file in get_directory_text_files(&path, &ignored) {
                files.push((path.clone(), file));
            }
        } else {
            log::warn!("Skipping {}: not a readable file or directory", path.display());
        }
    }
    files
}

fn is_ignored(path: &Path, ignored: &HashSet<PathBuf>) -> bool {
    ignored
        .iter()
        .any(|ignored_path| path.starts_with(ignored_path))
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

fn get_directory_text_files(directory: &Path, ignored: &HashSet<PathBuf>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry.path(), ignored))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Failed to read directory entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_text_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}
