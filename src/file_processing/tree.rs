use crate::file_processing::response_parser::parent_dir;
use crate::models::file_node::{FileNode, NodeKind};
use crate::models::{ParsedFile, ParsedFolder};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name cannot contain '/': {0}")]
    InvalidName(String),
    #[error("An item already exists at {0}")]
    AlreadyExists(String),
    #[error("No folder at {0}")]
    MissingParent(String),
}

/// Builds the project forest from parsed folders and files.
///
/// Folders are materialized first, in input order, then files are attached to
/// their parent folder. Nothing is sorted.
pub fn create_file_tree(files: &[ParsedFile], folders: &[ParsedFolder]) -> Vec<FileNode> {
    let mut tree = Vec::new();

    for folder in folders {
        ensure_folder(&mut tree, &folder.path);
    }

    for file in files {
        let name = file.path.rsplit('/').next().unwrap_or(&file.path).to_string();
        let node = FileNode::file(
            name,
            file.path.clone(),
            Some(file.content.clone()),
            Some(file.language.clone()),
        );

        match parent_dir(&file.path) {
            Some(dir) => ensure_folder(&mut tree, dir).push(node),
            None => tree.push(node),
        }
    }

    tree
}

/// Returns the children of the folder at `path`, creating any missing level.
fn ensure_folder<'a>(tree: &'a mut Vec<FileNode>, path: &str) -> &'a mut Vec<FileNode> {
    let mut level = tree;
    let mut current = String::new();

    for part in path.split('/') {
        if current.is_empty() {
            current.push_str(part);
        } else {
            current.push('/');
            current.push_str(part);
        }

        let index = match level
            .iter()
            .position(|node| node.is_folder() && node.path == current)
        {
            Some(index) => index,
            None => {
                level.push(FileNode::folder(part, current.clone()));
                level.len() - 1
            }
        };

        level = level[index].children.get_or_insert_with(Vec::new);
    }

    level
}

pub fn find_node<'a>(tree: &'a [FileNode], path: &str) -> Option<&'a FileNode> {
    for node in tree {
        if node.path == path {
            return Some(node);
        }
        if let Some(found) = node.children.as_deref().and_then(|c| find_node(c, path)) {
            return Some(found);
        }
    }
    None
}

fn find_node_mut<'a>(tree: &'a mut [FileNode], path: &str) -> Option<&'a mut FileNode> {
    for node in tree.iter_mut() {
        if node.path == path {
            return Some(node);
        }
        if let Some(children) = node.children.as_deref_mut() {
            if let Some(found) = find_node_mut(children, path) {
                return Some(found);
            }
        }
    }
    None
}

/// Flips the expanded state of a folder. Returns false when `path` is not a
/// folder in the tree.
pub fn toggle_folder(tree: &mut [FileNode], path: &str) -> bool {
    match find_node_mut(tree, path) {
        Some(node) if node.is_folder() => {
            node.expanded = Some(!node.is_expanded());
            true
        }
        _ => false,
    }
}

/// Creates an empty file or folder at the root or inside `parent`.
pub fn create_item<'a>(
    tree: &'a mut Vec<FileNode>,
    kind: NodeKind,
    name: &str,
    parent: Option<&str>,
) -> Result<&'a FileNode, TreeError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TreeError::EmptyName);
    }
    if name.contains('/') {
        return Err(TreeError::InvalidName(name.to_string()));
    }

    let path = match parent {
        Some(parent) => format!("{}/{}", parent, name),
        None => name.to_string(),
    };

    let node = match kind {
        NodeKind::Folder => FileNode::folder(name, path.clone()),
        NodeKind::File => FileNode::file(name, path.clone(), None, None),
    };

    let siblings = match parent {
        None => tree,
        Some(parent) => {
            let folder = find_node_mut(tree, parent)
                .filter(|node| node.is_folder())
                .ok_or_else(|| TreeError::MissingParent(parent.to_string()))?;
            let taken = folder
                .children
                .as_ref()
                .is_some_and(|children| children.iter().any(|child| child.path == path));
            if taken {
                return Err(TreeError::AlreadyExists(path));
            }
            folder.expanded = Some(true);
            folder.children.get_or_insert_with(Vec::new)
        }
    };

    if siblings.iter().any(|sibling| sibling.path == path) {
        return Err(TreeError::AlreadyExists(path));
    }

    siblings.push(node);
    Ok(&siblings[siblings.len() - 1])
}

/// Replaces the content of a file node. Returns false if no file has `path`.
pub fn update_file_content(tree: &mut [FileNode], path: &str, content: &str) -> bool {
    match find_node_mut(tree, path) {
        Some(node) if !node.is_folder() => {
            node.content = Some(content.to_string());
            true
        }
        _ => false,
    }
}

/// All file nodes with content, depth first.
pub fn collect_files(tree: &[FileNode]) -> Vec<ParsedFile> {
    let mut files = Vec::new();
    collect_into(tree, &mut files);
    files
}

fn collect_into(nodes: &[FileNode], files: &mut Vec<ParsedFile>) {
    for node in nodes {
        if let (NodeKind::File, Some(content)) = (node.kind, node.content.as_deref()) {
            if !content.is_empty() {
                files.push(ParsedFile {
                    path: node.path.clone(),
                    content: content.to_string(),
                    language: node.language.clone().unwrap_or_else(|| {
                        crate::file_processing::response_parser::language_for_path(&node.path)
                            .to_string()
                    }),
                });
            }
        }
        if let Some(children) = node.children.as_deref() {
            collect_into(children, files);
        }
    }
}

/// The file selected after a generation: the first root file, else the first
/// file directly under the first root node.
pub fn first_file(tree: &[FileNode]) -> Option<&FileNode> {
    tree.iter().find(|node| !node.is_folder()).or_else(|| {
        tree.first()
            .and_then(|node| node.children.as_deref())
            .and_then(|children| children.iter().find(|node| !node.is_folder()))
    })
}

/// Whether editing `path` requires the preview to be rebuilt.
pub fn affects_preview(path: &str) -> bool {
    let extension = path.rsplit('.').next().unwrap_or_default().to_lowercase();
    matches!(extension.as_str(), "html" | "css" | "js" | "ts")
}

/// Indented listing used by the workshop `tree` command.
pub fn render_tree(tree: &[FileNode]) -> Vec<String> {
    let mut lines = Vec::new();
    render_level(tree, 0, &mut lines);
    lines
}

fn render_level(nodes: &[FileNode], depth: usize, lines: &mut Vec<String>) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        if node.is_folder() {
            let marker = if node.is_expanded() { "▾" } else { "▸" };
            lines.push(format!("{}{} {}/", indent, marker, node.name));
            if node.is_expanded() {
                if let Some(children) = node.children.as_deref() {
                    render_level(children, depth + 1, lines);
                }
            }
        } else {
            lines.push(format!("{}  {}", indent, node.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processing::response_parser::parse_ai_response;

    fn sample() -> (Vec<ParsedFile>, Vec<ParsedFolder>) {
        let parsed = parse_ai_response(
            "### FILE: index.html\n<html></html>\n### FILE: src/js/app.js\nrun();\n### FILE: src/style.css\nbody{}\n",
        );
        (parsed.files, parsed.folders)
    }

    #[test]
    fn builds_nested_folders_in_input_order() {
        let (files, folders) = sample();
        let tree = create_file_tree(&files, &folders);

        let names: Vec<_> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["src", "index.html"]);

        let src = &tree[0];
        assert!(src.is_folder());
        assert!(!src.is_expanded());
        let children: Vec<_> = src
            .children
            .as_ref()
            .unwrap()
            .iter()
            .map(|n| n.path.as_str())
            .collect();
        assert_eq!(children, vec!["src/js", "src/style.css"]);

        let app = find_node(&tree, "src/js/app.js").unwrap();
        assert_eq!(app.content.as_deref(), Some("run();"));
        assert!(app.children.is_none());
    }

    #[test]
    fn building_twice_gives_identical_trees() {
        let (files, folders) = sample();
        let mut doubled = folders.clone();
        doubled.extend(folders.iter().cloned());

        let first = create_file_tree(&files, &folders);
        let second = create_file_tree(&files, &folders);
        assert_eq!(first, second);
        assert_eq!(create_file_tree(&[], &doubled), create_file_tree(&[], &folders));
    }

    #[test]
    fn files_without_declared_folders_still_attach() {
        let files = vec![ParsedFile {
            path: "deep/dir/file.md".to_string(),
            content: "x".to_string(),
            language: "markdown".to_string(),
        }];
        let tree = create_file_tree(&files, &[]);
        assert_eq!(tree.len(), 1);
        assert!(find_node(&tree, "deep/dir").unwrap().is_folder());
    }

    #[test]
    fn toggling_only_affects_folders() {
        let (files, folders) = sample();
        let mut tree = create_file_tree(&files, &folders);

        assert!(toggle_folder(&mut tree, "src/js"));
        assert!(find_node(&tree, "src/js").unwrap().is_expanded());
        assert!(toggle_folder(&mut tree, "src/js"));
        assert!(!find_node(&tree, "src/js").unwrap().is_expanded());
        assert!(!toggle_folder(&mut tree, "index.html"));
        assert!(!toggle_folder(&mut tree, "missing"));
    }

    #[test]
    fn creating_items_expands_the_parent() {
        let (files, folders) = sample();
        let mut tree = create_file_tree(&files, &folders);

        let created = create_item(&mut tree, NodeKind::File, " about.html ", Some("src")).unwrap();
        assert_eq!(created.path, "src/about.html");
        assert!(find_node(&tree, "src").unwrap().is_expanded());

        let folder = create_item(&mut tree, NodeKind::Folder, "assets", None).unwrap();
        assert_eq!(folder.children.as_deref(), Some(&[][..]));

        assert_eq!(
            create_item(&mut tree, NodeKind::File, "about.html", Some("src")).unwrap_err(),
            TreeError::AlreadyExists("src/about.html".to_string())
        );
        assert_eq!(
            create_item(&mut tree, NodeKind::File, "  ", None).unwrap_err(),
            TreeError::EmptyName
        );
        assert_eq!(
            create_item(&mut tree, NodeKind::File, "x.js", Some("index.html")).unwrap_err(),
            TreeError::MissingParent("index.html".to_string())
        );
    }

    #[test]
    fn rejected_create_leaves_parent_collapsed() {
        let (files, folders) = sample();
        let mut tree = create_file_tree(&files, &folders);
        assert!(!find_node(&tree, "src").unwrap().is_expanded());

        assert_eq!(
            create_item(&mut tree, NodeKind::File, "style.css", Some("src")).unwrap_err(),
            TreeError::AlreadyExists("src/style.css".to_string())
        );
        assert!(!find_node(&tree, "src").unwrap().is_expanded());
    }

    #[test]
    fn collects_only_files_with_content() {
        let (files, folders) = sample();
        let mut tree = create_file_tree(&files, &folders);
        create_item(&mut tree, NodeKind::File, "empty.js", None).unwrap();

        assert!(update_file_content(&mut tree, "index.html", "<p>new</p>"));
        assert!(!update_file_content(&mut tree, "src", "nope"));

        let collected = collect_files(&tree);
        let paths: Vec<_> = collected.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["src/js/app.js", "src/style.css", "index.html"]);
        assert_eq!(collected[2].content, "<p>new</p>");
    }

    #[test]
    fn first_file_prefers_root_files() {
        let (files, folders) = sample();
        let tree = create_file_tree(&files, &folders);
        assert_eq!(first_file(&tree).unwrap().path, "index.html");

        let nested = create_file_tree(&files[1..], &folders);
        assert_eq!(first_file(&nested).unwrap().path, "src/style.css");
    }

    #[test]
    fn preview_relevant_extensions() {
        assert!(affects_preview("index.HTML"));
        assert!(affects_preview("src/main.ts"));
        assert!(!affects_preview("netlify.toml"));
        assert!(!affects_preview("README"));
    }
}
