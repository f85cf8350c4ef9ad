use crate::models::{ParsedFile, ParsedFolder, ParsedResponse};
use regex::Regex;
use std::sync::OnceLock;

/// Header that opens a file block, `### FILE: path`, tolerating spacing
/// variants and a final header with no trailing newline.
fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"###\s*FILE:[ \t]*([^\n]+)(?:\n|\z)").expect("valid marker regex")
    })
}

fn code_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("valid code block regex"))
}

fn whole_fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A```[\w-]*\n(.*?)\n```\z").expect("valid fence regex"))
}

fn opening_fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\A```[\w-]*\n").expect("valid opening fence regex"))
}

/// Splits a raw model reply into files, their folders and the prose that
/// precedes the first file block.
pub fn parse_ai_response(response: &str) -> ParsedResponse {
    let Some(first_marker) = marker_regex().find(response).map(|m| m.start()) else {
        log::debug!("Response has no file blocks, treating it as a chat reply");
        return ParsedResponse {
            files: Vec::new(),
            folders: Vec::new(),
            explanation: response.to_string(),
        };
    };

    let explanation = code_block_regex()
        .replace_all(&response[..first_marker], "")
        .trim()
        .to_string();

    let markers: Vec<_> = marker_regex().captures_iter(response).collect();
    let mut files = Vec::with_capacity(markers.len());
    let mut folders: Vec<ParsedFolder> = Vec::new();

    for (index, captures) in markers.iter().enumerate() {
        let (Some(header), Some(path)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let end = markers
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map(|next| next.start())
            .unwrap_or(response.len());

        let path = path.as_str().trim().to_string();
        if path.is_empty() {
            continue;
        }
        let content = strip_fence(response[header.end()..end].trim());

        if let Some(dir) = parent_dir(&path) {
            if !folders.iter().any(|folder| folder.path == dir) {
                folders.push(ParsedFolder {
                    path: dir.to_string(),
                });
            }
        }

        let language = language_for_path(&path).to_string();
        files.push(ParsedFile {
            path,
            content,
            language,
        });
    }

    log::debug!(
        "Parsed {} file(s) in {} folder(s) from response",
        files.len(),
        folders.len()
    );

    ParsedResponse {
        files,
        folders,
        explanation,
    }
}

/// Removes one layer of markdown fencing around a file body.
fn strip_fence(content: &str) -> String {
    if let Some(inner) = whole_fence_regex()
        .captures(content)
        .and_then(|captures| captures.get(1))
    {
        return inner.as_str().trim().to_string();
    }

    let without_open = opening_fence_regex().replace(content, "");
    let without_close = without_open
        .strip_suffix("\n```")
        .unwrap_or(&without_open);
    without_close.trim().to_string()
}

/// Directory part of a `/`-separated path, if any.
pub fn parent_dir(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(0) | None => None,
        Some(index) => Some(&path[..index]),
    }
}

/// Editor language for a path, looked up by lowercase extension.
pub fn language_for_path(path: &str) -> &'static str {
    let extension = path
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match extension.as_str() {
        "html" => "html",
        "css" => "css",
        "js" | "jsx" => "javascript",
        "ts" | "tsx" => "typescript",
        "json" => "json",
        "md" => "markdown",
        "py" => "python",
        "java" => "java",
        "cpp" => "cpp",
        "c" => "c",
        "go" => "go",
        "rs" => "rust",
        "php" => "php",
        "rb" => "ruby",
        "swift" => "swift",
        "kt" => "kotlin",
        "toml" => "toml",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FILES: &str = "Here is a counter app.\n\n### Features\n- Counts things\n\n### FILE: index.html\n```html\n<!DOCTYPE html>\n<html><head></head><body><p>hi</p></body></html>\n```\n\n### FILE: src/app.js\n```javascript\nconsole.log(\"hi\");\n```\n";

    #[test]
    fn splits_two_file_blocks() {
        let parsed = parse_ai_response(TWO_FILES);

        assert_eq!(parsed.files.len(), 2);
        assert_eq!(parsed.files[0].path, "index.html");
        assert_eq!(
            parsed.files[0].content,
            "<!DOCTYPE html>\n<html><head></head><body><p>hi</p></body></html>"
        );
        assert_eq!(parsed.files[0].language, "html");
        assert_eq!(parsed.files[1].path, "src/app.js");
        assert_eq!(parsed.files[1].content, "console.log(\"hi\");");
        assert_eq!(parsed.files[1].language, "javascript");
        assert_eq!(
            parsed.explanation,
            "Here is a counter app.\n\n### Features\n- Counts things"
        );
        assert_eq!(
            parsed.folders,
            vec![ParsedFolder {
                path: "src".to_string()
            }]
        );
    }

    #[test]
    fn reply_without_markers_is_conversational() {
        let text = "Sure! ```js\nlet a = 1;\n``` is how you declare a variable.\n";
        let parsed = parse_ai_response(text);

        assert!(parsed.is_conversational());
        assert!(parsed.folders.is_empty());
        assert_eq!(parsed.explanation, text);
    }

    #[test]
    fn explanation_drops_code_blocks() {
        let text = "Intro\n```css\nbody {}\n```\nOutro\n### FILE: a.css\nbody {}\n";
        let parsed = parse_ai_response(text);
        assert_eq!(parsed.explanation, "Intro\n\nOutro");
        assert_eq!(parsed.files[0].content, "body {}");
    }

    #[test]
    fn marker_at_start_gives_empty_explanation() {
        let parsed = parse_ai_response("### FILE: notes.txt\nplain\n");
        assert_eq!(parsed.explanation, "");
        assert_eq!(parsed.files[0].language, "text");
        assert_eq!(parsed.files[0].content, "plain");
    }

    #[test]
    fn unterminated_fence_is_stripped_on_open_side_only() {
        let parsed = parse_ai_response("### FILE: style.css\n```css\nbody { margin: 0; }\n");
        assert_eq!(parsed.files[0].content, "body { margin: 0; }");
    }

    #[test]
    fn nested_folders_are_collected_once() {
        let text = "### FILE: a/b/one.ts\n1\n### FILE: a/b/two.TS\n2\n### FILE: a/three.md\n3\n";
        let parsed = parse_ai_response(text);
        let folders: Vec<_> = parsed.folders.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(folders, vec!["a/b", "a"]);
        assert_eq!(parsed.files[1].language, "typescript");
        assert_eq!(parsed.files[2].language, "markdown");
    }

    #[test]
    fn tolerates_spacing_variants_in_markers() {
        let parsed = parse_ai_response("Intro\n###FILE: a.js\nlet a;\n###   FILE: b.css\np {}\n");
        let paths: Vec<_> = parsed.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["a.js", "b.css"]);
        assert_eq!(parsed.files[0].content, "let a;");
        assert_eq!(parsed.explanation, "Intro");
    }

    #[test]
    fn trailing_header_without_newline_ends_previous_file() {
        let parsed = parse_ai_response("### FILE: index.html\n<p>x</p>\n### FILE: empty.txt");
        assert_eq!(parsed.files.len(), 2);
        assert_eq!(parsed.files[0].content, "<p>x</p>");
        assert_eq!(parsed.files[1].path, "empty.txt");
        assert_eq!(parsed.files[1].content, "");
    }

    #[test]
    fn languages_fall_back_to_text() {
        assert_eq!(language_for_path("netlify.toml"), "toml");
        assert_eq!(language_for_path("Component.tsx"), "typescript");
        assert_eq!(language_for_path("Makefile"), "text");
        assert_eq!(language_for_path("image.png"), "text");
    }
}
