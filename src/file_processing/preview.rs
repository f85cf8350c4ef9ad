use crate::models::ParsedFile;
use regex::Regex;
use std::sync::OnceLock;

fn html_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<html[^>]*>").expect("valid html tag regex"))
}

fn body_open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<body[^>]*>").expect("valid body tag regex"))
}

fn is_html(file: &ParsedFile) -> bool {
    file.language == "html" || file.path.ends_with(".html")
}

fn is_css(file: &ParsedFile) -> bool {
    file.language == "css" || file.path.ends_with(".css")
}

fn is_script(file: &ParsedFile) -> bool {
    matches!(file.language.as_str(), "javascript" | "typescript")
        || file.path.ends_with(".js")
        || file.path.ends_with(".ts")
}

fn join_contents<'a>(files: impl Iterator<Item = &'a ParsedFile>) -> String {
    files
        .map(|file| file.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assembles one self-contained HTML document from the project files.
///
/// The first HTML file is the base document; all stylesheets are inlined into
/// a single `<style>` block and all scripts into a single `<script>` block.
/// Without an HTML file a minimal skeleton with a `#root` container is used.
pub fn build_preview(files: &[ParsedFile]) -> String {
    let css_files: Vec<_> = files.iter().filter(|f| is_css(f)).collect();
    let script_files: Vec<_> = files.iter().filter(|f| is_script(f)).collect();

    log::debug!(
        "Building preview from {} file(s): {} stylesheet(s), {} script(s)",
        files.len(),
        css_files.len(),
        script_files.len()
    );

    let Some(html_file) = files.iter().find(|f| is_html(f)) else {
        return skeleton(
            &join_contents(css_files.into_iter()),
            &join_contents(script_files.into_iter()),
        );
    };

    let mut html = html_file.content.clone();
    if !html.contains("<!DOCTYPE") {
        html = format!("<!DOCTYPE html>\n{}", html);
    }

    if !css_files.is_empty() {
        let style = format!("<style>\n{}\n</style>", join_contents(css_files.into_iter()));
        html = inject_style(html, &style);
    }

    if !script_files.is_empty() {
        let script = format!(
            "<script>\n{}\n</script>",
            join_contents(script_files.into_iter())
        );
        html = inject_script(html, &script);
    }

    html
}

fn skeleton(css: &str, js: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Generated Project</title>
  <style>
{}
  </style>
</head>
<body>
  <div id="root"></div>
  <script>
{}
  </script>
</body>
</html>"#,
        css, js
    )
}

fn insert_at(html: &str, position: usize, fragment: &str) -> String {
    let mut out = String::with_capacity(html.len() + fragment.len());
    out.push_str(&html[..position]);
    out.push_str(fragment);
    out.push_str(&html[position..]);
    out
}

fn inject_style(html: String, style: &str) -> String {
    if let Some(position) = html.find("</head>") {
        return insert_at(&html, position, &format!("{}\n", style));
    }
    if let Some(position) = html.find("<head>") {
        return insert_at(&html, position + "<head>".len(), &format!("\n{}", style));
    }
    if let Some(tag) = html_open_regex().find(&html) {
        return insert_at(&html, tag.end(), &format!("\n<head>\n{}\n</head>", style));
    }

    let head = format!("<head>\n{}\n</head>\n", style);
    match html.find('\n').filter(|_| html.starts_with("<!DOCTYPE")) {
        Some(position) => insert_at(&html, position + 1, &head),
        None => format!("{}{}", head, html),
    }
}

fn inject_script(html: String, script: &str) -> String {
    if let Some(position) = html.find("</body>") {
        return insert_at(&html, position, &format!("{}\n", script));
    }
    if let Some(tag) = body_open_regex().find(&html) {
        return insert_at(&html, tag.end(), &format!("\n{}\n", script));
    }
    format!("{}\n{}", html, script)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, language: &str, content: &str) -> ParsedFile {
        ParsedFile {
            path: path.to_string(),
            content: content.to_string(),
            language: language.to_string(),
        }
    }

    #[test]
    fn inlines_css_before_head_close_and_js_before_body_close() {
        let files = vec![
            file(
                "index.html",
                "html",
                "<!DOCTYPE html>\n<html>\n<head><title>t</title></head>\n<body><h1>Hi</h1></body>\n</html>",
            ),
            file("style.css", "css", "h1 { color: red; }"),
            file("script.js", "javascript", "console.log('ready');"),
        ];

        let html = build_preview(&files);

        let style = html.find("<style>\nh1 { color: red; }\n</style>").unwrap();
        let head_close = html.find("</head>").unwrap();
        assert!(style < head_close);

        let script = html.find("<script>\nconsole.log('ready');\n</script>").unwrap();
        let body_close = html.find("</body>").unwrap();
        assert!(script < body_close);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<style>").count(), 1);
    }

    #[test]
    fn synthesizes_skeleton_without_html() {
        let files = vec![
            file("a.css", "css", ".a {}"),
            file("b.css", "css", ".b {}"),
            file("main.ts", "typescript", "let x: number = 1;"),
        ];

        let html = build_preview(&files);

        assert!(html.contains(r#"<div id="root"></div>"#));
        assert!(html.contains(".a {}\n.b {}"));
        assert!(html.contains("let x: number = 1;"));
        assert!(html.find(".b {}").unwrap() < html.find("</head>").unwrap());
        assert!(html.find("let x").unwrap() < html.find("</body>").unwrap());
    }

    #[test]
    fn adds_doctype_and_falls_back_to_opening_tags() {
        let files = vec![
            file("page.html", "html", "<html><head><body class=\"x\"><p>hi</p>"),
            file("s.css", "css", "p {}"),
            file("s.js", "javascript", "go();"),
        ];

        let html = build_preview(&files);

        assert!(html.starts_with("<!DOCTYPE html>\n<html><head>\n<style>\np {}\n</style>"));
        assert!(html.contains("<body class=\"x\">\n<script>\ngo();\n</script>\n<p>hi</p>"));
    }

    #[test]
    fn wraps_missing_head_and_appends_script_without_body() {
        let files = vec![
            file("index.html", "html", "<html lang=\"en\"><p>bare</p></html>"),
            file("s.css", "css", "p {}"),
            file("s.js", "javascript", "go();"),
        ];

        let html = build_preview(&files);

        assert!(html.contains("<html lang=\"en\">\n<head>\n<style>\np {}\n</style>\n</head><p>bare</p>"));
        assert!(html.ends_with("</html>\n<script>\ngo();\n</script>"));
    }

    #[test]
    fn uses_first_html_file_and_leaves_it_untouched_without_assets() {
        let files = vec![
            file("readme.md", "markdown", "# hi"),
            file("one.html", "html", "<!DOCTYPE html><p>one</p>"),
            file("two.html", "html", "<!DOCTYPE html><p>two</p>"),
        ];
        assert_eq!(build_preview(&files), "<!DOCTYPE html><p>one</p>");
    }

    #[test]
    fn file_contents_are_inserted_literally() {
        let files = vec![
            file("index.html", "html", "<head></head><body></body>"),
            file("s.js", "javascript", "const price = '$&$1';"),
        ];
        assert!(build_preview(&files).contains("const price = '$&$1';"));
    }
}
