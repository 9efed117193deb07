//! Generated files written into the scaffolded website.

/// Docusaurus site configuration script. Reads `siteConf.json` at build time.
pub(crate) const SITE_CONFIG_JS: &[u8] = include_bytes!("../assets/siteConfig.js");

/// Render the landing page that redirects to the document `doc_id`.
pub(crate) fn render_index(title: &str, doc_id: &str) -> String {
    let target = format!("docs/{}.html", escape(doc_id));
    format!(
        r#"<!DOCTYPE HTML>
<html lang="en-US">
  <head>
    <meta charset="UTF-8">
    <meta http-equiv="refresh" content="0; url={target}">
    <script type="text/javascript">
      window.location.href = '{target}';
    </script>
    <title>{title}</title>
  </head>
  <body>
    If you are not redirected automatically, follow this <a href="{target}">link</a>.
  </body>
</html>
"#,
        title = escape(title),
    )
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_index_redirects_to_document() {
        let html = render_index("Manual", "index");
        assert!(html.contains(r#"content="0; url=docs/index.html""#));
        assert!(html.contains("window.location.href = 'docs/index.html';"));
        assert!(html.contains(r#"<a href="docs/index.html">link</a>"#));
        assert!(html.contains("<title>Manual</title>"));
    }

    #[test]
    fn render_index_escapes_title() {
        let html = render_index("Tips & <Tricks>", "index");
        assert!(html.contains("<title>Tips &amp; &lt;Tricks&gt;</title>"));
        assert!(!html.contains("<Tricks>"));
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a&b"), "a&amp;b");
        assert_eq!(escape("it's"), "it&#x27;s");
    }

    #[test]
    fn site_config_reads_site_conf() {
        let script = std::str::from_utf8(SITE_CONFIG_JS).unwrap();
        assert!(script.contains("siteConf.json"));
        assert!(script.contains("module.exports"));
    }
}
