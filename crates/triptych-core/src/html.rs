//! Shared HTML fragments

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::matcher::Method;

/// Bytes that cannot appear raw in a relative URL path. `/` is kept so
/// nested asset paths still resolve.
const URL_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode a relative path for use in `href`/`src`.
pub fn url_path(path: &str) -> String {
    utf8_percent_encode(path, URL_PATH).to_string()
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Footer line shared by the index and concept pages.
pub(crate) const FOOTER_TEXT: &str = "Generated automatically from SD, UCE, and our comparison data";

/// Document head up to and including the opening `<style>` tag.
pub(crate) fn head(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>
"#,
        escape(title)
    )
}

/// Base rules both document kinds use: body, header and method legend.
pub(crate) fn base_css() -> String {
    let mut css = String::from(
        r#"        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            background-color: white;
            padding: 20px;
            border-radius: 10px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
        }
        .header h1 {
            color: #333;
            margin-bottom: 10px;
        }
        .method-legend {
            display: flex;
            justify-content: center;
            gap: 30px;
            margin: 20px 0;
            flex-wrap: wrap;
        }
        .legend-item {
            display: flex;
            align-items: center;
            gap: 8px;
        }
        .legend-color {
            width: 20px;
            height: 20px;
            border-radius: 4px;
        }
"#,
    );
    for method in Method::ALL {
        css.push_str(&format!(
            "        .legend-color.{} {{ background-color: {}; }}\n",
            method.dir_name(),
            method.color()
        ));
    }
    css
}

/// Method legend block; `label` picks the text shown for each method.
pub(crate) fn legend(label: fn(Method) -> &'static str) -> String {
    let mut out = String::from("        <div class=\"method-legend\">\n");
    for method in Method::ALL {
        out.push_str(&format!(
            r#"            <div class="legend-item">
                <div class="legend-color {}"></div>
                <span>{}</span>
            </div>
"#,
            method.dir_name(),
            escape(label(method))
        ));
    }
    out.push_str("        </div>\n");
    out
}
