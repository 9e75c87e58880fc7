//! Per-concept comparison page

use crate::html::{self, escape};
use crate::matcher::{Method, Triplet};

/// Rendering inputs shared by every concept page of a run.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Prepended to each page-relative asset path.
    pub url_prefix: &'a str,
    /// Link from a page back to the index.
    pub index_href: &'a str,
}

const PAGE_CSS: &str = r#"        .header .concept-name {
            font-size: 24px;
            font-weight: bold;
            color: #e74c3c;
            margin-bottom: 10px;
        }
        .stats {
            font-size: 18px;
            color: #666;
            margin-bottom: 20px;
        }
        .navigation {
            text-align: center;
            margin-bottom: 20px;
        }
        .nav-button {
            display: inline-block;
            padding: 10px 20px;
            margin: 0 10px;
            background-color: #3498db;
            color: white;
            text-decoration: none;
            border-radius: 5px;
            transition: background-color 0.3s;
        }
        .nav-button:hover {
            background-color: #2980b9;
        }
        .image-grid {
            display: grid;
            gap: 20px;
            max-width: 1600px;
            margin: 0 auto;
        }
        .image-trio {
            display: grid;
            grid-template-columns: 1fr 1fr 1fr;
            gap: 15px;
            background-color: white;
            padding: 20px;
            border-radius: 10px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
        }
        .image-container {
            text-align: center;
        }
        .image-container h3 {
            margin: 0 0 10px 0;
            color: #333;
            font-size: 18px;
            font-weight: bold;
        }
        .image-container img {
            max-width: 100%;
            max-height: 350px;
            border: 2px solid #ddd;
            border-radius: 8px;
            object-fit: contain;
            transition: transform 0.3s;
        }
        .image-container img:hover {
            transform: scale(1.05);
            border-color: #3498db;
        }
        .image-info {
            margin-top: 15px;
            padding: 10px;
            background-color: #f8f9fa;
            border-radius: 5px;
            text-align: left;
        }
        .image-info .filename {
            font-size: 14px;
            color: #666;
            word-break: break-all;
            margin-bottom: 5px;
        }
        .image-info .prompt {
            font-size: 13px;
            color: #444;
            font-style: italic;
            margin-bottom: 5px;
        }
        .image-info .details {
            font-size: 12px;
            color: #888;
        }
        @media (max-width: 1200px) {
            .image-trio {
                grid-template-columns: 1fr 1fr;
            }
            .image-container:nth-child(3) {
                grid-column: 1 / -1;
                max-width: 50%;
                margin: 0 auto;
            }
        }
        @media (max-width: 768px) {
            .image-trio {
                grid-template-columns: 1fr;
            }
            .image-container:nth-child(3) {
                grid-column: auto;
                max-width: 100%;
            }
        }
        .footer {
            text-align: center;
            margin-top: 40px;
            padding: 20px;
            background-color: white;
            border-radius: 10px;
            color: #666;
        }
"#;

/// Render the comparison page for `concept`.
///
/// Returns `None` when there is nothing to show; no page is written for
/// such a concept.
pub fn render_page(concept: &str, triplets: &[Triplet], ctx: &PageContext<'_>) -> Option<String> {
    if triplets.is_empty() {
        return None;
    }

    let concept_html = escape(concept);
    let mut out = html::head(&format!("{concept} - SD vs UCE vs our Comparison"));
    out.push_str(&html::base_css());
    for method in Method::ALL {
        out.push_str(&format!(
            "        .image-container.{} h3 {{\n            color: {};\n        }}\n",
            method.dir_name(),
            method.color()
        ));
    }
    out.push_str(PAGE_CSS);
    out.push_str("    </style>\n</head>\n<body>\n");

    out.push_str(&format!(
        r#"    <div class="header">
        <h1>SD vs UCE vs our Image Comparison</h1>
        <div class="concept-name">{concept_html}</div>
        <div class="stats">
            <strong>{} matching image triplets found</strong>
        </div>
"#,
        triplets.len()
    ));
    out.push_str(&html::legend(Method::label));
    out.push_str("    </div>\n\n");

    out.push_str(&format!(
        r#"    <div class="navigation">
        <a href="{}" class="nav-button">&larr; Back to All Concepts</a>
    </div>

    <div class="image-grid">
"#,
        escape(ctx.index_href)
    ));

    for triplet in triplets {
        out.push_str(&render_trio(triplet, ctx.url_prefix));
    }

    out.push_str(&format!(
        r#"    </div>

    <div class="footer">
        <p>{}</p>
    </div>
</body>
</html>
"#,
        html::FOOTER_TEXT
    ));
    Some(out)
}

fn render_trio(triplet: &Triplet, url_prefix: &str) -> String {
    let filename = escape(&triplet.filename);
    let caption = format!(
        r#"                <div class="image-info">
                    <div class="filename">{filename}</div>
                    <div class="prompt">&quot;{}&quot;</div>
                    <div class="details">Prompt ID: {} | Seed: {}</div>
                </div>
"#,
        escape(&triplet.prompt),
        triplet.prompt_id,
        triplet.seed
    );

    let mut out = String::from("        <div class=\"image-trio\">\n");
    for method in Method::ALL {
        let src = format!("{url_prefix}{}", triplet.asset(method));
        out.push_str(&format!(
            r#"            <div class="image-container {}">
                <h3>{}</h3>
                <img src="{}" alt="{} - {filename}" onerror="this.style.display='none'">
{caption}            </div>
"#,
            method.dir_name(),
            escape(method.label()),
            escape(&src),
            method.alt(),
        ));
    }
    out.push_str("        </div>\n");
    out
}
