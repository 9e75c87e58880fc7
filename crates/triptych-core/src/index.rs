//! Landing page listing every concept page

use std::collections::BTreeMap;

use crate::html::{self, escape, url_path};
use crate::matcher::{page_file_name, Method};

/// Concept name → number of matched triplets, ordered by name.
pub type ConceptStats = BTreeMap<String, usize>;

/// Link from the index to a concept page. The page name is percent-encoded.
pub fn index_link(pages_dir: &str, concept: &str) -> String {
    let dir = pages_dir.trim_end_matches('/');
    let page = url_path(&page_file_name(concept));
    if dir.is_empty() || dir == "." {
        page
    } else {
        format!("{dir}/{page}")
    }
}

const INDEX_CSS: &str = r#"        .header p {
            color: #666;
            font-size: 18px;
        }
        .concepts-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
            gap: 20px;
            max-width: 1200px;
            margin: 0 auto;
        }
        .concept-card {
            background-color: white;
            padding: 20px;
            border-radius: 10px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
            text-align: center;
            transition: transform 0.3s;
        }
        .concept-card:hover {
            transform: translateY(-5px);
        }
        .concept-name {
            font-size: 24px;
            font-weight: bold;
            color: #e74c3c;
            margin-bottom: 10px;
        }
        .concept-stats {
            color: #666;
            margin-bottom: 15px;
        }
        .view-button {
            display: inline-block;
            padding: 10px 20px;
            background-color: #3498db;
            color: white;
            text-decoration: none;
            border-radius: 5px;
            transition: background-color 0.3s;
        }
        .view-button:hover {
            background-color: #2980b9;
        }
        .summary {
            text-align: center;
            margin: 30px 0;
            background-color: white;
            padding: 20px;
            border-radius: 10px;
            box-shadow: 0 2px 5px rgba(0,0,0,0.1);
        }
        .footer {
            text-align: center;
            margin-top: 40px;
            color: #666;
        }
"#;

/// Render the index for all concepts with at least one triplet.
///
/// Zero-count entries are left out: no page exists for them.
pub fn render_index(stats: &ConceptStats, pages_dir: &str) -> String {
    let listed: Vec<(&String, usize)> = stats
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(concept, count)| (concept, *count))
        .collect();
    let total: usize = listed.iter().map(|(_, count)| count).sum();

    let mut out = html::head("SD vs UCE vs our - All Concepts");
    out.push_str(&html::base_css());
    out.push_str(INDEX_CSS);
    out.push_str("    </style>\n</head>\n<body>\n");

    out.push_str(
        r#"    <div class="header">
        <h1>SD vs UCE vs Our Method - Concept Erasure</h1>
        <p>Interactive visualization of concept erasure results across three methods</p>
"#,
    );
    out.push_str(&html::legend(Method::legend));
    out.push_str("    </div>\n\n");

    out.push_str(&format!(
        r#"    <div class="summary">
        <h2>Summary</h2>
        <p><strong>{} concepts</strong> with <strong>{total} total image triplets</strong></p>
    </div>

    <div class="concepts-grid">
"#,
        listed.len()
    ));

    for (concept, count) in &listed {
        out.push_str(&format!(
            r#"        <div class="concept-card">
            <div class="concept-name">{}</div>
            <div class="concept-stats">{count} image triplets</div>
            <a href="{}" class="view-button">View Comparison</a>
        </div>
"#,
            escape(concept),
            escape(&index_link(pages_dir, concept))
        ));
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
    out
}
