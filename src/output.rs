//! CLI output formatting for the build stages.
//!
//! # Information-First Display
//!
//! Output is a content inventory: every page leads with its positional index
//! and title, and the files it was built from are shown as indented context
//! lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! 001 Overview [markdown]
//!     Source: intro.md
//! 002 Professional Experiences [cards] (3 entries)
//!     Source: experiences/
//!     001 Staff Engineer
//!         Source: experiences/staff-engineer.md
//!
//! Sidebar
//!     (top): Overview
//!     CV: Professional Experiences, Skills
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 Overview → index.html
//! 002 Professional Experiences → experiences.html
//!     Staff Engineer → experiences/staff-engineer.html
//!
//! Generated 6 pages, 5 hidden pages
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::generate::GenerateSummary;
use crate::scan::{PageContent, Site};
use crate::skills::SkillRecord;
use std::error::Error;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Path relative to the content root, for display.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan output: every configured page with its sources, then the
/// sidebar grouping.
pub fn format_scan_output(site: &Site) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];

    for (i, page) in site.pages.iter().enumerate() {
        let cfg = &page.config;
        let title = cfg.display_title();
        let mut header = format!("{} {} [{}]", format_index(i + 1), title, cfg.layout.name());
        if !matches!(page.content, PageContent::Markdown(_)) {
            header.push_str(&format!(" ({})", count(page.content.len(), "entry", "entries")));
        }
        if !cfg.show_in_nav {
            header.push_str(" (hidden)");
        }
        lines.push(header);
        lines.push(format!("{}Source: {}", indent(1), cfg.layout.source()));

        match &page.content {
            PageContent::Cards(docs) | PageContent::Tabs(docs) => {
                for (j, doc) in docs.iter().enumerate() {
                    lines.push(format!("{}{} {}", indent(1), format_index(j + 1), doc.title));
                    lines.push(format!(
                        "{}Source: {}",
                        indent(2),
                        display_path(&doc.path, &site.root)
                    ));
                }
            }
            PageContent::Skills { catalogue, filters } => {
                for name in catalogue.category_names() {
                    lines.push(format!(
                        "{}{} ({})",
                        indent(1),
                        name,
                        count(catalogue.in_category(name).len(), "skill", "skills")
                    ));
                }
                for spec in filters {
                    lines.push(format!("{}Filter: {}", indent(1), spec));
                }
            }
            PageContent::Publications(items) => {
                for (j, item) in items.iter().enumerate() {
                    lines.push(format!("{}{} {}", indent(1), format_index(j + 1), item.title));
                }
            }
            PageContent::Markdown(_) => {}
        }
    }

    lines.push(String::new());
    lines.push("Sidebar".to_string());
    let mut sections: Vec<(&str, Vec<String>)> = Vec::new();
    for page in site.pages.iter().filter(|p| p.config.show_in_nav) {
        let title = page.config.display_title();
        match sections.iter_mut().find(|(s, _)| *s == page.config.section) {
            Some((_, titles)) => titles.push(title),
            None => sections.push((page.config.section.as_str(), vec![title])),
        }
    }
    for (section, titles) in sections {
        let name = if section.is_empty() { "(top)" } else { section };
        lines.push(format!("{}{}: {}", indent(1), name, titles.join(", ")));
    }

    lines
}

pub fn print_scan_output(site: &Site) {
    for line in format_scan_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate output: visible pages numbered, hidden pages nested under
/// the page listed before them.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = Vec::new();
    let mut visible = 0;
    let mut hidden = 0;

    for page in &summary.pages {
        if page.show_in_nav {
            visible += 1;
            lines.push(format!("{} {} → {}", format_index(visible), page.title, page.href));
        } else {
            hidden += 1;
            lines.push(format!("{}{} → {}", indent(1), page.title, page.href));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        count(visible, "page", "pages"),
        count(hidden, "hidden page", "hidden pages")
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Skills listing
// ============================================================================

/// Format skills as aligned columns: name, level, category, last use.
pub fn format_skills_table(rows: &[&SkillRecord]) -> Vec<String> {
    let name_width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(5);
    let category_width = rows
        .iter()
        .map(|r| r.category.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut lines = vec![format!(
        "{:<name_width$}  {:<5}  {:<category_width$}  {}",
        "Skill", "Level", "Category", "Last used"
    )];
    for row in rows {
        let last_used = match row.last_used_year {
            Some(year) if row.in_industrial_context => year.to_string(),
            Some(year) => format!("{year} (never in production)"),
            None => "-".to_string(),
        };
        lines.push(format!(
            "{:<name_width$}  {:<5}  {:<category_width$}  {}",
            row.name,
            row.level.level(),
            row.category,
            last_used
        ));
    }
    lines.push(String::new());
    lines.push(format!("{} shown", count(rows.len(), "skill", "skills")));
    lines
}

pub fn print_skills_table(rows: &[&SkillRecord]) {
    for line in format_skills_table(rows) {
        println!("{}", line);
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Format an error followed by every `source()` below it.
pub fn format_error_chain(err: &dyn Error) -> Vec<String> {
    let mut lines = vec![format!("error: {err}")];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("{}caused by: {cause}", indent(1)));
        source = cause.source();
    }
    lines
}

pub fn print_error_chain(err: &dyn Error) {
    for line in format_error_chain(err) {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::scan::scan;
    use crate::skills::SkillLevel;
    use crate::test_helpers::setup_fixtures;

    fn record(name: &str, level: SkillLevel, year: Option<i32>, prod: bool) -> SkillRecord {
        SkillRecord {
            name: name.to_string(),
            level,
            category: "Languages".to_string(),
            last_used_year: year,
            in_industrial_context: prod,
            highlighted: false,
            link: None,
        }
    }

    #[test]
    fn error_chain_lists_every_cause() {
        let err = crate::config::ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "config.toml vanished",
        ));
        assert_eq!(
            format_error_chain(&err),
            vec![
                "error: IO error: config.toml vanished".to_string(),
                "    caused by: config.toml vanished".to_string(),
            ]
        );
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(7), "007");
        assert_eq!(format_index(120), "120");
    }

    #[test]
    fn scan_output_lists_pages_and_sources() {
        let tmp = setup_fixtures();
        let site = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&site);

        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "001 Overview [markdown]");
        assert_eq!(lines[2], "    Source: intro.md");
        assert!(lines.contains(&"002 Professional Experiences [cards] (3 entries)".to_string()));
        assert!(lines.contains(&"    001 Staff Engineer".to_string()));
        assert!(lines.contains(&"        Source: experiences/staff-engineer.md".to_string()));
        assert!(lines.contains(&"    Languages (2 skills)".to_string()));
    }

    #[test]
    fn scan_output_groups_sidebar_sections() {
        let tmp = setup_fixtures();
        let site = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&site);

        let sidebar = lines.iter().position(|l| l == "Sidebar").unwrap();
        assert_eq!(lines[sidebar + 1], "    (top): Overview");
        assert_eq!(
            lines[sidebar + 2],
            "    CV: Professional Experiences, Skills"
        );
    }

    #[test]
    fn untitled_pages_show_key_in_title_case() {
        let tmp = setup_fixtures();
        std::fs::write(
            tmp.path().join("config.toml"),
            "[[pages]]\nkey = \"side_projects\"\nsection = \"Others\"\nlayout = \"tabs\"\nsource = \"projects\"\n",
        )
        .unwrap();
        let site = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&site);

        assert_eq!(lines[1], "001 Side Projects [tabs] (3 entries)");
        assert!(lines.contains(&"    Others: Side Projects".to_string()));
    }

    #[test]
    fn generate_output_nests_hidden_pages() {
        let summary = GenerateSummary {
            pages: vec![
                GeneratedPage {
                    key: "overview".into(),
                    title: "Overview".into(),
                    href: "index.html".into(),
                    show_in_nav: true,
                },
                GeneratedPage {
                    key: "experiences".into(),
                    title: "Experiences".into(),
                    href: "experiences.html".into(),
                    show_in_nav: true,
                },
                GeneratedPage {
                    key: "experiences/acme".into(),
                    title: "Acme".into(),
                    href: "experiences/acme.html".into(),
                    show_in_nav: false,
                },
            ],
        };
        let lines = format_generate_output(&summary);

        assert_eq!(lines[0], "001 Overview → index.html");
        assert_eq!(lines[1], "002 Experiences → experiences.html");
        assert_eq!(lines[2], "    Acme → experiences/acme.html");
        assert_eq!(lines.last().unwrap(), "Generated 2 pages, 1 hidden page");
    }

    #[test]
    fn skills_table_aligns_columns() {
        let rust = record("Rust", SkillLevel::Advanced, Some(2025), true);
        let haskell = record("Haskell", SkillLevel::BasicIntermediate, Some(2019), false);
        let lines = format_skills_table(&[&rust, &haskell]);

        assert_eq!(lines[0], "Skill    Level  Category   Last used");
        assert_eq!(lines[1], "Rust     4      Languages  2025");
        assert_eq!(lines[2], "Haskell  2      Languages  2019 (never in production)");
        assert_eq!(lines.last().unwrap(), "2 skills shown");
    }

    #[test]
    fn skills_table_empty() {
        let lines = format_skills_table(&[]);
        assert_eq!(lines.last().unwrap(), "0 skills shown");
    }
}
