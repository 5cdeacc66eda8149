//! Shared test utilities for the simple-cv test suite.
//!
//! Provides fixture setup, lookup helpers that panic with the available
//! choices on a miss, and bulk extractors for assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let site = scan(tmp.path()).unwrap();
//!
//! let docs = find_documents(&site, "experiences");
//! assert_eq!(doc_titles(docs), vec!["Staff Engineer", "Data Engineer", "Intern"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::document::MarkdownDocument;
use crate::scan::{PageContent, PageData, Site};
use crate::skills::SkillRecord;

/// Six rows covering every level but one, three categories, empty cells and
/// both production flags.
pub const SKILLS_CSV: &str = "\
name,level,category,last_used_year,in_industrial_context,highlighted,link
Rust,4,Languages,2025,true,true,https://www.rust-lang.org
Python,5,Data,2025,true,true,https://www.python.org
Haskell,2,Languages,2019,false,false,
SQL,4,Data,2024,true,false,
Kubernetes,3,Cloud,2023,true,false,https://kubernetes.io
Terraform,1,Cloud,2022,false,false,
";

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// A directory of four small documents:
///
/// - `about.md`: section `about`, one metadata entry
/// - `work.md`: section `work`, icon `briefcase`
/// - `draft.md`: front matter never closed
/// - `plain-text.md`: no front matter
pub fn write_markdown_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let files = [
        (
            "about.md",
            "---\ntitle: About\nsection: about\nmetadata:\n  tag: intro\n---\nAbout body",
        ),
        (
            "work.md",
            "---\ntitle: Work\nsection: work\nicon: briefcase\n---\nWork body",
        ),
        ("draft.md", "---\ntitle: Draft\nBody without closing marker"),
        ("plain-text.md", "Plain body"),
    ];
    for (name, content) in files {
        fs::write(tmp.path().join(name), content).unwrap();
    }
    tmp
}

// =========================================================================
// Site lookups (panic with a clear message on miss)
// =========================================================================

/// Find a page by key. Panics if not found.
pub fn find_page<'a>(site: &'a Site, key: &str) -> &'a PageData {
    site.page(key).unwrap_or_else(|| {
        let keys: Vec<&str> = site.pages.iter().map(|p| p.config.key.as_str()).collect();
        panic!("page '{key}' not found. Available: {keys:?}")
    })
}

/// Documents of a cards or tabs page. Panics for other layouts.
pub fn find_documents<'a>(site: &'a Site, key: &str) -> &'a [MarkdownDocument] {
    match &find_page(site, key).content {
        PageContent::Cards(docs) | PageContent::Tabs(docs) => docs,
        other => panic!("page '{key}' has no documents: {other:?}"),
    }
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Document titles in order.
pub fn doc_titles(docs: &[MarkdownDocument]) -> Vec<&str> {
    docs.iter().map(|d| d.title.as_str()).collect()
}

/// Skill names in order.
pub fn skill_names<'a>(skills: &[&'a SkillRecord]) -> Vec<&'a str> {
    skills.iter().map(|s| s.name.as_str()).collect()
}
