//! Content scanning.
//!
//! Stage 1 of the build. Reads `config.toml` and loads every source the
//! configured pages point at, producing a [`Site`] the generate stage renders.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                  # Site configuration (optional)
//! ├── intro.md                     # markdown page
//! ├── contact.md
//! ├── experiences/                 # cards page: one .md per card
//! │   ├── acme.md
//! │   └── images/acme.png          # referenced by front matter `image`
//! ├── projects/                    # tabs page: one .md per tab
//! │   └── cli-tool.md
//! ├── skills.csv                   # skills page
//! ├── skill_categories.yaml
//! └── publications.yaml            # publications page
//! ```
//!
//! Only paths referenced from `[[pages]]` are read. A referenced path that does
//! not exist fails the scan.
//!
//! Document bodies are not read here; they are loaded on first render.

use crate::config::{self, Layout, PageConfig, SiteConfig};
use crate::document::{self, DocumentError, MarkdownDocument, MarkdownLoader};
use crate::filter::FilterSpec;
use crate::publications::{self, PublicationError};
use crate::skills::{SkillCatalogue, SkillsError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content root not found: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("Page {page:?}: source not found: {}", path.display())]
    SourceNotFound { page: String, path: PathBuf },
    #[error("Page {page:?}: {source}")]
    Document {
        page: String,
        source: DocumentError,
    },
    #[error("Page {page:?}: {source}")]
    Skills { page: String, source: SkillsError },
    #[error("Page {page:?}: {source}")]
    Publications {
        page: String,
        source: PublicationError,
    },
}

/// Everything needed to render the site.
#[derive(Debug, Serialize)]
pub struct Site {
    pub root: PathBuf,
    pub config: SiteConfig,
    pub pages: Vec<PageData>,
}

impl Site {
    pub fn page(&self, key: &str) -> Option<&PageData> {
        self.pages.iter().find(|p| p.config.key == key)
    }

    /// The first skills page and its catalogue, used to resolve skills
    /// mentioned in documents.
    pub fn skills_page(&self) -> Option<(&PageData, &SkillCatalogue)> {
        self.pages.iter().find_map(|p| match &p.content {
            PageContent::Skills { catalogue, .. } => Some((p, catalogue)),
            _ => None,
        })
    }
}

/// A configured page with its loaded source.
#[derive(Debug, Serialize)]
pub struct PageData {
    pub config: PageConfig,
    pub content: PageContent,
}

#[derive(Debug, Serialize)]
#[serde(tag = "layout", content = "data", rename_all = "snake_case")]
pub enum PageContent {
    Markdown(MarkdownDocument),
    /// Sorted by weight, heaviest first.
    Cards(Vec<MarkdownDocument>),
    /// Sorted by weight, heaviest first.
    Tabs(Vec<MarkdownDocument>),
    Skills {
        catalogue: SkillCatalogue,
        filters: Vec<FilterSpec>,
    },
    /// Sorted newest first.
    Publications(Vec<publications::Item>),
}

impl PageContent {
    /// Number of entries the page lists.
    pub fn len(&self) -> usize {
        match self {
            PageContent::Markdown(_) => 1,
            PageContent::Cards(docs) | PageContent::Tabs(docs) => docs.len(),
            PageContent::Skills { catalogue, .. } => catalogue.skills.len(),
            PageContent::Publications(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load the config and every page source under `root`.
pub fn scan(root: &Path) -> Result<Site, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    let config = config::load_config(root)?;

    let pages = config
        .pages
        .iter()
        .map(|page| {
            let content = load_page(root, page)?;
            tracing::debug!(
                key = %page.key,
                layout = page.layout.name(),
                entries = content.len(),
                "scanned page"
            );
            Ok(PageData {
                config: page.clone(),
                content,
            })
        })
        .collect::<Result<Vec<_>, ScanError>>()?;

    Ok(Site {
        root: root.to_path_buf(),
        config,
        pages,
    })
}

fn load_page(root: &Path, page: &PageConfig) -> Result<PageContent, ScanError> {
    let source = root.join(page.layout.source());
    if !source.exists() {
        return Err(ScanError::SourceNotFound {
            page: page.key.clone(),
            path: source,
        });
    }
    let doc_err = |source| ScanError::Document {
        page: page.key.clone(),
        source,
    };

    let content = match &page.layout {
        Layout::Markdown { .. } => {
            let dir = source.parent().unwrap_or(root);
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let doc = MarkdownLoader::new(dir)
                .and_then(|loader| loader.load_by_filename(&name))
                .map_err(doc_err)?
                .ok_or_else(|| ScanError::SourceNotFound {
                    page: page.key.clone(),
                    path: source.clone(),
                })?;
            PageContent::Markdown(doc)
        }
        Layout::Cards {
            highlighted_only, ..
        } => {
            let mut docs = if *highlighted_only {
                document::highlighted_documents(&source)
            } else {
                document::load_documents(&source)
            }
            .map_err(doc_err)?;
            document::sort_by_weight(&mut docs);
            PageContent::Cards(docs)
        }
        Layout::Tabs { only_section, .. } => {
            let mut docs = MarkdownLoader::new(&source)
                .and_then(|loader| loader.load_by_section(only_section.as_deref().unwrap_or("")))
                .map_err(doc_err)?;
            document::sort_by_weight(&mut docs);
            PageContent::Tabs(docs)
        }
        Layout::Skills {
            categories,
            filters,
            ..
        } => {
            let skills_err = |source| ScanError::Skills {
                page: page.key.clone(),
                source,
            };
            let mut catalogue = SkillCatalogue::load(&source).map_err(skills_err)?;
            if let Some(categories) = categories {
                catalogue = catalogue
                    .with_categories(&root.join(categories))
                    .map_err(skills_err)?;
            }
            PageContent::Skills {
                catalogue,
                filters: filters.clone(),
            }
        }
        Layout::Publications { .. } => {
            let mut items =
                publications::load(&source).map_err(|source| ScanError::Publications {
                    page: page.key.clone(),
                    source,
                })?;
            publications::sort_newest_first(&mut items);
            PageContent::Publications(items)
        }
    };
    Ok(content)
}
