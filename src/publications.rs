//! Publication lists (articles, talks) loaded from YAML.
//!
//! The file is either a bare list or a mapping with an `items` list:
//!
//! ```yaml
//! items:
//!   - title: Shipping ML models without tears
//!     link: https://example.com/talk
//!     category: Talk
//!     date: 2024-06
//!   - title: A field guide to data contracts
//!     link: https://example.com/article
//!     date: 12/03/2023
//!     date_format: "%d/%m/%Y"
//! ```
//!
//! `date_format` defaults to `%Y-%m`.

use crate::types;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_DATE_FORMAT: &str = "%Y-%m";

#[derive(Error, Debug)]
pub enum PublicationError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Invalid date {value:?} for {title:?} (expected format {format:?}): {source}")]
    InvalidDate {
        title: String,
        value: String,
        format: String,
        source: chrono::ParseError,
    },
}

#[derive(Debug, Deserialize)]
struct RawItem {
    title: String,
    link: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    date_format: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFile {
    List(Vec<RawItem>),
    Wrapped {
        #[serde(default)]
        items: Vec<RawItem>,
    },
}

/// One entry of a publication list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub title: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
}

impl Item {
    /// Card caption such as `Talk - Jun 2024`.
    pub fn caption(&self) -> Option<String> {
        let category = self.category.as_deref().filter(|c| !c.is_empty());
        let date = self.date.map(|d| d.format("%b %Y").to_string());
        match (category, date) {
            (Some(c), Some(d)) => Some(format!("{c} - {d}")),
            (Some(c), None) => Some(c.to_string()),
            (None, Some(d)) => Some(d),
            (None, None) => None,
        }
    }
}

/// Load a publication file.
pub fn load(path: &Path) -> Result<Vec<Item>, PublicationError> {
    if !path.exists() {
        return Err(PublicationError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let raw: Option<RawFile> =
        serde_yaml::from_str(&content).map_err(|source| PublicationError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    let raw_items = match raw {
        Some(RawFile::List(items)) | Some(RawFile::Wrapped { items }) => items,
        None => Vec::new(),
    };

    raw_items
        .into_iter()
        .map(|ri| {
            let date = match ri.date.as_deref().filter(|d| !d.is_empty()) {
                Some(raw_date) => {
                    let format = ri.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
                    let parsed = types::parse_timestamp(raw_date, format).map_err(|source| {
                        PublicationError::InvalidDate {
                            title: ri.title.clone(),
                            value: raw_date.to_string(),
                            format: format.to_string(),
                            source,
                        }
                    })?;
                    Some(parsed)
                }
                None => None,
            };
            Ok(Item {
                title: ri.title,
                link: ri.link,
                description: ri.description,
                category: ri.category,
                date,
            })
        })
        .collect()
}

/// Newest first; undated items go last, keeping their file order.
pub fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
}
