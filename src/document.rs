//! Markdown documents and the directory loader.
//!
//! A document is a Markdown file whose optional front matter carries its
//! metadata. Everything the site needs to list a document (title, section,
//! weight, period, skills) comes from the front matter; the body is only read
//! when a page actually renders it.
//!
//! ## Front matter keys
//!
//! ```yaml
//! ---
//! title: Lead Data Engineer        # default: file stem in title case
//! icon: "💼"
//! description: One-line teaser shown on cards
//! section: work                    # used by `load_by_section`
//! weight: 20                       # sort key, higher first (int or numeric string)
//! highlighted: true                # picked up by `highlighted_documents`
//! image: images/logo.png           # relative to the document
//! period:
//!   from: 2021-04-01
//!   to: 2023-09-30                 # omit for an ongoing period
//!   format: "%Y-%m-%d"             # default
//! skills:
//!   - name: Rust
//!     details: Rewrote the ingestion service
//! metadata:                        # free-form, values kept as text
//!   url_path: lead-data-engineer   # output slug override
//! ---
//! ```
//!
//! Text fields accept any scalar (`title: 2048`) and treat null as absent.
//! Nested metadata values are stored as compact JSON.
//!
//! ## Body caching
//!
//! [`MarkdownDocument::content`] reads the file on first use and memoises the
//! result. The one exception is a document whose front matter never closes:
//! its body is recomputed on every call, so fixing the file is picked up
//! without reloading the document.

use crate::front_matter::{self, Body};
use crate::inline;
use crate::naming;
use crate::types::{self, Skill, TimePeriod};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_PERIOD_FORMAT: &str = "%Y-%m-%d";
const FALLBACK_SLUG: &str = "untitled";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid front matter in {}: {source}", path.display())]
    InvalidFrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Invalid weight {value:?} in {}", path.display())]
    InvalidWeight { path: PathBuf, value: String },
    #[error("Invalid date {value:?} in {} (expected format {format:?}): {source}", path.display())]
    InvalidDate {
        path: PathBuf,
        value: String,
        format: String,
        source: chrono::ParseError,
    },
    #[error("Skill {name:?} listed more than once in {}", path.display())]
    DuplicateSkill { path: PathBuf, name: String },
}

/// Text form of a front matter value. Numbers and booleans are printed,
/// sequences and mappings are written as compact JSON, null is absent.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s),
        Value::Tagged(tagged) => value_text(tagged.value),
        nested @ (Value::Sequence(_) | Value::Mapping(_)) => serde_json::to_string(&nested).ok(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PeriodSpec {
    from: Option<String>,
    to: Option<String>,
    format: Option<String>,
}

/// Typed view of the front matter keys this crate understands. Other keys
/// are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    title: Value,
    icon: Value,
    description: Value,
    metadata: BTreeMap<String, Value>,
    section: Value,
    skills: Vec<Skill>,
    weight: Value,
    period: Option<PeriodSpec>,
    image: Option<PathBuf>,
    highlighted: bool,
}

/// A Markdown document with its front matter resolved.
#[derive(Debug, Clone, Serialize)]
pub struct MarkdownDocument {
    pub path: PathBuf,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<Skill>,
    pub weight: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<TimePeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,
    pub highlighted: bool,
    #[serde(skip)]
    content: OnceLock<String>,
}

impl MarkdownDocument {
    /// Build a document with only a path and title; everything else defaults.
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            icon: None,
            description: None,
            metadata: BTreeMap::new(),
            section: None,
            skills: Vec::new(),
            weight: 0,
            period: None,
            image_path: None,
            highlighted: false,
            content: OnceLock::new(),
        }
    }

    /// Build a document from its parsed front matter.
    pub fn from_metadata(path: &Path, metadata: &Mapping) -> Result<Self, DocumentError> {
        let fm: FrontMatter = serde_yaml::from_value(Value::Mapping(metadata.clone())).map_err(
            |source| DocumentError::InvalidFrontMatter {
                path: path.to_path_buf(),
                source,
            },
        )?;

        let mut seen = HashSet::new();
        for skill in &fm.skills {
            if !seen.insert(skill.name.as_str()) {
                return Err(DocumentError::DuplicateSkill {
                    path: path.to_path_buf(),
                    name: skill.name.clone(),
                });
            }
        }

        let invalid_weight = |value: String| DocumentError::InvalidWeight {
            path: path.to_path_buf(),
            value,
        };
        let weight = match fm.weight {
            Value::Null => 0,
            Value::Number(n) => match n.as_i64() {
                Some(i) => i,
                None => n
                    .as_f64()
                    .map(|f| f.trunc() as i64)
                    .ok_or_else(|| invalid_weight(n.to_string()))?,
            },
            Value::String(s) => s.trim().parse().map_err(|_| invalid_weight(s.clone()))?,
            other => return Err(invalid_weight(value_text(other).unwrap_or_default())),
        };

        let period = fm
            .period
            .map(|spec| resolve_period(path, spec))
            .transpose()?
            .flatten();

        let title = value_text(fm.title).unwrap_or_else(|| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            naming::title_from_stem(&stem)
        });

        Ok(Self {
            path: path.to_path_buf(),
            title,
            icon: value_text(fm.icon),
            description: value_text(fm.description),
            metadata: fm
                .metadata
                .into_iter()
                .filter_map(|(k, v)| value_text(v).map(|text| (k, text)))
                .collect(),
            section: value_text(fm.section),
            skills: fm.skills,
            weight,
            period,
            image_path: fm.image,
            highlighted: fm.highlighted,
            content: OnceLock::new(),
        })
    }

    /// Directory the document lives in; relative references resolve here.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    /// Output slug: the `url_path` metadata entry if set, else the file stem.
    ///
    /// Either source is skipped when nothing URL-safe is left of it.
    pub fn slug(&self) -> String {
        let from_url_path = self
            .metadata
            .get("url_path")
            .map(|url_path| naming::slugify(url_path))
            .filter(|slug| !slug.is_empty());
        if let Some(slug) = from_url_path {
            return slug;
        }
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        naming::slug_or(&stem, FALLBACK_SLUG)
    }

    /// The document body with front matter removed and local images inlined.
    ///
    /// Computed on first call and cached, unless the front matter is unclosed.
    pub fn content(&self) -> Result<Cow<'_, str>, DocumentError> {
        if let Some(cached) = self.content.get() {
            return Ok(Cow::Borrowed(cached.as_str()));
        }

        let text = fs::read_to_string(&self.path)?;
        let rendered = match front_matter::split_body(&text) {
            Body::Plain(_) => None,
            Body::Unclosed(body) => return Ok(Cow::Owned(body)),
            Body::Closed(body) if body.is_empty() => Some(String::new()),
            Body::Closed(body) => Some(inline::embed_local_images(&body, self.dir())),
        };
        let rendered = rendered.unwrap_or(text);

        Ok(Cow::Borrowed(self.content.get_or_init(|| rendered).as_str()))
    }

    /// Card image as a `src` value: a data URI when the file can be read,
    /// otherwise the path as written.
    pub fn image_src(&self) -> Option<String> {
        let image = self.image_path.as_ref()?;
        let as_written = image.to_string_lossy().to_string();
        Some(inline::to_data_uri(&as_written, self.dir()).unwrap_or(as_written))
    }
}

fn resolve_period(path: &Path, spec: PeriodSpec) -> Result<Option<TimePeriod>, DocumentError> {
    if spec.from.is_none() && spec.to.is_none() {
        return Ok(None);
    }
    let format = spec.format.as_deref().unwrap_or(DEFAULT_PERIOD_FORMAT);
    let parse = |raw: Option<&str>| {
        raw.filter(|s| !s.is_empty())
            .map(|s| {
                types::parse_timestamp(s, format).map_err(|source| DocumentError::InvalidDate {
                    path: path.to_path_buf(),
                    value: s.to_string(),
                    format: format.to_string(),
                    source,
                })
            })
            .transpose()
    };
    Ok(Some(TimePeriod {
        start: parse(spec.from.as_deref())?,
        end: parse(spec.to.as_deref())?,
    }))
}

/// Loads the Markdown documents of one directory (non-recursive).
#[derive(Debug, Clone)]
pub struct MarkdownLoader {
    dir: PathBuf,
}

impl MarkdownLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DocumentError::DirectoryNotFound(dir));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every document in the directory, sorted by path.
    pub fn load_all(&self) -> Result<Vec<MarkdownDocument>, DocumentError> {
        self.load_by_section("")
    }

    /// Documents whose front matter `section` equals `section`.
    ///
    /// An empty `section` matches every document. Front matter of documents
    /// that do not match is not validated.
    pub fn load_by_section(&self, section: &str) -> Result<Vec<MarkdownDocument>, DocumentError> {
        let mut docs = Vec::new();
        for path in self.markdown_files()? {
            let metadata = front_matter::parse_front_matter(&fs::read_to_string(&path)?);
            if section.is_empty() || section_of(&metadata).as_deref() == Some(section) {
                docs.push(MarkdownDocument::from_metadata(&path, &metadata)?);
            }
        }
        tracing::debug!(dir = %self.dir.display(), section, count = docs.len(), "loaded documents");
        Ok(docs)
    }

    /// A single document by file name, `None` if it does not exist.
    pub fn load_by_filename(
        &self,
        filename: &str,
    ) -> Result<Option<MarkdownDocument>, DocumentError> {
        let path = self.dir.join(filename);
        if !path.is_file() {
            return Ok(None);
        }
        let metadata = front_matter::parse_front_matter(&fs::read_to_string(&path)?);
        MarkdownDocument::from_metadata(&path, &metadata).map(Some)
    }

    fn markdown_files(&self) -> Result<Vec<PathBuf>, DocumentError> {
        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .map(|e| e.eq_ignore_ascii_case("md"))
                        .unwrap_or(false)
            })
            .collect();
        files.sort();
        Ok(files)
    }
}

fn section_of(metadata: &Mapping) -> Option<String> {
    metadata
        .get(Value::String("section".to_string()))
        .cloned()
        .and_then(value_text)
}

/// Load every document of a directory.
pub fn load_documents(dir: &Path) -> Result<Vec<MarkdownDocument>, DocumentError> {
    MarkdownLoader::new(dir)?.load_all()
}

/// Load only the documents flagged `highlighted: true`.
pub fn highlighted_documents(dir: &Path) -> Result<Vec<MarkdownDocument>, DocumentError> {
    Ok(load_documents(dir)?
        .into_iter()
        .filter(|doc| doc.highlighted)
        .collect())
}

/// Sort documents by weight, heaviest first. Ties keep their load order.
pub fn sort_by_weight(docs: &mut [MarkdownDocument]) {
    docs.sort_by(|a, b| b.weight.cmp(&a.weight));
}
