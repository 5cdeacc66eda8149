//! The skills catalogue: a CSV table of skills with levels and categories.
//!
//! ## Files
//!
//! `skills.csv` (header row required, column order free):
//!
//! ```text
//! name,level,category,last_used_year,in_industrial_context,highlighted,link
//! Rust,4,Languages,2025,true,true,https://www.rust-lang.org
//! Haskell,2,Languages,2019,false,false,
//! ```
//!
//! `skill_categories.yaml`:
//!
//! ```yaml
//! categories:
//!   Languages:
//!     icon: "🧑‍💻"
//!     description: Programming languages I write day to day
//! ```
//!
//! Rows are held sorted by level, highest first. Filtering is done with
//! [`crate::filter`].

use crate::filter::{Filter, FilterError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillsError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("YAML error in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Skill {name:?} on line {line} of {} has no category", path.display())]
    EmptyCategory {
        path: PathBuf,
        line: usize,
        name: String,
    },
    #[error("No skill level found for level {0}")]
    UnknownLevel(u8),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// The five-step competence scale used in the catalogue's `level` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SkillLevel {
    Beginner = 1,
    BasicIntermediate = 2,
    Intermediate = 3,
    Advanced = 4,
    Expert = 5,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 5] = [
        SkillLevel::Beginner,
        SkillLevel::BasicIntermediate,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    pub fn from_level(level: u8) -> Result<Self, SkillsError> {
        Self::ALL
            .into_iter()
            .find(|l| l.level() == level)
            .ok_or(SkillsError::UnknownLevel(level))
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::BasicIntermediate => "Basic Intermediate",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkillLevel::Beginner => {
                "Basic theoretical understanding. Can perform simple tasks under supervision."
            }
            SkillLevel::BasicIntermediate => {
                "Able to apply the skill in familiar contexts with occasional help."
            }
            SkillLevel::Intermediate => {
                "Autonomous for standard tasks. Can adapt existing solutions to similar needs."
            }
            SkillLevel::Advanced => {
                "Masters the skill and can innovate or optimize solutions. Handles complex cases."
            }
            SkillLevel::Expert => {
                "Authority on the subject. Can teach, architect complex solutions, or innovate."
            }
        }
    }

    pub fn examples(self) -> &'static [&'static str] {
        match self {
            SkillLevel::Beginner => &[
                "Following step-by-step tutorials to set up a Kubernetes environment",
                "Writing basic scripts without advanced error handling",
                "Using basic Docker commands (e.g., docker run)",
            ],
            SkillLevel::BasicIntermediate => &[
                "Configuring a basic CI/CD pipeline",
                "Using an experiment tracker without optimization",
                "Writing simple SQL queries for PostgreSQL",
            ],
            SkillLevel::Intermediate => &[
                "Developing a service with an ORM and PostgreSQL",
                "Creating Helm charts to deploy applications on Kubernetes",
            ],
            SkillLevel::Advanced => &[
                "Developing a library for data science workflows",
                "Creating complex pipelines with reusable templates",
                "Deploying models in production with GPU optimization",
            ],
            SkillLevel::Expert => &[
                "Making strategic technical decisions on platform choices",
                "Training teams on scalable architectures and clean code",
            ],
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Level {})", self.label(), self.level())
    }
}

impl Serialize for SkillLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let level = u8::deserialize(deserializer)?;
        SkillLevel::from_level(level).map_err(serde::de::Error::custom)
    }
}

/// Empty CSV cells read as `false` rather than failing.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(s) if s.eq_ignore_ascii_case("true") || s == "1" => Ok(true),
        Some(s) if s.eq_ignore_ascii_case("false") || s == "0" => Ok(false),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a boolean, found {other:?}"
        ))),
    }
}

/// One row of the skills catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub level: SkillLevel,
    pub category: String,
    #[serde(default)]
    pub last_used_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub in_industrial_context: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub highlighted: bool,
    #[serde(default)]
    pub link: Option<String>,
}

impl SkillRecord {
    /// Caption such as `Used for the last time in 2022 (never in production)`.
    pub fn usage_caption(&self) -> Option<String> {
        let year = self.last_used_year?;
        let mut msg = format!("Used for the last time in {year}");
        if !self.in_industrial_context {
            msg.push_str(" (never in production)");
        }
        Some(msg)
    }
}

/// Display metadata for a skill category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CategoriesFile {
    categories: BTreeMap<String, SkillCategory>,
}

/// The loaded skills table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SkillCatalogue {
    pub skills: Vec<SkillRecord>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub categories: BTreeMap<String, SkillCategory>,
}

impl SkillCatalogue {
    /// Build a catalogue from rows, ordering them by level (highest first).
    pub fn from_records(mut skills: Vec<SkillRecord>) -> Self {
        skills.sort_by(|a, b| b.level.cmp(&a.level));
        Self {
            skills,
            categories: BTreeMap::new(),
        }
    }

    /// Read `skills.csv`.
    pub fn load(path: &Path) -> Result<Self, SkillsError> {
        if !path.is_file() {
            return Err(SkillsError::FileNotFound(path.to_path_buf()));
        }
        let csv_error = |source| SkillsError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(csv_error)?;
        let records = reader
            .deserialize::<SkillRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_error)?;

        // Line numbers count the header row.
        if let Some((index, record)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.category.is_empty())
        {
            return Err(SkillsError::EmptyCategory {
                path: path.to_path_buf(),
                line: index + 2,
                name: record.name.clone(),
            });
        }

        tracing::debug!(path = %path.display(), count = records.len(), "loaded skills catalogue");
        Ok(Self::from_records(records))
    }

    /// Attach category metadata from `skill_categories.yaml`.
    pub fn with_categories(mut self, path: &Path) -> Result<Self, SkillsError> {
        self.categories = load_categories(path)?;
        Ok(self)
    }

    /// Case-insensitive lookup by name; the first match wins.
    pub fn get(&self, name: &str) -> Option<&SkillRecord> {
        let wanted = name.to_lowercase();
        self.skills.iter().find(|s| s.name.to_lowercase() == wanted)
    }

    /// Every skill of a category, in catalogue order.
    pub fn in_category(&self, category: &str) -> Vec<&SkillRecord> {
        self.skills
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Category names in order of first appearance in the table.
    pub fn category_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for skill in &self.skills {
            if !names.contains(&skill.category.as_str()) {
                names.push(&skill.category);
            }
        }
        names
    }

    /// Rows matching every filter.
    pub fn filter(&self, filters: &[Filter]) -> Vec<&SkillRecord> {
        self.skills
            .iter()
            .filter(|s| filters.iter().all(|f| f.matches(s)))
            .collect()
    }
}

/// Read `skill_categories.yaml`, returning its `categories` mapping.
pub fn load_categories(path: &Path) -> Result<BTreeMap<String, SkillCategory>, SkillsError> {
    if !path.is_file() {
        return Err(SkillsError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let file: Option<CategoriesFile> =
        serde_yaml::from_str(&content).map_err(|source| SkillsError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(file.unwrap_or_default().categories)
}
