//! Declarative filters over the skills catalogue.
//!
//! A filter is written as data, either in `config.toml`:
//!
//! ```toml
//! [[pages]]
//! key = "skills"
//! layout = "skills"
//! filters = [{ column = "in_industrial_context", op = "eq", value = "true" }]
//! ```
//!
//! or on the command line as `column:op:value` (`level:gte:4`).
//!
//! | op         | meaning                               | columns        |
//! |------------|---------------------------------------|----------------|
//! | `eq`       | equality (text is case-insensitive)   | all            |
//! | `contains` | case-insensitive substring            | text           |
//! | `gte`      | value ≥ threshold                     | numeric        |
//! | `lte`      | value ≤ threshold                     | numeric        |
//!
//! A [`FilterSpec`] is checked once by [`FilterSpec::compile`]; anything it
//! does not recognise is a configuration error, never a silent no-op.

use crate::skills::SkillRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Unknown filter operation {0:?} (expected one of: eq, contains, gte, lte)")]
    UnknownOperation(String),
    #[error("Unknown filter column {0:?}")]
    UnknownColumn(String),
    #[error("Filter {column}:{op} expects {expected}, got {value:?}")]
    InvalidValue {
        column: String,
        op: String,
        value: String,
        expected: &'static str,
    },
    #[error("Operation {op:?} cannot be applied to column {column:?}")]
    Unsupported { column: String, op: String },
    #[error("Malformed filter {0:?} (expected column:op:value)")]
    Syntax(String),
}

/// A filter as written by the user, not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    pub column: String,
    pub op: String,
    pub value: String,
}

impl FilterSpec {
    pub fn new(column: &str, op: &str, value: &str) -> Self {
        Self {
            column: column.to_string(),
            op: op.to_string(),
            value: value.to_string(),
        }
    }

    /// Validate the column, operation and operand.
    pub fn compile(&self) -> Result<Filter, FilterError> {
        let column = Column::parse(&self.column)?;
        let invalid = |expected| FilterError::InvalidValue {
            column: self.column.clone(),
            op: self.op.clone(),
            value: self.value.clone(),
            expected,
        };
        let unsupported = || FilterError::Unsupported {
            column: self.column.clone(),
            op: self.op.clone(),
        };

        let op = match self.op.as_str() {
            "eq" => match column.kind() {
                Kind::Bool => Op::EqBool(parse_bool(&self.value).ok_or_else(|| invalid("a boolean"))?),
                Kind::Number => Op::EqNumber(self.value.trim().parse().map_err(|_| invalid("a number"))?),
                Kind::Text => Op::EqText(self.value.to_lowercase()),
            },
            "contains" => match column.kind() {
                Kind::Text => Op::Contains(self.value.to_lowercase()),
                _ => return Err(unsupported()),
            },
            "gte" | "lte" => {
                if column.kind() != Kind::Number {
                    return Err(unsupported());
                }
                let threshold: f64 = self.value.trim().parse().map_err(|_| invalid("a number"))?;
                if self.op == "gte" {
                    Op::Gte(threshold)
                } else {
                    Op::Lte(threshold)
                }
            }
            other => return Err(FilterError::UnknownOperation(other.to_string())),
        };

        Ok(Filter { column, op })
    }
}

impl FromStr for FilterSpec {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(column), Some(op), Some(value)) if !column.is_empty() && !op.is_empty() => {
                Ok(Self::new(column, op, value))
            }
            _ => Err(FilterError::Syntax(s.to_string())),
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.column, self.op, self.value)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Text,
    Number,
    Bool,
}

/// A catalogue column that filters can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Level,
    Category,
    LastUsedYear,
    InIndustrialContext,
    Highlighted,
    Link,
}

impl Column {
    fn parse(name: &str) -> Result<Self, FilterError> {
        Ok(match name {
            "name" => Column::Name,
            "level" => Column::Level,
            "category" => Column::Category,
            "last_used_year" => Column::LastUsedYear,
            "in_industrial_context" | "in_production" => Column::InIndustrialContext,
            "highlighted" => Column::Highlighted,
            "link" => Column::Link,
            other => return Err(FilterError::UnknownColumn(other.to_string())),
        })
    }

    fn kind(self) -> Kind {
        match self {
            Column::Name | Column::Category | Column::Link => Kind::Text,
            Column::Level | Column::LastUsedYear => Kind::Number,
            Column::InIndustrialContext | Column::Highlighted => Kind::Bool,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Op {
    EqText(String),
    EqNumber(f64),
    EqBool(bool),
    Contains(String),
    Gte(f64),
    Lte(f64),
}

/// A validated filter, ready to test rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    column: Column,
    op: Op,
}

impl Filter {
    pub fn column(&self) -> Column {
        self.column
    }

    /// True when `skill` passes. Rows with an empty cell never match a
    /// comparison on that cell.
    pub fn matches(&self, skill: &SkillRecord) -> bool {
        match &self.op {
            Op::EqText(wanted) => self.text(skill).is_some_and(|t| t.to_lowercase() == *wanted),
            Op::Contains(needle) => self
                .text(skill)
                .is_some_and(|t| t.to_lowercase().contains(needle.as_str())),
            Op::EqBool(wanted) => self.flag(skill) == *wanted,
            Op::EqNumber(wanted) => self.number(skill).is_some_and(|n| n == *wanted),
            Op::Gte(threshold) => self.number(skill).is_some_and(|n| n >= *threshold),
            Op::Lte(threshold) => self.number(skill).is_some_and(|n| n <= *threshold),
        }
    }

    fn text<'a>(&self, skill: &'a SkillRecord) -> Option<&'a str> {
        match self.column {
            Column::Name => Some(&skill.name),
            Column::Category => Some(&skill.category),
            Column::Link => skill.link.as_deref(),
            _ => None,
        }
    }

    fn number(&self, skill: &SkillRecord) -> Option<f64> {
        match self.column {
            Column::Level => Some(f64::from(skill.level.level())),
            Column::LastUsedYear => skill.last_used_year.map(f64::from),
            _ => None,
        }
    }

    fn flag(&self, skill: &SkillRecord) -> bool {
        match self.column {
            Column::InIndustrialContext => skill.in_industrial_context,
            Column::Highlighted => skill.highlighted,
            _ => false,
        }
    }
}

/// Compile a list of specs, failing on the first invalid one.
pub fn compile_all(specs: &[FilterSpec]) -> Result<Vec<Filter>, FilterError> {
    specs.iter().map(FilterSpec::compile).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillLevel;

    fn record(name: &str, level: SkillLevel, year: Option<i32>, production: bool) -> SkillRecord {
        SkillRecord {
            name: name.to_string(),
            level,
            category: "Languages".to_string(),
            last_used_year: year,
            in_industrial_context: production,
            highlighted: false,
            link: None,
        }
    }

    fn compile(column: &str, op: &str, value: &str) -> Result<Filter, FilterError> {
        FilterSpec::new(column, op, value).compile()
    }

    #[test]
    fn eq_bool_matches_flag() {
        let f = compile("in_industrial_context", "eq", "true").unwrap();
        assert!(f.matches(&record("Rust", SkillLevel::Advanced, None, true)));
        assert!(!f.matches(&record("Elm", SkillLevel::Beginner, None, false)));
    }

    #[test]
    fn production_alias_accepted() {
        let f = compile("in_production", "eq", "no").unwrap();
        assert!(f.matches(&record("Elm", SkillLevel::Beginner, None, false)));
    }

    #[test]
    fn eq_text_ignores_case() {
        let f = compile("name", "eq", "rust").unwrap();
        assert!(f.matches(&record("Rust", SkillLevel::Advanced, None, true)));
        assert!(!f.matches(&record("Rustacean", SkillLevel::Advanced, None, true)));
    }

    #[test]
    fn contains_is_substring() {
        let f = compile("name", "contains", "SCRIPT").unwrap();
        assert!(f.matches(&record("TypeScript", SkillLevel::Intermediate, None, true)));
        assert!(!f.matches(&record("Go", SkillLevel::Intermediate, None, true)));
    }

    #[test]
    fn contains_on_missing_cell_never_matches() {
        let f = compile("link", "contains", "http").unwrap();
        assert!(!f.matches(&record("Go", SkillLevel::Intermediate, None, true)));
    }

    #[test]
    fn numeric_thresholds() {
        let gte = compile("level", "gte", "4").unwrap();
        let lte = compile("last_used_year", "lte", "2020").unwrap();

        assert!(gte.matches(&record("A", SkillLevel::Expert, None, true)));
        assert!(gte.matches(&record("B", SkillLevel::Advanced, None, true)));
        assert!(!gte.matches(&record("C", SkillLevel::Intermediate, None, true)));

        assert!(lte.matches(&record("D", SkillLevel::Beginner, Some(2019), false)));
        assert!(!lte.matches(&record("E", SkillLevel::Beginner, Some(2024), false)));
        assert!(!lte.matches(&record("F", SkillLevel::Beginner, None, false)));
    }

    #[test]
    fn eq_number() {
        let f = compile("level", "eq", "3").unwrap();
        assert!(f.matches(&record("A", SkillLevel::Intermediate, None, true)));
        assert!(!f.matches(&record("B", SkillLevel::Expert, None, true)));
    }

    // =========================================================================
    // Configuration errors
    // =========================================================================

    #[test]
    fn unknown_operation_is_error() {
        assert_eq!(
            compile("level", "between", "1").unwrap_err(),
            FilterError::UnknownOperation("between".to_string())
        );
    }

    #[test]
    fn unknown_column_is_error() {
        assert!(matches!(
            compile("salary", "eq", "1"),
            Err(FilterError::UnknownColumn(_))
        ));
    }

    #[test]
    fn threshold_on_text_is_error() {
        assert!(matches!(
            compile("name", "gte", "1"),
            Err(FilterError::Unsupported { .. })
        ));
    }

    #[test]
    fn non_numeric_threshold_is_error() {
        assert!(matches!(
            compile("level", "gte", "high"),
            Err(FilterError::InvalidValue { expected: "a number", .. })
        ));
    }

    #[test]
    fn non_boolean_value_is_error() {
        assert!(matches!(
            compile("highlighted", "eq", "maybe"),
            Err(FilterError::InvalidValue { expected: "a boolean", .. })
        ));
    }

    #[test]
    fn compile_all_stops_on_first_error() {
        let specs = vec![
            FilterSpec::new("level", "gte", "2"),
            FilterSpec::new("level", "nope", "2"),
        ];
        assert!(matches!(
            compile_all(&specs),
            Err(FilterError::UnknownOperation(_))
        ));
    }

    // =========================================================================
    // Command-line syntax
    // =========================================================================

    #[test]
    fn parses_column_op_value() {
        let spec: FilterSpec = "level:gte:4".parse().unwrap();
        assert_eq!(spec, FilterSpec::new("level", "gte", "4"));
    }

    #[test]
    fn value_may_contain_colons() {
        let spec: FilterSpec = "link:contains:https://".parse().unwrap();
        assert_eq!(spec.value, "https://");
    }

    #[test]
    fn missing_parts_is_syntax_error() {
        assert!(matches!(
            "level:gte".parse::<FilterSpec>(),
            Err(FilterError::Syntax(_))
        ));
    }

    #[test]
    fn display_round_trips_cli_form() {
        assert_eq!(FilterSpec::new("name", "eq", "Go").to_string(), "name:eq:Go");
    }
}
