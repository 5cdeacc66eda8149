//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML value and the user's file is merged on top, so a config
//! file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── intro.md
//! ├── experiences/
//! ├── projects/
//! ├── skills.csv
//! ├── skill_categories.yaml
//! └── publications.yaml
//! ```
//!
//! ## Pages
//!
//! The site is a list of pages, each rendered by a layout from a source path
//! relative to the content root:
//!
//! ```toml
//! [[pages]]
//! key = "experiences"          # unique, also the output file name
//! section = "CV"               # sidebar group ("" = top group)
//! title = "Professional Experiences"
//! icon = "💼"
//! layout = "cards"             # markdown | cards | tabs | skills | publications
//! source = "experiences"
//! ```
//!
//! Arrays are replaced wholesale when merging: a user `[[pages]]` list
//! replaces the stock one rather than extending it.
//!
//! Unknown top-level keys are rejected to catch typos early, and so are page
//! keys the page's layout does not read.

use crate::filter::{self, FilterError, FilterSpec};
use crate::naming;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("Invalid filter on page {page:?}: {source}")]
    Filter { page: String, source: FilterError },
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity shown in the sidebar and page titles.
    pub site: SiteInfo,
    /// External links listed under the site name (LinkedIn, GitHub, ...).
    pub links: Vec<Link>,
    /// Sidebar section order.
    pub navigation: NavigationConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Registered pages, in registration order.
    pub pages: Vec<PageConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            links: Vec::new(),
            navigation: NavigationConfig::default(),
            colors: ColorConfig::default(),
            pages: default_pages(),
        }
    }
}

impl SiteConfig {
    /// Check cross-field rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pages.is_empty() {
            return Err(ConfigError::Validation("pages must not be empty".into()));
        }

        let mut keys = HashSet::new();
        for page in &self.pages {
            if page.key.trim().is_empty() {
                return Err(ConfigError::Validation("page key must not be empty".into()));
            }
            if !keys.insert(page.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate page key {:?}",
                    page.key
                )));
            }
            if let Layout::Skills { filters, .. } = &page.layout {
                filter::compile_all(filters).map_err(|source| ConfigError::Filter {
                    page: page.key.clone(),
                    source,
                })?;
            }
        }

        if self.pages.iter().filter(|p| p.default).count() > 1 {
            return Err(ConfigError::Validation(
                "at most one page may set default = true".into(),
            ));
        }
        Ok(())
    }
}

/// Identity of the site owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    pub tagline: String,
    /// Language attribute of generated pages.
    pub lang: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "CV Portfolio".to_string(),
            tagline: String::new(),
            lang: "en".to_string(),
        }
    }
}

/// An external profile link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Sidebar layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Order of sidebar sections. Empty = registration order. The top group
    /// (`""`) is always first.
    pub sections_order: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sections_order: vec!["CV".to_string(), "Others".to_string(), "Info".to_string()],
        }
    }
}

/// Keys every `[[pages]]` entry accepts regardless of layout.
pub const PAGE_KEYS: &[&str] = &["key", "section", "title", "icon", "show_in_nav", "default", "layout"];

fn default_true() -> bool {
    true
}

/// One page registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub key: String,
    #[serde(default)]
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub show_in_nav: bool,
    /// The home page, written to `index.html`.
    #[serde(default)]
    pub default: bool,
    #[serde(flatten)]
    pub layout: Layout,
}

/// How a page renders, and what it renders from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum Layout {
    /// A single Markdown file.
    Markdown { source: String },
    /// A card per document, each opening a detail page.
    Cards {
        source: String,
        #[serde(default)]
        highlighted_only: bool,
    },
    /// An overview tab followed by one tab per document.
    Tabs {
        source: String,
        /// Keep only documents whose front matter `section` matches.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        only_section: Option<String>,
    },
    /// The skills catalogue table.
    Skills {
        source: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        categories: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        filters: Vec<FilterSpec>,
    },
    /// A YAML publication list.
    Publications { source: String },
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Markdown { .. } => "markdown",
            Layout::Cards { .. } => "cards",
            Layout::Tabs { .. } => "tabs",
            Layout::Skills { .. } => "skills",
            Layout::Publications { .. } => "publications",
        }
    }

    /// Page keys this layout reads, on top of [`PAGE_KEYS`].
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Layout::Markdown { .. } | Layout::Publications { .. } => &["source"],
            Layout::Cards { .. } => &["source", "highlighted_only"],
            Layout::Tabs { .. } => &["source", "only_section"],
            Layout::Skills { .. } => &["source", "categories", "filters"],
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Layout::Markdown { source }
            | Layout::Cards { source, .. }
            | Layout::Tabs { source, .. }
            | Layout::Skills { source, .. }
            | Layout::Publications { source } => source,
        }
    }
}

impl PageConfig {
    /// The configured title, else the key in title case (`side_projects` → "Side Projects").
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| naming::title_from_key(&self.key))
    }
}

fn page(key: &str, section: &str, title: &str, icon: &str, layout: Layout) -> PageConfig {
    PageConfig {
        key: key.to_string(),
        section: section.to_string(),
        title: Some(title.to_string()),
        icon: Some(icon.to_string()),
        show_in_nav: true,
        default: false,
        layout,
    }
}

fn default_pages() -> Vec<PageConfig> {
    let mut home = page(
        "overview",
        "",
        "Overview",
        "🧑‍💻",
        Layout::Markdown {
            source: "intro.md".to_string(),
        },
    );
    home.default = true;

    vec![
        home,
        page(
            "experiences",
            "CV",
            "Professional Experiences",
            "💼",
            Layout::Cards {
                source: "experiences".to_string(),
                highlighted_only: false,
            },
        ),
        page(
            "skills",
            "CV",
            "Skills",
            "🛠️",
            Layout::Skills {
                source: "skills.csv".to_string(),
                categories: Some("skill_categories.yaml".to_string()),
                filters: Vec::new(),
            },
        ),
        page(
            "side_projects",
            "Others",
            "Side projects",
            "🚀",
            Layout::Tabs {
                source: "projects".to_string(),
                only_section: Some("personal".to_string()),
            },
        ),
        page(
            "publications",
            "Others",
            "Articles and Talks",
            "📢",
            Layout::Publications {
                source: "publications.yaml".to_string(),
            },
        ),
        page(
            "contact",
            "Info",
            "Contact",
            "📫",
            Layout::Markdown {
                source: "contact.md".to_string(),
            },
        ),
    ]
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Captions, period labels, sidebar headings.
    pub text_muted: String,
    /// Card borders and dividers.
    pub border: String,
    pub link: String,
    /// Primary buttons and the current sidebar entry.
    pub accent: String,
    pub sidebar: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1f2328".to_string(),
            text_muted: "#59636e".to_string(),
            border: "#d1d9e0".to_string(),
            link: "#0969da".to_string(),
            accent: "#ff4b4b".to_string(),
            sidebar: "#f0f2f6".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0e1117".to_string(),
            text: "#fafafa".to_string(),
            text_muted: "#a3a8b8".to_string(),
            border: "#31333f".to_string(),
            link: "#58a6ff".to_string(),
            accent: "#ff4b4b".to_string(),
            sidebar: "#262730".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.clone().try_into()?;
    check_page_keys(&merged, &config.pages)?;
    config.validate()?;
    Ok(config)
}

/// Reject page keys the page's layout does not read.
///
/// The layout fields are flattened into the page table, so serde alone lets
/// a misspelt layout option through.
fn check_page_keys(raw: &toml::Value, pages: &[PageConfig]) -> Result<(), ConfigError> {
    let Some(raw_pages) = raw.get("pages").and_then(toml::Value::as_array) else {
        return Ok(());
    };
    for (raw_page, page) in raw_pages.iter().zip(pages) {
        let Some(table) = raw_page.as_table() else {
            continue;
        };
        let allowed = page.layout.keys();
        if let Some(unknown) = table
            .keys()
            .find(|k| !PAGE_KEYS.contains(&k.as_str()) && !allowed.contains(&k.as_str()))
        {
            return Err(ConfigError::Validation(format!(
                "page {:?}: unknown key {unknown:?} for layout {:?}",
                page.key,
                page.layout.name()
            )));
        }
    }
    Ok(())
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# simple-cv configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Unknown top-level keys cause an error. Paths are relative to the content root.

[site]
title = "CV Portfolio"
tagline = ""
lang = "en"

# External profile links, shown under the site title.
# [[links]]
# label = "GitHub"
# url = "https://github.com/your-handle"

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
[navigation]
# Section order in the sidebar. The top group ("") always comes first.
sections_order = ["CV", "Others", "Info"]

# ---------------------------------------------------------------------------
# Pages
# ---------------------------------------------------------------------------
# A [[pages]] list replaces this default list entirely.
#
# Layouts:
#   markdown      source = a .md file
#   cards         source = a directory of .md files; highlighted_only = bool
#   tabs          source = a directory of .md files; only_section = "name"
#   skills        source = a .csv file; categories = a .yaml file;
#                 filters = [{ column = "...", op = "eq|contains|gte|lte", value = "..." }]
#   publications  source = a .yaml file

[[pages]]
key = "overview"
section = ""
title = "Overview"
icon = "🧑‍💻"
default = true
layout = "markdown"
source = "intro.md"

[[pages]]
key = "experiences"
section = "CV"
title = "Professional Experiences"
icon = "💼"
layout = "cards"
source = "experiences"

[[pages]]
key = "skills"
section = "CV"
title = "Skills"
icon = "🛠️"
layout = "skills"
source = "skills.csv"
categories = "skill_categories.yaml"

[[pages]]
key = "side_projects"
section = "Others"
title = "Side projects"
icon = "🚀"
layout = "tabs"
source = "projects"
only_section = "personal"

[[pages]]
key = "publications"
section = "Others"
title = "Articles and Talks"
icon = "📢"
layout = "publications"
source = "publications.yaml"

[[pages]]
key = "contact"
section = "Info"
title = "Contact"
icon = "📫"
layout = "markdown"
source = "contact.md"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1f2328"
text_muted = "#59636e"   # Captions, period labels, sidebar headings
border = "#d1d9e0"
link = "#0969da"
accent = "#ff4b4b"       # Buttons, current sidebar entry
sidebar = "#f0f2f6"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0e1117"
text = "#fafafa"
text_muted = "#a3a8b8"
border = "#31333f"
link = "#58a6ff"
accent = "#ff4b4b"
sidebar = "#262730"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    fn vars(scheme: &ColorScheme, indent: &str) -> String {
        [
            ("bg", &scheme.background),
            ("text", &scheme.text),
            ("text-muted", &scheme.text_muted),
            ("border", &scheme.border),
            ("link", &scheme.link),
            ("accent", &scheme.accent),
            ("sidebar", &scheme.sidebar),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    }

    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0e1117");
    }

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn default_pages_have_one_home() {
        let config = SiteConfig::default();
        let homes: Vec<&str> = config
            .pages
            .iter()
            .filter(|p| p.default)
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(homes, vec!["overview"]);
    }

    #[test]
    fn stock_toml_matches_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();

        assert_eq!(parsed.pages, defaults.pages);
        assert_eq!(parsed.navigation.sections_order, defaults.navigation.sections_order);
        assert_eq!(parsed.colors.dark.sidebar, defaults.colors.dark.sidebar);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.light.background, "#fafafa");
        assert_eq!(config.colors.light.text, "#1f2328");
        assert_eq!(config.pages.len(), 6);
    }

    #[test]
    fn parse_pages_with_layouts() {
        let toml = r##"
[[pages]]
key = "home"
default = true
layout = "markdown"
source = "home.md"

[[pages]]
key = "stack"
section = "CV"
layout = "skills"
source = "skills.csv"
filters = [{ column = "level", op = "gte", value = "4" }]
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.pages.len(), 2);
        assert!(config.pages[0].show_in_nav);
        assert_eq!(config.pages[0].section, "");
        match &config.pages[1].layout {
            Layout::Skills {
                source, filters, ..
            } => {
                assert_eq!(source, "skills.csv");
                assert_eq!(filters[0], FilterSpec::new("level", "gte", "4"));
            }
            other => panic!("expected skills layout, got {other:?}"),
        }
    }

    #[test]
    fn unknown_layout_is_toml_error() {
        let toml = r##"
[[pages]]
key = "x"
layout = "carousel"
source = "x"
"##;
        assert!(toml::from_str::<SiteConfig>(toml).is_err());
    }

    #[test]
    fn unknown_top_level_key_rejected() {
        assert!(toml::from_str::<SiteConfig>("theme = \"dark\"").is_err());
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0;"));
        assert!(css.contains("--color-bg: #1a1a1a;"));
        assert!(css.contains("--color-sidebar:"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_keeps_unspecified_keys() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3").unwrap();
        let merged = merge_toml(base, overlay);

        assert_eq!(merged["a"]["x"].as_integer(), Some(1));
        assert_eq!(merged["a"]["y"].as_integer(), Some(3));
    }

    #[test]
    fn merge_replaces_arrays() {
        let base: toml::Value = toml::from_str("list = [1, 2, 3]").unwrap();
        let overlay: toml::Value = toml::from_str("list = [9]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["list"].as_array().map(Vec::len), Some(1));
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();

        assert_eq!(config.site.title, "CV Portfolio");
        assert_eq!(config.pages.len(), 6);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[site]
title = "Jane Doe"

[[links]]
label = "GitHub"
url = "https://github.com/jane"

[colors.dark]
accent = "#00ff00"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Jane Doe");
        assert_eq!(config.site.lang, "en");
        assert_eq!(config.links.len(), 1);
        assert_eq!(config.colors.dark.accent, "#00ff00");
        assert_eq!(config.colors.dark.background, "#0e1117");
        assert_eq!(config.pages.len(), 6);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn duplicate_page_keys_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[[pages]]
key = "a"
layout = "markdown"
source = "a.md"

[[pages]]
key = "a"
layout = "markdown"
source = "b.md"
"##,
        )
        .unwrap();

        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("duplicate page key"));
    }

    #[test]
    fn misspelt_layout_option_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[[pages]]
key = "jobs"
layout = "cards"
source = "jobs"
highlighted_onyl = true
"##,
        )
        .unwrap();

        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("\"highlighted_onyl\""));
    }

    #[test]
    fn option_of_another_layout_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[[pages]]
key = "about"
layout = "markdown"
source = "about.md"
only_section = "personal"
"##,
        )
        .unwrap();

        let err = load_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("for layout \"markdown\""));
    }

    #[test]
    fn display_title_falls_back_to_key() {
        let mut config = SiteConfig::default();
        let page = &mut config.pages[3];
        assert_eq!(page.display_title(), "Side projects");

        page.title = None;
        assert_eq!(page.display_title(), "Side Projects");
    }

    #[test]
    fn two_default_pages_rejected() {
        let mut config = SiteConfig::default();
        config.pages[1].default = true;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_filter_op_is_config_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[[pages]]
key = "skills"
layout = "skills"
source = "skills.csv"
filters = [{ column = "level", op = "approximately", value = "4" }]
"##,
        )
        .unwrap();

        let err = load_config(tmp.path()).unwrap_err();
        match err {
            ConfigError::Filter { page, source } => {
                assert_eq!(page, "skills");
                assert_eq!(source, FilterError::UnknownOperation("approximately".into()));
            }
            other => panic!("expected filter error, got {other:?}"),
        }
    }
}
