//! Page registry and sidebar navigation.
//!
//! Pages are registered under a section name and kept in registration order
//! within their section. Sections themselves keep the order in which they were
//! first used.
//!
//! ```text
//! ""        Overview            -> index.html      (default page)
//! "CV"      Experiences         -> experiences.html
//!           Skills              -> skills.html
//!           (hidden) Languages  -> skills/languages.html
//! "Info"    Contact             -> contact.html
//! ```
//!
//! The default section `""` renders without a heading and always comes first
//! in the sidebar.

use crate::naming;
use maud::{Markup, html};
use serde::Serialize;
use thiserror::Error;

pub type SectionName = String;

pub const DEFAULT_SECTION: &str = "";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    #[error("Page not found: {0}")]
    PageNotFound(String),
    #[error("Page key {0:?} is registered more than once")]
    DuplicateKey(String),
    #[error("Pages {0:?} and {1:?} are both marked as default")]
    MultipleDefaults(String, String),
}

/// A registered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageEntry {
    pub key: String,
    pub section: SectionName,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub show_in_nav: bool,
    pub default: bool,
    /// Output path without extension. Defaults to the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_path: Option<String>,
    /// Key of the page this one is opened from; drives the back link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl PageEntry {
    /// A visible page whose title is the key in title case.
    pub fn new(section: &str, key: &str) -> Self {
        Self {
            key: key.to_string(),
            section: section.to_string(),
            title: naming::title_from_key(key),
            icon: None,
            show_in_nav: true,
            default: false,
            url_path: None,
            parent: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn icon(mut self, icon: Option<String>) -> Self {
        self.icon = icon;
        self
    }

    pub fn show_in_nav(mut self, show: bool) -> Self {
        self.show_in_nav = show;
        self
    }

    pub fn default_page(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn url_path(mut self, url_path: impl Into<String>) -> Self {
        self.url_path = Some(url_path.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Output file, relative to the site root.
    pub fn href(&self) -> String {
        if self.default {
            return "index.html".to_string();
        }
        format!("{}.html", self.url_path.as_deref().unwrap_or(&self.key))
    }

    /// Prefix that leads from this page's directory back to the site root.
    pub fn root_prefix(&self) -> String {
        "../".repeat(self.href().matches('/').count())
    }

    /// Sidebar label: icon and title.
    pub fn label(&self) -> String {
        match &self.icon {
            Some(icon) => format!("{icon} {}", self.title),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Router {
    sections: Vec<(SectionName, Vec<PageEntry>)>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to its section.
    pub fn register(&mut self, entry: PageEntry) -> Result<(), RouterError> {
        if self.find(&entry.key).is_some() {
            return Err(RouterError::DuplicateKey(entry.key));
        }
        if entry.default {
            if let Some(existing) = self.default_page() {
                return Err(RouterError::MultipleDefaults(
                    existing.key.clone(),
                    entry.key,
                ));
            }
        }

        tracing::debug!(key = %entry.key, section = %entry.section, "registered page");
        match self.sections.iter_mut().find(|(name, _)| *name == entry.section) {
            Some((_, pages)) => pages.push(entry),
            None => self.sections.push((entry.section.clone(), vec![entry])),
        }
        Ok(())
    }

    /// Look a page up by key.
    pub fn get_page(&self, key: &str) -> Result<&PageEntry, RouterError> {
        self.find(key)
            .ok_or_else(|| RouterError::PageNotFound(key.to_string()))
    }

    pub fn default_page(&self) -> Option<&PageEntry> {
        self.pages().find(|p| p.default)
    }

    /// Every page, section by section, in registration order.
    pub fn pages(&self) -> impl Iterator<Item = &PageEntry> {
        self.sections.iter().flat_map(|(_, pages)| pages.iter())
    }

    /// Pages of one section; empty when the section is unknown.
    pub fn section(&self, name: &str) -> &[PageEntry] {
        self.sections
            .iter()
            .find(|(section, _)| section == name)
            .map(|(_, pages)| pages.as_slice())
            .unwrap_or_default()
    }

    /// Section names in registration order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Sections in sidebar order.
    ///
    /// With an explicit order, the default section is put first when absent.
    /// Without one, sections appear in registration order. Sections with no
    /// registered pages are skipped.
    pub fn sidebar_order<'a>(&'a self, sections_order: &'a [SectionName]) -> Vec<&'a str> {
        if sections_order.is_empty() {
            return self.section_names();
        }

        let mut order: Vec<&str> = Vec::with_capacity(sections_order.len() + 1);
        if !sections_order.iter().any(|s| s == DEFAULT_SECTION) {
            order.push(DEFAULT_SECTION);
        }
        order.extend(sections_order.iter().map(String::as_str));

        order
            .into_iter()
            .filter(|name| {
                let known = self.sections.iter().any(|(section, _)| section == name);
                if !known && !name.is_empty() {
                    tracing::warn!(section = %name, "sidebar section has no pages");
                }
                known
            })
            .collect()
    }

    /// Link from one page to another, relative to `from`'s directory.
    pub fn link(&self, from: &PageEntry, to_key: &str) -> Result<String, RouterError> {
        let target = self.get_page(to_key)?;
        Ok(format!("{}{}", from.root_prefix(), target.href()))
    }

    /// Sidebar listing every visible page, grouped by section. A divider
    /// separates consecutive sections; `current` is marked.
    pub fn render_sidebar(&self, sections_order: &[SectionName], current: &PageEntry) -> Markup {
        let order = self.sidebar_order(sections_order);
        let prefix = current.root_prefix();
        html! {
            nav.sidebar-nav {
                @for (i, name) in order.iter().enumerate() {
                    section.nav-section {
                        @if !name.is_empty() {
                            h3.nav-section-title { (name) }
                        }
                        ul {
                            @for page in self.section(name).iter().filter(|p| p.show_in_nav) {
                                @let is_current = page.key == current.key;
                                li class=[is_current.then_some("current")] {
                                    a href={ (prefix) (page.href()) } { (page.label()) }
                                }
                            }
                        }
                    }
                    @if i + 1 < order.len() {
                        hr.nav-divider;
                    }
                }
            }
        }
    }

    /// `<- Back to X` link to the page `entry` was opened from, if any.
    pub fn back_link(&self, entry: &PageEntry) -> Result<Option<Markup>, RouterError> {
        let Some(parent) = entry.parent.as_deref() else {
            return Ok(None);
        };
        let href = self.link(entry, parent)?;
        Ok(Some(html! {
            a.back-link href=(href) { "<- Back to " (naming::title_from_key(parent)) }
        }))
    }

    fn find(&self, key: &str) -> Option<&PageEntry> {
        self.pages().find(|p| p.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_router() -> Router {
        let mut router = Router::new();
        router
            .register(PageEntry::new("", "overview").default_page(true))
            .unwrap();
        router.register(PageEntry::new("CV", "experiences")).unwrap();
        router
            .register(PageEntry::new("Info", "contact").icon(Some("📫".into())))
            .unwrap();
        router.register(PageEntry::new("CV", "skills")).unwrap();
        router
            .register(
                PageEntry::new("CV", "skills/cloud")
                    .title("Cloud")
                    .url_path("skills/cloud")
                    .show_in_nav(false)
                    .parent("skills"),
            )
            .unwrap();
        router
    }

    #[test]
    fn get_page_returns_registered_entry() {
        let router = sample_router();
        let page = router.get_page("experiences").unwrap();
        assert_eq!(page.title, "Experiences");
        assert_eq!(page.section, "CV");
    }

    #[test]
    fn get_page_unknown_key_is_not_found() {
        let router = sample_router();
        let err = router.get_page("missing").unwrap_err();
        assert_eq!(err, RouterError::PageNotFound("missing".into()));
        assert_eq!(err.to_string(), "Page not found: missing");
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut router = sample_router();
        let err = router.register(PageEntry::new("Other", "contact")).unwrap_err();
        assert_eq!(err, RouterError::DuplicateKey("contact".into()));
    }

    #[test]
    fn second_default_rejected() {
        let mut router = sample_router();
        let err = router
            .register(PageEntry::new("", "home").default_page(true))
            .unwrap_err();
        assert!(matches!(err, RouterError::MultipleDefaults(a, b) if a == "overview" && b == "home"));
    }

    #[test]
    fn pages_grouped_by_section_in_registration_order() {
        let router = sample_router();
        assert_eq!(router.section_names(), vec!["", "CV", "Info"]);

        let cv: Vec<&str> = router.section("CV").iter().map(|p| p.key.as_str()).collect();
        assert_eq!(cv, vec!["experiences", "skills", "skills/cloud"]);
        assert!(router.section("Nope").is_empty());
    }

    #[test]
    fn hrefs() {
        let router = sample_router();
        assert_eq!(router.get_page("overview").unwrap().href(), "index.html");
        assert_eq!(router.get_page("contact").unwrap().href(), "contact.html");
        assert_eq!(
            router.get_page("skills/cloud").unwrap().href(),
            "skills/cloud.html"
        );
    }

    #[test]
    fn links_are_relative_to_the_current_page() {
        let router = sample_router();
        let nested = router.get_page("skills/cloud").unwrap();
        let top = router.get_page("contact").unwrap();

        assert_eq!(router.link(nested, "overview").unwrap(), "../index.html");
        assert_eq!(router.link(top, "skills/cloud").unwrap(), "skills/cloud.html");
    }

    // =========================================================================
    // Sidebar
    // =========================================================================

    #[test]
    fn sidebar_order_prepends_default_section() {
        let router = sample_router();
        let order = vec!["Info".to_string(), "CV".to_string()];
        assert_eq!(router.sidebar_order(&order), vec!["", "Info", "CV"]);
    }

    #[test]
    fn sidebar_order_defaults_to_registration_order() {
        let router = sample_router();
        assert_eq!(router.sidebar_order(&[]), vec!["", "CV", "Info"]);
    }

    #[test]
    fn sidebar_order_skips_unknown_sections() {
        let router = sample_router();
        let order = vec!["CV".to_string(), "Ghost".to_string()];
        assert_eq!(router.sidebar_order(&order), vec!["", "CV"]);
    }

    #[test]
    fn sidebar_lists_visible_pages_and_marks_current() {
        let router = sample_router();
        let current = router.get_page("skills").unwrap();
        let html = router.render_sidebar(&[], current).into_string();

        assert!(html.contains(r#"href="experiences.html""#));
        assert!(html.contains("📫 Contact"));
        assert!(!html.contains("skills/cloud.html"));
        assert!(html.contains(r#"<li class="current"><a href="skills.html">Skills</a></li>"#));
        assert_eq!(html.matches("nav-divider").count(), 2);
        assert!(html.contains("<h3 class=\"nav-section-title\">CV</h3>"));
    }

    #[test]
    fn sidebar_on_nested_page_links_back_to_root() {
        let router = sample_router();
        let current = router.get_page("skills/cloud").unwrap();
        let html = router.render_sidebar(&[], current).into_string();
        assert!(html.contains(r#"href="../index.html""#));
        assert!(html.contains(r#"href="../contact.html""#));
    }

    #[test]
    fn back_link_points_to_parent() {
        let router = sample_router();
        let nested = router.get_page("skills/cloud").unwrap();
        let html = router.back_link(nested).unwrap().unwrap().into_string();

        assert!(html.contains(r#"href="../skills.html""#));
        assert!(html.contains("&lt;- Back to Skills"));
        assert!(router.back_link(router.get_page("contact").unwrap()).unwrap().is_none());
    }

    #[test]
    fn back_link_to_missing_parent_is_error() {
        let mut router = Router::new();
        router
            .register(PageEntry::new("", "orphan").parent("gone"))
            .unwrap();
        let orphan = router.get_page("orphan").unwrap();
        assert!(matches!(
            router.back_link(orphan),
            Err(RouterError::PageNotFound(_))
        ));
    }
}
