//! HTML site generation.
//!
//! Stage 2 of the build. Takes the scanned [`Site`], registers every page with
//! the [`Router`], and writes one HTML file per page.
//!
//! ## Generated Pages
//!
//! - **Configured pages**: one per `[[pages]]` entry; the default page is
//!   written to `index.html`, others to `{key}.html`
//! - **Detail pages** (`/{cards-key}/{slug}.html`): full story behind a card,
//!   with the skills used
//! - **Category pages** (`/{skills-key}/{category}.html`): the skills of one
//!   category
//!
//! Detail and category pages are hidden from the sidebar and carry a back
//! link to the page they belong to.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Default page
//! ├── experiences.html           # Cards
//! ├── experiences/
//! │   ├── acme.html              # Detail page
//! │   └── ...
//! ├── skills.html                # Skills table
//! ├── skills/
//! │   ├── languages.html         # Category page
//! │   └── ...
//! ├── side_projects.html         # Tabs
//! ├── publications.html
//! └── contact.html
//! ```
//!
//! Pages are self-contained: CSS is inlined into each page and local images
//! referenced from Markdown are already data URIs.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating and
//! pulldown-cmark for Markdown. Raw HTML inside Markdown is passed through.

use crate::config;
use crate::document::{DocumentError, MarkdownDocument};
use crate::filter::{self, FilterError};
use crate::naming;
use crate::publications::Item;
use crate::router::{PageEntry, Router, RouterError};
use crate::scan::{PageContent, PageData, Site};
use crate::skills::{SkillCatalogue, SkillLevel, SkillRecord};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Routing error: {0}")]
    Router(#[from] RouterError),
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

const EMPTY_COLLECTION: &str = "Nothing to show here... yet...";
const EMPTY_CONTENT: &str = "*No content provided.*";

/// A page written by [`generate`].
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPage {
    pub key: String,
    pub title: String,
    pub href: String,
    pub show_in_nav: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct GenerateSummary {
    pub pages: Vec<GeneratedPage>,
}

/// What a registered page renders.
enum Target<'a> {
    Page(&'a PageData),
    Detail {
        doc: &'a MarkdownDocument,
    },
    Category {
        catalogue: &'a SkillCatalogue,
        category: &'a str,
    },
}

pub fn generate(site: &Site, output_dir: &Path) -> Result<GenerateSummary, GenerateError> {
    let color_css = config::generate_color_css(&site.config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);

    let (router, targets) = plan(site)?;
    fs::create_dir_all(output_dir)?;

    let mut summary = GenerateSummary::default();
    for (key, target) in &targets {
        let entry = router.get_page(key)?;
        let ctx = Ctx {
            site,
            router: &router,
            css: &css,
            entry,
        };
        let markup = match target {
            Target::Page(page) => render_page(&ctx, page)?,
            Target::Detail { doc } => render_detail_page(&ctx, doc)?,
            Target::Category {
                catalogue,
                category,
            } => render_category_page(&ctx, catalogue, category)?,
        };

        let href = entry.href();
        let path = output_dir.join(&href);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, markup.into_string())?;
        tracing::info!(key = %entry.key, path = %path.display(), "generated page");

        summary.pages.push(GeneratedPage {
            key: entry.key.clone(),
            title: entry.title.clone(),
            href,
            show_in_nav: entry.show_in_nav,
        });
    }

    Ok(summary)
}

/// Register every page of the site, configured and derived.
pub fn build_router(site: &Site) -> Result<Router, GenerateError> {
    Ok(plan(site)?.0)
}

fn plan(site: &Site) -> Result<(Router, Vec<(String, Target<'_>)>), GenerateError> {
    let mut router = Router::new();
    let mut targets = Vec::new();

    // Without a flagged default the first configured page becomes index.html.
    let first_is_default = !site.pages.iter().any(|p| p.config.default);
    if first_is_default {
        if let Some(first) = site.pages.first() {
            tracing::debug!(key = %first.config.key, "no default page configured, using first page");
        }
    }

    for (index, page) in site.pages.iter().enumerate() {
        let cfg = &page.config;
        let entry = PageEntry::new(&cfg.section, &cfg.key)
            .icon(cfg.icon.clone())
            .show_in_nav(cfg.show_in_nav)
            .default_page(cfg.default || (first_is_default && index == 0))
            .title(cfg.display_title());
        router.register(entry)?;
        targets.push((cfg.key.clone(), Target::Page(page)));

        match &page.content {
            PageContent::Cards(docs) => {
                for doc in docs {
                    let key = format!("{}/{}", cfg.key, doc.slug());
                    router.register(
                        PageEntry::new(&cfg.section, &key)
                            .title(doc.title.clone())
                            .icon(doc.icon.clone())
                            .url_path(key.clone())
                            .show_in_nav(false)
                            .parent(cfg.key.clone()),
                    )?;
                    targets.push((key, Target::Detail { doc }));
                }
            }
            PageContent::Skills { catalogue, .. } => {
                for category in catalogue.category_names() {
                    let key = category_key(&cfg.key, category);
                    let icon = catalogue
                        .categories
                        .get(category)
                        .and_then(|c| c.icon.clone());
                    router.register(
                        PageEntry::new(&cfg.section, &key)
                            .title(category)
                            .icon(icon)
                            .url_path(key.clone())
                            .show_in_nav(false)
                            .parent(cfg.key.clone()),
                    )?;
                    targets.push((
                        key,
                        Target::Category {
                            catalogue,
                            category,
                        },
                    ));
                }
            }
            _ => {}
        }
    }

    Ok((router, targets))
}

fn category_key(skills_key: &str, category: &str) -> String {
    format!("{}/{}", skills_key, naming::slug_or(category, "category"))
}

/// Per-page rendering context.
struct Ctx<'a> {
    site: &'a Site,
    router: &'a Router,
    css: &'a str,
    entry: &'a PageEntry,
}

impl Ctx<'_> {
    /// Relative link to another page.
    fn link(&self, key: &str) -> Result<String, GenerateError> {
        Ok(self.router.link(self.entry, key)?)
    }

    /// Wrap page content in the document shell with the sidebar.
    fn document(&self, content: Markup) -> Markup {
        let site = &self.site.config.site;
        let sidebar = html! {
            (site_identity(&self.site.config, &self.entry.root_prefix()))
            (self.router.render_sidebar(&self.site.config.navigation.sections_order, self.entry))
        };
        let title = if self.entry.title == site.title {
            site.title.clone()
        } else {
            format!("{} | {}", self.entry.title, site.title)
        };
        base_document(&title, &site.lang, self.css, sidebar, content)
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, lang: &str, css: &str, sidebar: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                div.layout {
                    aside.sidebar { (sidebar) }
                    main.content { (content) }
                }
            }
        }
    }
}

/// Site name, tagline and external links at the top of the sidebar.
fn site_identity(config: &config::SiteConfig, root_prefix: &str) -> Markup {
    html! {
        header.site-identity {
            a.site-title href={ (root_prefix) "index.html" } { (config.site.title) }
            @if !config.site.tagline.is_empty() {
                p.tagline { (config.site.tagline) }
            }
            @if !config.links.is_empty() {
                ul.site-links {
                    @for link in &config.links {
                        li { a href=(link.url) target="_blank" rel="noopener" { (link.label) } }
                    }
                }
            }
        }
    }
}

/// Page title with the page icon.
fn page_heading(entry: &PageEntry) -> Markup {
    html! { h1 { (entry.label()) } }
}

/// Render Markdown to HTML. Empty input renders a placeholder.
pub fn render_markdown(markdown: &str) -> Markup {
    let source = if markdown.trim().is_empty() {
        EMPTY_CONTENT
    } else {
        markdown
    };
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut body = String::new();
    md_html::push_html(&mut body, Parser::new_ext(source, options));
    PreEscaped(body)
}

fn empty_collection() -> Markup {
    html! { p.empty { (EMPTY_COLLECTION) } }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_page(ctx: &Ctx<'_>, page: &PageData) -> Result<Markup, GenerateError> {
    let body = match &page.content {
        PageContent::Markdown(doc) => render_markdown(&doc.content()?),
        PageContent::Cards(docs) => render_cards(ctx, docs)?,
        PageContent::Tabs(docs) => render_tabs(&page.config.key, docs)?,
        PageContent::Skills { catalogue, filters } => {
            let filters = filter::compile_all(filters)?;
            render_skills(ctx, &catalogue.filter(&filters))?
        }
        PageContent::Publications(items) => render_publications(items),
    };

    Ok(ctx.document(html! {
        (page_heading(ctx.entry))
        (body)
    }))
}

/// Start and end of a period, e.g. `April 2021 - Present`.
fn period_heading(doc: &MarkdownDocument) -> Option<Markup> {
    let label = doc.period.as_ref()?.label()?;
    Some(html! { h3.period { (label) } })
}

fn render_cards(ctx: &Ctx<'_>, docs: &[MarkdownDocument]) -> Result<Markup, GenerateError> {
    if docs.is_empty() {
        return Ok(empty_collection());
    }

    let mut cards = Vec::with_capacity(docs.len());
    for doc in docs {
        let detail_href = ctx.link(&format!("{}/{}", ctx.entry.key, doc.slug()))?;
        let skills = doc
            .skills
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        cards.push(html! {
            @if let Some(period) = period_heading(doc) { (period) }
            article.card {
                h2 { (doc.title) }
                @if let Some(src) = doc.image_src() {
                    img.card-image src=(src) alt=(doc.title);
                }
                @if let Some(description) = &doc.description {
                    p { (description) }
                }
                @if !skills.is_empty() {
                    p.caption { "Main skills: " (skills) }
                }
                div.card-actions {
                    a.button href=(detail_href) { "Read the full story ->" }
                }
            }
        });
    }

    Ok(html! {
        @for card in &cards { (card) }
    })
}

fn render_detail_page(ctx: &Ctx<'_>, doc: &MarkdownDocument) -> Result<Markup, GenerateError> {
    let back = ctx.router.back_link(ctx.entry)?;
    let skills_page = ctx.site.skills_page();

    let mut skills = Vec::with_capacity(doc.skills.len());
    for skill in &doc.skills {
        let record = skills_page.and_then(|(_, catalogue)| catalogue.get(&skill.name));
        let related = match (skills_page, record) {
            (Some((page, _)), Some(record)) => {
                Some(ctx.link(&category_key(&page.config.key, &record.category))?)
            }
            _ => None,
        };
        skills.push(html! {
            details {
                summary {
                    (skill.name)
                    @if skill.details.is_some() { " ⓘ" }
                }
                @if let Some(details) = &skill.details {
                    p { (details) }
                }
                @if let Some(record) = record {
                    (skill_popover(record))
                }
                @if let Some(href) = related {
                    p.card-actions { a href=(href) { "View all related skills ->" } }
                }
            }
        });
    }

    Ok(ctx.document(html! {
        @if let Some(back) = back { (back) }
        (page_heading(ctx.entry))
        @if let Some(period) = period_heading(doc) { (period) }
        article.detail { (render_markdown(&doc.content()?)) }
        @if !skills.is_empty() {
            hr;
            section.skills-used {
                h2 { "Skills used:" }
                @for skill in &skills { (skill) }
            }
        }
    }))
}

fn render_tabs(key: &str, docs: &[MarkdownDocument]) -> Result<Markup, GenerateError> {
    if docs.is_empty() {
        return Ok(empty_collection());
    }

    let group = format!("tabs-{}", naming::slugify(key));
    let overview = html! {
        ul {
            @for doc in docs {
                li {
                    strong { (doc.title) }
                    @if let Some(description) = &doc.description {
                        br;
                        (description)
                    }
                }
            }
        }
    };

    let mut panels = vec![(format!("Overview ({})", docs.len()), overview)];
    for doc in docs {
        panels.push((doc.title.clone(), render_markdown(&doc.content()?)));
    }

    Ok(html! {
        div.tabs {
            @for (i, (label, panel)) in panels.iter().enumerate() {
                @let id = format!("{group}-{i}");
                input.tab-input type="radio" name=(group) id=(id) checked[i == 0];
                label.tab-label for=(id) { (label) }
                div.tab-panel { (panel) }
            }
        }
    })
}

/// Level, last use and production flag of a catalogued skill.
fn skill_popover(record: &SkillRecord) -> Markup {
    html! {
        p.caption {
            (record.level.to_string())
            @if let Some(usage) = record.usage_caption() {
                br;
                (usage)
            }
        }
    }
}

fn level_legend() -> Markup {
    html! {
        details.level-legend {
            summary { "About skill levels..." }
            dl {
                @for level in SkillLevel::ALL {
                    dt { (level.level()) "-" (level.label()) }
                    dd {
                        (level.description())
                        ul {
                            @for example in level.examples() {
                                li { (example) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_skills(ctx: &Ctx<'_>, rows: &[&SkillRecord]) -> Result<Markup, GenerateError> {
    if rows.is_empty() {
        return Ok(html! { (level_legend()) (empty_collection()) });
    }

    let mut body = Vec::with_capacity(rows.len());
    for skill in rows {
        let category_href = ctx.link(&category_key(&ctx.entry.key, &skill.category))?;
        body.push(html! {
            tr class=[skill.highlighted.then_some("highlighted")] {
                td {
                    @if let Some(link) = &skill.link {
                        a href=(link) target="_blank" rel="noopener" { (skill.name) }
                    } @else {
                        (skill.name)
                    }
                }
                td { a href=(category_href) { (skill.category) } }
                td { (skill.level.level()) " - " (skill.level.label()) }
                td { @if let Some(year) = skill.last_used_year { (year) } }
                td { @if skill.in_industrial_context { "Yes" } @else { "No" } }
            }
        });
    }

    Ok(html! {
        (level_legend())
        table.skill-table {
            thead {
                tr {
                    th { "Skill" }
                    th { "Category" }
                    th { "Level" }
                    th { "Last used" }
                    th { "Used in production?" }
                }
            }
            tbody {
                @for row in &body { (row) }
            }
        }
    })
}

fn render_category_page(
    ctx: &Ctx<'_>,
    catalogue: &SkillCatalogue,
    category: &str,
) -> Result<Markup, GenerateError> {
    let back = ctx.router.back_link(ctx.entry)?;
    let info = catalogue.categories.get(category);

    Ok(ctx.document(html! {
        @if let Some(back) = back { (back) }
        (page_heading(ctx.entry))
        @if let Some(description) = info.and_then(|c| c.description.as_deref()) {
            p { (description) }
        }
        @for skill in catalogue.in_category(category) {
            article.card {
                h3 { (skill.name) }
                (skill_popover(skill))
                @if let Some(link) = &skill.link {
                    div.card-actions {
                        a href=(link) target="_blank" rel="noopener" { "Learn more" }
                    }
                }
            }
        }
    }))
}

fn render_publications(items: &[Item]) -> Markup {
    if items.is_empty() {
        return empty_collection();
    }
    html! {
        @for item in items {
            article.card {
                h3 { (item.title) }
                @if let Some(caption) = item.caption() {
                    p.caption { (caption) }
                }
                @if let Some(description) = &item.description {
                    p { (description) }
                }
                div.card-actions {
                    a.button href=(item.link) target="_blank" rel="noopener" { "View" }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
