//! # Simple CV
//!
//! A static site generator for CV and portfolio sites. Content is plain files:
//! Markdown documents with YAML front matter, a CSV skills table and YAML
//! lists. A `config.toml` registers pages, each rendered by a layout, and
//! groups them into sidebar sections.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  Site (+ manifest.json)   (files → structured data)
//! 2. Generate  Site      →  dist/                    (final HTML site)
//! ```
//!
//! The scan stage reads every source once and fails on anything malformed, so
//! `check` can validate content without writing output. The manifest written
//! by `scan` is a JSON dump of the [`scan::Site`] for inspection.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads config and every page source into a [`scan::Site`] |
//! | [`generate`] | Stage 2: renders the HTML site using Maud |
//! | [`router`] | Page registry, sidebar grouping, relative links, back links |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`front_matter`] | Splits the YAML header from a Markdown body |
//! | [`inline`] | Rewrites local image references into `data:` URIs |
//! | [`document`] | Markdown documents and directory loading |
//! | [`skills`] | The skills catalogue (CSV) and skill levels |
//! | [`filter`] | Declarative filters over the skills catalogue |
//! | [`publications`] | Article and talk lists (YAML) |
//! | [`types`] | Shared value types (`Skill`, `TimePeriod`) |
//! | [`naming`] | Titles and slugs derived from file names and keys |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Self-Contained Pages
//!
//! Every generated page inlines its CSS, and local images referenced from
//! Markdown are embedded as data URIs. A page can be opened straight from disk
//! or copied anywhere without its neighbours.
//!
//! ## Hidden Pages Instead of Dialogs
//!
//! Card details and skill categories get their own pages, registered with the
//! router but kept out of the sidebar. Each carries a back link to the page it
//! belongs to.

pub mod config;
pub mod document;
pub mod filter;
pub mod front_matter;
pub mod generate;
pub mod inline;
pub mod naming;
pub mod output;
pub mod publications;
pub mod router;
pub mod scan;
pub mod skills;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
