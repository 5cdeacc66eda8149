//! Display titles and URL slugs derived from file and category names.
//!
//! Every content entry that lacks an explicit title falls back to its
//! filename stem. The same conversion is used everywhere so that a document,
//! its card and its detail page agree on what the entry is called:
//!
//! - `hello-world.md` → "Hello World"
//! - `plain-text.md` → "Plain Text"
//! - `ml-ops2go.md` → "Ml Ops2Go"
//!
//! Slugs go the other way: a free-text title or category becomes a lowercase,
//! dash-separated token that is safe in an output filename.

/// Title-case a filename stem: dashes become spaces, the first letter of every
/// alphabetic run is uppercased and the rest lowercased.
///
/// A letter counts as the start of a run when the previous character is not a
/// letter, so digits split runs (`3d-models` → "3D Models").
pub fn title_from_stem(stem: &str) -> String {
    let mut title = String::with_capacity(stem.len());
    let mut prev_is_letter = false;
    for c in stem.chars() {
        let c = if c == '-' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_is_letter {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            title.push(c);
            prev_is_letter = false;
        }
    }
    title
}

/// Title-case an identifier such as a page key (`side_projects` → "Side Projects").
pub fn title_from_key(key: &str) -> String {
    title_from_stem(&key.replace('_', " "))
}

/// Reduce arbitrary text to a URL-safe slug.
///
/// Alphanumerics are lowercased and kept, every other run of characters
/// collapses into a single dash, and leading/trailing dashes are dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// [`slugify`], or `fallback` when the text has no alphanumerics to keep.
pub fn slug_or(text: &str, fallback: &str) -> String {
    let slug = slugify(text);
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stem_dashes_become_spaces() {
        assert_eq!(title_from_stem("hello-world"), "Hello World");
        assert_eq!(title_from_stem("plain-text"), "Plain Text");
    }

    #[test]
    fn stem_single_word() {
        assert_eq!(title_from_stem("draft"), "Draft");
    }

    #[test]
    fn stem_lowercases_inner_letters() {
        assert_eq!(title_from_stem("ABOUT-ME"), "About Me");
    }

    #[test]
    fn stem_digits_split_runs() {
        assert_eq!(title_from_stem("3d-models"), "3D Models");
    }

    #[test]
    fn key_underscores_become_spaces() {
        assert_eq!(title_from_key("side_projects"), "Side Projects");
        assert_eq!(title_from_key("skills"), "Skills");
    }

    // =========================================================================
    // Slugs
    // =========================================================================

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slugify("Data & ML Ops"), "data-ml-ops");
    }

    #[test]
    fn slug_trims_edges() {
        assert_eq!(slugify("  Cloud / DevOps!  "), "cloud-devops");
    }

    #[test]
    fn slug_of_plain_word_is_lowercase() {
        assert_eq!(slugify("Languages"), "languages");
    }

    #[test]
    fn slug_or_falls_back_when_nothing_survives() {
        assert_eq!(slug_or("???", "category"), "category");
        assert_eq!(slug_or("", "category"), "category");
        assert_eq!(slug_or("C++", "category"), "c");
    }
}
