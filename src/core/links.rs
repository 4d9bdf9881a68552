//! Cross-reference link table and inline link markup
//!
//! Justification text may reference companion pages with markdown-style
//! markup, `[label](path)`. The engine only emits that markup through
//! [`link`]; turning it into something navigable is the job of whatever
//! renders the recommendations ([`parse_links`], [`resolve_links`]).

use once_cell::sync::Lazy;
use regex::Regex;

/// Etchant selection tool
pub const ETCHANT_SELECTOR: &str = "/tools/etchant-selector";

/// Etchants database
pub const ETCHANTS_DATABASE: &str = "/etchants";

/// Material pages live under this prefix (`/materials/{slug}`)
pub const MATERIALS: &str = "/materials";

/// Label used for a material's own page
pub const MATERIAL_PAGE_LABEL: &str = "material page";

static LINK_MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link markup pattern is valid"));

/// Emit inline link markup
///
/// # Examples
/// ```
/// use prepflow::core::links::{link, ETCHANT_SELECTOR};
///
/// assert_eq!(
///     link("Etchant Selector tool", ETCHANT_SELECTOR),
///     "[Etchant Selector tool](/tools/etchant-selector)"
/// );
/// ```
pub fn link(label: &str, path: &str) -> String {
    format!("[{}]({})", label, path)
}

/// A piece of justification text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link { label: &'a str, path: &'a str },
}

/// Split text into plain runs and link markup
pub fn parse_links(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in LINK_MARKUP.captures_iter(text) {
        let (Some(whole), Some(label), Some(path)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Text(&text[last..whole.start()]));
        }
        segments.push(Segment::Link {
            label: label.as_str(),
            path: path.as_str(),
        });
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }

    segments
}

/// Replace link markup with `label (url)` for plain-text output
///
/// Relative paths are joined onto `base_url` when one is given.
pub fn resolve_links(text: &str, base_url: Option<&str>) -> String {
    parse_links(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(t) => t.to_string(),
            Segment::Link { label, path } => format!("{} ({})", label, absolute_url(path, base_url)),
        })
        .collect()
}

fn absolute_url(path: &str, base_url: Option<&str>) -> String {
    match base_url {
        Some(base) if path.starts_with('/') => format!("{}{}", base.trim_end_matches('/'), path),
        _ => path.to_string(),
    }
}
