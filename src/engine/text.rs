//! Justification text helpers
//!
//! Rule blocks build their reasoning from short sentences, some of which are
//! conditional. Link markup is emitted with [`crate::core::links::link`] and
//! is otherwise opaque here.

/// Join sentences with single spaces, skipping empty ones
pub fn sentences<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter_map(|p| {
            let p = p.as_ref().trim();
            (!p.is_empty()).then(|| p.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `value`, or `fallback` when blank
pub fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

const MICRON_UNITS: [&str; 3] = ["µm", "μm", "um"];

/// Particle size with a µm unit, leaving labels that already carry one
pub fn micron(size: &str) -> String {
    format!("{} µm", bare_size(size))
}

/// Comma-separated sizes sharing one trailing unit, e.g. `"6, 3, 1 µm"`
pub fn micron_list(sizes: &[String]) -> String {
    let bare: Vec<&str> = sizes.iter().map(|s| bare_size(s)).collect();
    format!("{} µm", bare.join(", "))
}

fn bare_size(size: &str) -> &str {
    let size = size.trim();
    MICRON_UNITS
        .iter()
        .find_map(|unit| size.strip_suffix(unit))
        .map(str::trim_end)
        .unwrap_or(size)
}

/// `"a, b and c"` style list
pub fn human_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences_skip_empty() {
        assert_eq!(sentences(["One.", "", "  ", "Two."]), "One. Two.");
        assert_eq!(sentences(Vec::<String>::new()), "");
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default("", "most materials"), "most materials");
        assert_eq!(or_default("Carbon Steel", "most materials"), "Carbon Steel");
    }

    #[test]
    fn test_micron() {
        assert_eq!(micron("0.25"), "0.25 µm");
        assert_eq!(micron("6 µm"), "6 µm");
        assert_eq!(micron("3um"), "3 µm");
    }

    #[test]
    fn test_micron_list_single_unit() {
        let plain = vec!["9".to_string(), "3".to_string(), "0.25".to_string()];
        assert_eq!(micron_list(&plain), "9, 3, 0.25 µm");

        let labelled = vec!["6 µm".to_string(), "1 µm".to_string()];
        assert_eq!(micron_list(&labelled), "6, 1 µm");
    }

    #[test]
    fn test_human_list() {
        let items = vec!["Nital".to_string(), "Picral".to_string(), "Vilella's".to_string()];
        assert_eq!(human_list(&items), "Nital, Picral and Vilella's");
        assert_eq!(human_list(&items[..1]), "Nital");
    }
}
