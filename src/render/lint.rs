//! Detection of unresolved interpolation syntax in composed output.
//!
//! Every field either resolves to a value or to its fallback, so a composed
//! document should never show template markers or the textual forms of
//! missing JavaScript-style values.

use super::text::visible_text;
use regex::Regex;
use std::sync::OnceLock;

static MARKERS: OnceLock<Regex> = OnceLock::new();

fn markers() -> &'static Regex {
    MARKERS.get_or_init(|| {
        Regex::new(r"\$\{[^}]*\}?|\{\{[^}]*(\}\})?|\b(undefined|NaN|null)\b")
            .expect("marker pattern is valid")
    })
}

/// Unresolved markers found in the visible text of `markup`, in order of
/// appearance.
pub fn unresolved_markers(markup: &str) -> Vec<String> {
    let text = visible_text(markup);
    markers()
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Check that `markup` contains no unresolved markers.
pub fn is_clean(markup: &str) -> bool {
    unresolved_markers(markup).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_template_markers() {
        let hits = unresolved_markers("<p>Hello ${name}, total {{amount}}</p><p>NaN</p>");
        assert_eq!(hits, vec!["${name}", "{{amount}}", "NaN"]);
    }

    #[test]
    fn test_ignores_stylesheet_and_attributes() {
        let markup = "<style>.page { margin: 0; }</style><p data-x=\"null\">Nullable values are fine</p>";
        assert!(is_clean(markup));
    }

    #[test]
    fn test_marker_pattern_compiles() {
        assert!(markers().is_match("${x}"));
    }

    #[test]
    fn test_detects_null_as_text() {
        assert_eq!(unresolved_markers("<td>null</td>"), vec!["null"]);
        assert!(is_clean("<td>nullify</td>"));
    }
}
