//! Named-placeholder rendering.
//!
//! Templates use `{name}` placeholders. A placeholder the resolver does not
//! know renders as the empty string; rendering never fails.

use std::sync::OnceLock;

use regex::{Captures, Regex};

fn placeholder_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").ok())
        .as_ref()
}

/// Render `template`, asking `resolve` for each placeholder name in order
/// of appearance.
pub fn render(template: &str, mut resolve: impl FnMut(&str) -> Option<String>) -> String {
    let Some(pattern) = placeholder_pattern() else {
        return template.to_string();
    };
    pattern
        .replace_all(template, |caps: &Captures<'_>| {
            resolve(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

/// Names of the placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    placeholder_pattern()
        .map(|p| {
            p.captures_iter(template)
                .map(|c| c[1].to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_names() {
        let out = render("Tese: {a} e {b}.", |name| match name {
            "a" => Some("ferro".into()),
            "b" => Some("maré".into()),
            _ => None,
        });
        assert_eq!(out, "Tese: ferro e maré.");
    }

    #[test]
    fn unknown_names_render_empty() {
        assert_eq!(render("x{nope}y", |_| None), "xy");
    }

    #[test]
    fn non_placeholders_are_left_alone() {
        assert_eq!(render("{Upper} {} {a-b}", |_| Some("!".into())), "{Upper} {} {a-b}");
    }

    #[test]
    fn resolver_sees_names_in_order() {
        let mut seen = Vec::new();
        render("{one} {two} {one}", |n| {
            seen.push(n.to_string());
            None
        });
        assert_eq!(seen, ["one", "two", "one"]);
    }

    #[test]
    fn lists_placeholders() {
        assert_eq!(placeholders("Em {prazo}, {acao}."), ["prazo", "acao"]);
        assert!(placeholders("sem nada").is_empty());
    }
}
