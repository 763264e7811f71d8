//! Modifier class utilities.
//!
//! A node's class string is a whitespace-separated token set. Adding appends
//! tokens that are absent; removing strips every occurrence. Both operations
//! normalise whitespace and are idempotent.

/// Prefix of every modifier class produced by the widget contract.
pub const CLASS_PREFIX: &str = "ui";

/// Iterate over the tokens of a class string.
pub fn tokens(class_name: &str) -> impl Iterator<Item = &str> {
    class_name.split_whitespace()
}

/// Whether `class_name` contains the token `class`.
pub fn has_class(class_name: &str, class: &str) -> bool {
    tokens(class_name).any(|token| token == class)
}

/// Add every token of `classes` to `class_name`, keeping existing positions.
pub fn add_class(class_name: &str, classes: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for token in tokens(class_name).chain(tokens(classes)) {
        if !out.contains(&token) {
            out.push(token);
        }
    }
    out.join(" ")
}

/// Remove every occurrence of every token of `classes` from `class_name`.
pub fn remove_class(class_name: &str, classes: &str) -> String {
    let doomed: Vec<&str> = tokens(classes).collect();
    tokens(class_name)
        .filter(|token| !doomed.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a modifier class: `ui-<type>` or `ui-<type>-<key>`.
///
/// The widget type is lowercased.
pub fn modifier(widget_type: &str, key: Option<&str>) -> String {
    let mut class = format!("{CLASS_PREFIX}-{}", widget_type.to_lowercase());
    if let Some(key) = key.filter(|k| !k.is_empty()) {
        class.push('-');
        class.push_str(key);
    }
    class
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_to_empty() {
        assert_eq!(add_class("", "a"), "a");
    }

    #[test]
    fn add_is_idempotent() {
        let once = add_class("x", "ui-panel-hover");
        let twice = add_class(&once, "ui-panel-hover");
        assert_eq!(once, twice);
        assert_eq!(twice, "x ui-panel-hover");
    }

    #[test]
    fn add_keeps_existing_position() {
        assert_eq!(add_class("a b c", "a"), "a b c");
    }

    #[test]
    fn add_multiple_tokens() {
        assert_eq!(add_class("a", "b  c a"), "a b c");
    }

    #[test]
    fn add_normalises_whitespace() {
        assert_eq!(add_class("  a \t b ", "c"), "a b c");
    }

    #[test]
    fn remove_strips_all_occurrences() {
        assert_eq!(remove_class("a b a c a", "a"), "b c");
    }

    #[test]
    fn remove_absent_is_noop() {
        assert_eq!(remove_class("a b", "z"), "a b");
    }

    #[test]
    fn remove_does_not_touch_prefix_matches() {
        assert_eq!(remove_class("ui-panel ui-panel-hover", "ui-panel"), "ui-panel-hover");
    }

    #[test]
    fn has_class_matches_whole_tokens() {
        assert!(has_class("ui-panel ui-panel-hover", "ui-panel-hover"));
        assert!(!has_class("ui-panel-hover", "ui-panel"));
    }

    #[test]
    fn modifier_lowercases_type() {
        assert_eq!(modifier("TextInput", None), "ui-textinput");
        assert_eq!(modifier("Panel", Some("hover")), "ui-panel-hover");
        assert_eq!(modifier("Panel", Some("")), "ui-panel");
    }
}
