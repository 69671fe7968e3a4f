/// Interaction pseudo-classes and the static classes that stand in for them
/// during replay.
pub const PSEUDO_CLASS_SUBSTITUTES: &[(&str, &str)] = &[
    (":hover", ".-openreplay-hover"),
    (":focus", ".-openreplay-focus"),
];

/// Replace every `:hover` and `:focus` in `css` with its substitute class.
///
/// This is plain substring replacement: occurrences inside strings or
/// comments are replaced too, and `:focus-within` becomes
/// `.-openreplay-focus-within`.
pub fn rewrite_pseudo_classes(css: &str) -> String {
    PSEUDO_CLASS_SUBSTITUTES
        .iter()
        .fold(css.to_string(), |acc, &(pseudo, class)| acc.replace(pseudo, class))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_rewritten() {
        assert_eq!(
            rewrite_pseudo_classes("a:hover, input:focus { color: red }"),
            "a.-openreplay-hover, input.-openreplay-focus { color: red }"
        );
    }

    #[test]
    fn test_blind_substitution() {
        assert_eq!(
            rewrite_pseudo_classes("a::after{content:\":hover\"} div:focus-within{}"),
            "a::after{content:\".-openreplay-hover\"} div.-openreplay-focus-within{}"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = rewrite_pseudo_classes("a:hover:focus{}");
        assert_eq!(once, "a.-openreplay-hover.-openreplay-focus{}");
        assert_eq!(rewrite_pseudo_classes(&once), once);
    }

    #[test]
    fn test_untouched_without_pseudo_classes() {
        assert_eq!(rewrite_pseudo_classes("a:active{}"), "a:active{}");
        assert_eq!(rewrite_pseudo_classes(""), "");
    }
}
