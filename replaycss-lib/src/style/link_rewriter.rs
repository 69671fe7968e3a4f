use crate::error::RewriteError;
use crate::parser::css_refs::locate_references;
use crate::parser::quote::{unquote, QuotedValue};

/// Replace every `url(...)` argument and `@import` target in `css` with the
/// output of `rewriter`, keeping each reference's original quote style.
///
/// A reference whose rewrite fails keeps its original text. The result
/// always ends with `;` so callers can append further declarations.
pub fn rewrite_css_links<F>(css: &str, mut rewriter: F) -> String
where
    F: FnMut(&str) -> Result<String, RewriteError>,
{
    let references = locate_references(css);
    let mut out = String::with_capacity(css.len() + references.len() * 32 + 1);
    let mut cursor = 0;

    for reference in &references {
        let raw = reference.raw(css);
        let QuotedValue { value, quote } = unquote(raw);

        out.push_str(&css[cursor..reference.span.start]);
        match rewriter(value) {
            Ok(rewritten) => {
                if rewritten != value {
                    log::debug!("{:?} `{}` -> `{}`", reference.kind, value, rewritten);
                }
                out.push_str(&quote.wrap(&rewritten));
            }
            Err(e) => {
                log::warn!("leaving `{}` unresolved: {}", value, e);
                out.push_str(raw);
            }
        }
        cursor = reference.span.end;
    }
    out.push_str(&css[cursor..]);

    if !out.ends_with(';') {
        out.push(';');
    }
    out
}
