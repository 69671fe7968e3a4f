//! Single-pass scanner that finds every URL reference in a stylesheet.
//!
//! Two forms are recognised:
//!
//! - `url(...)` with a double-quoted, single-quoted or bare argument
//! - `@import "..."` / `@import '...'` (the `@import url(...)` form is covered
//!   by the first rule)
//!
//! Nested parentheses are not supported and anything that does not fit the
//! two forms is left alone, so malformed CSS simply yields fewer references.

use crate::parser::quote::{is_css_whitespace, Quote};
use std::ops::Range;

const URL_OPEN: &[u8] = b"url(";
const IMPORT: &[u8] = b"@import";

/// Which construct a reference was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Url,
    Import,
}

/// One reference located in CSS text. Offsets are byte offsets into the
/// text passed to [`locate_references`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssReference {
    pub kind: ReferenceKind,
    /// The payload including its quotes, with surrounding whitespace removed.
    pub span: Range<usize>,
}

impl CssReference {
    /// The raw payload, quotes included.
    pub fn raw<'a>(&self, css: &'a str) -> &'a str {
        &css[self.span.clone()]
    }

    /// Span of the reference value alone, quotes excluded.
    pub fn value_span(&self, css: &str) -> Range<usize> {
        let width = Quote::detect(self.raw(css)).width();
        self.span.start + width..self.span.end - width
    }
}

/// Find all `url(...)` arguments and `@import` targets in document order.
pub fn locate_references(css: &str) -> Vec<CssReference> {
    Scanner::new(css).run()
}

/// Bytes the scanner searches forward for.
const SEARCHED: [u8; 5] = [b')', b'"', b'\'', b'\n', b'\r'];

/// Remembers the last forward search for one byte. A search from `pos`
/// answers every later query in `from..=found` (or `from..` when nothing
/// was found), so each byte of input is examined a bounded number of times.
#[derive(Debug)]
struct ByteFinder {
    byte: u8,
    from: usize,
    found: Option<usize>,
}

impl ByteFinder {
    fn new(byte: u8) -> Self {
        ByteFinder {
            byte,
            from: usize::MAX,
            found: None,
        }
    }

    fn next_from(&mut self, bytes: &[u8], pos: usize, steps: &mut usize) -> Option<usize> {
        if pos >= self.from && self.found.map_or(true, |found| pos <= found) {
            return self.found;
        }
        let found = bytes[pos..]
            .iter()
            .position(|&b| b == self.byte)
            .map(|offset| pos + offset);
        *steps += found.map_or(bytes.len(), |f| f + 1) - pos;
        self.from = pos;
        self.found = found;
        found
    }
}

struct Scanner<'a> {
    css: &'a str,
    bytes: &'a [u8],
    finders: [ByteFinder; 5],
    /// Last `(quote end, offset after following whitespace)` pair.
    after_quote: Option<(usize, usize)>,
    /// Bytes examined so far.
    steps: usize,
}

impl<'a> Scanner<'a> {
    fn new(css: &'a str) -> Self {
        Scanner {
            css,
            bytes: css.as_bytes(),
            finders: SEARCHED.map(ByteFinder::new),
            after_quote: None,
            steps: 0,
        }
    }

    fn run(&mut self) -> Vec<CssReference> {
        let bytes = self.bytes;
        let mut references = Vec::new();
        let mut pos = 0;

        // Only ASCII is ever compared, so stepping byte by byte never splits a
        // match inside a multi-byte character.
        while pos < bytes.len() {
            self.steps += 1;
            let rest = &bytes[pos..];
            let found = if rest.starts_with(URL_OPEN) {
                self.url_argument(pos + URL_OPEN.len())
                    .map(|(span, next)| (ReferenceKind::Url, span, next))
            } else if rest.starts_with(IMPORT) {
                self.import_target(pos + IMPORT.len())
                    .map(|(span, next)| (ReferenceKind::Import, span, next))
            } else {
                None
            };

            match found {
                Some((kind, span, next)) => {
                    log::trace!("{:?} reference at {:?}: {}", kind, span, &self.css[span.clone()]);
                    references.push(CssReference { kind, span });
                    pos = next;
                }
                None => pos += 1,
            }
        }

        log::trace!(
            "{} references, {} bytes in {} steps",
            references.len(),
            bytes.len(),
            self.steps
        );
        references
    }

    /// Next occurrence of `byte` (one of [`SEARCHED`]) at or after `pos`.
    fn find(&mut self, byte: u8, pos: usize) -> Option<usize> {
        let slot = match byte {
            b')' => 0,
            b'"' => 1,
            b'\'' => 2,
            b'\n' => 3,
            _ => 4,
        };
        self.finders[slot].next_from(self.bytes, pos, &mut self.steps)
    }

    fn skip_whitespace(&mut self, mut pos: usize) -> usize {
        while pos < self.bytes.len() && is_css_whitespace(self.bytes[pos]) {
            self.steps += 1;
            pos += 1;
        }
        pos
    }

    /// Scan the argument of a `url(` whose opening parenthesis ends at `open`.
    /// Returns the trimmed payload span and the offset just past `)`.
    fn url_argument(&mut self, open: usize) -> Option<(Range<usize>, usize)> {
        let start = self.skip_whitespace(open);

        if let Some(q @ (b'"' | b'\'')) = self.bytes.get(start).copied() {
            if let Some(quote_end) = self.find(q, start + 1) {
                let end = quote_end + 1;
                let close = match self.after_quote {
                    Some((cached_end, close)) if cached_end == end => close,
                    _ => {
                        let close = self.skip_whitespace(end);
                        self.after_quote = Some((end, close));
                        close
                    }
                };
                if self.bytes.get(close) == Some(&b')') {
                    return Some((start..end, close + 1));
                }
            }
        }

        // Bare argument: everything up to the first `)`.
        let close = self.find(b')', open)?;
        let mut end = close;
        while end > start && is_css_whitespace(self.bytes[end - 1]) {
            self.steps += 1;
            end -= 1;
        }
        Some((start..end, close + 1))
    }

    /// Scan the quoted target of an `@import` keyword ending at `after`.
    /// Returns the payload span (quotes included) and the offset past it.
    fn import_target(&mut self, after: usize) -> Option<(Range<usize>, usize)> {
        let start = self.skip_whitespace(after);
        if start == after {
            return None;
        }
        let q = match self.bytes.get(start) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => return None,
        };
        let close = self.find(q, start + 1)?;
        let line_end = [self.find(b'\n', start + 1), self.find(b'\r', start + 1)]
            .into_iter()
            .flatten()
            .min();
        if line_end.is_some_and(|line_end| line_end < close) {
            return None;
        }
        Some((start..close + 1, close + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_refs(css: &str) -> Vec<(ReferenceKind, &str)> {
        locate_references(css)
            .iter()
            .map(|r| (r.kind, r.raw(css)))
            .collect()
    }

    #[test]
    fn test_url_argument_forms() {
        let css = r#"a{background:url("a.png")} b{background:url('b.png')} c{background:url( c.png )}"#;
        assert_eq!(
            raw_refs(css),
            vec![
                (ReferenceKind::Url, "\"a.png\""),
                (ReferenceKind::Url, "'b.png'"),
                (ReferenceKind::Url, "c.png"),
            ]
        );
    }

    #[test]
    fn test_value_span_excludes_quotes() {
        let css = "x{src:url('font.woff')}";
        let refs = locate_references(css);
        assert_eq!(refs.len(), 1);
        assert_eq!(&css[refs[0].value_span(css)], "font.woff");
    }

    #[test]
    fn test_import_forms() {
        let css = "@import \"a.css\";\n@import 'b.css';\n@import url(c.css);";
        assert_eq!(
            raw_refs(css),
            vec![
                (ReferenceKind::Import, "\"a.css\""),
                (ReferenceKind::Import, "'b.css'"),
                (ReferenceKind::Url, "c.css"),
            ]
        );
    }

    #[test]
    fn test_import_requires_whitespace_and_same_line() {
        assert!(locate_references("@import\"a.css\";").is_empty());
        assert!(locate_references("@import \"a.css\n\";").is_empty());
    }

    #[test]
    fn test_quoted_argument_may_contain_parenthesis() {
        let css = r#"a{background:url("img(1).png")}"#;
        assert_eq!(raw_refs(css), vec![(ReferenceKind::Url, "\"img(1).png\"")]);
    }

    #[test]
    fn test_unterminated_forms_are_ignored() {
        assert!(locate_references("a{background:url(foo.png}").is_empty());
        assert!(locate_references("@import 'never closed;").is_empty());
    }

    #[test]
    fn test_empty_argument() {
        let css = "a{background:url()}";
        let refs = locate_references(css);
        assert_eq!(refs.len(), 1);
        assert!(refs[0].span.is_empty());
    }

    #[test]
    fn test_multibyte_text_around_references() {
        let css = "/* ünïcødé */ a::before{content:'→';background:url(ß.png)}";
        assert_eq!(raw_refs(css), vec![(ReferenceKind::Url, "ß.png")]);
    }

    #[test]
    fn test_value_span_with_non_css_whitespace() {
        let css = "a{b:url(\u{a0}\"x.png\"\u{a0})}";
        let refs = locate_references(css);
        assert_eq!(refs.len(), 1);
        assert_eq!(&css[refs[0].value_span(css)], "\u{a0}\"x.png\"\u{a0}");

        let css = "a{b:url(\u{0b}'x.png'\u{0b})}";
        let refs = locate_references(css);
        assert_eq!(&css[refs[0].value_span(css)], "\u{0b}'x.png'\u{0b}");
    }

    fn scan_steps(css: &str) -> usize {
        let mut scanner = Scanner::new(css);
        scanner.run();
        scanner.steps
    }

    #[test]
    fn test_unterminated_input_scanned_linearly() {
        for unit in ["url(", "url(\"", "url('", "url(  \"a\"  ", "@import '", "@import \"x\n"] {
            let css = unit.repeat(20_000);
            let steps = scan_steps(&css);
            assert!(
                steps <= 4 * css.len(),
                "{unit:?}: {steps} steps for {} bytes",
                css.len()
            );
        }
    }

    #[test]
    fn test_unterminated_input_still_finds_later_references() {
        let css = format!("{}a{{b:url(x.png)}}", "url(\"".repeat(1_000));
        let refs = locate_references(&css);
        // The first `url(` swallows everything up to the only `)`.
        assert_eq!(refs.len(), 1);
        assert!(refs[0].raw(&css).ends_with("url(x.png"));
    }

    #[test]
    fn test_document_order() {
        let css = "@import 'first.css'; a{b:url(second.png)} @import \"third.css\";";
        let starts: Vec<usize> = locate_references(css).iter().map(|r| r.span.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
        assert_eq!(starts.len(), 3);
    }
}
