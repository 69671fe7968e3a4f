/// Quote character that wrapped a reference in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `"..."`
    Double,
    /// `'...'`
    Single,
    /// Bare `url(...)` argument.
    None,
}

impl Quote {
    fn from_byte(byte: u8) -> Option<Quote> {
        match byte {
            b'"' => Some(Quote::Double),
            b'\'' => Some(Quote::Single),
            _ => None,
        }
    }

    /// Quote style of `raw` as written, without trimming anything first.
    pub fn detect(raw: &str) -> Quote {
        let bytes = raw.as_bytes();
        match bytes {
            [first, .., last] if first == last => Quote::from_byte(*first).unwrap_or(Quote::None),
            _ => Quote::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quote::Double => "\"",
            Quote::Single => "'",
            Quote::None => "",
        }
    }

    /// Number of bytes the quote occupies on each side of the value.
    pub fn width(self) -> usize {
        self.as_str().len()
    }

    /// Re-serialize `value` with this quote style.
    pub fn wrap(self, value: &str) -> String {
        let q = self.as_str();
        let mut out = String::with_capacity(value.len() + 2 * q.len());
        out.push_str(q);
        out.push_str(value);
        out.push_str(q);
        out
    }
}

/// A reference payload split into its value and the quote around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotedValue<'a> {
    pub value: &'a str,
    pub quote: Quote,
}

/// Whitespace as CSS defines it. Other Unicode spaces are ordinary text.
pub(crate) fn is_css_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

/// Strip matching quotes from a raw payload.
///
/// Surrounding CSS whitespace is trimmed first. The payload counts as quoted
/// only when its first and last characters are the same quote character.
pub fn unquote(raw: &str) -> QuotedValue<'_> {
    let trimmed = raw.trim_matches(|c: char| c.is_ascii() && is_css_whitespace(c as u8));
    let quote = Quote::detect(trimmed);
    let width = quote.width();
    QuotedValue {
        value: &trimmed[width..trimmed.len() - width],
        quote,
    }
}
