//! URL query-string persistence of the current slide
//!
//! The deck position lives in the `slide` query parameter. Updates use
//! replace semantics: the address changes, history does not grow.

use crate::error::PrepResult;
use url::Url;

/// Query parameter carrying the 1-based slide index
pub const SLIDE_PARAM: &str = "slide";

/// Address of the presentation page when nothing else is known
pub const INTRO_URL: &str = "app://aem-prep/intro";

/// Seam over wherever the current address lives (browser bar, window title, test double)
pub trait Location {
    /// Raw value of the `slide` parameter, if present
    fn slide_param(&self) -> Option<String>;

    /// Rewrite the `slide` parameter in place, without adding a history entry
    fn replace_slide_param(&mut self, slide: u32);
}

/// [`Location`] backed by a parsed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLocation {
    url: Url,
}

impl QueryLocation {
    pub fn parse(raw: &str) -> PrepResult<Self> {
        Ok(Self {
            url: Url::parse(raw)?,
        })
    }

    pub fn from_url(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl Default for QueryLocation {
    fn default() -> Self {
        Self::from_url(Url::parse(INTRO_URL).expect("static intro URL is valid"))
    }
}

impl Location for QueryLocation {
    fn slide_param(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == SLIDE_PARAM)
            .map(|(_, value)| value.into_owned())
    }

    fn replace_slide_param(&mut self, slide: u32) {
        let others: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != SLIDE_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut pairs = self.url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &others {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(SLIDE_PARAM, &slide.to_string());
    }
}

/// Resolve the initial slide from a raw parameter value.
///
/// Leading whitespace and an optional sign are accepted and trailing garbage
/// after the digits is ignored (`"7abc"` reads as 7). Anything absent,
/// non-numeric or outside `[1, total]` resolves to 1.
pub fn resolve_initial_slide(raw: Option<&str>, total: u32) -> u32 {
    raw.and_then(parse_leading_int)
        .filter(|n| *n >= 1 && *n <= i64::from(total))
        .map(|n| n as u32)
        .unwrap_or(1)
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate absurdly long inputs; they are out of range either way
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
