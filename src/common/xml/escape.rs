use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::borrow::Cow;

const NAMED: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];
const REPLACEMENTS: [&str; 5] = ["&", "<", ">", "\"", "'"];

// The last pattern introduces a numeric character reference; the body is
// decoded by hand.
static XML_UNESCAPER: Lazy<Option<AhoCorasick>> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(NAMED.iter().copied().chain(std::iter::once("&#")))
        .ok()
});

/// Unescape XML entities.
///
/// Replaces the five predefined entities and decimal/hex character
/// references in a single pass, so `&amp;lt;` yields `&lt;` rather than `<`.
/// Unknown or malformed references are left unchanged.
///
/// # Examples
///
/// ```
/// use deckread::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&quot;hello&apos;"), "\"hello'");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&#65;&#x42;"), "AB");
/// assert_eq!(unescape_xml("a & b"), "a & b");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// assert_eq!(unescape_xml("&#xZZ;"), "&#xZZ;");
/// ```
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return Cow::Borrowed(s);
    }
    let Some(automaton) = XML_UNESCAPER.as_ref() else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    let mut last = 0;

    for m in automaton.find_iter(s) {
        if m.start() < last {
            continue;
        }
        let pattern = m.pattern().as_usize();
        if pattern < NAMED.len() {
            out.push_str(&s[last..m.start()]);
            out.push_str(REPLACEMENTS[pattern]);
            last = m.end();
            continue;
        }

        let rest = &s[m.end()..];
        let Some(semi) = memchr::memchr(b';', rest.as_bytes()) else {
            continue;
        };
        if let Some(c) = decode_char_ref(&rest[..semi]) {
            out.push_str(&s[last..m.start()]);
            out.push(c);
            last = m.end() + semi + 1;
        }
    }

    out.push_str(&s[last..]);
    Cow::Owned(out)
}

/// Decode the body of a character reference (`65` or `x41`).
fn decode_char_ref(body: &str) -> Option<char> {
    let code = match body.strip_prefix(['x', 'X']) {
        Some(hex) if !hex.is_empty() && hex.len() <= 6 => u32::from_str_radix(hex, 16).ok()?,
        Some(_) => return None,
        None if !body.is_empty() && body.len() <= 7 && body.bytes().all(|b| b.is_ascii_digit()) => {
            atoi_simd::parse::<u32>(body.as_bytes()).ok()?
        },
        None => return None,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrowed_when_no_entities() {
        assert!(matches!(unescape_xml("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_mixed_references() {
        assert_eq!(unescape_xml("A&amp;B"), "A&B");
        assert_eq!(unescape_xml("&#38;lt;"), "&lt;");
        assert_eq!(unescape_xml("x&#8482;y&#"), "x\u{2122}y&#");
        assert_eq!(unescape_xml("&#xD800;"), "&#xD800;");
    }
}
