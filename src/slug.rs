//! Public keys derived from titles and names.
//!
//! Posts and startups are looked up by recomputing these keys for every
//! candidate, so the rules here must stay byte-for-byte compatible with the
//! keys already out in the wild (stored slugs, shared links).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Whitespace as matched by `\s` and stripped by `trim()` in browser
/// JavaScript: the ECMAScript WhiteSpace and LineTerminator sets. Unlike
/// `char::is_whitespace` this excludes U+0085 and includes U+FEFF.
fn is_space(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r' | ' '
            | '\u{a0}' | '\u{1680}' | '\u{2000}'..='\u{200a}'
            | '\u{2028}' | '\u{2029}' | '\u{202f}' | '\u{205f}' | '\u{3000}' | '\u{feff}'
    )
}

/// Slug for a post title.
///
/// Lower-cases, drops everything but ASCII letters, digits, whitespace and
/// hyphens, then folds each whitespace/hyphen run into one hyphen and trims
/// hyphens off both ends.
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for ch in lowered.trim_matches(is_space).chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else if ch == '-' || is_space(ch) {
            pending_dash = true;
        }
    }

    slug
}

/// URL segment for a startup name: lower-cased, whitespace runs replaced by a
/// single hyphen, then percent-encoded like a URI component.
pub fn derive_url_name(name: &str) -> String {
    let mut dashed = String::with_capacity(name.len());
    let mut in_space = false;

    for ch in name.to_lowercase().chars() {
        if is_space(ch) {
            if !in_space {
                dashed.push('-');
            }
            in_space = true;
        } else {
            dashed.push(ch);
            in_space = false;
        }
    }

    encode_segment(&dashed)
}

/// Percent-encodes `segment` the way `encodeURIComponent` does.
///
/// Routers hand path parameters over decoded; re-encoding one gives the
/// form [`derive_url_name`] produces.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_title() {
        assert_eq!(derive_slug("My Cool Startup!"), "my-cool-startup");
        assert_eq!(derive_slug("Hello,   World"), "hello-world");
        assert_eq!(derive_slug("Rust -- the  good parts"), "rust-the-good-parts");
    }

    #[test]
    fn slug_is_idempotent() {
        for title in ["My Cool Startup!", "  spaced   out  ", "a-b--c", "Ünïcödé Title"] {
            let once = derive_slug(title);
            assert_eq!(derive_slug(&once), once, "title: {title:?}");
        }
    }

    #[test]
    fn slug_trims_hyphens() {
        assert_eq!(derive_slug("- leading and trailing -"), "leading-and-trailing");
        assert_eq!(derive_slug("---"), "");
        assert_eq!(derive_slug(""), "");
    }

    #[test]
    fn slug_drops_non_ascii_letters() {
        assert_eq!(derive_slug("Café Culture"), "caf-culture");
        assert_eq!(derive_slug("a ! b"), "a-b");
        assert_eq!(derive_slug("don't stop"), "dont-stop");
    }

    #[test]
    fn url_name_plain() {
        assert_eq!(derive_url_name("Acme Inc"), "acme-inc");
        assert_eq!(derive_url_name("Acme \t  Inc"), "acme-inc");
    }

    #[test]
    fn url_name_keeps_uri_component_marks() {
        assert_eq!(derive_url_name("Yes! (Really)"), "yes!-(really)");
        assert_eq!(derive_url_name("it's_a.test~*"), "it's_a.test~*");
    }

    #[test]
    fn url_name_encodes_reserved_and_unicode() {
        assert_eq!(derive_url_name("R&D Labs"), "r%26d-labs");
        assert_eq!(derive_url_name("50% Off/Now"), "50%25-off%2Fnow");
        assert_eq!(derive_url_name("Café"), "caf%C3%A9");
    }

    #[test]
    fn next_line_is_not_whitespace() {
        assert_eq!(derive_slug("a\u{85}b"), "ab");
        assert_eq!(derive_slug("\u{85}a"), "a");
        assert_eq!(derive_url_name("A\u{85}B"), "a%C2%85b");
    }

    #[test]
    fn script_whitespace_folds() {
        assert_eq!(derive_slug("a\u{a0}b\u{3000}c\u{feff}d"), "a-b-c-d");
        assert_eq!(derive_slug("\u{2028}title\u{202f}"), "title");
        assert_eq!(derive_url_name("A\u{0b}\u{0c}B"), "a-b");
    }

    #[test]
    fn decoded_segments_re_encode_to_url_names() {
        for name in ["R&D Labs", "Café", "50% Off/Now", "Yes! (Really)", "Acme Inc"] {
            let decoded = percent_encoding::percent_decode_str(&derive_url_name(name))
                .decode_utf8()
                .unwrap()
                .into_owned();
            assert_eq!(encode_segment(&decoded), derive_url_name(name), "name: {name:?}");
        }
        assert_eq!(encode_segment("r&d-labs"), "r%26d-labs");
    }

    #[test]
    fn url_name_keeps_edge_whitespace_as_hyphens() {
        assert_eq!(derive_url_name(" Acme "), "-acme-");
    }
}
