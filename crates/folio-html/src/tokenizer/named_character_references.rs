//! Named character reference lookup table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! The full table has 2,231 entries. Content pasted into an editor uses a
//! small, stable subset: markup escapes, the Latin-1 block, typographic
//! punctuation, and a handful of arrows and symbols. Names without the
//! trailing semicolon are the legacy forms the standard still accepts.

/// Entity names (without the leading `&`) and their replacement text,
/// sorted by byte order for binary search.
static NAMED_ENTITIES: &[(&str, &str)] = &[
    ("AElig", "\u{00C6}"),
    ("AElig;", "\u{00C6}"),
    ("Aacute", "\u{00C1}"),
    ("Aacute;", "\u{00C1}"),
    ("Acirc", "\u{00C2}"),
    ("Acirc;", "\u{00C2}"),
    ("Agrave", "\u{00C0}"),
    ("Agrave;", "\u{00C0}"),
    ("Aring", "\u{00C5}"),
    ("Aring;", "\u{00C5}"),
    ("Atilde", "\u{00C3}"),
    ("Atilde;", "\u{00C3}"),
    ("Auml", "\u{00C4}"),
    ("Auml;", "\u{00C4}"),
    ("Ccedil", "\u{00C7}"),
    ("Ccedil;", "\u{00C7}"),
    ("Dagger;", "\u{2021}"),
    ("ETH", "\u{00D0}"),
    ("ETH;", "\u{00D0}"),
    ("Eacute", "\u{00C9}"),
    ("Eacute;", "\u{00C9}"),
    ("Ecirc", "\u{00CA}"),
    ("Ecirc;", "\u{00CA}"),
    ("Egrave", "\u{00C8}"),
    ("Egrave;", "\u{00C8}"),
    ("Euml", "\u{00CB}"),
    ("Euml;", "\u{00CB}"),
    ("Iacute", "\u{00CD}"),
    ("Iacute;", "\u{00CD}"),
    ("Icirc", "\u{00CE}"),
    ("Icirc;", "\u{00CE}"),
    ("Igrave", "\u{00CC}"),
    ("Igrave;", "\u{00CC}"),
    ("Iuml", "\u{00CF}"),
    ("Iuml;", "\u{00CF}"),
    ("Ntilde", "\u{00D1}"),
    ("Ntilde;", "\u{00D1}"),
    ("OElig;", "\u{0152}"),
    ("Oacute", "\u{00D3}"),
    ("Oacute;", "\u{00D3}"),
    ("Ocirc", "\u{00D4}"),
    ("Ocirc;", "\u{00D4}"),
    ("Ograve", "\u{00D2}"),
    ("Ograve;", "\u{00D2}"),
    ("Omega;", "\u{03A9}"),
    ("Oslash", "\u{00D8}"),
    ("Oslash;", "\u{00D8}"),
    ("Otilde", "\u{00D5}"),
    ("Otilde;", "\u{00D5}"),
    ("Ouml", "\u{00D6}"),
    ("Ouml;", "\u{00D6}"),
    ("Prime;", "\u{2033}"),
    ("Scaron;", "\u{0160}"),
    ("THORN", "\u{00DE}"),
    ("THORN;", "\u{00DE}"),
    ("Uacute", "\u{00DA}"),
    ("Uacute;", "\u{00DA}"),
    ("Ucirc", "\u{00DB}"),
    ("Ucirc;", "\u{00DB}"),
    ("Ugrave", "\u{00D9}"),
    ("Ugrave;", "\u{00D9}"),
    ("Uuml", "\u{00DC}"),
    ("Uuml;", "\u{00DC}"),
    ("Yacute", "\u{00DD}"),
    ("Yacute;", "\u{00DD}"),
    ("Yuml;", "\u{0178}"),
    ("aacute", "\u{00E1}"),
    ("aacute;", "\u{00E1}"),
    ("acirc", "\u{00E2}"),
    ("acirc;", "\u{00E2}"),
    ("acute", "\u{00B4}"),
    ("acute;", "\u{00B4}"),
    ("aelig", "\u{00E6}"),
    ("aelig;", "\u{00E6}"),
    ("agrave", "\u{00E0}"),
    ("agrave;", "\u{00E0}"),
    ("alpha;", "\u{03B1}"),
    ("amp", "&"),
    ("amp;", "&"),
    ("apos;", "'"),
    ("aring", "\u{00E5}"),
    ("aring;", "\u{00E5}"),
    ("atilde", "\u{00E3}"),
    ("atilde;", "\u{00E3}"),
    ("auml", "\u{00E4}"),
    ("auml;", "\u{00E4}"),
    ("bdquo;", "\u{201E}"),
    ("beta;", "\u{03B2}"),
    ("brvbar", "\u{00A6}"),
    ("brvbar;", "\u{00A6}"),
    ("bull;", "\u{2022}"),
    ("ccedil", "\u{00E7}"),
    ("ccedil;", "\u{00E7}"),
    ("cedil", "\u{00B8}"),
    ("cedil;", "\u{00B8}"),
    ("cent", "\u{00A2}"),
    ("cent;", "\u{00A2}"),
    ("check;", "\u{2713}"),
    ("circ;", "\u{02C6}"),
    ("clubs;", "\u{2663}"),
    ("copy", "\u{00A9}"),
    ("copy;", "\u{00A9}"),
    ("curren", "\u{00A4}"),
    ("curren;", "\u{00A4}"),
    ("dagger;", "\u{2020}"),
    ("darr;", "\u{2193}"),
    ("deg", "\u{00B0}"),
    ("deg;", "\u{00B0}"),
    ("delta;", "\u{03B4}"),
    ("diams;", "\u{2666}"),
    ("divide", "\u{00F7}"),
    ("divide;", "\u{00F7}"),
    ("eacute", "\u{00E9}"),
    ("eacute;", "\u{00E9}"),
    ("ecirc", "\u{00EA}"),
    ("ecirc;", "\u{00EA}"),
    ("egrave", "\u{00E8}"),
    ("egrave;", "\u{00E8}"),
    ("emsp;", "\u{2003}"),
    ("ensp;", "\u{2002}"),
    ("eth", "\u{00F0}"),
    ("eth;", "\u{00F0}"),
    ("euml", "\u{00EB}"),
    ("euml;", "\u{00EB}"),
    ("euro;", "\u{20AC}"),
    ("fnof;", "\u{0192}"),
    ("frac12", "\u{00BD}"),
    ("frac12;", "\u{00BD}"),
    ("frac14", "\u{00BC}"),
    ("frac14;", "\u{00BC}"),
    ("frac34", "\u{00BE}"),
    ("frac34;", "\u{00BE}"),
    ("frasl;", "\u{2044}"),
    ("gamma;", "\u{03B3}"),
    ("ge;", "\u{2265}"),
    ("gt", ">"),
    ("gt;", ">"),
    ("harr;", "\u{2194}"),
    ("hearts;", "\u{2665}"),
    ("hellip;", "\u{2026}"),
    ("iacute", "\u{00ED}"),
    ("iacute;", "\u{00ED}"),
    ("icirc", "\u{00EE}"),
    ("icirc;", "\u{00EE}"),
    ("iexcl", "\u{00A1}"),
    ("iexcl;", "\u{00A1}"),
    ("igrave", "\u{00EC}"),
    ("igrave;", "\u{00EC}"),
    ("infin;", "\u{221E}"),
    ("iquest", "\u{00BF}"),
    ("iquest;", "\u{00BF}"),
    ("iuml", "\u{00EF}"),
    ("iuml;", "\u{00EF}"),
    ("laquo", "\u{00AB}"),
    ("laquo;", "\u{00AB}"),
    ("larr;", "\u{2190}"),
    ("ldquo;", "\u{201C}"),
    ("le;", "\u{2264}"),
    ("lrm;", "\u{200E}"),
    ("lsaquo;", "\u{2039}"),
    ("lsquo;", "\u{2018}"),
    ("lt", "<"),
    ("lt;", "<"),
    ("macr", "\u{00AF}"),
    ("macr;", "\u{00AF}"),
    ("mdash;", "\u{2014}"),
    ("micro", "\u{00B5}"),
    ("micro;", "\u{00B5}"),
    ("middot", "\u{00B7}"),
    ("middot;", "\u{00B7}"),
    ("minus;", "\u{2212}"),
    ("mu;", "\u{03BC}"),
    ("nbsp", "\u{00A0}"),
    ("nbsp;", "\u{00A0}"),
    ("ndash;", "\u{2013}"),
    ("ne;", "\u{2260}"),
    ("not", "\u{00AC}"),
    ("not;", "\u{00AC}"),
    ("ntilde", "\u{00F1}"),
    ("ntilde;", "\u{00F1}"),
    ("oacute", "\u{00F3}"),
    ("oacute;", "\u{00F3}"),
    ("ocirc", "\u{00F4}"),
    ("ocirc;", "\u{00F4}"),
    ("oelig;", "\u{0153}"),
    ("ograve", "\u{00F2}"),
    ("ograve;", "\u{00F2}"),
    ("ordf", "\u{00AA}"),
    ("ordf;", "\u{00AA}"),
    ("ordm", "\u{00BA}"),
    ("ordm;", "\u{00BA}"),
    ("oslash", "\u{00F8}"),
    ("oslash;", "\u{00F8}"),
    ("otilde", "\u{00F5}"),
    ("otilde;", "\u{00F5}"),
    ("ouml", "\u{00F6}"),
    ("ouml;", "\u{00F6}"),
    ("para", "\u{00B6}"),
    ("para;", "\u{00B6}"),
    ("permil;", "\u{2030}"),
    ("phone;", "\u{260E}"),
    ("pi;", "\u{03C0}"),
    ("plusmn", "\u{00B1}"),
    ("plusmn;", "\u{00B1}"),
    ("pound", "\u{00A3}"),
    ("pound;", "\u{00A3}"),
    ("prime;", "\u{2032}"),
    ("quot", "\""),
    ("quot;", "\""),
    ("raquo", "\u{00BB}"),
    ("raquo;", "\u{00BB}"),
    ("rarr;", "\u{2192}"),
    ("rdquo;", "\u{201D}"),
    ("reg", "\u{00AE}"),
    ("reg;", "\u{00AE}"),
    ("rlm;", "\u{200F}"),
    ("rsaquo;", "\u{203A}"),
    ("rsquo;", "\u{2019}"),
    ("sbquo;", "\u{201A}"),
    ("scaron;", "\u{0161}"),
    ("sect", "\u{00A7}"),
    ("sect;", "\u{00A7}"),
    ("shy", "\u{00AD}"),
    ("shy;", "\u{00AD}"),
    ("spades;", "\u{2660}"),
    ("star;", "\u{2606}"),
    ("starf;", "\u{2605}"),
    ("sup1", "\u{00B9}"),
    ("sup1;", "\u{00B9}"),
    ("sup2", "\u{00B2}"),
    ("sup2;", "\u{00B2}"),
    ("sup3", "\u{00B3}"),
    ("sup3;", "\u{00B3}"),
    ("szlig", "\u{00DF}"),
    ("szlig;", "\u{00DF}"),
    ("thinsp;", "\u{2009}"),
    ("thorn", "\u{00FE}"),
    ("thorn;", "\u{00FE}"),
    ("tilde;", "\u{02DC}"),
    ("times", "\u{00D7}"),
    ("times;", "\u{00D7}"),
    ("trade;", "\u{2122}"),
    ("uacute", "\u{00FA}"),
    ("uacute;", "\u{00FA}"),
    ("uarr;", "\u{2191}"),
    ("ucirc", "\u{00FB}"),
    ("ucirc;", "\u{00FB}"),
    ("ugrave", "\u{00F9}"),
    ("ugrave;", "\u{00F9}"),
    ("uml", "\u{00A8}"),
    ("uml;", "\u{00A8}"),
    ("uuml", "\u{00FC}"),
    ("uuml;", "\u{00FC}"),
    ("yacute", "\u{00FD}"),
    ("yacute;", "\u{00FD}"),
    ("yen", "\u{00A5}"),
    ("yen;", "\u{00A5}"),
    ("yuml", "\u{00FF}"),
    ("yuml;", "\u{00FF}"),
    ("zwj;", "\u{200D}"),
    ("zwnj;", "\u{200C}"),
];

/// Length of the longest entity name in [`NAMED_ENTITIES`], semicolon included.
pub const MAX_ENTITY_NAME_LEN: usize = 7;

/// Look up a named character reference.
///
/// The `name` should NOT include the leading '&'.
///
/// # Example
/// ```ignore
/// lookup_entity("amp;")  // Some("&")
/// lookup_entity("amp")   // Some("&"), legacy form
/// lookup_entity("xyz;")  // None
/// ```
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES
        .binary_search_by(|(candidate, _)| (*candidate).cmp(name))
        .ok()
        .map(|index| NAMED_ENTITIES[index].1)
}

/// Find the longest entity name that `candidate` starts with.
///
/// Returns the matched name and its replacement. The caller passes the
/// run of ASCII alphanumerics after `&`, plus a trailing `;` if present.
#[must_use]
pub fn longest_entity_prefix(candidate: &str) -> Option<(&str, &'static str)> {
    (1..=candidate.len().min(MAX_ENTITY_NAME_LEN))
        .rev()
        .filter(|&end| candidate.is_char_boundary(end))
        .find_map(|end| {
            let name = &candidate[..end];
            lookup_entity(name).map(|replacement| (name, replacement))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        assert!(NAMED_ENTITIES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn max_len_matches_table() {
        let longest = NAMED_ENTITIES.iter().map(|(n, _)| n.len()).max();
        assert_eq!(longest, Some(MAX_ENTITY_NAME_LEN));
    }

    #[test]
    fn longest_prefix_prefers_semicolon_form() {
        assert_eq!(longest_entity_prefix("amp;"), Some(("amp;", "&")));
        assert_eq!(longest_entity_prefix("notit;"), Some(("not", "\u{00AC}")));
        assert_eq!(longest_entity_prefix("zzz"), None);
    }
}
