//! RFC 5988 `Link` header parsing.
//!
//! Paginated APIs advertise neighbouring pages in the `Link` response header:
//!
//! ```text
//! Link: </images?page=1>; rel="prev", </images?page=3>; rel="next"
//! ```
//!
//! Only the target URL and the `rel` parameter are interpreted; other
//! parameters (`title`, `type`, ...) are skipped.

use std::collections::HashMap;


/// Parses a `Link` header value into a map of relation type to target URL.
///
/// Relation types are lowercased. When several entries share a relation,
/// the first one wins. A `rel` value listing several space-separated
/// relation types registers the URL under each of them. Entries without a
/// `<...>` target or without a `rel` parameter are ignored.
///
/// # Examples
///
/// ```
/// use libmarket::link::parse_link_header;
///
/// let links = parse_link_header(r#"</images?page=1>; rel="prev", </images?page=3>; rel="next""#);
/// assert_eq!(links.get("next").map(String::as_str), Some("/images?page=3"));
/// assert_eq!(links.get("prev").map(String::as_str), Some("/images?page=1"));
/// ```
pub fn parse_link_header(value: &str) -> HashMap<String, String> {
    let mut links = HashMap::new();

    for entry in split_outside_brackets_and_quotes(value, ',') {
        let Some((target, params)) = split_target(entry) else {
            continue;
        };

        let rel = split_outside_brackets_and_quotes(params, ';')
            .into_iter()
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("rel"))
            .map(|(_, value)| unquote(value.trim()));

        if let Some(rel) = rel {
            for relation in rel.split_whitespace() {
                links
                    .entry(relation.to_ascii_lowercase())
                    .or_insert_with(|| target.to_string());
            }
        }
    }

    links
}

/// Returns the target of the `rel="next"` entry, if any.
///
/// # Examples
///
/// ```
/// use libmarket::link::next_link;
///
/// assert_eq!(
///     next_link(r#"<https://api.example.com/images?page=2>; rel="next""#),
///     Some("https://api.example.com/images?page=2".to_string())
/// );
/// assert_eq!(next_link(r#"</images?page=1>; rel="prev""#), None);
/// ```
pub fn next_link(value: &str) -> Option<String> {
    parse_link_header(value).remove("next")
}

/// Splits `<target>; params` into its target and the raw parameter string.
fn split_target(entry: &str) -> Option<(&str, &str)> {
    let entry = entry.trim();
    let rest = entry.strip_prefix('<')?;
    let end = rest.find('>')?;
    let target = rest[..end].trim();
    if target.is_empty() {
        return None;
    }
    Some((target, &rest[end + 1..]))
}

/// Splits on `separator`, ignoring separators inside `<...>` or quotes.
fn split_outside_brackets_and_quotes(value: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for (idx, c) in value.char_indices() {
        match (c, quote) {
            (q, Some(open)) if q == open => quote = None,
            (_, Some(_)) => {}
            ('"' | '\'', None) if !in_brackets => quote = Some(c),
            ('<', None) => in_brackets = true,
            ('>', None) => in_brackets = false,
            (c, None) if c == separator && !in_brackets => {
                parts.push(&value[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);

    parts
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
        {
            return inner;
        }
    }
    value
}
