/// Splits `s` into whitespace delimited tokens where whitespace between a pair of double quotes
/// does not end a token, so `vendor "F5 NETWORKS INC."` is two tokens. Quotes stay part of the
/// returned tokens. Returns `None` if `s` holds an unbalanced double quote.
pub fn split_quoted_tokens(s: &str) -> Option<Vec<&str>> {
    let mut tokens = vec![];
    let mut start = None;
    let mut quoted = false;

    for (idx, c) in s.char_indices() {
        if c == '"' {
            quoted = !quoted;
        }

        if c.is_whitespace() && !quoted {
            if let Some(begin) = start.take() {
                tokens.push(&s[begin..idx]);
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if quoted {
        return None;
    }

    if let Some(begin) = start {
        tokens.push(&s[begin..]);
    }

    Some(tokens)
}

/// Strips a single pair of surrounding double quotes from `s`, if present.
pub fn trim_quotes(s: &str) -> &str {
    if s.len() < 2 {
        return s;
    }

    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

/// Returns true if any of the characters in `cutset` show up in `s`.
pub fn string_contains_any_char(
    s: &str,
    cutset: &[char],
) -> bool {
    s.chars().any(|c| cutset.contains(&c))
}

/// Returns true if any of the characters in `cutset` show up in `s` outside of double quotes.
pub fn string_contains_unquoted_char(
    s: &str,
    cutset: &[char],
) -> bool {
    let mut quoted = false;

    s.chars().any(|c| {
        if c == '"' {
            quoted = !quoted;
        }

        !quoted && cutset.contains(&c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_tokens() {
        assert_eq!(
            split_quoted_tokens("  mtu 9198 "),
            Some(vec!["mtu", "9198"])
        );
        assert_eq!(
            split_quoted_tokens("vendor \"F5 NETWORKS INC.\""),
            Some(vec!["vendor", "\"F5 NETWORKS INC.\""])
        );
        assert_eq!(
            split_quoted_tokens("\"/Common/my rule\""),
            Some(vec!["\"/Common/my rule\""])
        );
        assert_eq!(
            split_quoted_tokens("description \"say \"hi\"\""),
            Some(vec!["description", "\"say \"hi\"\""])
        );
        assert_eq!(split_quoted_tokens("   "), Some(vec![]));
        assert_eq!(split_quoted_tokens("name \"dangling"), None);
    }

    #[test]
    fn trims_only_matched_quotes() {
        assert_eq!(trim_quotes("\"F5 Qualified Optic\""), "F5 Qualified Optic");
        assert_eq!(trim_quotes("\"dangling"), "\"dangling");
        assert_eq!(trim_quotes("\""), "\"");
        assert_eq!(trim_quotes("plain"), "plain");
        assert_eq!(trim_quotes("\"\""), "");
    }

    #[test]
    fn finds_any_char() {
        assert!(string_contains_any_char("a{b", &['{', '}']));
        assert!(!string_contains_any_char("ab", &['{', '}']));
    }

    #[test]
    fn finds_unquoted_char() {
        assert!(string_contains_unquoted_char("a{", &['{', '}']));
        assert!(!string_contains_unquoted_char("\"a{b}\"", &['{', '}']));
        assert!(string_contains_unquoted_char("\"a\"{", &['{', '}']));
    }
}
