//! Builder for dotted query terms.

/// Characters that force a token to be quoted.
const SPECIAL: &[char] = &['"', '\'', '\\'];

/// Returns the query expression scoping a search to the named book.
///
/// ```rust
/// use panenav::query::book_scope;
///
/// assert_eq!(book_scope("Inbox"), "b.Inbox");
/// assert_eq!(book_scope("Work Log"), r#"b."Work Log""#);
/// ```
#[must_use]
pub fn book_scope(name: &str) -> String {
    format!("b.{}", quote(name))
}

/// Quotes `token` if it would otherwise split or confuse the tokenizer.
///
/// Tokens that are empty, contain whitespace or contain quote/backslash
/// characters are wrapped in double quotes with `"` and `\` escaped.
#[must_use]
pub fn quote(token: &str) -> String {
    let needs_quotes =
        token.is_empty() || token.chars().any(|c| c.is_whitespace() || SPECIAL.contains(&c));

    if !needs_quotes {
        return token.to_string();
    }

    let mut out = String::with_capacity(token.len() + 2);
    out.push('"');
    for c in token.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_stay_bare() {
        assert_eq!(book_scope("journal-2024"), "b.journal-2024");
    }

    #[test]
    fn special_names_are_quoted_and_escaped() {
        assert_eq!(quote(""), r#""""#);
        assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote(r"a\b"), r#""a\\b""#);
        assert_eq!(quote("it's"), r#""it's""#);
    }
}
