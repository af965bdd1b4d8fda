//! Safety gate and placeholder rewriting for free-form `math` update
//! expressions.
//!
//! A math expression is embedded verbatim into generated SQL, so it must be
//! checked before use. The gate has two stages: every character must be in an
//! arithmetic whitelist, then the expression must not contain any blocklisted
//! keyword or comment marker (case-insensitive substring match).

use quarry_core::{Error, Result};

/// Substrings that are never allowed in an expression, compared
/// case-insensitively.
pub const BLOCKLIST: &[&str] = &[
    ";", "--", "/*", "*/", "UNION", "SELECT", "INSERT", "DELETE", "DROP", "UPDATE", "CREATE",
    "ALTER", "EXEC", "EXECUTE",
];

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_ascii_whitespace()
        || matches!(
            c,
            '_' | '"' | ':' | '.' | ',' | '+' | '-' | '*' | '/' | '%' | '(' | ')'
        )
}

/// Runs both stages of the gate against `expr`, the right-hand side for
/// `column`.
pub fn check(column: &str, expr: &str) -> Result<()> {
    let result = check_inner(column, expr);

    if let Err(err) = &result {
        tracing::warn!(column = column, error = %err, "rejected math expression");
    }

    result
}

fn check_inner(column: &str, expr: &str) -> Result<()> {
    if expr.trim().is_empty() {
        return Err(Error::unsafe_expression(column, "expression is empty"));
    }

    if let Some(c) = expr.chars().find(|c| !is_allowed(*c)) {
        return Err(Error::unsafe_expression(
            column,
            format!("character `{}` is not allowed", c.escape_default()),
        ));
    }

    let upper = expr.to_ascii_uppercase();

    if let Some(token) = BLOCKLIST.iter().find(|token| upper.contains(*token)) {
        return Err(Error::unsafe_expression(
            column,
            format!("`{token}` is not allowed"),
        ));
    }

    Ok(())
}

/// Splits `expr` into literal text and `:name` placeholder references.
///
/// A placeholder is a `:` followed by one or more ASCII letters, digits or
/// `_`; the name is the longest such run, so `:x` never matches inside `:xy`.
pub fn tokens(expr: &str) -> Vec<Token<'_>> {
    let bytes = expr.as_bytes();
    let mut tokens = vec![];
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b':' {
            let name_start = i + 1;
            let mut end = name_start;

            while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                end += 1;
            }

            if end > name_start {
                if literal_start < i {
                    tokens.push(Token::Literal(&expr[literal_start..i]));
                }
                tokens.push(Token::Placeholder(&expr[name_start..end]));
                literal_start = end;
                i = end;
                continue;
            }
        }

        i += 1;
    }

    if literal_start < expr.len() {
        tokens.push(Token::Literal(&expr[literal_start..]));
    }

    tokens
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),

    /// Placeholder name, without the `:`
    Placeholder(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_arithmetic() {
        check("balance", "\"balance\" * :x + :y").unwrap();
        check("score", "(\"score\" + 1) / 2 % 7").unwrap();
        check("ratio", "\"a\" - 0.5").unwrap();
    }

    #[test]
    fn rejects_characters_outside_whitelist() {
        for expr in ["1; DROP TABLE users", "'a'", "\"a\" = 1", "a[0]", "`x`"] {
            let err = check("c", expr).unwrap_err();
            assert!(err.is_unsafe_expression(), "{expr}");
        }
    }

    #[test]
    fn rejects_blocklist_in_any_case() {
        for token in BLOCKLIST {
            for expr in [
                format!("1 + {}", token.to_ascii_uppercase()),
                format!("1 + {}", token.to_ascii_lowercase()),
            ] {
                if expr.contains(';') {
                    // Already rejected by the whitelist stage
                    assert!(check("c", &expr).is_err());
                    continue;
                }
                let err = check("c", &expr).unwrap_err();
                assert!(err.is_unsafe_expression(), "{expr}");
            }
        }

        assert!(check("c", "1 + SeLeCt").is_err());
        assert!(check("c", "1 -- comment").is_err());
        assert!(check("c", "1 /* x */").is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(check("c", "   ").unwrap_err().is_unsafe_expression());
    }

    #[test]
    fn tokenizes_placeholders() {
        assert_eq!(
            tokens("\"balance\" * :x + :xy"),
            [
                Token::Literal("\"balance\" * "),
                Token::Placeholder("x"),
                Token::Literal(" + "),
                Token::Placeholder("xy"),
            ]
        );
    }

    #[test]
    fn lone_colon_is_literal() {
        assert_eq!(tokens("a : b"), [Token::Literal("a : b")]);
        assert_eq!(tokens(":"), [Token::Literal(":")]);
    }
}
