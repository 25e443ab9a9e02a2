//! Scanning of bracketed annotation groups.
//!
//! The tree column of a sample row is an extended Newick string in which
//! vertices carry groups like `[&index=3;nd=0110;ev={...}]`. This module finds
//! the groups and splits them into `key=value` tokens; decoding the values is
//! left to [FieldKey](crate::model::FieldKey).

use crate::parser::defs::*;
use crate::parser::parsing_error::ParsingErrorType;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one bracketed group, brackets included.
static GROUP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\[\]]*\]").expect("annotation group pattern is valid"));

/// Returns all bracketed groups in `field`, in order of appearance.
///
/// # Example
/// ```
/// use biogeolog::parser::annotation_scanner::scan_groups;
///
/// let groups: Vec<&str> = scan_groups("(A[&index=0]:1,B[&index=1]:1)[&index=2];").collect();
/// assert_eq!(groups, ["[&index=0]", "[&index=1]", "[&index=2]"]);
/// ```
pub fn scan_groups(field: &str) -> impl Iterator<Item = &str> {
    GROUP_REGEX.find_iter(field).map(|m| m.as_str())
}

/// Strips the enclosing brackets and the optional `&` marker of a group.
pub fn strip_group(group: &str) -> &str {
    let inner = group.strip_prefix(GROUP_OPEN).unwrap_or(group);
    let inner = inner.strip_suffix(GROUP_CLOSE).unwrap_or(inner);
    inner.strip_prefix(ANNOTATION_MARKER).unwrap_or(inner)
}

/// Splits a stripped group into its `key=value` tokens.
///
/// Empty tokens (e.g. from a trailing `;`) are skipped.
pub fn split_tokens(inner: &str) -> impl Iterator<Item = &str> {
    inner
        .split(TOKEN_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Splits a token at its first `=` into key and value.
///
/// # Errors
/// Returns [ParsingErrorType::InvalidToken] if the token has no `=` or an
/// empty key.
pub fn split_key_value(token: &str) -> Result<(&str, &str), ParsingErrorType> {
    match token.split_once(KEY_VALUE_SEPARATOR) {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(ParsingErrorType::InvalidToken(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_groups_ignores_text_between_groups() {
        let field = "((t0[&index=0;nd=10]:1.5,t1[&index=1;nd=01]:1.5)[&index=2;nd=11]:0.5);";
        let groups: Vec<&str> = scan_groups(field).collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2], "[&index=2;nd=11]");
    }

    #[test]
    fn test_strip_group() {
        assert_eq!(strip_group("[&index=1;nd=01]"), "index=1;nd=01");
        assert_eq!(strip_group("[idx=1;nd=01]"), "idx=1;nd=01");
    }

    #[test]
    fn test_split_tokens_and_key_value() {
        let tokens: Vec<&str> = split_tokens("index=4;cs=a;;ev={}").collect();
        assert_eq!(tokens, ["index=4", "cs=a", "ev={}"]);
        assert_eq!(split_key_value("ev={}").unwrap(), ("ev", "{}"));
        assert_eq!(split_key_value("bn=7=8").unwrap(), ("bn", "7=8"));
        assert!(split_key_value("nonsense").is_err());
        assert!(split_key_value("=3").is_err());
    }
}
