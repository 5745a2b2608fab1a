//! Value tokenizers for field payloads.

use crate::error::{Result, RsrcError};

/// Separators between numbers and tokens in a value.
const SEPARATORS: &[char] = &[',', ' ', '\t'];

/// Split a value on commas and blanks, dropping empty pieces.
pub fn tokenize(value: &str) -> impl Iterator<Item = &str> {
    value.split(SEPARATORS).filter(|t| !t.is_empty())
}

/// Parse exactly `N` integers from a comma/space separated value.
pub fn parse_ints<const N: usize>(value: &str) -> Result<[i32; N]> {
    let mut out = [0i32; N];
    let mut count = 0;

    for token in tokenize(value) {
        if count == N {
            return Err(count_error::<N>(value));
        }
        out[count] = token.parse().map_err(|_| {
            RsrcError::grammar(format!("'{token}' is not an integer in '{value}'"))
        })?;
        count += 1;
    }

    if count != N {
        return Err(count_error::<N>(value));
    }

    Ok(out)
}

fn count_error<const N: usize>(value: &str) -> RsrcError {
    RsrcError::grammar(format!("expected {N} integers, received '{value}'"))
        .with_help("Separate numbers with commas, e.g. 200,100,3,0")
}

/// Strip the `[...]` brackets around a tag and check it is a valid
/// identifier for generated code.
pub fn parse_tag(value: &str) -> Result<&str> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or_else(|| {
            RsrcError::grammar(format!("tag '{value}' is not enclosed in brackets"))
                .with_help("Write tags as tag=[NAME]")
        })?;

    let mut chars = inner.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if !valid {
        return Err(RsrcError::grammar(format!(
            "tag '{inner}' is not a valid identifier"
        ))
        .with_help("Tags may contain letters, digits and '_' and must not start with a digit"));
    }

    Ok(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ints_commas() {
        assert_eq!(parse_ints::<4>("200,100,3,0").unwrap(), [200, 100, 3, 0]);
    }

    #[test]
    fn test_parse_ints_mixed_separators() {
        assert_eq!(parse_ints::<2>("10, 1000").unwrap(), [10, 1000]);
        assert_eq!(parse_ints::<2>("10 1000").unwrap(), [10, 1000]);
    }

    #[test]
    fn test_parse_ints_negative() {
        assert_eq!(parse_ints::<2>("-5,7").unwrap(), [-5, 7]);
    }

    #[test]
    fn test_parse_ints_wrong_count() {
        assert!(parse_ints::<4>("1,2,3").is_err());
        assert!(parse_ints::<2>("1,2,3").is_err());
    }

    #[test]
    fn test_parse_ints_not_a_number() {
        assert!(parse_ints::<2>("1,two").is_err());
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<&str> = tokenize("music, very_high").collect();
        assert_eq!(tokens, vec!["music", "very_high"]);
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag("[EXIT_BUTTON]").unwrap(), "EXIT_BUTTON");
        assert_eq!(parse_tag("[_x1]").unwrap(), "_x1");
    }

    #[test]
    fn test_parse_tag_rejects_bad_names() {
        assert!(parse_tag("EXIT").is_err());
        assert!(parse_tag("[]").is_err());
        assert!(parse_tag("[1ST]").is_err());
        assert!(parse_tag("[EXIT BUTTON]").is_err());
    }
}
