//! Tokenization and normalization of collapsed subsequence forms.

/// One token of a collapsed form: a literal symbol or a spacer count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    Letter(u8),
    Gap(usize),
}

/// Tokenize a collapsed form: `"A10C5D"` becomes `[A][10][C][5][D]`.
pub(crate) fn parse_collapsed(s: &str) -> Vec<Token> {
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let mut j = i;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            // Digit runs in collapsed forms fit comfortably in usize.
            let value = s[i..j].parse::<usize>().unwrap_or(0);
            tokens.push(Token::Gap(value));
            i = j;
        } else {
            tokens.push(Token::Letter(bytes[i]));
            i += 1;
        }
    }
    tokens
}

/// Normalize a token list into strictly alternating letter/gap/letter form,
/// `L G L G ... L`, inserting implicit zero gaps between adjacent letters.
///
/// Leading spacer blocks are dropped; trailing ones are ignored. `None` when
/// the form holds no letters at all.
pub(crate) fn normalize_tokens(raw: &[Token]) -> Option<Vec<Token>> {
    let start = raw
        .iter()
        .position(|t| matches!(t, Token::Letter(_)))?;
    let raw = &raw[start..];

    let letter_count = raw
        .iter()
        .filter(|t| matches!(t, Token::Letter(_)))
        .count();

    let mut norm = Vec::with_capacity(2 * letter_count - 1);
    let mut idx = 0usize;
    for li in 0..letter_count {
        match raw.get(idx) {
            Some(&t @ Token::Letter(_)) => {
                norm.push(t);
                idx += 1;
            }
            _ => return None,
        }
        if li + 1 < letter_count {
            if let Some(&t @ Token::Gap(_)) = raw.get(idx) {
                norm.push(t);
                idx += 1;
            } else {
                norm.push(Token::Gap(0));
            }
        }
    }
    Some(norm)
}

/// The collapsed form with every digit removed, for skeleton comparison.
pub(crate) fn strip_digits(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_multi_digit_counts() {
        assert_eq!(
            parse_collapsed("A10C5D"),
            vec![
                Token::Letter(b'A'),
                Token::Gap(10),
                Token::Letter(b'C'),
                Token::Gap(5),
                Token::Letter(b'D'),
            ]
        );
    }

    #[test]
    fn normalization_inserts_zero_gaps() {
        let norm = normalize_tokens(&parse_collapsed("AB2C")).unwrap();
        assert_eq!(
            norm,
            vec![
                Token::Letter(b'A'),
                Token::Gap(0),
                Token::Letter(b'B'),
                Token::Gap(2),
                Token::Letter(b'C'),
            ]
        );
    }

    #[test]
    fn normalization_drops_leading_and_trailing_gaps() {
        let norm = normalize_tokens(&parse_collapsed("3A2B1")).unwrap();
        assert_eq!(
            norm,
            vec![Token::Letter(b'A'), Token::Gap(2), Token::Letter(b'B')]
        );
    }

    #[test]
    fn letterless_form_is_none() {
        assert!(normalize_tokens(&parse_collapsed("12")).is_none());
        assert!(normalize_tokens(&[]).is_none());
    }

    #[test]
    fn strip_digits_keeps_letters_only() {
        assert_eq!(strip_digits("A10b2C"), "AbC");
    }
}
