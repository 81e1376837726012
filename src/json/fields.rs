//! Token accessors used for manual schema extraction

use super::tokenizer::{Token, TokenKind};

/// Longest span handed to the number parser
const MAX_NUMBER_LEN: usize = 63;

fn span<'t>(bytes: &'t [u8], token: &Token) -> &'t [u8] {
    let end = token.end_offset().min(bytes.len());
    bytes.get(token.start..end).unwrap_or_default()
}

/// True when `token` is a string whose raw bytes equal `literal`
///
/// Escapes are not decoded: `"a\"b"` only matches the literal `a\"b`.
pub fn token_equals_str<T: AsRef<[u8]> + ?Sized>(
    text: &T,
    token: &Token,
    literal: &str,
) -> bool {
    token.kind == TokenKind::String && span(text.as_ref(), token) == literal.as_bytes()
}

/// Parse the leading decimal number of a token span
///
/// Trailing garbage is ignored and a span with no numeric prefix reads as 0.0.
/// `inf`, `infinity` and `nan` are recognised in any case, with an optional sign.
pub fn token_to_f64<T: AsRef<[u8]> + ?Sized>(text: &T, token: &Token) -> f64 {
    let bytes = span(text.as_ref(), token);
    let bytes = &bytes[..bytes.len().min(MAX_NUMBER_LEN)];
    let prefix = numeric_prefix(bytes);
    std::str::from_utf8(&bytes[..prefix])
        .ok()
        .and_then(|number| number.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// [`token_to_f64`] rounded half away from zero, saturating at the i32 range
pub fn token_to_i32<T: AsRef<[u8]> + ?Sized>(text: &T, token: &Token) -> i32 {
    token_to_f64(text, token).round() as i32
}

/// Words accepted in place of digits, longest first
const SPECIAL_VALUES: [&[u8]; 3] = [b"infinity", b"inf", b"nan"];

/// Length of the longest prefix shaped like `[+-]digits[.digits][(e|E)[+-]digits]`
/// or `[+-](inf|infinity|nan)`
fn numeric_prefix(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i = 1;
    }
    let rest = &bytes[i..];
    if let Some(word) = SPECIAL_VALUES
        .iter()
        .find(|word| rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word))
    {
        return i + word.len();
    }

    let int_end = digits_from(i);
    let mut end = int_end;
    let mut has_digits = int_end > i;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 || has_digits {
            has_digits |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}
