//! Character reference decoding for text and attribute values.

use std::borrow::Cow;

/// Longest reference body we look at before giving up on finding `;`.
const MAX_REFERENCE_LEN: usize = 10;

/// Decode the character references the editor can produce.
///
/// Handles the common named references plus decimal and hex numeric ones.
/// Anything unrecognized is left as literal text.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        match decode_one(after) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

/// Decode a single reference body (the text after `&`).
///
/// Returns the character and the number of bytes consumed, including `;`.
fn decode_one(after: &str) -> Option<(char, usize)> {
    let semi = after
        .bytes()
        .take(MAX_REFERENCE_LEN + 1)
        .position(|b| b == b';')?;
    let body = &after[..semi];

    let ch = if let Some(num) = body.strip_prefix('#') {
        let code = if let Some(hex) = num.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        if code == 0 {
            return None;
        }
        char::from_u32(code)?
    } else {
        match body {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            "nbsp" => '\u{A0}',
            _ => return None,
        }
    };

    Some((ch, semi + 1))
}
