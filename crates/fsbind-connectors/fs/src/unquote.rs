// unquote.rs — Decode a quoted string literal payload into raw bytes.
//
// Requests carry file content as a quoted literal, e.g. `"line one\nline two"`.
// Two forms are accepted:
//
//   "..."  interpreted: backslash escapes are decoded
//   `...`  raw: taken verbatim, carriage returns dropped
//
// Output is bytes rather than a String because `\xHH` and octal escapes
// produce single raw bytes that need not form valid UTF-8. Inside "..." a
// byte that does not start a valid UTF-8 sequence decodes to U+FFFD.

use thiserror::Error;

/// Why a payload could not be unquoted. Offsets are byte offsets into the
/// full input, quotes included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnquoteError {
    #[error("payload is not a quoted string literal")]
    NotQuoted,

    #[error("unescaped quote at offset {offset}")]
    UnescapedQuote { offset: usize },

    #[error("unescaped newline at offset {offset}")]
    Newline { offset: usize },

    #[error("invalid escape sequence '\\{escape}' at offset {offset}")]
    InvalidEscape { offset: usize, escape: char },

    #[error("truncated escape sequence at offset {offset}")]
    TruncatedEscape { offset: usize },

    #[error("invalid code point {value:#x} at offset {offset}")]
    InvalidCodePoint { offset: usize, value: u32 },

    #[error("octal escape out of range at offset {offset}")]
    OctalOutOfRange { offset: usize },
}

/// Decode a quoted literal into the bytes it denotes.
pub fn unquote(input: &[u8]) -> Result<Vec<u8>, UnquoteError> {
    if input.len() < 2 {
        return Err(UnquoteError::NotQuoted);
    }

    let quote = input[0];
    if input[input.len() - 1] != quote {
        return Err(UnquoteError::NotQuoted);
    }
    let body = &input[1..input.len() - 1];

    match quote {
        b'`' => unquote_raw(body),
        b'"' => unquote_interpreted(body),
        _ => Err(UnquoteError::NotQuoted),
    }
}

fn unquote_raw(body: &[u8]) -> Result<Vec<u8>, UnquoteError> {
    if let Some(pos) = body.iter().position(|&b| b == b'`') {
        return Err(UnquoteError::UnescapedQuote { offset: pos + 1 });
    }
    Ok(body.iter().copied().filter(|&b| b != b'\r').collect())
}

fn unquote_interpreted(body: &[u8]) -> Result<Vec<u8>, UnquoteError> {
    // Fast path: nothing to decode.
    let needs_decoding = body.iter().any(|&b| matches!(b, b'\\' | b'"' | b'\n'));
    if !needs_decoding && std::str::from_utf8(body).is_ok() {
        return Ok(body.to_vec());
    }

    let mut out = Vec::with_capacity(body.len());
    let mut chars = LossyChars { bytes: body, pos: 0 };

    while let Some((pos, c)) = chars.next() {
        // +1 for the opening quote.
        let offset = pos + 1;
        match c {
            '"' => return Err(UnquoteError::UnescapedQuote { offset }),
            '\n' => return Err(UnquoteError::Newline { offset }),
            '\\' => {
                let (_, escape) = chars
                    .next()
                    .ok_or(UnquoteError::TruncatedEscape { offset })?;
                match escape {
                    'a' => out.push(0x07),
                    'b' => out.push(0x08),
                    'f' => out.push(0x0c),
                    'n' => out.push(b'\n'),
                    'r' => out.push(b'\r'),
                    't' => out.push(b'\t'),
                    'v' => out.push(0x0b),
                    '\\' => out.push(b'\\'),
                    '"' => out.push(b'"'),
                    'x' => {
                        let value = take_digits(&mut chars, 2, 16, offset)?;
                        out.push(value as u8);
                    }
                    'u' | 'U' => {
                        let width = if escape == 'u' { 4 } else { 8 };
                        let value = take_digits(&mut chars, width, 16, offset)?;
                        let ch = char::from_u32(value)
                            .ok_or(UnquoteError::InvalidCodePoint { offset, value })?;
                        push_char(&mut out, ch);
                    }
                    '0'..='7' => {
                        let rest = take_digits(&mut chars, 2, 8, offset)?;
                        let value = (escape as u32 - '0' as u32) * 64 + rest;
                        if value > 0xff {
                            return Err(UnquoteError::OctalOutOfRange { offset });
                        }
                        out.push(value as u8);
                    }
                    other => {
                        return Err(UnquoteError::InvalidEscape {
                            offset,
                            escape: other,
                        })
                    }
                }
            }
            _ => push_char(&mut out, c),
        }
    }

    Ok(out)
}

/// Char iterator over bytes that yields U+FFFD for each byte that does not
/// start a valid UTF-8 sequence and then resumes at the next byte.
struct LossyChars<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for LossyChars<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<(usize, char)> {
        let start = self.pos;
        let rest = &self.bytes[start..];
        let lead = *rest.first()?;

        let decoded = rest
            .get(..utf8_width(lead))
            .and_then(|seq| std::str::from_utf8(seq).ok())
            .and_then(|seq| seq.chars().next());

        match decoded {
            Some(c) => {
                self.pos += c.len_utf8();
                Some((start, c))
            }
            None => {
                self.pos += 1;
                Some((start, char::REPLACEMENT_CHARACTER))
            }
        }
    }
}

/// Sequence length announced by a UTF-8 lead byte (1 for invalid leads).
fn utf8_width(lead: u8) -> usize {
    match lead {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 1,
    }
}

/// Consume exactly `count` digits in `radix` and return their value.
fn take_digits<I>(
    chars: &mut I,
    count: usize,
    radix: u32,
    offset: usize,
) -> Result<u32, UnquoteError>
where
    I: Iterator<Item = (usize, char)>,
{
    let mut value = 0u32;
    for _ in 0..count {
        let (_, c) = chars
            .next()
            .ok_or(UnquoteError::TruncatedEscape { offset })?;
        let digit = c
            .to_digit(radix)
            .ok_or(UnquoteError::InvalidEscape { offset, escape: c })?;
        value = value * radix + digit;
    }
    Ok(value)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
