//! Block Check Character (BCC) helpers.
//!
//! The BCC is the XOR of every byte of a message. It travels as two ASCII
//! hex digits, high nibble first, between the message body and the `\r`
//! terminator.

use crate::constants::TERMINATOR;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// XOR of all bytes in `message`
pub fn bcc(message: &[u8]) -> u8 {
    message.iter().fold(0, |acc, &b| acc ^ b)
}

/// Encode a byte as two uppercase ASCII hex digits, high nibble first
pub fn hex_digits(value: u8) -> [u8; 2] {
    [
        HEX_DIGITS[(value >> 4) as usize],
        HEX_DIGITS[(value & 0x0F) as usize],
    ]
}

/// BCC of `message` as two ASCII hex digits
pub fn bcc_digits(message: &[u8]) -> [u8; 2] {
    hex_digits(bcc(message))
}

/// Append the BCC digits and the terminator to `message`
pub fn frame(message: &str) -> String {
    let [high, low] = bcc_digits(message.as_bytes());
    let mut framed = String::with_capacity(message.len() + 3);
    framed.push_str(message);
    framed.push(high as char);
    framed.push(low as char);
    framed.push(TERMINATOR as char);
    framed
}

/// Check a received frame against its trailing BCC digits.
///
/// The terminator is optional. Lowercase digits are accepted.
pub fn verify(frame: &[u8]) -> bool {
    let frame = frame.strip_suffix(&[TERMINATOR]).unwrap_or(frame);
    if frame.len() < 2 {
        return false;
    }

    let (body, digits) = frame.split_at(frame.len() - 2);
    let expected = bcc_digits(body);
    digits.eq_ignore_ascii_case(&expected)
}
