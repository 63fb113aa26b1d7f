//! Base62 text encoding.
//!
//! Bytes are read as one big-endian unsigned integer and written in the
//! alphabet `0-9A-Za-z`. A big integer has no leading zeros, so each leading
//! zero byte is carried as a leading `'0'` character instead. This keeps the
//! byte length exact across a round trip.
//!
//! Every token begins with the version byte, so in practice tokens never start
//! with `'0'`. The leading-zero rule only matters for arbitrary input.

use core::iter;

use crate::BrancaError;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub fn encode(bytes: &[u8]) -> String {
    let zeros = bytes.iter().take_while(|&&b| b == 0).count();

    // base62 digits, least significant first
    let mut digits: Vec<u8> = Vec::with_capacity(bytes.len() * 138 / 100 + 1);
    for &byte in &bytes[zeros..] {
        let mut carry = u32::from(byte);
        for digit in &mut digits {
            carry += u32::from(*digit) << 8;
            *digit = (carry % 62) as u8;
            carry /= 62;
        }
        while carry > 0 {
            digits.push((carry % 62) as u8);
            carry /= 62;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(iter::repeat_n('0', zeros));
    out.extend(
        digits
            .iter()
            .rev()
            .map(|&d| char::from(ALPHABET[usize::from(d)])),
    );
    out
}

pub fn decode(src: &str) -> Result<Vec<u8>, BrancaError> {
    let src = src.as_bytes();
    let zeros = src.iter().take_while(|&&c| c == b'0').count();

    // output bytes, least significant first
    let mut bytes: Vec<u8> = Vec::with_capacity(src.len() * 3 / 4 + 1);
    for &c in &src[zeros..] {
        let mut carry = u32::from(decode_digit(c).ok_or(BrancaError::InvalidEncoding)?);
        for byte in &mut bytes {
            carry += u32::from(*byte) * 62;
            *byte = carry as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push(carry as u8);
            carry >>= 8;
        }
    }

    bytes.extend(iter::repeat_n(0, zeros));
    bytes.reverse();
    Ok(bytes)
}

fn decode_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'Z' => Some(c - b'A' + 10),
        b'a'..=b'z' => Some(c - b'a' + 36),
        _ => None,
    }
}
