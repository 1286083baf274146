//! The "modified UTF-8" encoding used by class files.
//!
//! It differs from UTF-8 in two ways: the null character is encoded using two bytes, and characters
//! outside the basic multilingual plane are encoded as a surrogate pair, each surrogate taking three bytes.
//! For all other strings, both encodings are the same.

use std::borrow::Cow;
use anyhow::{bail, Context, Result};

/// Decodes modified UTF-8.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use raw_class_file::mutf8::decode;
/// assert_eq!(decode(b"hello").unwrap(), "hello");
/// assert_eq!(decode(&[b'a', 0xc0, 0x80, b'b']).unwrap(), "a\0b");
/// assert_eq!(decode(&[0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80]).unwrap(), "\u{1f600}");
/// ```
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
	if let Ok(s) = std::str::from_utf8(bytes) {
		return Ok(Cow::Borrowed(s));
	}

	let mut units = Vec::with_capacity(bytes.len());
	let mut iter = bytes.iter().copied();
	while let Some(a) = iter.next() {
		let mut continuation = || -> Result<u16> {
			match iter.next() {
				Some(b) if b & 0xc0 == 0x80 => Ok((b & 0x3f) as u16),
				Some(b) => bail!("expected continuation byte, got 0x{b:02x}"),
				None => bail!("unexpected end of string"),
			}
		};

		let unit = if a & 0x80 == 0 {
			a as u16
		} else if a & 0xe0 == 0xc0 {
			((a & 0x1f) as u16) << 6 | continuation()?
		} else if a & 0xf0 == 0xe0 {
			let b = continuation()?;
			let c = continuation()?;
			((a & 0x0f) as u16) << 12 | b << 6 | c
		} else {
			bail!("invalid leading byte 0x{a:02x}");
		};
		units.push(unit);
	}

	String::from_utf16(&units)
		.map(Cow::Owned)
		.context("unpaired surrogate")
}

/// Encodes a string as modified UTF-8.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use raw_class_file::mutf8::encode;
/// assert_eq!(encode("hello").as_ref(), b"hello");
/// assert_eq!(encode("a\0b").as_ref(), &[b'a', 0xc0, 0x80, b'b']);
/// ```
pub fn encode(s: &str) -> Cow<'_, [u8]> {
	if s.chars().all(|ch| ch != '\0' && (ch as u32) < 0x10000) {
		return Cow::Borrowed(s.as_bytes());
	}

	let mut bytes = Vec::with_capacity(s.len() + 4);
	for unit in s.encode_utf16() {
		match unit {
			0x0001..=0x007f => bytes.push(unit as u8),
			0x0000 | 0x0080..=0x07ff => {
				bytes.push(0xc0 | (unit >> 6) as u8);
				bytes.push(0x80 | (unit & 0x3f) as u8);
			},
			_ => {
				bytes.push(0xe0 | (unit >> 12) as u8);
				bytes.push(0x80 | ((unit >> 6) & 0x3f) as u8);
				bytes.push(0x80 | (unit & 0x3f) as u8);
			},
		}
	}
	Cow::Owned(bytes)
}
