use crate::blend::{BlendError, Result};

/// Byte endianness marker stored in blend headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
	/// Little-endian byte order (`v` marker).
	Little,
	/// Big-endian byte order (`V` marker).
	Big,
}

impl Endianness {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Little => "little",
			Self::Big => "big",
		}
	}
}

/// Parsed blend file header fields.
///
/// The header's pointer width and byte order, not the host's, govern every
/// multi-byte decode in the rest of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendHeader {
	/// Total file header size in bytes.
	pub header_size: usize,
	/// Producer version encoded as decimal digits (for example `279` or `302`).
	pub version: u16,
	/// Pointer width in bytes, 4 or 8.
	pub pointer_size: usize,
	/// File byte order.
	pub endianness: Endianness,
}

impl BlendHeader {
	/// Exact size of the classic prologue (`BLENDER-v302` style).
	pub const SIZE: usize = 12;

	/// Parse a classic blend header from the beginning of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let header = bytes.get(0..Self::SIZE).ok_or(BlendError::InvalidHeader)?;
		if &header[0..7] != b"BLENDER" {
			return Err(BlendError::InvalidHeader);
		}

		let pointer_size = match header[7] {
			b'_' => 4,
			b'-' => 8,
			_ => return Err(BlendError::InvalidHeader),
		};
		let endianness = match header[8] {
			b'v' => Endianness::Little,
			b'V' => Endianness::Big,
			_ => return Err(BlendError::InvalidHeader),
		};
		let version = parse_digits(&header[9..12]).ok_or(BlendError::InvalidHeader)?;

		Ok(Self {
			header_size: Self::SIZE,
			version,
			pointer_size,
			endianness,
		})
	}
}

fn parse_digits(bytes: &[u8]) -> Option<u16> {
	if bytes.is_empty() {
		return None;
	}

	let mut value = 0_u16;
	for byte in bytes {
		if !byte.is_ascii_digit() {
			return None;
		}
		value = value * 10 + u16::from(*byte - b'0');
	}
	Some(value)
}
