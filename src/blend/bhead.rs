use crate::blend::bytes::Cursor;
use crate::blend::{BlendError, BlendHeader, Result};

/// Parsed block header record.
#[derive(Debug, Clone, Copy)]
pub struct BHead {
	/// Four-byte block code.
	pub code: [u8; 4],
	/// SDNA struct index for payload interpretation.
	pub sdna_nr: u32,
	/// Address the payload occupied in the producer process.
	pub old: u64,
	/// Payload byte length.
	pub len: u64,
	/// Number of struct instances stored in payload.
	pub nr: u64,
}

impl BHead {
	/// Parse a block header from cursor position.
	///
	/// Layout is `[code:4][len:i32][old:ptr][sdna_nr:u32][nr:i32]` with the
	/// header's pointer width and byte order.
	pub fn parse(cursor: &mut Cursor<'_>, header: BlendHeader) -> Result<Self> {
		let code = cursor.read_code4()?;

		let len = i64::from(cursor.read_i32(header.endianness)?);
		if len < 0 {
			return Err(BlendError::NegativeBlockLength { len });
		}

		let old = cursor.read_ptr(header.pointer_size, header.endianness)?;
		let sdna_nr = cursor.read_u32(header.endianness)?;

		let nr = i64::from(cursor.read_i32(header.endianness)?);
		if nr < 0 {
			return Err(BlendError::NegativeBlockCount { nr });
		}

		Ok(Self {
			code,
			sdna_nr,
			old,
			len: len as u64,
			nr: nr as u64,
		})
	}

	/// Return `true` when this is the terminal `ENDB` block.
	pub fn is_endb(&self) -> bool {
		self.code == *b"ENDB"
	}

	/// Return `true` when this is the embedded schema (`DNA1`) block.
	pub fn is_dna(&self) -> bool {
		self.code == *b"DNA1"
	}
}
