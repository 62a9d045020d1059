use std::ops::Range;

use crate::blend::bytes::Cursor;
use crate::blend::{BHead, BlendError, BlendHeader, Result};

/// One scanned block record.
///
/// Payload is kept as a range into the file's byte buffer so block records
/// can be stored alongside the buffer that owns them.
#[derive(Debug, Clone)]
pub struct Block {
	/// Parsed block header.
	pub head: BHead,
	/// Payload byte range within the file buffer.
	pub payload: Range<usize>,
	/// Absolute byte offset where this block header starts.
	pub file_offset: usize,
}

/// Iterator over contiguous block records.
pub struct BlockIter<'a> {
	cursor: Cursor<'a>,
	offset_base: usize,
	header: BlendHeader,
	done: bool,
}

impl<'a> BlockIter<'a> {
	/// Create a block iterator starting at `offset`.
	pub fn new(bytes: &'a [u8], offset: usize, header: BlendHeader) -> Self {
		let slice = bytes.get(offset..).unwrap_or(&[]);
		Self {
			cursor: Cursor::new(slice),
			offset_base: offset,
			header,
			done: false,
		}
	}
}

impl Iterator for BlockIter<'_> {
	type Item = Result<Block>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		if self.cursor.remaining() == 0 {
			self.done = true;
			return None;
		}

		let file_offset = self.offset_base + self.cursor.pos();
		let head = match BHead::parse(&mut self.cursor, self.header) {
			Ok(value) => value,
			Err(err) => {
				self.done = true;
				return Some(Err(err));
			}
		};

		let payload_len = match usize::try_from(head.len) {
			Ok(value) => value,
			Err(_) => {
				self.done = true;
				return Some(Err(BlendError::BlockLenOutOfRange {
					at: file_offset,
					len: head.len,
					rem: self.cursor.remaining(),
				}));
			}
		};

		let rem = self.cursor.remaining();
		if payload_len > rem {
			self.done = true;
			return Some(Err(BlendError::BlockLenOutOfRange {
				at: file_offset,
				len: head.len,
				rem,
			}));
		}

		let payload_start = self.offset_base + self.cursor.pos();
		if let Err(err) = self.cursor.read_exact(payload_len) {
			self.done = true;
			return Some(Err(err));
		}

		if head.is_endb() {
			self.done = true;
		}

		Some(Ok(Block {
			head,
			payload: payload_start..payload_start + payload_len,
			file_offset,
		}))
	}
}
