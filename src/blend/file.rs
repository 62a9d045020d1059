use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::blend::compression::decode_bytes;
use crate::blend::layout::LayoutCache;
use crate::blend::{
	BlendError, BlendHeader, Block, BlockIter, Compression, Dna, FieldLayout, FieldPath, PointerIndex, RecordView, Result,
};

/// Opened blend container with decoded bytes and eagerly built indexes.
///
/// Everything is parsed up-front: header, full block table, schema catalog,
/// layout verification, and the address index. After `open` returns, all
/// structures are immutable and may be shared read-only across threads.
#[derive(Debug)]
pub struct BlendFile {
	/// Parsed file header.
	pub header: BlendHeader,
	/// Compression mode detected for source bytes.
	pub compression: Compression,
	bytes: Vec<u8>,
	blocks: Vec<Block>,
	dna: Dna,
	index: PointerIndex,
	layouts: LayoutCache,
}

impl BlendFile {
	/// Read, decode, and parse a blend file from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::from_bytes(fs::read(path)?)
	}

	/// Decode and parse a blend file from an in-memory byte stream.
	pub fn from_bytes(raw: Vec<u8>) -> Result<Self> {
		let (compression, bytes) = decode_bytes(raw)?;
		let header = BlendHeader::parse(&bytes)?;

		let mut blocks = Vec::new();
		for block in BlockIter::new(&bytes, header.header_size, header) {
			blocks.push(block?);
		}

		let dna_block = blocks.iter().position(|block| block.head.is_dna()).ok_or(BlendError::DnaNotFound)?;
		let dna = Dna::parse(&bytes[blocks[dna_block].payload.clone()], header.endianness)?;
		dna.verify_layouts(header.pointer_size)?;

		for block in &blocks {
			if block.head.is_endb() || block.head.is_dna() {
				continue;
			}
			if (block.head.sdna_nr as usize) >= dna.structs.len() {
				return Err(BlendError::BlockSdnaOutOfRange {
					code: block.head.code,
					sdna_nr: block.head.sdna_nr,
					structs: dna.structs.len(),
				});
			}
		}

		let index = PointerIndex::build(&blocks)?;

		Ok(Self {
			header,
			compression,
			bytes,
			blocks,
			dna,
			index,
			layouts: LayoutCache::new(),
		})
	}

	/// Return decoded raw bytes backing this file.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Return all scanned block records in file order.
	pub fn blocks(&self) -> &[Block] {
		&self.blocks
	}

	/// Return the parsed schema catalog.
	pub fn dna(&self) -> &Dna {
		&self.dna
	}

	/// Return the address index used for pointer resolution.
	pub fn pointer_index(&self) -> &PointerIndex {
		&self.index
	}

	/// Iterate record views, one per non-schema, non-sentinel block.
	pub fn views(&self) -> impl Iterator<Item = RecordView<'_>> {
		self.blocks
			.iter()
			.enumerate()
			.filter(|(_, block)| !block.head.is_endb() && !block.head.is_dna())
			.map(|(block_idx, _)| RecordView {
				file: self,
				block_idx,
				elem_idx: 0,
			})
	}

	/// Return the first record view whose block matches `code`.
	pub fn view_by_code(&self, code: [u8; 4]) -> Option<RecordView<'_>> {
		self.views().find(|view| view.code() == code)
	}

	/// Return the record view owning a stored address, if indexed.
	pub fn view_by_address(&self, ptr: u64) -> Option<RecordView<'_>> {
		let block_idx = self.index.lookup(ptr)?;
		Some(RecordView {
			file: self,
			block_idx,
			elem_idx: 0,
		})
	}

	/// Aggregate block-level counts from the scanned table.
	pub fn block_stats(&self) -> BlockStats {
		let mut stats = BlockStats {
			block_count: 0,
			has_dna: false,
			has_endb: false,
			last_code: [0_u8; 4],
			codes: HashMap::new(),
		};

		for block in &self.blocks {
			stats.block_count += 1;
			stats.last_code = block.head.code;
			*stats.codes.entry(block.head.code).or_insert(0) += 1;
			if block.head.is_dna() {
				stats.has_dna = true;
			}
			if block.head.is_endb() {
				stats.has_endb = true;
			}
		}

		stats
	}

	pub(crate) fn block_rec(&self, block_idx: usize) -> &Block {
		&self.blocks[block_idx]
	}

	pub(crate) fn payload_bytes(&self, block_idx: usize) -> &[u8] {
		&self.bytes[self.blocks[block_idx].payload.clone()]
	}

	pub(crate) fn resolve_layout(&self, sdna_nr: u32, path: &FieldPath) -> Result<FieldLayout> {
		self.layouts.resolve(&self.dna, self.header.pointer_size, sdna_nr, path)
	}
}

/// Aggregate block-level counts from a scanned file.
pub struct BlockStats {
	/// Number of parsed blocks.
	pub block_count: u32,
	/// Whether a `DNA1` block was seen.
	pub has_dna: bool,
	/// Whether an `ENDB` terminator block was seen.
	pub has_endb: bool,
	/// Code of the final block visited.
	pub last_code: [u8; 4],
	/// Frequency table by block code.
	pub codes: HashMap<[u8; 4], u32>,
}
