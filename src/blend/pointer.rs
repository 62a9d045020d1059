use std::collections::HashMap;

use crate::blend::{Block, BlendError, Result};

/// Index from stored block addresses to block slots.
///
/// The producer wrote each block's original in-memory address into its
/// header; pointer fields in payloads hold those same integers. Address 0 is
/// the null pointer and is never indexed; callers must short-circuit it
/// before lookup. A non-zero address absent from the index is a dangling
/// pointer, which is distinct from null.
#[derive(Debug)]
pub struct PointerIndex {
	map: HashMap<u64, usize>,
}

impl PointerIndex {
	/// Build the address index over scanned blocks.
	///
	/// Addresses are unique per file by the producer's contract; a duplicate
	/// non-zero address is corrupt input and fails the build.
	pub(crate) fn build(blocks: &[Block]) -> Result<Self> {
		let mut map = HashMap::with_capacity(blocks.len());

		for (idx, block) in blocks.iter().enumerate() {
			if block.head.old == 0 || block.head.is_endb() {
				continue;
			}

			if let Some(first) = map.insert(block.head.old, idx) {
				return Err(BlendError::DuplicateAddress {
					address: block.head.old,
					first,
					second: idx,
				});
			}
		}

		Ok(Self { map })
	}

	/// Resolve a non-zero stored address to its block slot.
	pub fn lookup(&self, ptr: u64) -> Option<usize> {
		if ptr == 0 {
			return None;
		}
		self.map.get(&ptr).copied()
	}

	/// Return number of indexed addresses.
	pub fn len(&self) -> usize {
		self.map.len()
	}

	/// Return whether no addresses are indexed.
	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}
