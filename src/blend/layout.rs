use std::collections::HashMap;
use std::sync::Mutex;

use crate::blend::decl::parse_field_decl;
use crate::blend::{BlendError, Dna, FieldPath, Result};

/// Resolved byte position and shape of one leaf field.
#[derive(Debug, Clone, Copy)]
pub struct FieldLayout {
	/// Byte offset from the start of the struct instance.
	pub offset: usize,
	/// Total byte extent (element size times element count).
	pub size: usize,
	/// Leaf type table index.
	pub type_idx: u16,
	/// Pointer indirection depth of the leaf.
	pub ptr_depth: u8,
	/// Flattened fixed-array element count of the leaf.
	pub elem_count: usize,
}

/// Resolve a field path against a struct, accumulating byte offsets.
///
/// Fields are walked in declared order; offsets are the plain running sum of
/// field extents, pointer fields counted at the header pointer width. A
/// non-terminal token must land on a plain embedded struct field.
pub fn resolve_field_layout(dna: &Dna, pointer_size: usize, sdna_nr: u32, path: &FieldPath) -> Result<FieldLayout> {
	let mut item = dna.struct_by_sdna(sdna_nr).ok_or(BlendError::DnaIndexOutOfRange {
		kind: "query.sdna_nr",
		idx: sdna_nr,
		max: dna.structs.len().saturating_sub(1) as u32,
	})?;
	let mut base = 0_usize;

	for (token_idx, token) in path.tokens.iter().enumerate() {
		let terminal = token_idx + 1 == path.tokens.len();

		let mut offset = base;
		let mut matched = None;
		for field in &item.fields {
			let decl = parse_field_decl(dna.field_name(field.name_idx));
			let extent = dna.field_extent(field, pointer_size);
			if decl.ident == token.as_ref() {
				matched = Some((field, decl, extent, offset));
				break;
			}
			offset += extent;
		}

		let Some((field, decl, extent, field_offset)) = matched else {
			return Err(BlendError::FieldNotFound {
				struct_name: dna.type_name(item.type_idx).to_owned(),
				field: token.to_string(),
			});
		};

		if terminal {
			let ptr_depth = if decl.is_func_ptr { decl.ptr_depth.max(1) } else { decl.ptr_depth };
			return Ok(FieldLayout {
				offset: field_offset,
				size: extent,
				type_idx: field.type_idx,
				ptr_depth,
				elem_count: decl.elem_count,
			});
		}

		if decl.is_pointer() || decl.elem_count != 1 {
			return Err(BlendError::PathNotStruct {
				struct_name: dna.type_name(item.type_idx).to_owned(),
				field: token.to_string(),
			});
		}

		let Some(next) = dna.struct_by_type_idx(field.type_idx) else {
			return Err(BlendError::PathNotStruct {
				struct_name: dna.type_name(item.type_idx).to_owned(),
				field: token.to_string(),
			});
		};

		item = next;
		base = field_offset;
	}

	Err(BlendError::InvalidFieldPath { path: path.join() })
}

/// Memoized layout resolutions keyed by struct and path.
///
/// Purely an optimization for repeated queries; never observable.
#[derive(Debug)]
pub(crate) struct LayoutCache {
	map: Mutex<HashMap<(u32, Box<str>), FieldLayout>>,
}

impl LayoutCache {
	pub fn new() -> Self {
		Self {
			map: Mutex::new(HashMap::new()),
		}
	}

	pub fn resolve(&self, dna: &Dna, pointer_size: usize, sdna_nr: u32, path: &FieldPath) -> Result<FieldLayout> {
		let key = (sdna_nr, path.join().into_boxed_str());
		{
			let map = self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
			if let Some(hit) = map.get(&key) {
				return Ok(*hit);
			}
		}

		let layout = resolve_field_layout(dna, pointer_size, sdna_nr, path)?;
		let mut map = self.map.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
		map.insert(key, layout);
		Ok(layout)
	}
}
