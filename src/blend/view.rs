use crate::blend::bytes::{u16_at, u32_at, u64_at};
use crate::blend::{BlendError, BlendFile, Endianness, FieldLayout, FieldPath, Result, Value};

/// Read-only handle over one struct instance within a block.
///
/// Views are cheap value handles over the file's shared immutable data; they
/// never own the block and may be freely copied and discarded per query.
#[derive(Clone, Copy)]
pub struct RecordView<'a> {
	pub(crate) file: &'a BlendFile,
	pub(crate) block_idx: usize,
	pub(crate) elem_idx: usize,
}

impl<'a> RecordView<'a> {
	/// Four-byte code of the owning block.
	pub fn code(&self) -> [u8; 4] {
		self.file.block_rec(self.block_idx).head.code
	}

	/// Stored address of the owning block.
	pub fn address(&self) -> u64 {
		self.file.block_rec(self.block_idx).head.old
	}

	/// SDNA struct index the owning block is bound to.
	pub fn sdna_nr(&self) -> u32 {
		self.file.block_rec(self.block_idx).head.sdna_nr
	}

	/// Struct type name this view decodes as.
	pub fn struct_name(&self) -> &'a str {
		let dna = self.file.dna();
		match dna.struct_by_sdna(self.sdna_nr()) {
			Some(item) => dna.type_name(item.type_idx),
			None => "<unknown>",
		}
	}

	/// Number of struct instances stored in the owning block.
	pub fn count(&self) -> u64 {
		self.file.block_rec(self.block_idx).head.nr
	}

	/// Zero-based element index of this view within the block.
	pub fn element_index(&self) -> usize {
		self.elem_idx
	}

	/// Byte size of one struct instance.
	pub fn struct_size(&self) -> usize {
		self.file.dna().struct_size(self.sdna_nr()).unwrap_or(0)
	}

	/// Full payload bytes of the owning block.
	pub fn block_payload(&self) -> &'a [u8] {
		self.file.payload_bytes(self.block_idx)
	}

	/// Return the sibling view at another element index.
	pub fn element_at(&self, index: usize) -> Result<RecordView<'a>> {
		let count = self.count();
		if u64::try_from(index).map_or(true, |value| value >= count) {
			return Err(BlendError::ElementOutOfRange { index, count });
		}

		Ok(RecordView {
			file: self.file,
			block_idx: self.block_idx,
			elem_idx: index,
		})
	}

	/// Decode the primitive leaf value at a dotted field path.
	pub fn value(&self, path: &str) -> Result<Value> {
		self.value_at(&FieldPath::parse(path)?)
	}

	/// Decode the primitive leaf value at a parsed field path.
	pub fn value_at(&self, path: &FieldPath) -> Result<Value> {
		let layout = self.file.resolve_layout(self.sdna_nr(), path)?;
		let dna = self.file.dna();
		let type_name = dna.type_name(layout.type_idx);

		if layout.ptr_depth > 0 {
			return Err(BlendError::ValueOnPointerField {
				struct_name: self.struct_name().to_owned(),
				field: path.join(),
			});
		}

		if layout.elem_count != 1 {
			// Fixed char arrays are the one array form with a scalar reading:
			// text up to the first nul byte.
			if type_name == "char" && layout.elem_count > 0 {
				let bytes = self.field_bytes(&layout)?;
				let end = bytes.iter().position(|byte| *byte == 0).unwrap_or(bytes.len());
				return Ok(Value::Text(String::from_utf8_lossy(&bytes[..end]).into_owned()));
			}
			return Err(BlendError::ValueOnArrayField {
				struct_name: self.struct_name().to_owned(),
				field: path.join(),
			});
		}

		if dna.struct_by_type_idx(layout.type_idx).is_some() {
			return Err(BlendError::UnsupportedPrimitive {
				type_name: type_name.to_owned(),
				size: usize::from(dna.tlen[layout.type_idx as usize]),
			});
		}

		let bytes = self.field_bytes(&layout)?;
		decode_scalar(type_name, bytes, self.file.header.endianness)
	}

	/// Resolve a pointer field to the record it targets.
	///
	/// Returns `None` for the null address. The target view is bound to the
	/// target block's own struct definition.
	pub fn pointer(&self, path: &str) -> Result<Option<RecordView<'a>>> {
		self.pointer_at(&FieldPath::parse(path)?)
	}

	/// Resolve a pointer field at a parsed field path.
	pub fn pointer_at(&self, path: &FieldPath) -> Result<Option<RecordView<'a>>> {
		let layout = self.file.resolve_layout(self.sdna_nr(), path)?;
		if layout.ptr_depth != 1 || layout.elem_count != 1 {
			return Err(BlendError::PointerFieldMismatch {
				struct_name: self.struct_name().to_owned(),
				field: path.join(),
				ptr_depth: layout.ptr_depth,
				elem_count: layout.elem_count,
			});
		}

		let bytes = self.field_bytes(&layout)?;
		let ptr = read_ptr_scalar(bytes, self.file.header.endianness);

		if ptr == 0 {
			return Ok(None);
		}

		let Some(target) = self.file.pointer_index().lookup(ptr) else {
			return Err(BlendError::UnresolvedPointer { ptr });
		};

		Ok(Some(RecordView {
			file: self.file,
			block_idx: target,
			elem_idx: 0,
		}))
	}

	/// Read the raw pointer integer at a pointer field without resolving it.
	pub fn pointer_value(&self, path: &str) -> Result<u64> {
		let path = FieldPath::parse(path)?;
		let layout = self.file.resolve_layout(self.sdna_nr(), &path)?;
		if layout.ptr_depth == 0 || layout.elem_count != 1 {
			return Err(BlendError::PointerFieldMismatch {
				struct_name: self.struct_name().to_owned(),
				field: path.join(),
				ptr_depth: layout.ptr_depth,
				elem_count: layout.elem_count,
			});
		}

		let bytes = self.field_bytes(&layout)?;
		Ok(read_ptr_scalar(bytes, self.file.header.endianness))
	}

	fn field_bytes(&self, layout: &FieldLayout) -> Result<&'a [u8]> {
		let payload = self.file.payload_bytes(self.block_idx);
		let elem_base = self.elem_idx.saturating_mul(self.struct_size());
		let start = elem_base.saturating_add(layout.offset);
		let end = start.saturating_add(layout.size);
		payload.get(start..end).ok_or(BlendError::PayloadOutOfBounds {
			start,
			size: layout.size,
			payload: payload.len(),
		})
	}
}

impl PartialEq for RecordView<'_> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.file, other.file) && self.block_idx == other.block_idx && self.elem_idx == other.elem_idx
	}
}

impl Eq for RecordView<'_> {}

impl std::fmt::Debug for RecordView<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RecordView")
			.field("struct_name", &self.struct_name())
			.field("block_idx", &self.block_idx)
			.field("elem_idx", &self.elem_idx)
			.finish()
	}
}

fn read_ptr_scalar(bytes: &[u8], endianness: Endianness) -> u64 {
	match bytes.len() {
		4 => {
			let mut buf = [0_u8; 4];
			buf.copy_from_slice(bytes);
			u64::from(u32_at(&buf, endianness))
		}
		8 => {
			let mut buf = [0_u8; 8];
			buf.copy_from_slice(bytes);
			u64_at(&buf, endianness)
		}
		_ => 0,
	}
}

fn decode_scalar(type_name: &str, bytes: &[u8], endianness: Endianness) -> Result<Value> {
	match (type_name, bytes.len()) {
		("float", 4) => {
			let mut buf = [0_u8; 4];
			buf.copy_from_slice(bytes);
			Ok(Value::F32(f32::from_bits(u32_at(&buf, endianness))))
		}
		("double", 8) => {
			let mut buf = [0_u8; 8];
			buf.copy_from_slice(bytes);
			Ok(Value::F64(f64::from_bits(u64_at(&buf, endianness))))
		}
		("bool", 1) => Ok(Value::Bool(bytes[0] != 0)),
		(_, 1) => Ok(decode_int(type_name, u64::from(bytes[0]), 8)),
		(_, 2) => {
			let mut buf = [0_u8; 2];
			buf.copy_from_slice(bytes);
			Ok(decode_int(type_name, u64::from(u16_at(&buf, endianness)), 16))
		}
		(_, 4) => {
			let mut buf = [0_u8; 4];
			buf.copy_from_slice(bytes);
			Ok(decode_int(type_name, u64::from(u32_at(&buf, endianness)), 32))
		}
		(_, 8) => {
			let mut buf = [0_u8; 8];
			buf.copy_from_slice(bytes);
			Ok(decode_int(type_name, u64_at(&buf, endianness), 64))
		}
		(_, size) => Err(BlendError::UnsupportedPrimitive {
			type_name: type_name.to_owned(),
			size,
		}),
	}
}

fn decode_int(type_name: &str, value: u64, bits: u32) -> Value {
	if is_unsigned_type(type_name) {
		return Value::U64(value);
	}

	let signed = match bits {
		8 => i64::from(value as i8),
		16 => i64::from(value as i16),
		32 => i64::from(value as i32),
		_ => value as i64,
	};
	Value::I64(signed)
}

fn is_unsigned_type(type_name: &str) -> bool {
	type_name.starts_with('u') || type_name.contains("uint") || type_name.contains("uchar")
}
