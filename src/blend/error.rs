use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BlendError>;

/// Errors produced while reading, indexing, and querying `.blend` data.
#[derive(Debug, Error)]
pub enum BlendError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Unknown leading file magic.
	#[error("unsupported compression or not a .blend (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompressed stream did not start with `BLENDER`.
	#[error("decompressed data does not start with BLENDER magic")]
	NotBlendAfterDecompress,
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Invalid or malformed file header.
	#[error("invalid header")]
	InvalidHeader,
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Pointer width other than 4 or 8 requested from the cursor.
	#[error("unsupported pointer size {pointer_size}")]
	UnsupportedPointerSize {
		/// Offending pointer width in bytes.
		pointer_size: usize,
	},
	/// Block payload length was negative.
	#[error("negative block length {len}")]
	NegativeBlockLength {
		/// Parsed signed length.
		len: i64,
	},
	/// Block element count was negative.
	#[error("negative block count {nr}")]
	NegativeBlockCount {
		/// Parsed signed element count.
		nr: i64,
	},
	/// Block payload would exceed remaining file data.
	#[error("block length {len} at offset {at} exceeds remaining {rem}")]
	BlockLenOutOfRange {
		/// Block header file offset.
		at: usize,
		/// Declared payload length.
		len: u64,
		/// Remaining bytes in cursor.
		rem: usize,
	},
	/// No DNA1 block was found.
	#[error("DNA1 block not found")]
	DnaNotFound,
	/// Unexpected DNA section tag.
	#[error("DNA tag mismatch at {at}: expected {expected:?}, got {got:?}")]
	DnaBadTag {
		/// Expected section tag.
		expected: [u8; 4],
		/// Actual section tag.
		got: [u8; 4],
		/// Cursor offset of the tag read.
		at: usize,
	},
	/// Out-of-range index inside DNA tables.
	#[error("DNA index out of range for {kind}: idx={idx}, max={max}")]
	DnaIndexOutOfRange {
		/// Logical index kind being validated.
		kind: &'static str,
		/// Offending index value.
		idx: u32,
		/// Maximum valid index.
		max: u32,
	},
	/// Duplicate type->struct mapping in DNA `STRC` section.
	#[error("DNA duplicate struct type index {type_idx}: first={first}, second={second}")]
	DnaDuplicateStructType {
		/// Duplicate type index.
		type_idx: u16,
		/// First struct index observed.
		first: u32,
		/// Second struct index observed.
		second: u32,
	},
	/// Requested DNA struct name was not found.
	#[error("DNA struct not found: {name}")]
	DnaStructNotFound {
		/// Requested struct name.
		name: String,
	},
	/// Declared field extents do not sum to the struct's TLEN entry.
	#[error("layout mismatch in {type_name}: declared={declared}, computed={computed}")]
	LayoutMismatch {
		/// Struct type name that failed verification.
		type_name: String,
		/// Size recorded in the TLEN table.
		declared: usize,
		/// Running sum of field extents.
		computed: usize,
	},
	/// Block references an SDNA struct index past the table end.
	#[error("block {code:?} sdna index {sdna_nr} out of range (structs={structs})")]
	BlockSdnaOutOfRange {
		/// Block code carrying the bad index.
		code: [u8; 4],
		/// Offending SDNA struct index.
		sdna_nr: u32,
		/// Number of structs in the table.
		structs: usize,
	},
	/// Two blocks claim the same non-zero stored address.
	#[error("duplicate block address 0x{address:016x}: blocks {first} and {second}")]
	DuplicateAddress {
		/// Shared stored address.
		address: u64,
		/// First block slot observed.
		first: usize,
		/// Second block slot observed.
		second: usize,
	},
	/// Requested block code was not found.
	#[error("block not found: {code:?}")]
	BlockNotFound {
		/// Requested 4-byte block code.
		code: [u8; 4],
	},
	/// CLI block code argument was invalid.
	#[error("invalid block code: {code}")]
	InvalidBlockCode {
		/// User-provided code string.
		code: String,
	},
	/// CLI address argument was invalid.
	#[error("invalid address literal: {value}")]
	InvalidAddressLiteral {
		/// User-provided address string.
		value: String,
	},
	/// Path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Requested field is missing at some nesting level.
	#[error("field {field} not found on {struct_name}")]
	FieldNotFound {
		/// Struct type name searched.
		struct_name: String,
		/// Missing field name.
		field: String,
	},
	/// Non-terminal path token names a pointer, array, or primitive field.
	#[error("cannot descend into {field} on {struct_name}: not a plain embedded struct")]
	PathNotStruct {
		/// Struct type name holding the field.
		struct_name: String,
		/// Field the path tried to descend through.
		field: String,
	},
	/// Value query landed on a pointer-typed leaf.
	#[error("field {field} on {struct_name} is a pointer, not a value")]
	ValueOnPointerField {
		/// Struct type name holding the field.
		struct_name: String,
		/// Pointer-typed leaf field.
		field: String,
	},
	/// Value query landed on a non-char array leaf.
	#[error("field {field} on {struct_name} is a fixed array, not a scalar value")]
	ValueOnArrayField {
		/// Struct type name holding the field.
		struct_name: String,
		/// Array-typed leaf field.
		field: String,
	},
	/// Pointer query landed on a field that is not a single plain pointer.
	#[error("field {field} on {struct_name} is not a single pointer (depth={ptr_depth}, count={elem_count})")]
	PointerFieldMismatch {
		/// Struct type name holding the field.
		struct_name: String,
		/// Queried field name.
		field: String,
		/// Pointer indirection depth found.
		ptr_depth: u8,
		/// Flattened array element count found.
		elem_count: usize,
	},
	/// Leaf type cannot be decoded as a primitive value.
	#[error("unsupported primitive type {type_name} (size={size})")]
	UnsupportedPrimitive {
		/// Leaf type name.
		type_name: String,
		/// Declared element size in bytes.
		size: usize,
	},
	/// Element index outside the block's stored count.
	#[error("element index {index} out of range (count={count})")]
	ElementOutOfRange {
		/// Requested element index.
		index: usize,
		/// Stored element count.
		count: u64,
	},
	/// Non-zero pointer whose address is absent from the index.
	#[error("unresolved pointer 0x{ptr:016x}")]
	UnresolvedPointer {
		/// Pointer value that failed to resolve.
		ptr: u64,
	},
	/// Field bytes would fall outside the owning block payload.
	#[error("payload slice out of bounds: start={start}, size={size}, payload={payload}")]
	PayloadOutOfBounds {
		/// Requested start byte within payload.
		start: usize,
		/// Requested slice size.
		size: usize,
		/// Available payload length.
		payload: usize,
	},
	/// Linked-list traversal exceeded the configured item cap.
	#[error("list exceeded {max_items} items")]
	ListLimitExceeded {
		/// Maximum allowed visited items.
		max_items: usize,
	},
}
