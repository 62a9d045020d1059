use crate::blend::bytes::{u32_at, u64_at};
use crate::blend::{Endianness, ListIter, RecordView, Result};

/// Property kind codes stored in the group element's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
	/// Text payload behind `data.pointer`.
	Text,
	/// Integer payload in `data.val`.
	Int,
	/// 4-byte float payload overlaid on `data.val`.
	Float,
	/// Scalar array payload behind `data.pointer`, element kind in `subtype`.
	Array,
	/// Nested group; children hang off `data.group`.
	Group,
	/// Reference to a datablock record.
	IdRef,
	/// 8-byte float payload overlaid on `data.val`/`data.val2`.
	Double,
	/// Array of nested groups (not decoded here).
	GroupArray,
	/// Boolean payload in `data.val`.
	Boolean,
	/// Unrecognized kind code.
	Other(i64),
}

impl PropKind {
	/// Map a stored kind code to its known variant.
	pub fn from_code(code: i64) -> Self {
		match code {
			0 => Self::Text,
			1 => Self::Int,
			2 => Self::Float,
			5 => Self::Array,
			6 => Self::Group,
			7 => Self::IdRef,
			8 => Self::Double,
			9 => Self::GroupArray,
			10 => Self::Boolean,
			other => Self::Other(other),
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Int => "int",
			Self::Float => "float",
			Self::Array => "array",
			Self::Group => "group",
			Self::IdRef => "id",
			Self::Double => "double",
			Self::GroupArray => "group_array",
			Self::Boolean => "boolean",
			Self::Other(_) => "other",
		}
	}
}

/// One decoded property payload.
#[derive(Debug, Clone)]
pub enum PropValue<'a> {
	/// Integer or boolean payload.
	Int(i64),
	/// Float or double payload.
	Float(f64),
	/// Text payload.
	Text(String),
	/// Integer array payload.
	IntArray(Vec<i64>),
	/// Float or double array payload.
	FloatArray(Vec<f64>),
	/// Nested group, usable for further lookups.
	Group(PropertyGroup<'a>),
	/// Kind this accessor does not decode.
	Unsupported(PropKind),
}

/// Hierarchical key/value lookup over a group record.
///
/// Groups are ordinary records whose children form a linked list at
/// `data.group`; lookups are linear scans by name, matching the producer
/// format's own lack of indexing.
#[derive(Debug, Clone, Copy)]
pub struct PropertyGroup<'a> {
	view: RecordView<'a>,
}

impl<'a> PropertyGroup<'a> {
	/// Bind a group accessor to a property record.
	pub fn of(view: RecordView<'a>) -> Self {
		Self { view }
	}

	/// Return the underlying record view.
	pub fn view(&self) -> RecordView<'a> {
		self.view
	}

	/// Iterate the group's direct children in stored order.
	pub fn entries(&self) -> Result<PropIter<'a>> {
		Ok(PropIter {
			inner: ListIter::over(self.view, "data.group")?,
		})
	}

	/// Find a direct child by exact name.
	pub fn get(&self, name: &str) -> Result<Option<Property<'a>>> {
		for entry in self.entries()? {
			let prop = entry?;
			if prop.name()? == name {
				return Ok(Some(prop));
			}
		}
		Ok(None)
	}

	/// Walk nested groups by name, returning the final property.
	pub fn get_path(&self, names: &[&str]) -> Result<Option<Property<'a>>> {
		let mut group = *self;
		for (idx, name) in names.iter().enumerate() {
			let Some(prop) = group.get(name)? else {
				return Ok(None);
			};
			if idx + 1 == names.len() {
				return Ok(Some(prop));
			}
			match prop.value()? {
				PropValue::Group(nested) => group = nested,
				_ => return Ok(None),
			}
		}
		Ok(None)
	}
}

/// Iterator adapter yielding properties instead of raw views.
pub struct PropIter<'a> {
	inner: ListIter<'a>,
}

impl<'a> Iterator for PropIter<'a> {
	type Item = Result<Property<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		Some(self.inner.next()?.map(Property::of))
	}
}

/// One property record inside a group.
#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
	view: RecordView<'a>,
}

impl<'a> Property<'a> {
	/// Bind a property accessor to a record.
	pub fn of(view: RecordView<'a>) -> Self {
		Self { view }
	}

	/// Return the underlying record view.
	pub fn view(&self) -> RecordView<'a> {
		self.view
	}

	/// Property name.
	pub fn name(&self) -> Result<String> {
		Ok(self.view.value("name")?.to_string())
	}

	/// Property kind, read before the value to pick its interpretation.
	pub fn kind(&self) -> Result<PropKind> {
		let code = self.view.value("type")?.as_i64().unwrap_or(-1);
		Ok(PropKind::from_code(code))
	}

	/// Decode the kind-dependent payload.
	pub fn value(&self) -> Result<PropValue<'a>> {
		match self.kind()? {
			PropKind::Int | PropKind::Boolean => {
				let raw = self.view.value("data.val")?.as_i64().unwrap_or(0);
				Ok(PropValue::Int(raw))
			}
			PropKind::Float => {
				let raw = self.view.value("data.val")?.as_i64().unwrap_or(0);
				Ok(PropValue::Float(f64::from(f32::from_bits(raw as u32))))
			}
			PropKind::Double => {
				let lo = self.view.value("data.val")?.as_i64().unwrap_or(0) as u32;
				let hi = self.view.value("data.val2")?.as_i64().unwrap_or(0) as u32;
				// val/val2 overlay the double's first and second word in file
				// order, so which holds the low bits depends on endianness.
				let bits = match self.view.file.header.endianness {
					Endianness::Little => u64::from(lo) | (u64::from(hi) << 32),
					Endianness::Big => (u64::from(lo) << 32) | u64::from(hi),
				};
				Ok(PropValue::Float(f64::from_bits(bits)))
			}
			PropKind::Text => {
				let Some(target) = self.view.pointer("data.pointer")? else {
					return Ok(PropValue::Text(String::new()));
				};
				let declared = self.view.value("len")?.as_i64().unwrap_or(0).max(0) as usize;
				let bytes = target.block_payload();
				let take = declared.min(bytes.len());
				let end = bytes[..take].iter().position(|byte| *byte == 0).unwrap_or(take);
				Ok(PropValue::Text(String::from_utf8_lossy(&bytes[..end]).into_owned()))
			}
			PropKind::Array => self.array_value(),
			PropKind::Group => Ok(PropValue::Group(PropertyGroup::of(self.view))),
			other => Ok(PropValue::Unsupported(other)),
		}
	}

	// Array payloads live behind `data.pointer`; `subtype` names the element
	// kind and `len` the element count.
	fn array_value(&self) -> Result<PropValue<'a>> {
		let subtype = PropKind::from_code(self.view.value("subtype")?.as_i64().unwrap_or(-1));
		let count = self.view.value("len")?.as_i64().unwrap_or(0).max(0) as usize;
		let endianness = self.view.file.header.endianness;

		let bytes = match self.view.pointer("data.pointer")? {
			Some(target) => target.block_payload(),
			None => &[],
		};

		match subtype {
			PropKind::Int | PropKind::Boolean => {
				let take = count.min(bytes.len() / 4);
				let mut out = Vec::with_capacity(take);
				for chunk in bytes.chunks_exact(4).take(take) {
					let mut buf = [0_u8; 4];
					buf.copy_from_slice(chunk);
					out.push(i64::from(u32_at(&buf, endianness) as i32));
				}
				Ok(PropValue::IntArray(out))
			}
			PropKind::Float => {
				let take = count.min(bytes.len() / 4);
				let mut out = Vec::with_capacity(take);
				for chunk in bytes.chunks_exact(4).take(take) {
					let mut buf = [0_u8; 4];
					buf.copy_from_slice(chunk);
					out.push(f64::from(f32::from_bits(u32_at(&buf, endianness))));
				}
				Ok(PropValue::FloatArray(out))
			}
			PropKind::Double => {
				let take = count.min(bytes.len() / 8);
				let mut out = Vec::with_capacity(take);
				for chunk in bytes.chunks_exact(8).take(take) {
					let mut buf = [0_u8; 8];
					buf.copy_from_slice(chunk);
					out.push(f64::from_bits(u64_at(&buf, endianness)));
				}
				Ok(PropValue::FloatArray(out))
			}
			_ => Ok(PropValue::Unsupported(PropKind::Array)),
		}
	}
}
