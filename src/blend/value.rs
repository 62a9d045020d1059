/// One decoded leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean primitive.
	Bool(bool),
	/// Signed integer widths 1/2/4/8, sign-extended.
	I64(i64),
	/// Unsigned integer widths 1/2/4/8.
	U64(u64),
	/// 4-byte floating point.
	F32(f32),
	/// 8-byte floating point.
	F64(f64),
	/// Nul-truncated text from a fixed `char` array.
	Text(String),
}

impl Value {
	/// Stable label for the value kind.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::I64(_) => "i64",
			Self::U64(_) => "u64",
			Self::F32(_) => "f32",
			Self::F64(_) => "f64",
			Self::Text(_) => "text",
		}
	}

	/// Return the value widened to `i64` when it is any integer.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Bool(value) => Some(i64::from(*value)),
			Self::I64(value) => Some(*value),
			Self::U64(value) => i64::try_from(*value).ok(),
			_ => None,
		}
	}

	/// Return the value widened to `f64` when it is floating point.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::F32(value) => Some(f64::from(*value)),
			Self::F64(value) => Some(*value),
			_ => None,
		}
	}

	/// Return borrowed text when this is a text value.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(value) => Some(value.as_str()),
			_ => None,
		}
	}
}

impl std::fmt::Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Bool(value) => write!(f, "{value}"),
			Self::I64(value) => write!(f, "{value}"),
			Self::U64(value) => write!(f, "{value}"),
			Self::F32(value) => write!(f, "{value}"),
			Self::F64(value) => write!(f, "{value}"),
			Self::Text(value) => write!(f, "{value}"),
		}
	}
}
