use crate::blend::{BlendError, Result};

/// Parsed field path expression.
///
/// A path is an ordered sequence of field name tokens; each non-terminal
/// token must name a plain embedded struct field at its nesting level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
	/// Ordered name tokens.
	pub tokens: Vec<Box<str>>,
}

impl FieldPath {
	/// Parse dotted field syntax (`id.name`, `r.cfra`).
	pub fn parse(input: &str) -> Result<Self> {
		if input.is_empty() {
			return Err(BlendError::InvalidFieldPath { path: input.to_owned() });
		}

		let mut tokens = Vec::new();
		for part in input.split('.') {
			if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_') {
				return Err(BlendError::InvalidFieldPath { path: input.to_owned() });
			}
			tokens.push(part.to_owned().into_boxed_str());
		}

		Ok(Self { tokens })
	}

	/// Build a path from pre-split name tokens.
	pub fn from_tokens(tokens: &[&str]) -> Self {
		Self {
			tokens: tokens.iter().map(|token| (*token).to_owned().into_boxed_str()).collect(),
		}
	}

	/// Return a new path with one more trailing token.
	pub fn child(&self, token: &str) -> Self {
		let mut tokens = self.tokens.clone();
		tokens.push(token.to_owned().into_boxed_str());
		Self { tokens }
	}

	/// Render the path back to dotted syntax.
	pub fn join(&self) -> String {
		self.tokens.join(".")
	}
}
