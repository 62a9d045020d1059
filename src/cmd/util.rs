use blendq::blend::{BlendError, BlendFile, RecordView, Result};

/// Parse up-to-4 ASCII block code into padded `[u8; 4]`.
pub(crate) fn parse_block_code(code: &str) -> Result<[u8; 4]> {
	if code.is_empty() || code.len() > 4 || !code.is_ascii() {
		return Err(BlendError::InvalidBlockCode { code: code.to_owned() });
	}

	let mut out = [0_u8; 4];
	out[..code.len()].copy_from_slice(code.as_bytes());
	Ok(out)
}

/// Parse decimal or `0x`-prefixed hex address literal.
pub(crate) fn parse_addr(value: &str) -> Result<u64> {
	let parsed = if let Some(stripped) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		u64::from_str_radix(stripped, 16)
	} else {
		value.parse::<u64>()
	};

	parsed.map_err(|_| BlendError::InvalidAddressLiteral { value: value.to_owned() })
}

/// Render block code bytes as printable label.
pub(crate) fn render_code(code: [u8; 4]) -> String {
	let mut out = String::new();
	for byte in code {
		if byte == 0 {
			continue;
		}
		if byte.is_ascii_graphic() || byte == b' ' {
			out.push(char::from(byte));
		} else {
			out.push('.');
		}
	}
	if out.is_empty() { "....".to_owned() } else { out }
}

/// Resolve the root record from `--code` or `--addr` selectors.
pub(crate) fn root_view<'a>(blend: &'a BlendFile, code: Option<&str>, addr: Option<&str>) -> Result<RecordView<'a>> {
	if let Some(addr) = addr {
		let ptr = parse_addr(addr)?;
		return blend.view_by_address(ptr).ok_or(BlendError::UnresolvedPointer { ptr });
	}

	let code = parse_block_code(code.unwrap_or("SC"))?;
	blend.view_by_code(code).ok_or(BlendError::BlockNotFound { code })
}
