use std::path::PathBuf;

use blendq::blend::{BlendFile, Result, Value};
use serde::Serialize;

use crate::cmd::util::{render_code, root_view};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Root block code (default `SC`).
	#[arg(long)]
	pub code: Option<String>,
	/// Root block address instead of a code.
	#[arg(long)]
	pub addr: Option<String>,
	/// Dotted field path to read.
	#[arg(long = "path")]
	pub path_expr: String,
	/// Resolve the leaf as a pointer and report its target.
	#[arg(long)]
	pub ptr: bool,
	/// Emit a JSON report instead of plain text.
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct Report {
	root: String,
	path: String,
	kind: &'static str,
	value: serde_json::Value,
}

/// Read one value or pointer target at a field path.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file,
		code,
		addr,
		path_expr,
		ptr,
		json,
	} = args;

	let blend = BlendFile::open(&file)?;
	let root = root_view(&blend, code.as_deref(), addr.as_deref())?;

	let report = if ptr {
		match root.pointer(&path_expr)? {
			Some(target) => Report {
				root: render_code(root.code()),
				path: path_expr,
				kind: "pointer",
				value: serde_json::json!({
					"code": render_code(target.code()),
					"struct": target.struct_name(),
					"addr": format!("0x{:x}", target.address()),
					"count": target.count(),
				}),
			},
			None => Report {
				root: render_code(root.code()),
				path: path_expr,
				kind: "pointer",
				value: serde_json::Value::Null,
			},
		}
	} else {
		let value = root.value(&path_expr)?;
		Report {
			root: render_code(root.code()),
			path: path_expr,
			kind: value.kind(),
			value: value_json(&value),
		}
	};

	if json {
		println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
	} else {
		println!("root: {}", report.root);
		println!("path: {}", report.path);
		println!("kind: {}", report.kind);
		println!("value: {}", report.value);
	}

	Ok(())
}

fn value_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Bool(inner) => serde_json::json!(inner),
		Value::I64(inner) => serde_json::json!(inner),
		Value::U64(inner) => serde_json::json!(inner),
		Value::F32(inner) => serde_json::json!(inner),
		Value::F64(inner) => serde_json::json!(inner),
		Value::Text(inner) => serde_json::json!(inner),
	}
}
