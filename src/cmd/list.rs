use std::path::PathBuf;

use blendq::blend::{BlendFile, ListIter, Result};

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
	/// Dotted path to the embedded list head (for example `r.views`).
	#[arg(long = "path")]
	pub path_expr: String,
	/// Field to read from each element.
	#[arg(long)]
	pub field: Option<String>,
	/// Traversal cap.
	#[arg(long = "max", default_value_t = blendq::blend::DEFAULT_MAX_ITEMS)]
	pub max_items: usize,
}

/// Walk a linked list and print each element.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file,
		code,
		addr,
		path_expr,
		field,
		max_items,
	} = args;

	let blend = BlendFile::open(&file)?;
	let root = root_view(&blend, code.as_deref(), addr.as_deref())?;

	let mut count = 0_usize;
	for item in ListIter::over(root, &path_expr)?.with_max_items(max_items) {
		let item = item?;
		match &field {
			Some(field) => {
				let value = item.value(field)?;
				println!("[{count}] {} 0x{:x} {}={}", item.struct_name(), item.address(), field, value);
			}
			None => {
				println!("[{count}] {} {} 0x{:x}", render_code(item.code()), item.struct_name(), item.address());
			}
		}
		count += 1;
	}

	println!("items: {count}");
	Ok(())
}
