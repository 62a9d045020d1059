use std::path::PathBuf;

use blendq::blend::{BlendFile, Result};

use crate::cmd::util::render_code;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
}

/// Print high-level file and block statistics.
pub fn run(args: Args) -> Result<()> {
	let Args { path } = args;

	let blend = BlendFile::open(&path)?;
	let stats = blend.block_stats();

	println!("path: {}", path.display());
	println!("compression: {}", blend.compression.as_str());
	println!("version: {}", blend.header.version);
	println!("endianness: {}", blend.header.endianness.as_str());
	println!("pointer_size: {}", blend.header.pointer_size);
	println!("block_count: {}", stats.block_count);
	println!("indexed_addresses: {}", blend.pointer_index().len());
	println!("has_dna: {}", stats.has_dna);
	println!("has_endb: {}", stats.has_endb);
	println!("last_code: {}", render_code(stats.last_code));

	let mut entries: Vec<_> = stats.codes.into_iter().collect();
	entries.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

	println!("top_codes:");
	for (code, count) in entries.into_iter().take(12) {
		println!("  {}: {}", render_code(code), count);
	}

	Ok(())
}
