use std::path::PathBuf;

use blendq::blend::{BlendFile, PropValue, Property, PropertyGroup, Result};

use crate::cmd::util::root_view;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Root block code (default `SC`).
	#[arg(long)]
	pub code: Option<String>,
	/// Dotted pointer path to the property tree root (default `id.properties`).
	#[arg(long = "path", default_value = "id.properties")]
	pub path_expr: String,
	/// Dotted key path inside the tree (for example `cycles.samples`).
	#[arg(long)]
	pub key: Option<String>,
}

/// Inspect a record's property tree, or read one key.
pub fn run(args: Args) -> Result<()> {
	let Args {
		file,
		code,
		path_expr,
		key,
	} = args;

	let blend = BlendFile::open(&file)?;
	let root = root_view(&blend, code.as_deref(), None)?;

	let Some(tree) = root.pointer(&path_expr)? else {
		println!("no properties");
		return Ok(());
	};
	let group = PropertyGroup::of(tree);

	match key {
		Some(key) => {
			let names: Vec<&str> = key.split('.').collect();
			match group.get_path(&names)? {
				Some(prop) => print_property(&prop, 0)?,
				None => println!("key not found: {key}"),
			}
		}
		None => print_group(&group, 0)?,
	}

	Ok(())
}

fn print_group(group: &PropertyGroup<'_>, depth: usize) -> Result<()> {
	for entry in group.entries()? {
		print_property(&entry?, depth)?;
	}
	Ok(())
}

fn print_property(prop: &Property<'_>, depth: usize) -> Result<()> {
	let indent = "  ".repeat(depth);
	let name = prop.name()?;
	let kind = prop.kind()?;

	match prop.value()? {
		PropValue::Group(nested) => {
			println!("{indent}{name} ({})", kind.as_str());
			print_group(&nested, depth + 1)
		}
		PropValue::Int(value) => {
			println!("{indent}{name} ({}) = {value}", kind.as_str());
			Ok(())
		}
		PropValue::Float(value) => {
			println!("{indent}{name} ({}) = {value}", kind.as_str());
			Ok(())
		}
		PropValue::Text(value) => {
			println!("{indent}{name} ({}) = {value:?}", kind.as_str());
			Ok(())
		}
		PropValue::IntArray(values) => {
			println!("{indent}{name} ({}) = {values:?}", kind.as_str());
			Ok(())
		}
		PropValue::FloatArray(values) => {
			println!("{indent}{name} ({}) = {values:?}", kind.as_str());
			Ok(())
		}
		PropValue::Unsupported(kind) => {
			println!("{indent}{name} ({}) = <not decoded>", kind.as_str());
			Ok(())
		}
	}
}
