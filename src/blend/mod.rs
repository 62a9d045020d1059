mod bhead;
mod block;
mod bytes;
mod compression;
mod decl;
mod dna;
mod error;
mod file;
mod header;
mod idprop;
mod layout;
mod listbase;
mod path;
mod pointer;
mod value;
mod view;

#[cfg(test)]
pub(crate) mod fixture;

/// Parsed block header record.
pub use bhead::BHead;
/// Block container and iterator types.
pub use block::{Block, BlockIter};
/// Compression detection result.
pub use compression::Compression;
/// SDNA schema representation.
pub use dna::{Dna, DnaField, DnaStruct};
/// Error and result aliases.
pub use error::{BlendError, Result};
/// File abstraction and block statistics.
pub use file::{BlendFile, BlockStats};
/// File header representation.
pub use header::{BlendHeader, Endianness};
/// Property tree access types.
pub use idprop::{PropIter, PropKind, PropValue, Property, PropertyGroup};
/// Field layout resolution types and entry point.
pub use layout::{FieldLayout, resolve_field_layout};
/// Linked-list traversal types.
pub use listbase::{DEFAULT_MAX_ITEMS, ListIter};
/// Field path parser type.
pub use path::FieldPath;
/// Address index for pointer resolution.
pub use pointer::PointerIndex;
/// Decoded leaf value type.
pub use value::Value;
/// Record view query handle.
pub use view::RecordView;
