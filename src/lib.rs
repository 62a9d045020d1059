//! Public library API for structured, name-based queries over `.blend` files.

/// Blend file parsing, schema catalog, pointer resolution, and query types.
pub mod blend;
