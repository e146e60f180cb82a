//! # Node Editor
//!
//! Primitive structural edits that preserve formatting.
//!
//! Three families, all working on a parent plus a child index:
//!
//! - **clone**: copy a source node onto an already allocated destination.
//!   Properties are deep-copied, so the destination never shares formatting
//!   with its source. `is_empty` copies formatting only.
//! - **insert / remove**: allocate a fresh node at a position and clone a
//!   source into it, or drop a child. Positions outside `[0, len]` are a
//!   silent no-op reported through the return value, never an error.
//! - **split**: cut a node in two siblings at an inner offset. The new node
//!   is inserted *before* the original, which keeps the content at and after
//!   the offset.
//!
//! Every insert, remove and split changes sibling indices. Re-derive any
//! index into the same container after calling one of them.

mod clone;
mod insert;
mod split;

pub use clone::{
    clone_body_element, clone_paragraph, clone_run, clone_table, clone_table_cell,
    clone_table_cell_range, clone_table_row,
};
pub use insert::{
    add_table_cell, insert_paragraph, insert_run, insert_table, insert_table_cell,
    insert_table_row, remove_body_element, remove_run, remove_table_cell, remove_table_row,
};
pub use split::{split_paragraph, split_run, split_table, split_table_cell, split_table_row};
