//! # Wordtemplate Document
//!
//! In-memory model of a rich-text document and the primitive, formatting
//! preserving edits the template engine is built on.
//!
//! ## Tree
//!
//! ```text
//! Document
//!  ├─ headers: [Body]
//!  ├─ footers: [Body]
//!  └─ body:    Body
//!
//! Body / TableCell  (Container)
//!  └─ BodyElement = Paragraph | Table
//!       Paragraph → [Run]
//!       Table     → [TableRow] → [TableCell] → [BodyElement] ...
//! ```
//!
//! A run's text concatenated across its paragraph is the paragraph's
//! *visible text*. Offsets into it are UTF-8 byte offsets.
//!
//! ## Positions
//!
//! Nodes never know their parent. Every edit takes the parent container plus
//! a child index, and any index computed before a structural edit of the same
//! container is stale after it. Runs additionally carry a [`RunId`] so a run
//! can be found again after its index has moved.
//!
//! ## Usage
//!
//! ```rust
//! use wordtemplate_document::{editor, Body, BodyElement, Paragraph, Run};
//!
//! let mut paragraph = Paragraph::new();
//! paragraph.runs.push(Run::with_text("Hello world"));
//! editor::split_run(&mut paragraph, 0, 5);
//! assert_eq!(paragraph.runs.len(), 2);
//! assert_eq!(paragraph.text(), "Hello world");
//!
//! let mut body = Body::new();
//! body.elements.push(BodyElement::Paragraph(paragraph));
//! ```

mod container;
mod error;
mod ids;
mod index;
mod properties;
mod tree;

pub mod editor;
pub mod visitor;

pub use container::Container;
pub use error::{DocumentError, DocumentResult};
pub use ids::RunId;
pub use properties::Properties;
pub use tree::{
    Body, BodyElement, BodyKind, Document, ElementType, Paragraph, Run, Table, TableCell,
    TableRow,
};
pub use visitor::{Visitor, VisitorMut};
