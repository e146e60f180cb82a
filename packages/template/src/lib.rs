//! # Wordtemplate
//!
//! Turns an ordinary word-processing document into a template. Authors type
//! markers such as `${customer.name}` anywhere in the text; the document
//! stores them split over several runs, and this crate finds them, gives
//! each one a run of its own, and later replaces that run's text with the
//! evaluated value. Fonts, colours and other run formatting survive.
//!
//! ```rust
//! use serde_json::json;
//! use wordtemplate::{parse, InstructionRegistry};
//! use wordtemplate_document::{Body, Document, Paragraph};
//! use wordtemplate_evaluator::TemplateEngine;
//!
//! let paragraph = Paragraph::with_runs(["Welcome to ", "${", "city", "}", "!"]);
//! let mut document = Document::from_body(Body::with_elements([paragraph]));
//!
//! let registry = InstructionRegistry::with_engine(TemplateEngine::new());
//! let template = parse(&mut document, &registry);
//! assert_eq!(template.len(), 1);
//!
//! let model = json!({"city": "Paris"}).as_object().cloned().unwrap();
//! template.apply(&mut document, &registry, &model).unwrap();
//!
//! let paragraph = document.body.elements[0].as_paragraph().unwrap();
//! assert_eq!(paragraph.text(), "Welcome to Paris!");
//! ```

mod error;
mod instruction;
mod interpolation;
pub mod isolate;
mod locator;
mod registry;

pub use error::{TemplateError, TemplateResult};
pub use instruction::{CustomInstruction, Instruction, InterpolationInstruction, WordTemplate};
pub use interpolation::{ExpressionEvaluator, InterpolationRecognizer};
pub use isolate::isolate_range;
pub use locator::{parse, parse_with, ParseOptions};
pub use registry::{InstructionRegistry, Recognizer};
pub use wordtemplate_evaluator::Model;
