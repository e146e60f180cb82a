use crate::instruction::{Instruction, WordTemplate};
use crate::isolate::isolate_range;
use crate::registry::InstructionRegistry;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};
use wordtemplate_document::visitor::{walk_elements_mut, VisitorMut};
use wordtemplate_document::{Body, BodyKind, Document, Paragraph, Run};

/// `${...}` interpolations and `<#...>` / `</#...>` directives
static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{.*?\}|</?#.*?>").expect("invalid marker regex"));

/// Which parts of the document are scanned; the main body always is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub headers: bool,
    pub footers: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            headers: true,
            footers: true,
        }
    }
}

/// Find every marker in `document` and bind it to a run of its own
///
/// Runs are re-cut in place so each marker ends up in exactly one run; the
/// visible text is unchanged. Markers no recognizer claims are left alone.
/// Runs sharing an id, as left by cloning a paragraph within the document,
/// get fresh ids first so no two instructions bind the same run.
pub fn parse(document: &mut Document, registry: &InstructionRegistry) -> WordTemplate {
    parse_with(document, registry, &ParseOptions::default())
}

#[instrument(skip_all, fields(headers = document.headers.len(), footers = document.footers.len()))]
pub fn parse_with(
    document: &mut Document,
    registry: &InstructionRegistry,
    options: &ParseOptions,
) -> WordTemplate {
    let renewed = document.renew_duplicate_run_ids();
    if renewed > 0 {
        debug!(renewed, "Renewed duplicate run ids");
    }

    let mut locator = InstructionLocator {
        registry,
        options,
        instructions: Vec::new(),
    };
    locator.visit_document_mut(document);

    info!(instructions = locator.instructions.len(), "Located instructions");
    WordTemplate::new(locator.instructions)
}

struct InstructionLocator<'a> {
    registry: &'a InstructionRegistry,
    options: &'a ParseOptions,
    instructions: Vec<Instruction>,
}

impl InstructionLocator<'_> {
    fn locate(&mut self, paragraph: &mut Paragraph) {
        // Re-cutting runs never changes the visible text, so match offsets
        // stay valid for the whole paragraph
        let text = paragraph.text();

        for marker in MARKER.find_iter(&text) {
            let (start, end) = (marker.start(), marker.end());

            if !isolate_range(paragraph, start, end - 1) {
                warn!(marker = marker.as_str(), start, "Marker range outside paragraph text");
                continue;
            }

            let Some(run) = run_at(paragraph, start).filter(|run| run.text() == marker.as_str())
            else {
                warn!(marker = marker.as_str(), start, "Marker did not isolate into one run");
                continue;
            };

            match self.registry.create_instruction(marker.as_str(), run.id()) {
                Some(instruction) => {
                    debug!(kind = instruction.kind(), run = %run.id(), "Bound marker");
                    self.instructions.push(instruction);
                }
                None => debug!(marker = marker.as_str(), "No recognizer for marker"),
            }
        }
    }
}

impl VisitorMut for InstructionLocator<'_> {
    fn visit_body_mut(&mut self, kind: BodyKind, body: &mut Body) {
        let scanned = match kind {
            BodyKind::Header(_) => self.options.headers,
            BodyKind::Footer(_) => self.options.footers,
            BodyKind::Main => true,
        };
        if !scanned {
            debug!(%kind, "Skipping body");
            return;
        }
        walk_elements_mut(self, &mut body.elements);
    }

    fn visit_paragraph_mut(&mut self, paragraph: &mut Paragraph) {
        self.locate(paragraph);
    }
}

/// Run whose text starts exactly at byte `offset` of the visible text
fn run_at(paragraph: &Paragraph, offset: usize) -> Option<&Run> {
    let mut pos = 0;
    for run in &paragraph.runs {
        if pos == offset && !run.is_empty() {
            return Some(run);
        }
        pos += run.len();
        if pos > offset {
            return None;
        }
    }
    None
}
