//! Run lookup by id

use crate::ids::RunId;
use crate::tree::{Body, BodyElement, BodyKind, Document, Paragraph, Run};
use crate::visitor::{walk_document_mut, VisitorMut};
use std::collections::{HashMap, HashSet};

/// Where a run lives: the body, the element steps down to its paragraph and
/// the run's index in that paragraph.
///
/// `steps` starts with the element index in the body; every nested table
/// adds `row, cell, element`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunPath {
    body: BodyKind,
    steps: Vec<usize>,
    run: usize,
}

/// Cached run positions; an entry may be stale after a structural edit and
/// is checked against the run's id before use
#[derive(Debug, Clone, Default)]
pub(crate) struct RunIndex {
    paths: HashMap<RunId, RunPath>,
}

impl RunIndex {
    pub(crate) fn get(&self, id: RunId) -> Option<&RunPath> {
        self.paths.get(&id)
    }

    /// Index every run; the first run in traversal order wins a shared id
    pub(crate) fn build(document: &Document) -> Self {
        let mut paths = HashMap::new();
        for (kind, body) in document.bodies() {
            let mut steps = Vec::new();
            index_elements(&body.elements, kind, &mut steps, &mut paths);
        }
        Self { paths }
    }
}

fn index_elements(
    elements: &[BodyElement],
    body: BodyKind,
    steps: &mut Vec<usize>,
    paths: &mut HashMap<RunId, RunPath>,
) {
    for (index, element) in elements.iter().enumerate() {
        steps.push(index);
        match element {
            BodyElement::Paragraph(paragraph) => {
                for (run_index, run) in paragraph.runs.iter().enumerate() {
                    paths.entry(run.id()).or_insert_with(|| RunPath {
                        body,
                        steps: steps.clone(),
                        run: run_index,
                    });
                }
            }
            BodyElement::Table(table) => {
                for (row_index, row) in table.rows.iter().enumerate() {
                    for (cell_index, cell) in row.cells.iter().enumerate() {
                        steps.extend([row_index, cell_index]);
                        index_elements(&cell.elements, body, steps, paths);
                        steps.truncate(steps.len() - 2);
                    }
                }
            }
        }
        steps.pop();
    }
}

fn body(document: &Document, kind: BodyKind) -> Option<&Body> {
    match kind {
        BodyKind::Header(index) => document.headers.get(index),
        BodyKind::Footer(index) => document.footers.get(index),
        BodyKind::Main => Some(&document.body),
    }
}

fn body_mut(document: &mut Document, kind: BodyKind) -> Option<&mut Body> {
    match kind {
        BodyKind::Header(index) => document.headers.get_mut(index),
        BodyKind::Footer(index) => document.footers.get_mut(index),
        BodyKind::Main => Some(&mut document.body),
    }
}

fn paragraph_at<'a>(elements: &'a [BodyElement], steps: &[usize]) -> Option<&'a Paragraph> {
    let (&index, rest) = steps.split_first()?;
    match (elements.get(index)?, rest) {
        (BodyElement::Paragraph(paragraph), []) => Some(paragraph),
        (BodyElement::Table(table), [row, cell, rest @ ..]) => {
            let cell = table.rows.get(*row)?.cells.get(*cell)?;
            paragraph_at(&cell.elements, rest)
        }
        _ => None,
    }
}

fn paragraph_at_mut<'a>(
    elements: &'a mut [BodyElement],
    steps: &[usize],
) -> Option<&'a mut Paragraph> {
    let (&index, rest) = steps.split_first()?;
    match (elements.get_mut(index)?, rest) {
        (BodyElement::Paragraph(paragraph), []) => Some(paragraph),
        (BodyElement::Table(table), [row, cell, rest @ ..]) => {
            let cell = table.rows.get_mut(*row)?.cells.get_mut(*cell)?;
            paragraph_at_mut(&mut cell.elements, rest)
        }
        _ => None,
    }
}

pub(crate) fn resolve<'a>(document: &'a Document, path: &RunPath) -> Option<&'a Run> {
    let body = body(document, path.body)?;
    paragraph_at(&body.elements, &path.steps)?.runs.get(path.run)
}

pub(crate) fn resolve_mut<'a>(document: &'a mut Document, path: &RunPath) -> Option<&'a mut Run> {
    let body = body_mut(document, path.body)?;
    paragraph_at_mut(&mut body.elements, &path.steps)?
        .runs
        .get_mut(path.run)
}

/// Gives every run whose id was already seen earlier in the walk a new id
#[derive(Default)]
pub(crate) struct IdRenewer {
    seen: HashSet<RunId>,
    renewed: usize,
}

impl IdRenewer {
    pub(crate) fn renew(document: &mut Document) -> usize {
        let mut renewer = Self::default();
        walk_document_mut(&mut renewer, document);
        renewer.renewed
    }
}

impl VisitorMut for IdRenewer {
    fn visit_run_mut(&mut self, run: &mut Run) {
        if !self.seen.insert(run.id()) {
            run.renew_id();
            self.seen.insert(run.id());
            self.renewed += 1;
        }
    }
}
