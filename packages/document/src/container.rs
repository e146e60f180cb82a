use crate::ids::RunId;
use crate::tree::{BodyElement, Paragraph, Run};
use crate::visitor::{walk_elements, Visitor};

/// Anything holding an ordered sequence of block elements: a body (main,
/// header, footer) or a table cell.
///
/// Block positions are plain indices into [`Container::elements`]; they are
/// only valid until the next structural edit of the same container.
pub trait Container {
    fn elements(&self) -> &[BodyElement];

    fn elements_mut(&mut self) -> &mut Vec<BodyElement>;

    fn len(&self) -> usize {
        self.elements().len()
    }

    fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    fn element(&self, index: usize) -> Option<&BodyElement> {
        self.elements().get(index)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut BodyElement> {
        self.elements_mut().get_mut(index)
    }

    /// Direct paragraph children, skipping tables
    fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.elements().iter().filter_map(BodyElement::as_paragraph)
    }

    /// Visible text of every paragraph, including those nested in table
    /// cells, one paragraph per line
    fn content(&self) -> String {
        let mut collector = LineCollector::default();
        walk_elements(&mut collector, self.elements());
        collector.lines.join("\n")
    }

    fn find_run(&self, id: RunId) -> Option<&Run> {
        find_run(self.elements(), id)
    }

    fn find_run_mut(&mut self, id: RunId) -> Option<&mut Run> {
        find_run_mut(self.elements_mut(), id)
    }
}

#[derive(Default)]
struct LineCollector {
    lines: Vec<String>,
}

impl Visitor for LineCollector {
    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        self.lines.push(paragraph.text());
    }
}

pub(crate) fn find_run(elements: &[BodyElement], id: RunId) -> Option<&Run> {
    for element in elements {
        match element {
            BodyElement::Paragraph(paragraph) => {
                if let Some(run) = paragraph.runs.iter().find(|run| run.id() == id) {
                    return Some(run);
                }
            }
            BodyElement::Table(table) => {
                for row in &table.rows {
                    for cell in &row.cells {
                        if let Some(run) = find_run(&cell.elements, id) {
                            return Some(run);
                        }
                    }
                }
            }
        }
    }
    None
}

pub(crate) fn find_run_mut(elements: &mut [BodyElement], id: RunId) -> Option<&mut Run> {
    for element in elements {
        match element {
            BodyElement::Paragraph(paragraph) => {
                if let Some(run) = paragraph.runs.iter_mut().find(|run| run.id() == id) {
                    return Some(run);
                }
            }
            BodyElement::Table(table) => {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        if let Some(run) = find_run_mut(&mut cell.elements, id) {
                            return Some(run);
                        }
                    }
                }
            }
        }
    }
    None
}
