use crate::tree::*;

/// Visitor pattern for traversing a document immutably
///
/// Default implementations walk the entire tree, including tables nested in
/// cells. Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_body(&mut self, _kind: BodyKind, body: &Body) {
        walk_elements(self, &body.elements);
    }

    fn visit_element(&mut self, element: &BodyElement) {
        walk_element(self, element);
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) {
        walk_paragraph(self, paragraph);
    }

    fn visit_run(&mut self, _run: &Run) {
        // Leaf node, no children to walk
    }

    fn visit_table(&mut self, table: &Table) {
        walk_table(self, table);
    }

    fn visit_table_row(&mut self, row: &TableRow) {
        walk_table_row(self, row);
    }

    fn visit_table_cell(&mut self, cell: &TableCell) {
        walk_elements(self, &cell.elements);
    }
}

/// Mutable visitor pattern for editing a document in place
///
/// Similar to Visitor, but provides mutable access to nodes.
pub trait VisitorMut: Sized {
    fn visit_document_mut(&mut self, doc: &mut Document) {
        walk_document_mut(self, doc);
    }

    fn visit_body_mut(&mut self, _kind: BodyKind, body: &mut Body) {
        walk_elements_mut(self, &mut body.elements);
    }

    fn visit_element_mut(&mut self, element: &mut BodyElement) {
        walk_element_mut(self, element);
    }

    fn visit_paragraph_mut(&mut self, paragraph: &mut Paragraph) {
        walk_paragraph_mut(self, paragraph);
    }

    fn visit_run_mut(&mut self, _run: &mut Run) {
        // Leaf node, no children to walk
    }

    fn visit_table_mut(&mut self, table: &mut Table) {
        walk_table_mut(self, table);
    }

    fn visit_table_row_mut(&mut self, row: &mut TableRow) {
        walk_table_row_mut(self, row);
    }

    fn visit_table_cell_mut(&mut self, cell: &mut TableCell) {
        walk_elements_mut(self, &mut cell.elements);
    }
}

// Default walk implementations for immutable visitor

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    for (kind, body) in doc.bodies() {
        visitor.visit_body(kind, body);
    }
}

pub fn walk_elements<V: Visitor>(visitor: &mut V, elements: &[BodyElement]) {
    for element in elements {
        visitor.visit_element(element);
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &BodyElement) {
    match element {
        BodyElement::Paragraph(paragraph) => visitor.visit_paragraph(paragraph),
        BodyElement::Table(table) => visitor.visit_table(table),
    }
}

pub fn walk_paragraph<V: Visitor>(visitor: &mut V, paragraph: &Paragraph) {
    for run in &paragraph.runs {
        visitor.visit_run(run);
    }
}

pub fn walk_table<V: Visitor>(visitor: &mut V, table: &Table) {
    for row in &table.rows {
        visitor.visit_table_row(row);
    }
}

pub fn walk_table_row<V: Visitor>(visitor: &mut V, row: &TableRow) {
    for cell in &row.cells {
        visitor.visit_table_cell(cell);
    }
}

// Default walk implementations for mutable visitor

pub fn walk_document_mut<V: VisitorMut>(visitor: &mut V, doc: &mut Document) {
    for (kind, body) in doc.bodies_mut() {
        visitor.visit_body_mut(kind, body);
    }
}

pub fn walk_elements_mut<V: VisitorMut>(visitor: &mut V, elements: &mut [BodyElement]) {
    for element in elements {
        visitor.visit_element_mut(element);
    }
}

pub fn walk_element_mut<V: VisitorMut>(visitor: &mut V, element: &mut BodyElement) {
    match element {
        BodyElement::Paragraph(paragraph) => visitor.visit_paragraph_mut(paragraph),
        BodyElement::Table(table) => visitor.visit_table_mut(table),
    }
}

pub fn walk_paragraph_mut<V: VisitorMut>(visitor: &mut V, paragraph: &mut Paragraph) {
    for run in &mut paragraph.runs {
        visitor.visit_run_mut(run);
    }
}

pub fn walk_table_mut<V: VisitorMut>(visitor: &mut V, table: &mut Table) {
    for row in &mut table.rows {
        visitor.visit_table_row_mut(row);
    }
}

pub fn walk_table_row_mut<V: VisitorMut>(visitor: &mut V, row: &mut TableRow) {
    for cell in &mut row.cells {
        visitor.visit_table_cell_mut(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RunCounter {
        bodies: Vec<BodyKind>,
        runs: usize,
        cells: usize,
    }

    impl Visitor for RunCounter {
        fn visit_body(&mut self, kind: BodyKind, body: &Body) {
            self.bodies.push(kind);
            walk_elements(self, &body.elements);
        }

        fn visit_run(&mut self, _run: &Run) {
            self.runs += 1;
        }

        fn visit_table_cell(&mut self, cell: &TableCell) {
            self.cells += 1;
            walk_elements(self, &cell.elements);
        }
    }

    struct Shout;

    impl VisitorMut for Shout {
        fn visit_run_mut(&mut self, run: &mut Run) {
            run.text = run.text.to_uppercase();
        }
    }

    fn sample() -> Document {
        let mut table = Table::new();
        table.rows[0].cells[0].elements = vec![Paragraph::with_runs(["a", "b"]).into()];
        table.rows[0].create_cell();

        let mut doc = Document::from_body(Body::with_elements([
            BodyElement::Paragraph(Paragraph::with_runs(["x"])),
            BodyElement::Table(table),
        ]));
        doc.headers.push(Body::with_elements([Paragraph::with_runs(["h"])]));
        doc.footers.push(Body::with_elements([Paragraph::with_runs(["f"])]));
        doc
    }

    #[test]
    fn test_walk_visits_every_body_in_order() {
        let mut counter = RunCounter::default();
        counter.visit_document(&sample());

        assert_eq!(
            counter.bodies,
            vec![BodyKind::Header(0), BodyKind::Footer(0), BodyKind::Main]
        );
        assert_eq!(counter.runs, 5);
        assert_eq!(counter.cells, 2);
    }

    #[test]
    fn test_mutable_walk_reaches_nested_runs() {
        let mut doc = sample();
        Shout.visit_document_mut(&mut doc);

        let table = doc.body.elements[1].as_table().unwrap();
        let paragraph = table.rows[0].cells[0].elements[0].as_paragraph().unwrap();
        assert_eq!(paragraph.text(), "AB");
        assert_eq!(doc.headers[0].elements[0].as_paragraph().unwrap().text(), "H");
    }
}
