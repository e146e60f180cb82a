use crate::error::{DocumentError, DocumentResult};
use crate::tree::{BodyElement, Paragraph, Run, Table, TableCell, TableRow};

/// Copy `src`'s formatting onto `dst`, and its text unless `is_empty`
pub fn clone_run(dst: &mut Run, src: &Run, is_empty: bool) {
    dst.properties.copy_from(&src.properties);

    if is_empty {
        return;
    }

    dst.text.clone_from(&src.text);
}

/// Copy paragraph formatting, then append a copy of every source run
pub fn clone_paragraph(dst: &mut Paragraph, src: &Paragraph, is_empty: bool) {
    dst.properties.copy_from(&src.properties);

    if is_empty {
        return;
    }

    for run in &src.runs {
        let new_run = dst.create_run();
        clone_run(new_run, run, false);
    }
}

/// Copy table formatting and rows
///
/// The first source row lands in `dst`'s existing first row when there is
/// one, so a freshly created table does not end up with a stray default row.
pub fn clone_table(dst: &mut Table, src: &Table, is_empty: bool) {
    dst.properties.copy_from(&src.properties);

    if is_empty {
        return;
    }

    for (i, row) in src.rows.iter().enumerate() {
        let new_row = if i == 0 && !dst.rows.is_empty() {
            &mut dst.rows[0]
        } else {
            dst.create_row()
        };
        clone_table_row(new_row, row, false);
    }
}

/// Copy row formatting and cells, reusing `dst`'s first cell
pub fn clone_table_row(dst: &mut TableRow, src: &TableRow, is_empty: bool) {
    dst.properties.copy_from(&src.properties);

    if is_empty {
        return;
    }

    for (i, cell) in src.cells.iter().enumerate() {
        let new_cell = if i == 0 && !dst.cells.is_empty() {
            &mut dst.cells[0]
        } else {
            dst.create_cell()
        };
        clone_table_cell(new_cell, cell);
    }
}

/// Copy a whole cell
pub fn clone_table_cell(dst: &mut TableCell, src: &TableCell) {
    clone_table_cell_range(dst, src, 0, src.elements.len());
}

/// Copy cell formatting and the block elements `[from, to)` of `src`
///
/// Copies are inserted one after the other in front of `dst`'s default
/// paragraph, which is then removed. An invalid range copies the formatting
/// only.
pub fn clone_table_cell_range(dst: &mut TableCell, src: &TableCell, from: usize, to: usize) {
    dst.properties.copy_from(&src.properties);

    if !(from <= to && to <= src.elements.len()) {
        return;
    }

    let default_paragraph = dst.elements.iter().position(BodyElement::is_paragraph);
    let mut cursor = default_paragraph.unwrap_or(dst.elements.len());

    for element in &src.elements[from..to] {
        dst.elements.insert(cursor, copy_element(element));
        cursor += 1;
    }

    if let Some(index) = default_paragraph {
        dst.elements.remove(index + (to - from));
    }
}

/// Clone a paragraph into a paragraph or a table into a table
pub fn clone_body_element(dst: &mut BodyElement, src: &BodyElement) -> DocumentResult<()> {
    match (dst, src) {
        (BodyElement::Paragraph(dst), BodyElement::Paragraph(src)) => {
            clone_paragraph(dst, src, false);
            Ok(())
        }
        (BodyElement::Table(dst), BodyElement::Table(src)) => {
            clone_table(dst, src, false);
            Ok(())
        }
        (dst, src) => Err(DocumentError::MismatchedElements {
            destination: dst.element_type(),
            origin: src.element_type(),
        }),
    }
}

/// Fresh node of the same type as `src` with all of its content cloned
pub(crate) fn copy_element(src: &BodyElement) -> BodyElement {
    match src {
        BodyElement::Paragraph(paragraph) => {
            let mut copy = Paragraph::new();
            clone_paragraph(&mut copy, paragraph, false);
            BodyElement::Paragraph(copy)
        }
        BodyElement::Table(table) => {
            let mut copy = Table::new();
            clone_table(&mut copy, table, false);
            BodyElement::Table(copy)
        }
    }
}
