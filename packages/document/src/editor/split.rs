use super::clone::{clone_paragraph, clone_run, clone_table, clone_table_cell_range, clone_table_row};
use crate::container::Container;
use crate::tree::{BodyElement, Paragraph, Run, Table, TableCell, TableRow};
use tracing::trace;

/// Split the run at `run_index` at byte offset `pos` of its text
///
/// A new run holding `text[..pos]` with the same formatting is inserted
/// before the original, which keeps `text[pos..]` and its id. No-op unless
/// `0 < pos < len` and `pos` is a char boundary.
pub fn split_run(paragraph: &mut Paragraph, run_index: usize, pos: usize) -> bool {
    let Some(run) = paragraph.runs.get(run_index) else {
        return false;
    };
    if !(pos > 0 && pos < run.len()) || !run.text.is_char_boundary(pos) {
        return false;
    }

    let mut before = Run::new();
    clone_run(&mut before, run, true);
    before.text = run.text[..pos].to_string();

    let after = &mut paragraph.runs[run_index];
    after.text.replace_range(..pos, "");

    trace!(run_index, pos, "Split run");
    paragraph.runs.insert(run_index, before);
    true
}

/// Split the paragraph at `index` before its run `pos`
///
/// The paragraph is cloned in front of itself; the copy keeps runs
/// `[0, pos)` and the original keeps `[pos, len)`. No-op unless
/// `0 < pos < run_count`.
pub fn split_paragraph<C: Container>(container: &mut C, index: usize, pos: usize) -> bool {
    let Some(BodyElement::Paragraph(paragraph)) = container.element(index) else {
        return false;
    };
    if !(pos > 0 && pos < paragraph.run_count()) {
        return false;
    }

    let mut before = Paragraph::new();
    clone_paragraph(&mut before, paragraph, false);
    before.runs.truncate(pos);

    if let Some(BodyElement::Paragraph(paragraph)) = container.element_mut(index) {
        paragraph.runs.drain(..pos);
    }

    trace!(index, pos, "Split paragraph");
    container
        .elements_mut()
        .insert(index, BodyElement::Paragraph(before));
    true
}

/// Split the table at `index` before its row `pos`
pub fn split_table<C: Container>(container: &mut C, index: usize, pos: usize) -> bool {
    let Some(BodyElement::Table(table)) = container.element(index) else {
        return false;
    };
    if !(pos > 0 && pos < table.row_count()) {
        return false;
    }

    let mut before = Table::new();
    clone_table(&mut before, table, false);
    before.rows.truncate(pos);

    if let Some(BodyElement::Table(table)) = container.element_mut(index) {
        table.rows.drain(..pos);
    }

    trace!(index, pos, "Split table");
    container.elements_mut().insert(index, BodyElement::Table(before));
    true
}

/// Split the row at `index` before its cell `pos`
pub fn split_table_row(table: &mut Table, index: usize, pos: usize) -> bool {
    let Some(row) = table.rows.get(index) else {
        return false;
    };
    if !(pos > 0 && pos < row.cell_count()) {
        return false;
    }

    let mut before = TableRow::new();
    clone_table_row(&mut before, row, false);
    before.cells.truncate(pos);

    table.rows[index].cells.drain(..pos);

    trace!(index, pos, "Split table row");
    table.rows.insert(index, before);
    true
}

/// Split the cell at `index` before its block element `pos`
///
/// A cell's place in its row is structural, so this builds two new cells,
/// one with elements `[0, pos)` and one with `[pos, len)`, and replaces the
/// original with them. The row gains one cell.
pub fn split_table_cell(row: &mut TableRow, index: usize, pos: usize) -> bool {
    let Some(cell) = row.cells.get(index) else {
        return false;
    };
    let len = cell.elements.len();
    if !(pos > 0 && pos < len) {
        return false;
    }

    let mut first = TableCell::new();
    clone_table_cell_range(&mut first, cell, 0, pos);
    let mut second = TableCell::new();
    clone_table_cell_range(&mut second, cell, pos, len);

    trace!(index, pos, "Split table cell");
    row.cells.splice(index..=index, [first, second]);
    true
}
