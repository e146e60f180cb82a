use super::clone::{clone_paragraph, clone_run, clone_table, clone_table_cell, clone_table_row};
use crate::container::Container;
use crate::tree::{BodyElement, Paragraph, Run, Table, TableCell, TableRow};
use tracing::debug;

/// Insert a copy of `source` at `pos` (`pos == len` appends)
pub fn insert_paragraph<'a, C: Container>(
    container: &'a mut C,
    source: &Paragraph,
    pos: usize,
) -> Option<&'a mut Paragraph> {
    if pos > container.len() {
        debug!(pos, len = container.len(), "Paragraph insert position out of range");
        return None;
    }

    let mut paragraph = Paragraph::new();
    clone_paragraph(&mut paragraph, source, false);
    container
        .elements_mut()
        .insert(pos, BodyElement::Paragraph(paragraph));
    container.element_mut(pos)?.as_paragraph_mut()
}

/// Insert a copy of `source` at `pos` (`pos == len` appends)
pub fn insert_table<'a, C: Container>(
    container: &'a mut C,
    source: &Table,
    pos: usize,
) -> Option<&'a mut Table> {
    if pos > container.len() {
        debug!(pos, len = container.len(), "Table insert position out of range");
        return None;
    }

    let mut table = Table::new();
    clone_table(&mut table, source, false);
    container.elements_mut().insert(pos, BodyElement::Table(table));
    container.element_mut(pos)?.as_table_mut()
}

/// Insert a copy of `source` into `paragraph` at `pos`
pub fn insert_run<'a>(paragraph: &'a mut Paragraph, source: &Run, pos: usize) -> Option<&'a mut Run> {
    let run = paragraph.insert_new_run(pos)?;
    clone_run(run, source, false);
    Some(run)
}

/// Insert a copy of `source` into `table` at `pos`
pub fn insert_table_row<'a>(
    table: &'a mut Table,
    source: &TableRow,
    pos: usize,
) -> Option<&'a mut TableRow> {
    if pos > table.rows.len() {
        return None;
    }

    let mut row = TableRow::new();
    clone_table_row(&mut row, source, false);
    table.rows.insert(pos, row);
    table.rows.get_mut(pos)
}

/// Insert a copy of `source` into `row` at `pos`
pub fn insert_table_cell<'a>(
    row: &'a mut TableRow,
    source: &TableCell,
    pos: usize,
) -> Option<&'a mut TableCell> {
    let cell = add_table_cell(row, pos)?;
    clone_table_cell(cell, source);
    Some(cell)
}

/// Insert a fresh default cell into `row` at `pos`
pub fn add_table_cell(row: &mut TableRow, pos: usize) -> Option<&mut TableCell> {
    if pos > row.cells.len() {
        return None;
    }

    row.cells.insert(pos, TableCell::new());
    row.cells.get_mut(pos)
}

/// Remove the cell at `index`; false when there is no such cell
pub fn remove_table_cell(row: &mut TableRow, index: usize) -> bool {
    if index < row.cells.len() {
        row.cells.remove(index);
        true
    } else {
        false
    }
}

/// Remove the row at `index`; false when there is no such row
pub fn remove_table_row(table: &mut Table, index: usize) -> bool {
    if index < table.rows.len() {
        table.rows.remove(index);
        true
    } else {
        false
    }
}

/// Remove the run at `index`; false when there is no such run
pub fn remove_run(paragraph: &mut Paragraph, index: usize) -> bool {
    if index < paragraph.runs.len() {
        paragraph.runs.remove(index);
        true
    } else {
        false
    }
}

/// Remove a whole paragraph or table, subtree included
pub fn remove_body_element<C: Container>(container: &mut C, index: usize) -> Option<BodyElement> {
    if index < container.len() {
        Some(container.elements_mut().remove(index))
    } else {
        None
    }
}
