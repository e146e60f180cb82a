//! Document tree nodes

use crate::container::{self, Container};
use crate::ids::RunId;
use crate::index::{self, IdRenewer, RunIndex};
use crate::properties::Properties;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimal unit of formatted text
///
/// `Clone` keeps the run's [`RunId`], which is what copying a whole document
/// wants. Use [`crate::editor::clone_run`] to copy a run into a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    #[serde(skip, default = "RunId::next")]
    id: RunId,

    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,

    #[serde(default)]
    pub text: String,
}

impl Run {
    pub fn new() -> Self {
        Self {
            id: RunId::next(),
            properties: Properties::new(),
            text: String::new(),
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new()
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub(crate) fn renew_id(&mut self) {
        self.id = RunId::next();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Length of the text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered sequence of runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,

    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph with one unformatted run per text
    pub fn with_runs<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: Properties::new(),
            runs: texts.into_iter().map(Run::with_text).collect(),
        }
    }

    /// Visible text: every run's text, in order
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn run(&self, index: usize) -> Option<&Run> {
        self.runs.get(index)
    }

    pub fn run_mut(&mut self, index: usize) -> Option<&mut Run> {
        self.runs.get_mut(index)
    }

    pub fn position_of(&self, id: RunId) -> Option<usize> {
        self.runs.iter().position(|run| run.id() == id)
    }

    /// Append a fresh empty run
    pub fn create_run(&mut self) -> &mut Run {
        self.runs.push(Run::new());
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    /// Insert a fresh empty run at `pos` (`pos == run_count()` appends)
    pub fn insert_new_run(&mut self, pos: usize) -> Option<&mut Run> {
        if pos > self.runs.len() {
            return None;
        }
        self.runs.insert(pos, Run::new());
        self.runs.get_mut(pos)
    }
}

/// Ordered sequence of rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,

    #[serde(default)]
    pub rows: Vec<TableRow>,
}

impl Table {
    /// A table with one default row
    pub fn new() -> Self {
        Self {
            properties: Properties::new(),
            rows: vec![TableRow::new()],
        }
    }

    /// A table without any rows
    pub fn empty() -> Self {
        Self {
            properties: Properties::new(),
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut TableRow> {
        self.rows.get_mut(index)
    }

    /// Append a fresh default row
    pub fn create_row(&mut self) -> &mut TableRow {
        self.rows.push(TableRow::new());
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered sequence of cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,

    #[serde(default)]
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// A row with one default cell
    pub fn new() -> Self {
        Self {
            properties: Properties::new(),
            cells: vec![TableCell::new()],
        }
    }

    /// A row without any cells
    pub fn empty() -> Self {
        Self {
            properties: Properties::new(),
            cells: Vec::new(),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, index: usize) -> Option<&TableCell> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut TableCell> {
        self.cells.get_mut(index)
    }

    /// Append a fresh default cell
    pub fn create_cell(&mut self) -> &mut TableCell {
        self.cells.push(TableCell::new());
        let last = self.cells.len() - 1;
        &mut self.cells[last]
    }
}

impl Default for TableRow {
    fn default() -> Self {
        Self::new()
    }
}

/// A cell is itself a body: tables nest through cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,

    #[serde(default)]
    pub elements: Vec<BodyElement>,
}

impl TableCell {
    /// A cell holding one empty default paragraph
    pub fn new() -> Self {
        Self {
            properties: Properties::new(),
            elements: vec![BodyElement::Paragraph(Paragraph::new())],
        }
    }

    /// A cell without any block elements
    pub fn empty() -> Self {
        Self {
            properties: Properties::new(),
            elements: Vec::new(),
        }
    }
}

impl Default for TableCell {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for TableCell {
    fn elements(&self) -> &[BodyElement] {
        &self.elements
    }

    fn elements_mut(&mut self) -> &mut Vec<BodyElement> {
        &mut self.elements
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Paragraph,
    Table,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Paragraph => write!(f, "paragraph"),
            ElementType::Table => write!(f, "table"),
        }
    }
}

/// Block-level child of a body or a cell
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BodyElement {
    Paragraph(Paragraph),
    Table(Table),
}

impl BodyElement {
    pub fn element_type(&self) -> ElementType {
        match self {
            BodyElement::Paragraph(_) => ElementType::Paragraph,
            BodyElement::Table(_) => ElementType::Table,
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, BodyElement::Paragraph(_))
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            BodyElement::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            BodyElement::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            BodyElement::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            BodyElement::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl From<Paragraph> for BodyElement {
    fn from(paragraph: Paragraph) -> Self {
        BodyElement::Paragraph(paragraph)
    }
}

impl From<Table> for BodyElement {
    fn from(table: Table) -> Self {
        BodyElement::Table(table)
    }
}

/// Main body, a header or a footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub elements: Vec<BodyElement>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<BodyElement>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }
}

impl Container for Body {
    fn elements(&self) -> &[BodyElement] {
        &self.elements
    }

    fn elements_mut(&mut self) -> &mut Vec<BodyElement> {
        &mut self.elements
    }
}

/// Which body of the document a walk is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Header(usize),
    Footer(usize),
    Main,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyKind::Header(index) => write!(f, "header[{}]", index),
            BodyKind::Footer(index) => write!(f, "footer[{}]", index),
            BodyKind::Main => write!(f, "body"),
        }
    }
}

/// A whole document: the main body plus its headers and footers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Body>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub footers: Vec<Body>,

    #[serde(default)]
    pub body: Body,

    #[serde(skip)]
    run_index: RunIndex,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_body(body: Body) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }

    /// Every body in traversal order: headers, footers, then the main body
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKind, &Body)> {
        let headers = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyKind::Header(i), body));
        let footers = self
            .footers
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyKind::Footer(i), body));
        headers
            .chain(footers)
            .chain(std::iter::once((BodyKind::Main, &self.body)))
    }

    /// Mutable form of [`Document::bodies`]
    pub fn bodies_mut(&mut self) -> impl Iterator<Item = (BodyKind, &mut Body)> {
        let headers = self
            .headers
            .iter_mut()
            .enumerate()
            .map(|(i, body)| (BodyKind::Header(i), body));
        let footers = self
            .footers
            .iter_mut()
            .enumerate()
            .map(|(i, body)| (BodyKind::Footer(i), body));
        headers
            .chain(footers)
            .chain(std::iter::once((BodyKind::Main, &mut self.body)))
    }

    /// First run with `id` in traversal order
    pub fn find_run(&self, id: RunId) -> Option<&Run> {
        if let Some(run) = self
            .run_index
            .get(id)
            .and_then(|path| index::resolve(self, path))
            .filter(|run| run.id() == id)
        {
            return Some(run);
        }
        self.bodies()
            .find_map(|(_, body)| container::find_run(body.elements(), id))
    }

    /// Mutable form of [`Document::find_run`]
    ///
    /// Positions are cached between calls, so applying many instructions
    /// costs one walk of the tree rather than one per lookup. A cached
    /// position that no longer holds the run triggers a rebuild.
    pub fn find_run_mut(&mut self, id: RunId) -> Option<&mut Run> {
        let cached = self
            .run_index
            .get(id)
            .and_then(|path| index::resolve(self, path))
            .is_some_and(|run| run.id() == id);
        if !cached {
            self.run_index = RunIndex::build(self);
        }

        let path = self.run_index.get(id)?.clone();
        index::resolve_mut(self, &path)
    }

    /// Give a new id to every run whose id already appeared earlier in
    /// traversal order, returning how many were renewed
    ///
    /// `Clone` keeps run ids, so a paragraph copied within a document shares
    /// them with its source until this runs.
    pub fn renew_duplicate_run_ids(&mut self) -> usize {
        let renewed = IdRenewer::renew(self);
        if renewed > 0 {
            self.run_index = RunIndex::default();
        }
        renewed
    }
}
