//! Rebuilding the logical grid of a table.
//!
//! HTML tables merge cells with `colspan` and `rowspan`; a CSV file cannot.
//! [`Rows`] walks a table's `<tr>` elements in order and resolves every merge
//! so that each yielded row holds one value per column:
//!
//! 1. a cell with `colspan = N` is repeated N times in its own row;
//! 2. the first row fixes the column count;
//! 3. a cell with `rowspan = N` is remembered per column and spliced into
//!    the next N-1 rows that come up short;
//! 4. cells are reduced to text with [`clean_cell`] and missing trailing
//!    cells are padded with empty strings.
//!
//! A row that is still wider than the column count after all of this cannot
//! be placed and fails the table with [`WikitableError::InconsistentRow`].

use std::iter::FusedIterator;

use crate::locate::HtmlTable;
use crate::parse::Element;
use crate::text::clean_cell;
use crate::{Result, WikitableError};

/// Largest `colspan` honoured, as in the HTML standard.
const MAX_COLSPAN: usize = 1000;

/// Largest `rowspan` honoured, as in the HTML standard.
const MAX_ROWSPAN: usize = 65534;

/// One reconstructed table row: a text value per column.
pub type LogicalRow = Vec<String>;

/// A cell placed in a row, either from the row's own markup or carried down
/// from a `rowspan` above.
#[derive(Clone, Copy)]
struct Cell<'a> {
    element: Element<'a>,
    carried: bool,
}

/// A `rowspan` cell waiting to be spliced into later rows.
#[derive(Clone, Copy)]
struct Pending<'a> {
    rows_left: usize,
    element: Element<'a>,
}

/// Lazy iterator over the logical rows of one table.
///
/// Created by [`HtmlTable::rows`]. All span state lives in the iterator, so
/// calling `rows` again starts a fresh, identical pass. After an error the
/// iterator is exhausted.
pub struct Rows<'t, 'a> {
    rows: std::vec::IntoIter<Element<'a>>,
    line_break: &'t str,
    pending: Vec<Option<Pending<'a>>>,
    width: Option<usize>,
    row_number: usize,
    failed: bool,
}

impl<'a> HtmlTable<'a> {
    /// Returns a lazy iterator over the table's logical rows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wikitable_core::TableScraper;
    ///
    /// let html = r#"<table>
    ///     <tr><th>A</th><th>B</th></tr>
    ///     <tr><td colspan="2">both</td></tr>
    /// </table>"#;
    /// let scraper = TableScraper::parse(html).unwrap();
    /// let table = &scraper.tables()[0];
    ///
    /// let rows: Vec<_> = table.rows().collect::<Result<_, _>>().unwrap();
    /// assert_eq!(rows, vec![vec!["A", "B"], vec!["both", "both"]]);
    /// ```
    pub fn rows(&self) -> Rows<'_, 'a> {
        Rows {
            rows: table_rows(&self.element()).into_iter(),
            line_break: self.line_break(),
            pending: Vec::new(),
            width: None,
            row_number: 0,
            failed: false,
        }
    }

    /// Rebuilds the whole table, failing if any row cannot be placed.
    pub fn to_rows(&self) -> Result<Vec<LogicalRow>> {
        self.rows().collect()
    }
}

/// The `<tr>` rows owned by `table`, in document order.
///
/// Rows are direct children of the table or of its `thead`, `tbody` and
/// `tfoot` sections. Rows of tables nested inside cells belong to those tables.
pub(crate) fn table_rows<'a>(table: &Element<'a>) -> Vec<Element<'a>> {
    table
        .child_elements()
        .flat_map(|child| match child.tag_name().as_str() {
            "tr" => vec![child],
            "thead" | "tbody" | "tfoot" => child.child_elements().filter(|row| row.tag_name() == "tr").collect(),
            _ => Vec::new(),
        })
        .collect()
}

impl<'a> Rows<'_, 'a> {
    /// The column count, once the first row has been read.
    pub fn width(&self) -> Option<usize> {
        self.width
    }

    fn resolve(&mut self, row: Element<'a>) -> Result<Option<LogicalRow>> {
        let mut cells: Vec<Cell<'a>> = row
            .child_elements()
            .filter(|element| matches!(element.tag_name().as_str(), "th" | "td"))
            .map(|element| Cell { element, carried: false })
            .collect();

        if cells.is_empty() {
            return Ok(None);
        }

        expand_colspans(&mut cells);

        let width = match self.width {
            Some(width) => {
                if cells.len() != width {
                    self.merge_rowspans(&mut cells);
                }
                width
            }
            None => {
                self.pending = vec![None; cells.len()];
                self.width = Some(cells.len());
                cells.len()
            }
        };

        if cells.len() > width {
            return Err(WikitableError::InconsistentRow { row: self.row_number, expected: width, found: cells.len() });
        }

        self.capture_rowspans(&cells);

        let mut values: LogicalRow = cells
            .iter()
            .map(|cell| clean_cell(&cell.element, self.line_break))
            .collect();
        values.resize(width, String::new());

        Ok(Some(values))
    }

    /// Splices carried cells into a short row, left to right.
    fn merge_rowspans(&mut self, cells: &mut Vec<Cell<'a>>) {
        for (column, slot) in self.pending.iter_mut().enumerate() {
            let Some(pending) = slot else { continue };

            let at = column.min(cells.len());
            cells.insert(at, Cell { element: pending.element, carried: true });

            pending.rows_left -= 1;
            if pending.rows_left == 0 {
                *slot = None;
            }
        }
    }

    fn capture_rowspans(&mut self, cells: &[Cell<'a>]) {
        for (column, cell) in cells.iter().enumerate() {
            if cell.carried {
                continue;
            }
            if let Some(span) = span_attr(&cell.element, "rowspan", MAX_ROWSPAN) {
                self.pending[column] = Some(Pending { rows_left: span - 1, element: cell.element });
            }
        }
    }
}

impl Iterator for Rows<'_, '_> {
    type Item = Result<LogicalRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let row = self.rows.next()?;
            self.row_number += 1;
            match self.resolve(row) {
                Ok(Some(values)) => return Some(Ok(values)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl FusedIterator for Rows<'_, '_> {}

/// Repeats every `colspan` cell in place, scanning right to left so that
/// earlier indices stay valid while inserting.
fn expand_colspans(cells: &mut Vec<Cell<'_>>) {
    for index in (0..cells.len()).rev() {
        let cell = cells[index];
        if let Some(span) = span_attr(&cell.element, "colspan", MAX_COLSPAN) {
            cells.splice(index + 1..index + 1, std::iter::repeat_n(cell, span - 1));
        }
    }
}

/// Parses a span attribute; absent, non-numeric, zero and one all mean "no span".
fn span_attr(element: &Element<'_>, name: &str, limit: usize) -> Option<usize> {
    element
        .attr(name)?
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|span| *span > 1)
        .map(|span| span.min(limit))
}
