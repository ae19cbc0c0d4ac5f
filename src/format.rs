//! Plain-text rendering of result sets.

use std::io::{self, Write};

use serde::Serialize;

use crate::results::ResultSet;

/// How `print_result_to` lays out a result set: one header line of column names, then one line
/// per row, cells joined by `separator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStyle {
    pub separator: String,
    /// Cells shorter than this are right-padded with spaces.
    pub min_width: usize,
    /// Text written for SQL NULL.
    pub null_text: String,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            separator: "\t".to_string(),
            min_width: 0,
            null_text: "null".to_string(),
        }
    }
}

impl TableStyle {
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn with_min_width(mut self, min_width: usize) -> Self {
        self.min_width = min_width;
        self
    }

    #[must_use]
    pub fn with_null_text(mut self, null_text: impl Into<String>) -> Self {
        self.null_text = null_text.into();
        self
    }

    /// Write the header line.
    ///
    /// # Errors
    /// Returns any error from the underlying writer.
    pub fn write_header<W: Write + ?Sized>(&self, out: &mut W, names: &[String]) -> io::Result<()> {
        self.write_cells(out, names.iter().map(String::as_str))
    }

    /// Write one data line.
    ///
    /// # Errors
    /// Returns any error from the underlying writer.
    pub fn write_row<W: Write + ?Sized>(
        &self,
        out: &mut W,
        values: &[Option<String>],
    ) -> io::Result<()> {
        self.write_cells(
            out,
            values
                .iter()
                .map(|v| v.as_deref().unwrap_or(&self.null_text)),
        )
    }

    /// Write the header and every row; returns the number of data lines.
    ///
    /// # Errors
    /// Returns any error from the underlying writer.
    pub fn write_result_set<W: Write + ?Sized>(
        &self,
        out: &mut W,
        result_set: &ResultSet,
    ) -> io::Result<usize> {
        self.write_header(out, result_set.column_names())?;
        for row in result_set {
            self.write_row(out, row.values())?;
        }
        out.flush()?;
        Ok(result_set.len())
    }

    fn write_cells<'a, W: Write + ?Sized>(
        &self,
        out: &mut W,
        cells: impl Iterator<Item = &'a str>,
    ) -> io::Result<()> {
        let width = self.min_width;
        for (idx, cell) in cells.enumerate() {
            if idx > 0 {
                out.write_all(self.separator.as_bytes())?;
            }
            write!(out, "{cell:<width$}")?;
        }
        out.write_all(b"\n")
    }
}

/// A column of a fixed-width report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

impl Column {
    #[must_use]
    pub const fn new(title: &'static str, width: usize) -> Self {
        Self { title, width }
    }
}

/// Fixed-width report layout: every cell left-aligned and padded to its column width,
/// cells separated by `gap`.
#[derive(Debug, Clone, Copy)]
pub struct FixedTable<'a> {
    columns: &'a [Column],
    gap: &'a str,
}

impl<'a> FixedTable<'a> {
    #[must_use]
    pub const fn new(columns: &'a [Column], gap: &'a str) -> Self {
        Self { columns, gap }
    }

    /// # Errors
    /// Returns any error from the underlying writer.
    pub fn write_header<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.write_line(out, self.columns.iter().map(|c| c.title))
    }

    /// Write one row; missing trailing values and NULLs print as `null`.
    ///
    /// # Errors
    /// Returns any error from the underlying writer.
    pub fn write_row<W: Write + ?Sized>(
        &self,
        out: &mut W,
        values: &[Option<String>],
    ) -> io::Result<()> {
        self.write_line(
            out,
            (0..self.columns.len())
                .map(|i| values.get(i).and_then(Option::as_deref).unwrap_or("null")),
        )
    }

    /// Header plus every row of `result_set`; returns the row count.
    ///
    /// # Errors
    /// Returns any error from the underlying writer.
    pub fn write_result_set<W: Write + ?Sized>(
        &self,
        out: &mut W,
        result_set: &ResultSet,
    ) -> io::Result<usize> {
        self.write_header(out)?;
        for row in result_set {
            self.write_row(out, row.values())?;
        }
        Ok(result_set.len())
    }

    fn write_line<'v, W: Write + ?Sized>(
        &self,
        out: &mut W,
        cells: impl Iterator<Item = &'v str>,
    ) -> io::Result<()> {
        for (idx, (column, cell)) in self.columns.iter().zip(cells).enumerate() {
            if idx > 0 {
                out.write_all(self.gap.as_bytes())?;
            }
            write!(out, "{cell:<width$}", width = column.width)?;
        }
        out.write_all(b"\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        let mut rs = ResultSet::new(vec!["PlaneID".into(), "Make".into()]);
        rs.add_row_values(vec![Some("P1".into()), Some("Boeing".into())])
            .unwrap();
        rs.add_row_values(vec![Some("P2".into()), None]).unwrap();
        rs
    }

    #[test]
    fn default_style_is_tab_separated_with_null_marker() {
        let mut out = Vec::new();
        let n = TableStyle::default()
            .write_result_set(&mut out, &sample())
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "PlaneID\tMake\nP1\tBoeing\nP2\tnull\n"
        );
    }

    #[test]
    fn header_is_written_for_empty_results() {
        let mut out = Vec::new();
        let rs = ResultSet::new(vec!["RepairDate".into(), "RepairCode".into()]);
        let n = TableStyle::default().write_result_set(&mut out, &rs).unwrap();
        assert_eq!(n, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "RepairDate\tRepairCode\n");
    }

    #[test]
    fn min_width_pads_cells() {
        let style = TableStyle::default()
            .with_separator("|")
            .with_min_width(4)
            .with_null_text("-");
        let mut out = Vec::new();
        style.write_row(&mut out, &[Some("a".into()), None]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a   |-   \n");
    }

    #[test]
    fn fixed_table_pads_every_column() {
        const COLUMNS: &[Column] = &[Column::new("PlaneID", 10), Column::new("Make", 8)];
        let table = FixedTable::new(COLUMNS, " ");
        let mut out = Vec::new();
        let n = table.write_result_set(&mut out, &sample()).unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "PlaneID    Make    \nP1         Boeing  \nP2         null    \n"
        );
    }
}
