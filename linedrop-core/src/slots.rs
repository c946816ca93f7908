use serde::{Deserialize, Serialize};

use crate::dispatch::Dispatch;
use crate::error::{LinedropError, Result};
use crate::text::sanitize_single_line;

/// One column of the repeating row structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column header
    pub name: String,

    /// Cells of this column carry the slot marker and receive dispatched lines
    #[serde(default = "default_slot")]
    pub slot: bool,
}

fn default_slot() -> bool {
    true
}

impl ColumnSpec {
    pub fn slot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: true,
        }
    }

    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: false,
        }
    }
}

/// Repeating rows of single-line cells.
///
/// The slot row used by dispatch is the row-major sequence of marked cells;
/// unmarked cells are kept for manual entry but never receive a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTable {
    columns: Vec<ColumnSpec>,
    cells: Vec<Vec<String>>,
}

impl SlotTable {
    /// Create an empty table. Fails when there are no rows or no slot column.
    pub fn new(rows: usize, columns: Vec<ColumnSpec>) -> Result<Self> {
        if rows == 0 {
            return Err(LinedropError::invalid_layout("table needs at least one row"));
        }
        if !columns.iter().any(|c| c.slot) {
            return Err(LinedropError::invalid_layout(
                "no column is marked as a slot",
            ));
        }

        let cells = vec![vec![String::new(); columns.len()]; rows];
        Ok(Self { columns, cells })
    }

    /// Single-column table holding the given slot values in order
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells: Vec<Vec<String>> = values
            .into_iter()
            .map(|v| vec![sanitize_single_line(v.as_ref())])
            .collect();

        Self {
            columns: vec![ColumnSpec::slot("value")],
            cells,
        }
    }

    /// Single-column table from a JSON array of strings
    pub fn from_json(json: &str) -> Result<Self> {
        let values: Vec<String> = serde_json::from_str(json)
            .map_err(|err| LinedropError::json("slot values must be a JSON array of strings", err))?;
        Ok(Self::from_values(values))
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of slot cells (marked cells across all rows)
    pub fn slot_count(&self) -> usize {
        self.row_count() * self.columns.iter().filter(|c| c.slot).count()
    }

    /// Slot values in document order
    pub fn slot_values(&self) -> Vec<String> {
        self.slot_positions()
            .into_iter()
            .map(|(row, col)| self.cells[row][col].clone())
            .collect()
    }

    /// Number of slots that already hold a value
    pub fn filled_count(&self) -> usize {
        self.slot_positions()
            .into_iter()
            .filter(|&(row, col)| !self.cells[row][col].is_empty())
            .count()
    }

    /// Index (in slot order) of the first slot whose value is empty
    pub fn first_empty(&self) -> Option<usize> {
        self.slot_positions()
            .into_iter()
            .position(|(row, col)| self.cells[row][col].is_empty())
    }

    /// Write `value` into the slot at `index`. Out-of-range indices are ignored.
    pub fn fill(&mut self, index: usize, value: &str) {
        if let Some(&(row, col)) = self.slot_positions().get(index) {
            self.cells[row][col] = sanitize_single_line(value);
        }
    }

    /// Apply the slot half of a dispatch result
    pub fn apply(&mut self, dispatch: &Dispatch) {
        if let (Some(index), Some(line)) = (dispatch.updated_slot_index, dispatch.line.as_deref()) {
            self.fill(index, line);
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = sanitize_single_line(value);
        }
    }

    /// Row-major iterator over cell values
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Empty every cell, slot or not
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                cell.clear();
            }
        }
    }

    /// Empty only the slot cells
    pub fn clear_slots(&mut self) {
        for (row, col) in self.slot_positions() {
            self.cells[row][col].clear();
        }
    }

    /// (row, column) of every slot cell in document order
    fn slot_positions(&self) -> Vec<(usize, usize)> {
        let marked: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.slot)
            .map(|(idx, _)| idx)
            .collect();

        (0..self.cells.len())
            .flat_map(|row| marked.iter().map(move |&col| (row, col)))
            .collect()
    }
}

/// Index of the first empty value, scanning in order
pub fn first_empty(values: &[String]) -> Option<usize> {
    values.iter().position(String::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::plain("id"),
            ColumnSpec::slot("name"),
            ColumnSpec::slot("email"),
        ]
    }

    #[test]
    fn test_from_json() {
        let table = SlotTable::from_json(r#"["a", "", "c\nd"]"#).unwrap();
        assert_eq!(table.slot_values(), vec!["a", "", "cd"]);
        assert_eq!(table.first_empty(), Some(1));

        let err = SlotTable::from_json("{}").unwrap_err();
        assert!(matches!(err, LinedropError::Json { .. }));
    }

    #[test]
    fn test_new_rejects_bad_layouts() {
        assert!(SlotTable::new(0, layout()).is_err());
        assert!(SlotTable::new(3, vec![ColumnSpec::plain("id")]).is_err());
    }

    #[test]
    fn test_slot_order_is_row_major_over_marked_columns() {
        let mut table = SlotTable::new(2, layout()).unwrap();
        table.set_cell(0, 0, "1");
        table.set_cell(0, 1, "ann");
        table.set_cell(1, 2, "bob@example.com");

        assert_eq!(table.slot_count(), 4);
        assert_eq!(
            table.slot_values(),
            vec!["ann", "", "", "bob@example.com"]
        );
        assert_eq!(table.first_empty(), Some(1));
        assert_eq!(table.filled_count(), 2);
    }

    #[test]
    fn test_fill_targets_slot_index_not_cell() {
        let mut table = SlotTable::new(2, layout()).unwrap();
        table.fill(2, "carol");

        assert_eq!(table.cell(1, 1), Some("carol"));
        assert_eq!(table.cell(1, 0), Some(""));
    }

    #[test]
    fn test_fill_out_of_range_is_ignored() {
        let mut table = SlotTable::from_values(["a", ""]);
        table.fill(5, "x");
        assert_eq!(table.slot_values(), vec!["a", ""]);
    }

    #[test]
    fn test_values_are_single_line() {
        let mut table = SlotTable::from_values([""]);
        table.fill(0, "one\ntwo");
        assert_eq!(table.slot_values(), vec!["onetwo"]);
    }

    #[test]
    fn test_clear_slots_keeps_plain_cells() {
        let mut table = SlotTable::new(1, layout()).unwrap();
        table.set_cell(0, 0, "42");
        table.set_cell(0, 1, "ann");
        table.clear_slots();

        assert_eq!(table.cell(0, 0), Some("42"));
        assert_eq!(table.cell(0, 1), Some(""));

        table.clear();
        assert_eq!(table.cell(0, 0), Some(""));
    }

    #[test]
    fn test_first_empty_free_fn() {
        let values = vec!["a".to_string(), String::new(), String::new()];
        assert_eq!(first_empty(&values), Some(1));
        assert_eq!(first_empty(&["x".to_string()]), None);
        assert_eq!(first_empty(&[]), None);
    }
}
