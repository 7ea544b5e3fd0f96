/// A dense, column-named table of `f64` values.
///
/// Rows are stored row-major; every row has exactly `columns.len()` values.
/// This is the shape shared by the scaler, the normalizer and the dataset
/// inspection command.
///
/// # Examples
///
/// ```
/// use tyredeg_stats::table::NumericTable;
///
/// let table = NumericTable::new(
///     vec!["a".to_owned(), "b".to_owned()],
///     vec![vec![1.0, 2.0], vec![3.0, 4.0]],
/// )
/// .unwrap();
/// assert_eq!(table.column("b").unwrap().collect::<Vec<_>>(), vec![2.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("duplicate column name '{name}'")]
    DuplicateColumn { name: String },
}

impl NumericTable {
    /// Builds a table, checking that every row matches the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, TableError> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(TableError::DuplicateColumn { name: name.clone() });
            }
        }
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != columns.len())
        {
            return Err(TableError::RowWidth {
                row,
                expected: columns.len(),
                found: values.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterates over the values of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = f64> + '_> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[index]))
    }

    /// Iterates over the values of the column at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn column_at(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(index < self.columns.len(), "column index out of bounds");
        self.rows.iter().map(move |row| row[index])
    }

    /// Splits the table into `(rest, selected)` by column name.
    ///
    /// Both halves keep the original column order. Names that do not exist
    /// in the table are returned as `Err`.
    pub fn split_columns(&self, selected: &[&str]) -> Result<(Self, Self), String> {
        if let Some(missing) = selected.iter().find(|name| self.column_index(name).is_none()) {
            return Err((*missing).to_owned());
        }
        let is_selected = |name: &String| selected.contains(&name.as_str());

        let (selected_idx, rest_idx): (Vec<usize>, Vec<usize>) =
            (0..self.columns.len()).partition(|&i| is_selected(&self.columns[i]));
        let project = |indices: &[usize]| Self {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i]).collect())
                .collect(),
        };
        Ok((project(&rest_idx), project(&selected_idx)))
    }

    /// Same columns, new rows of identical shape.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == self.columns.len()));
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<f64>>) {
        (self.columns, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = NumericTable::new(names(&["a", "b"]), vec![vec![1.0, 2.0], vec![3.0]])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::RowWidth {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_duplicate_columns() {
        let err = NumericTable::new(names(&["a", "a"]), vec![]).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { name } if name == "a"));
    }

    #[test]
    fn test_split_columns_preserves_order() {
        let table = NumericTable::new(
            names(&["x1", "y1", "x2", "y2"]),
            vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]],
        )
        .unwrap();
        let (rest, selected) = table.split_columns(&["y2", "y1"]).unwrap();
        assert_eq!(rest.columns(), names(&["x1", "x2"]));
        assert_eq!(selected.columns(), names(&["y1", "y2"]));
        assert_eq!(rest.rows(), &[vec![1.0, 3.0], vec![5.0, 7.0]]);
        assert_eq!(selected.rows(), &[vec![2.0, 4.0], vec![6.0, 8.0]]);
    }

    #[test]
    fn test_split_columns_unknown_name() {
        let table = NumericTable::new(names(&["a"]), vec![vec![1.0]]).unwrap();
        assert_eq!(table.split_columns(&["b"]).unwrap_err(), "b");
    }
}
