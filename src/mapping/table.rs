use indexmap::IndexMap;

/// A single flat row, column name to cell value. `None` is an empty (null) cell.
pub type Row = IndexMap<String, Option<String>>;

/// `Table` is an ordered set of columns plus the rows holding them. Every row carries every column
/// in column order, cells a source row did not have are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a `Table` from `rows`. The columns are the union of all row keys in the order they
    /// are first seen; row order is kept as is.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = vec![];

        for row in &rows {
            for key in row.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut table = Self {
            columns,
            rows,
        };

        table.normalize_rows();

        table
    }

    /// Returns the column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns every cell of the column `name`, top to bottom, or `None` if there is no such
    /// column.
    #[must_use]
    pub fn column(
        &self,
        name: &str,
    ) -> Option<Vec<Option<&str>>> {
        if !self.columns.iter().any(|c| c == name) {
            return None;
        }

        Some(
            self.rows
                .iter()
                .map(|row| row.get(name).and_then(Option::as_deref))
                .collect(),
        )
    }

    /// Reorders the columns: columns named in `order` that exist move to the front in that order,
    /// all remaining columns follow in their current relative order. Names in `order` that are not
    /// columns of the table are skipped.
    pub fn reorder(
        &mut self,
        order: &[String],
    ) {
        if order.is_empty() {
            return;
        }

        let mut columns: Vec<String> = vec![];

        for name in order {
            if self.columns.contains(name) && !columns.contains(name) {
                columns.push(name.clone());
            }
        }

        for name in &self.columns {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }

        self.columns = columns;

        self.normalize_rows();
    }

    /// Moves the column `name` (if present) to the first position.
    pub fn move_to_front(
        &mut self,
        name: &str,
    ) {
        self.reorder(&[name.to_owned()]);
    }

    fn normalize_rows(&mut self) {
        for row in &mut self.rows {
            let mut normalized = Row::with_capacity(self.columns.len());

            for name in &self.columns {
                let cell = row.swap_remove(name).flatten();

                normalized.insert(name.clone(), cell);
            }

            *row = normalized;
        }
    }
}
