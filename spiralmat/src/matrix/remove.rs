// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use log::debug;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::index::flat_index;
use crate::matrix::SparseMatrix;

impl SparseMatrix {
    /// Removes the cell at `(row, col)` and links its neighbors around it.
    ///
    /// Predecessors are located with [`SparseMatrix::prev_row`] and
    /// [`SparseMatrix::prev_column`], so unless the cell heads its lists, both
    /// lists must be sorted first. Returns the removed payload, or `None` if
    /// the cell was not occupied.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvariantViolation`] if either predecessor walk
    /// ends on a cell that does not link to `(row, col)`. Nothing is modified
    /// in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use spiralmat::SparseMatrix;
    ///
    /// let mut matrix = SparseMatrix::new();
    /// for col in [4, 1, 9] {
    ///     matrix.insert(2, col, 1);
    /// }
    /// matrix.sort_columns_for_row(2).unwrap();
    /// assert_eq!(matrix.remove(2, 4).unwrap(), Some(1));
    /// assert_eq!(matrix.columns_for_row(2), vec![1, 9]);
    /// ```
    pub fn remove(&mut self, row: u32, col: u32) -> Result<Option<u8>, Error> {
        let Some(cell) = self.get_cell(row, col) else {
            return Ok(None);
        };
        let prev_row = self.prev_row(row, col);
        let prev_column = self.prev_column(row, col);

        let row_link = match prev_row {
            Some(prev) => self.next_row(prev, col),
            None => self.head_row(col),
        };
        if row_link != Some(row) {
            return Err(unlinked(row, col, "column list is not in ascending order")
                .with_context("prev_row", format!("{prev_row:?}")));
        }
        let column_link = match prev_column {
            Some(prev) => self.next_column(row, prev),
            None => self.head_column(row),
        };
        if column_link != Some(col) {
            return Err(unlinked(row, col, "row list is not in ascending order")
                .with_context("prev_column", format!("{prev_column:?}")));
        }

        match (prev_row, cell.next_row()) {
            (None, None) => {
                self.column_heads.remove(col);
            }
            (None, Some(next)) => {
                self.column_heads.insert(col, next);
            }
            (Some(prev), next) => self.cell(prev, col)?.set_next_row(next),
        }
        match (prev_column, cell.next_column()) {
            (None, None) => {
                self.row_heads.remove(row);
            }
            (None, Some(next)) => {
                self.row_heads.insert(row, next);
            }
            (Some(prev), next) => self.cell(row, prev)?.set_next_column(next),
        }
        self.cells.remove(flat_index(row, col));
        Ok(Some(cell.payload()))
    }

    /// Removes every cell in the list of `row` together with the list head.
    ///
    /// Returns the number of cells removed. Runs in time proportional to the
    /// length of the row.
    ///
    /// Column lists are not repaired. A column that ran through a removed cell
    /// still links to it:
    ///
    /// * walking that column yields `row` and stops there, so rows behind it
    ///   become unreachable;
    /// * [`SparseMatrix::columns`] keeps reporting the column even if all of
    ///   its cells are gone;
    /// * inserting `(row, col)` again turns the stale link into a cycle. The
    ///   new cell heads the column and links to the old head, which still
    ///   leads back to `row`, so a walk repeats ids until its length bound and
    ///   sorting the column fails with [`ErrorKind::InvariantViolation`].
    ///
    /// Tear down the affected columns as well before walking or refilling them.
    pub fn remove_row(&mut self, row: u32) -> usize {
        let columns = self.columns_for_row(row);
        let mut removed = 0;
        for col in columns {
            if self.cells.remove(flat_index(row, col)).is_some() {
                removed += 1;
            }
        }
        self.row_heads.remove(row);
        debug!("removed row {} with {} cells", row, removed);
        removed
    }

    /// Removes every cell in the list of `col` together with the list head.
    ///
    /// The mirror image of [`SparseMatrix::remove_row`]. Row lists that ran
    /// through removed cells keep the dangling link, and re-inserting one of
    /// those cells makes the row list cycle.
    pub fn remove_column(&mut self, col: u32) -> usize {
        let rows = self.rows_for_column(col);
        let mut removed = 0;
        for row in rows {
            if self.cells.remove(flat_index(row, col)).is_some() {
                removed += 1;
            }
        }
        self.column_heads.remove(col);
        debug!("removed column {} with {} cells", col, removed);
        removed
    }
}

fn unlinked(row: u32, col: u32, message: &str) -> Error {
    Error::new(ErrorKind::InvariantViolation, message)
        .with_context("row", row)
        .with_context("col", col)
}
