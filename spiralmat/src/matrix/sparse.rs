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
use crate::hash_map::OpenAddressingMap;
use crate::index::checked_flat_index;
use crate::index::flat_index;
use crate::index::unflatten_index;
use crate::matrix::Cell;
use crate::matrix::SparseMatrixBuilder;

/// Sparse two-dimensional store of byte payloads keyed by `(row, col)`.
///
/// Cells live in one flat map addressed by [`flat_index`]. Each cell also
/// carries the next column of its row and the next row of its column, so
/// every row and every column forms a singly linked list whose head is kept
/// in a per-axis head map.
///
/// Only [`SparseMatrix::sort_all`] runs in parallel; every other operation
/// expects exclusive or externally synchronized access.
#[derive(Debug, Clone, Default)]
pub struct SparseMatrix {
    pub(super) cells: OpenAddressingMap<u64, Cell>,
    pub(super) row_heads: OpenAddressingMap<u32, u32>,
    pub(super) column_heads: OpenAddressingMap<u32, u32>,
}

impl SparseMatrix {
    /// Creates an empty matrix with default capacities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty matrix sized for the given number of rows, columns and
    /// occupied cells.
    pub fn with_capacity(rows: usize, columns: usize, cells: usize) -> Self {
        Self {
            cells: OpenAddressingMap::with_capacity(cells),
            row_heads: OpenAddressingMap::with_capacity(rows),
            column_heads: OpenAddressingMap::with_capacity(columns),
        }
    }

    /// Returns a builder for a pre-sized matrix.
    pub fn builder() -> SparseMatrixBuilder {
        SparseMatrixBuilder::default()
    }

    /// Returns true if `(row, col)` holds a cell.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        checked_flat_index(row, col).is_some_and(|key| self.cells.contains_key(key))
    }

    /// Returns the number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the number of cells the store holds before it grows.
    pub fn cell_capacity(&self) -> usize {
        self.cells.capacity()
    }

    /// Returns every row that has a list head, in no particular order.
    pub fn rows(&self) -> Vec<u32> {
        self.row_heads.keys()
    }

    /// Returns every column that has a list head, in no particular order.
    pub fn columns(&self) -> Vec<u32> {
        self.column_heads.keys()
    }

    /// Returns the first column of the list for `row`.
    pub fn head_column(&self, row: u32) -> Option<u32> {
        self.row_heads.get(row).copied()
    }

    /// Returns the first row of the list for `col`.
    pub fn head_row(&self, col: u32) -> Option<u32> {
        self.column_heads.get(col).copied()
    }

    /// Returns the column following `col` in the list for `row`.
    ///
    /// `None` if the list ends here or `(row, col)` is not occupied.
    pub fn next_column(&self, row: u32, col: u32) -> Option<u32> {
        self.get_cell(row, col)?.next_column()
    }

    /// Returns the row following `row` in the list for `col`.
    ///
    /// `None` if the list ends here or `(row, col)` is not occupied.
    pub fn next_row(&self, row: u32, col: u32) -> Option<u32> {
        self.get_cell(row, col)?.next_row()
    }

    /// Returns the payload stored at `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        self.get_cell(row, col).map(|cell| cell.payload())
    }

    /// Returns a snapshot of the cell stored at `(row, col)`.
    pub fn get_cell(&self, row: u32, col: u32) -> Option<Cell> {
        let key = checked_flat_index(row, col)?;
        self.cells.get(key).cloned()
    }

    /// Stores `payload` at `(row, col)` and returns the payload it replaced.
    ///
    /// A new cell becomes the head of both its row list and its column list.
    /// Writing to an occupied cell only swaps the payload: the cell keeps its
    /// place in both lists and no neighbor is touched.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is greater than [`MAX_ID`](crate::MAX_ID).
    ///
    /// # Examples
    ///
    /// ```
    /// use spiralmat::SparseMatrix;
    ///
    /// let mut matrix = SparseMatrix::new();
    /// assert_eq!(matrix.insert(5, 3, 7), None);
    /// assert_eq!(matrix.insert(5, 9, 2), None);
    /// assert_eq!(matrix.head_column(5), Some(9));
    /// assert_eq!(matrix.insert(5, 3, 8), Some(7));
    /// assert_eq!(matrix.head_column(5), Some(9));
    /// ```
    pub fn insert(&mut self, row: u32, col: u32, payload: u8) -> Option<u8> {
        let key = flat_index(row, col);
        if let Some(cell) = self.cells.get_mut(key) {
            let previous = cell.payload();
            cell.set_payload(payload);
            return Some(previous);
        }
        let next_column = self.row_heads.insert(row, col);
        let next_row = self.column_heads.insert(col, row);
        self.cells.insert(key, Cell::new(payload, next_column, next_row));
        None
    }

    /// Inserting while keeping both lists in ascending order is not supported.
    ///
    /// Use [`SparseMatrix::insert`] followed by a sort of the affected lists.
    ///
    /// # Errors
    ///
    /// Always returns [`ErrorKind::NotImplemented`].
    pub fn insert_sorted(&mut self, row: u32, col: u32, payload: u8) -> Result<(), Error> {
        Err(
            Error::new(ErrorKind::NotImplemented, "sorted insertion is not implemented")
                .with_context("row", row)
                .with_context("col", col)
                .with_context("payload", payload),
        )
    }

    /// Iterates the columns of `row` by following its list from the head.
    ///
    /// The walk ends at the end of the list or at the first link that points
    /// at a cell which no longer exists.
    pub fn iter_row(&self, row: u32) -> ListIter<'_> {
        ListIter {
            matrix: self,
            axis: Axis::Row(row),
            current: self.head_column(row),
            remaining: self.len() + 1,
        }
    }

    /// Iterates the rows of `col` by following its list from the head.
    ///
    /// Stops under the same conditions as [`SparseMatrix::iter_row`].
    pub fn iter_column(&self, col: u32) -> ListIter<'_> {
        ListIter {
            matrix: self,
            axis: Axis::Column(col),
            current: self.head_row(col),
            remaining: self.len() + 1,
        }
    }

    /// Collects the columns of `row` in current list order.
    pub fn columns_for_row(&self, row: u32) -> Vec<u32> {
        self.iter_row(row).collect()
    }

    /// Collects the rows of `col` in current list order.
    pub fn rows_for_column(&self, col: u32) -> Vec<u32> {
        self.iter_column(col).collect()
    }

    /// Iterates every occupied cell as `(row, col, payload)` in no particular
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, u8)> + '_ {
        self.cells.iter().map(|(key, cell)| {
            let (row, col) = unflatten_index(key);
            (row, col, cell.payload())
        })
    }

    /// Shrinks every backing map to about 1.11 times its live entries.
    ///
    /// No key is recomputed and no list is relinked; cells only move between
    /// slots of the store.
    pub fn compact(&mut self) {
        let before = self.cells.table_len();
        self.cells.compact();
        self.row_heads.compact();
        self.column_heads.compact();
        debug!(
            "compacted cell store from {} to {} slots for {} cells",
            before,
            self.cells.table_len(),
            self.cells.len()
        );
    }

    // Links are rewritten through this shared borrow, see `Cell`.
    pub(super) fn cell(&self, row: u32, col: u32) -> Result<&Cell, Error> {
        let key = flat_index(row, col);
        self.cells.get(key).ok_or_else(|| Error::missing_cell(row, col))
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Row(u32),
    Column(u32),
}

/// Iterator over one row list or one column list.
///
/// Created by [`SparseMatrix::iter_row`] and [`SparseMatrix::iter_column`].
#[derive(Debug, Clone)]
pub struct ListIter<'a> {
    matrix: &'a SparseMatrix,
    axis: Axis,
    current: Option<u32>,
    // An acyclic list visits at most every cell plus one dangling id at its end.
    remaining: usize,
}

impl Iterator for ListIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.current?;
        self.remaining -= 1;
        self.current = match self.axis {
            Axis::Row(row) => self.matrix.next_column(row, id),
            Axis::Column(col) => self.matrix.next_row(id, col),
        };
        Some(id)
    }
}
