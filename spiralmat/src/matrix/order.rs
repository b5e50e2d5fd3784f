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

use std::thread;

use log::debug;
use log::trace;

use crate::error::Error;
use crate::error::ErrorKind;
use crate::matrix::SparseMatrix;

/// New list heads produced by one `sort_all` worker.
#[derive(Debug, Default)]
struct SortedHeads {
    rows: Vec<(u32, u32)>,
    columns: Vec<(u32, u32)>,
}

impl SparseMatrix {
    /// Relinks the list of `row` so it visits its columns in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvariantViolation`] if the list names a cell that is
    /// not in the store or visits a column twice. Both only happen after a
    /// bulk removal left the list linked to a deleted cell, see
    /// [`SparseMatrix::remove_column`]. The list is left as it was.
    pub fn sort_columns_for_row(&mut self, row: u32) -> Result<(), Error> {
        if let Some(head) = self.relink_row(row)? {
            self.row_heads.insert(row, head);
        }
        Ok(())
    }

    /// Relinks the list of `col` so it visits its rows in ascending order.
    ///
    /// # Errors
    ///
    /// Same as [`SparseMatrix::sort_columns_for_row`].
    pub fn sort_rows_for_column(&mut self, col: u32) -> Result<(), Error> {
        if let Some(head) = self.relink_column(col)? {
            self.column_heads.insert(col, head);
        }
        Ok(())
    }

    /// Sorts every row list and every column list using `threads` workers.
    ///
    /// Worker `i` owns the rows and the columns whose id is `i` modulo
    /// `threads`, and rewrites the `next` links of exactly those lists in
    /// place. Row lists only touch `next_column` links and column lists only
    /// touch `next_row` links, so no two workers write the same link and the
    /// outcome does not depend on `threads`. The new heads are stored once
    /// every worker is joined.
    ///
    /// All lists are checked in a first parallel pass; links are only
    /// rewritten if every list passes. Blocks until every worker has finished.
    ///
    /// # Errors
    ///
    /// * [`ErrorKind::ConfigInvalid`] if `threads` is 0.
    /// * [`ErrorKind::InvariantViolation`] as for
    ///   [`SparseMatrix::sort_columns_for_row`], for any list. No link is
    ///   rewritten in that case.
    /// * [`ErrorKind::InterruptedWait`] if a worker panicked. A panic during
    ///   the checking pass leaves the matrix untouched; one during relinking
    ///   leaves other workers' lists relinked while every head stays as it
    ///   was, so the matrix must be discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use spiralmat::SparseMatrix;
    ///
    /// let mut matrix = SparseMatrix::new();
    /// for col in [8, 2, 5] {
    ///     matrix.insert(1, col, 1);
    /// }
    /// matrix.sort_all(2).unwrap();
    /// assert_eq!(matrix.columns_for_row(1), vec![2, 5, 8]);
    /// ```
    pub fn sort_all(&mut self, threads: usize) -> Result<(), Error> {
        if threads == 0 {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "sort_all needs at least one worker",
            )
            .with_context("threads", threads));
        }

        let rows = self.rows();
        let columns = self.columns();
        debug!(
            "sorting {} row lists and {} column lists with {} workers",
            rows.len(),
            columns.len(),
            threads
        );

        let matrix: &SparseMatrix = self;
        fan_out(threads, |worker| {
            for row in owned(&rows, worker, threads) {
                matrix.sorted_row(row)?;
            }
            for col in owned(&columns, worker, threads) {
                matrix.sorted_column(col)?;
            }
            Ok(())
        })?;

        let heads = fan_out(threads, |worker| {
            let mut heads = SortedHeads::default();
            for row in owned(&rows, worker, threads) {
                if let Some(head) = matrix.relink_row(row)? {
                    heads.rows.push((row, head));
                }
            }
            for col in owned(&columns, worker, threads) {
                if let Some(head) = matrix.relink_column(col)? {
                    heads.columns.push((col, head));
                }
            }
            trace!(
                "sort worker {} relinked {} row lists and {} column lists",
                worker,
                heads.rows.len(),
                heads.columns.len()
            );
            Ok(heads)
        })?;

        for worker_heads in heads {
            for (row, head) in worker_heads.rows {
                self.row_heads.insert(row, head);
            }
            for (col, head) in worker_heads.columns {
                self.column_heads.insert(col, head);
            }
        }
        debug!("sorted all lists with {} workers", threads);
        Ok(())
    }

    /// Returns the row whose cell links to `(row, col)` in the list for `col`.
    ///
    /// The walk starts at the head and advances while the next row is smaller
    /// than `row`, so the answer is only reliable once the list is sorted. On
    /// an unsorted list it may name a row that does not link to `row` at all.
    ///
    /// `None` if `(row, col)` is not occupied or is the head of the list.
    pub fn prev_row(&self, row: u32, col: u32) -> Option<u32> {
        if !self.contains(row, col) {
            return None;
        }
        let mut prev = self.head_row(col)?;
        if prev == row {
            return None;
        }
        let mut current = self.next_row(prev, col);
        for _ in 0..self.len() {
            match current {
                Some(id) if id < row => {
                    prev = id;
                    current = self.next_row(id, col);
                }
                _ => break,
            }
        }
        Some(prev)
    }

    /// Returns the column whose cell links to `(row, col)` in the list for `row`.
    ///
    /// Same caveats as [`SparseMatrix::prev_row`].
    pub fn prev_column(&self, row: u32, col: u32) -> Option<u32> {
        if !self.contains(row, col) {
            return None;
        }
        let mut prev = self.head_column(row)?;
        if prev == col {
            return None;
        }
        let mut current = self.next_column(row, prev);
        for _ in 0..self.len() {
            match current {
                Some(id) if id < col => {
                    prev = id;
                    current = self.next_column(row, id);
                }
                _ => break,
            }
        }
        Some(prev)
    }

    /// Walks the list of `row` and returns its columns in ascending order.
    ///
    /// Lists of two or more entries must name existing cells, each once.
    fn sorted_row(&self, row: u32) -> Result<Vec<u32>, Error> {
        let mut columns = self.columns_for_row(row);
        if columns.len() > 1 {
            columns.sort_unstable();
            check_ascending(&columns)?;
            if let Some(&col) = columns.iter().find(|&&col| !self.contains(row, col)) {
                return Err(Error::missing_cell(row, col));
            }
        }
        Ok(columns)
    }

    fn sorted_column(&self, col: u32) -> Result<Vec<u32>, Error> {
        let mut rows = self.rows_for_column(col);
        if rows.len() > 1 {
            rows.sort_unstable();
            check_ascending(&rows)?;
            if let Some(&row) = rows.iter().find(|&&row| !self.contains(row, col)) {
                return Err(Error::missing_cell(row, col));
            }
        }
        Ok(rows)
    }

    /// Rewrites the `next_column` links of `row` in ascending order and returns
    /// the new head, or `None` if the list is too short to reorder. The head
    /// map is left to the caller.
    fn relink_row(&self, row: u32) -> Result<Option<u32>, Error> {
        let columns = self.sorted_row(row)?;
        if columns.len() < 2 {
            return Ok(None);
        }
        for (i, &col) in columns.iter().enumerate() {
            self.cell(row, col)?
                .set_next_column(columns.get(i + 1).copied());
        }
        Ok(columns.first().copied())
    }

    fn relink_column(&self, col: u32) -> Result<Option<u32>, Error> {
        let rows = self.sorted_column(col)?;
        if rows.len() < 2 {
            return Ok(None);
        }
        for (i, &row) in rows.iter().enumerate() {
            self.cell(row, col)?.set_next_row(rows.get(i + 1).copied());
        }
        Ok(rows.first().copied())
    }
}

/// Runs `task` for every worker index on its own scoped thread and collects
/// the results in worker order.
fn fan_out<T, F>(threads: usize, task: F) -> Result<Vec<T>, Error>
where
    T: Send,
    F: Fn(usize) -> Result<T, Error> + Sync,
{
    let task = &task;
    let joined = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|worker| s.spawn(move || task(worker)))
            .collect();
        // Join every handle before looking at results so no panic escapes the scope.
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    });

    let mut results = Vec::with_capacity(threads);
    for (worker, result) in joined.into_iter().enumerate() {
        match result {
            Ok(result) => results.push(result?),
            Err(payload) => return Err(Error::interrupted(worker, &*payload)),
        }
    }
    Ok(results)
}

fn owned(ids: &[u32], worker: usize, threads: usize) -> impl Iterator<Item = u32> + '_ {
    ids.iter()
        .copied()
        .filter(move |id| *id as usize % threads == worker)
}

fn check_ascending(sorted: &[u32]) -> Result<(), Error> {
    match sorted.windows(2).find(|pair| pair[0] >= pair[1]) {
        Some(pair) => Err(Error::new(
            ErrorKind::InvariantViolation,
            "list visits the same id more than once",
        )
        .with_context("id", pair[1])),
        None => Ok(()),
    }
}
