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

use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

/// Raw link value marking the end of a row or column list.
const END: u32 = u32::MAX;

/// An occupied matrix entry: its payload plus one outgoing link per axis.
///
/// The links name the successor's id on the shared axis. `next_column` is the
/// next column in this cell's row list, `next_row` the next row in its column
/// list.
///
/// Links are atomics so that [`SparseMatrix::sort_all`] workers can relink
/// their own lists through a shared borrow. Workers own disjoint lists, so
/// relaxed ordering is enough; the join publishes their writes.
/// A `Cell` handed out by [`SparseMatrix::get_cell`] is a snapshot.
///
/// [`SparseMatrix::sort_all`]: crate::SparseMatrix::sort_all
/// [`SparseMatrix::get_cell`]: crate::SparseMatrix::get_cell
#[derive(Debug)]
pub struct Cell {
    payload: u8,
    next_column: AtomicU32,
    next_row: AtomicU32,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(0, None, None)
    }
}

impl Clone for Cell {
    fn clone(&self) -> Self {
        Self::new(self.payload, self.next_column(), self.next_row())
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
            && self.next_column() == other.next_column()
            && self.next_row() == other.next_row()
    }
}

impl Eq for Cell {}

impl Cell {
    pub(crate) fn new(payload: u8, next_column: Option<u32>, next_row: Option<u32>) -> Self {
        Self {
            payload,
            next_column: AtomicU32::new(next_column.unwrap_or(END)),
            next_row: AtomicU32::new(next_row.unwrap_or(END)),
        }
    }

    /// Returns the payload stored in this cell.
    pub fn payload(&self) -> u8 {
        self.payload
    }

    /// Returns the next column in this cell's row list, if any.
    pub fn next_column(&self) -> Option<u32> {
        unlink(self.next_column.load(Ordering::Relaxed))
    }

    /// Returns the next row in this cell's column list, if any.
    pub fn next_row(&self) -> Option<u32> {
        unlink(self.next_row.load(Ordering::Relaxed))
    }

    pub(crate) fn set_payload(&mut self, payload: u8) {
        self.payload = payload;
    }

    pub(crate) fn set_next_column(&self, next_column: Option<u32>) {
        self.next_column
            .store(next_column.unwrap_or(END), Ordering::Relaxed);
    }

    pub(crate) fn set_next_row(&self, next_row: Option<u32>) {
        self.next_row.store(next_row.unwrap_or(END), Ordering::Relaxed);
    }
}

fn unlink(raw: u32) -> Option<u32> {
    (raw != END).then_some(raw)
}
