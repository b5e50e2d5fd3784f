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

//! Sparse matrix with intrusive row and column lists.
//!
//! [`SparseMatrix`] stores a one-byte payload per occupied `(row, col)` cell.
//! Cells are addressed by the spiral [`flat_index`](crate::flat_index), which
//! never changes as the matrix grows, and every row and column is threaded
//! through its cells as a singly linked list.
//!
//! # Usage
//!
//! ```rust
//! use spiralmat::SparseMatrix;
//!
//! let mut matrix = SparseMatrix::new();
//! matrix.insert(5, 3, 7);
//! matrix.insert(5, 9, 2);
//! matrix.insert(1, 3, 4);
//!
//! assert_eq!(matrix.len(), 3);
//! assert_eq!(matrix.get(5, 3), Some(7));
//! assert_eq!(matrix.get(2, 2), None);
//!
//! // Lists run newest first until they are sorted.
//! assert_eq!(matrix.rows_for_column(3), vec![1, 5]);
//! matrix.sort_all(2).unwrap();
//! assert_eq!(matrix.rows_for_column(3), vec![1, 5]);
//! assert_eq!(matrix.columns_for_row(5), vec![3, 9]);
//! ```
//!
//! # Notes
//!
//! - [`SparseMatrix::prev_row`], [`SparseMatrix::prev_column`] and therefore
//!   [`SparseMatrix::remove`] assume sorted lists.
//! - [`SparseMatrix::remove_row`] and [`SparseMatrix::remove_column`] leave the
//!   crossing lists linked to the removed cells; re-inserting such a cell makes
//!   the crossing list cycle.

mod builder;
mod cell;
mod order;
mod remove;
mod sparse;

pub use self::builder::SparseMatrixBuilder;
pub use self::cell::Cell;
pub use self::sparse::ListIter;
pub use self::sparse::SparseMatrix;
