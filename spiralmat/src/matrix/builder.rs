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

use crate::matrix::SparseMatrix;

/// Builder for creating a [`SparseMatrix`] with pre-sized backing maps.
///
/// Every hint is the number of entries the corresponding map holds before its
/// first growth. Hints only affect memory layout; a matrix built with zero
/// hints behaves the same as a pre-sized one.
///
/// # Examples
///
/// ```
/// use spiralmat::SparseMatrix;
///
/// let mut matrix = SparseMatrix::builder()
///     .row_capacity(1_000)
///     .column_capacity(50)
///     .cell_capacity(20_000)
///     .build();
///
/// matrix.insert(12, 3, 1);
/// assert!(matrix.cell_capacity() >= 20_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SparseMatrixBuilder {
    row_capacity: usize,
    column_capacity: usize,
    cell_capacity: usize,
}

impl SparseMatrixBuilder {
    /// Sets the number of distinct rows to reserve space for.
    pub fn row_capacity(mut self, row_capacity: usize) -> Self {
        self.row_capacity = row_capacity;
        self
    }

    /// Sets the number of distinct columns to reserve space for.
    pub fn column_capacity(mut self, column_capacity: usize) -> Self {
        self.column_capacity = column_capacity;
        self
    }

    /// Sets the number of occupied cells to reserve space for.
    pub fn cell_capacity(mut self, cell_capacity: usize) -> Self {
        self.cell_capacity = cell_capacity;
        self
    }

    /// Builds an empty matrix.
    pub fn build(self) -> SparseMatrix {
        SparseMatrix::with_capacity(self.row_capacity, self.column_capacity, self.cell_capacity)
    }
}
