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

//! An in-memory sparse two-dimensional store keyed by `(row, col)`.
//!
//! Every occupied cell lives in a single hash map under a key computed from its
//! coordinates alone, so the structure grows to hundreds of millions of cells
//! without recomputing any index. Rows and columns are traversed through
//! linked lists threaded directly through the cells.

pub mod error;
pub mod matrix;

mod hash_map;
mod index;

pub use self::index::MAX_ID;
pub use self::index::flat_index;
pub use self::index::unflatten_index;
pub use self::matrix::Cell;
pub use self::matrix::SparseMatrix;
pub use self::matrix::SparseMatrixBuilder;
