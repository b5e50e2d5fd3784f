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

use std::collections::BTreeSet;

use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::eq;
use spiralmat::SparseMatrix;
use spiralmat::error::ErrorKind;

fn sorted_row(matrix: &mut SparseMatrix, row: u32, columns: &[u32]) {
    for col in columns {
        matrix.insert(row, *col, (*col % 256) as u8);
    }
    matrix.sort_all(1).unwrap();
}

#[test]
fn test_remove_then_absent() {
    let mut matrix = SparseMatrix::new();
    matrix.insert(3, 4, 9);
    matrix.insert(3, 5, 1);
    let before = matrix.len();

    assert_eq!(matrix.remove(3, 4).unwrap(), Some(9));
    assert!(!matrix.contains(3, 4));
    assert_eq!(matrix.get(3, 4), None);
    assert_eq!(matrix.len(), before - 1);
    assert_eq!(matrix.columns_for_row(3), vec![5]);
    assert_eq!(matrix.head_row(4), None);
    assert_eq!(matrix.columns(), vec![5]);
}

#[test]
fn test_remove_absent_cell_is_noop() {
    let mut matrix = SparseMatrix::new();
    matrix.insert(1, 1, 1);
    assert_eq!(matrix.remove(1, 2).unwrap(), None);
    assert_eq!(matrix.remove(u32::MAX, 1).unwrap(), None);
    assert_eq!(matrix.len(), 1);
    assert_eq!(matrix.head_column(1), Some(1));
}

#[test]
fn test_remove_head_middle_and_tail() {
    let mut matrix = SparseMatrix::new();
    sorted_row(&mut matrix, 0, &[10, 20, 30, 40]);

    // middle
    assert_eq!(matrix.remove(0, 20).unwrap(), Some(20));
    assert_eq!(matrix.columns_for_row(0), vec![10, 30, 40]);
    assert_eq!(matrix.next_column(0, 10), Some(30));
    // head
    assert_eq!(matrix.remove(0, 10).unwrap(), Some(10));
    assert_eq!(matrix.head_column(0), Some(30));
    assert_eq!(matrix.columns_for_row(0), vec![30, 40]);
    // tail
    assert_eq!(matrix.remove(0, 40).unwrap(), Some(40));
    assert_eq!(matrix.next_column(0, 30), None);
    assert_eq!(matrix.columns_for_row(0), vec![30]);
    // last one clears the row
    assert_eq!(matrix.remove(0, 30).unwrap(), Some(30));
    assert_eq!(matrix.head_column(0), None);
    assert!(matrix.rows().is_empty());
    assert!(matrix.columns().is_empty());
    assert!(matrix.is_empty());
}

#[test]
fn test_remove_relinks_both_axes() {
    let mut matrix = SparseMatrix::new();
    for row in 0..5 {
        for col in 0..5 {
            matrix.insert(row, col, (row * 5 + col) as u8);
        }
    }
    matrix.sort_all(2).unwrap();

    assert_eq!(matrix.remove(2, 2).unwrap(), Some(12));
    assert_eq!(matrix.columns_for_row(2), vec![0, 1, 3, 4]);
    assert_eq!(matrix.rows_for_column(2), vec![0, 1, 3, 4]);
    assert_eq!(matrix.next_column(2, 1), Some(3));
    assert_eq!(matrix.next_row(1, 2), Some(3));
    for other in [0, 1, 3, 4] {
        assert_eq!(matrix.columns_for_row(other), vec![0, 1, 2, 3, 4]);
        assert_eq!(matrix.rows_for_column(other), vec![0, 1, 2, 3, 4]);
    }
}

#[test]
fn test_remove_every_cell_in_scrambled_order() {
    let mut matrix = SparseMatrix::new();
    let mut live = BTreeSet::new();
    for i in 0..2_000u32 {
        let (row, col) = ((i * 37) % 61, (i * 53) % 47);
        matrix.insert(row, col, 1);
        live.insert((row, col));
    }
    matrix.sort_all(3).unwrap();

    let order: Vec<(u32, u32)> = live.iter().copied().rev().step_by(2).collect();
    for (row, col) in order {
        let before = matrix.len();
        assert_eq!(matrix.remove(row, col).unwrap(), Some(1));
        assert!(!matrix.contains(row, col));
        assert_eq!(matrix.len(), before - 1);
        live.remove(&(row, col));
    }

    for row in 0..61 {
        let expected: Vec<u32> = live.iter().filter(|(r, _)| *r == row).map(|(_, c)| *c).collect();
        assert_eq!(matrix.columns_for_row(row), expected);
    }
    for col in 0..47 {
        let expected: Vec<u32> = live.iter().filter(|(_, c)| *c == col).map(|(r, _)| *r).collect();
        assert_eq!(matrix.rows_for_column(col), expected);
    }
}

#[test]
fn test_remove_on_unsorted_list_fails_without_changes() {
    let mut matrix = SparseMatrix::new();
    for col in [5, 9, 3] {
        matrix.insert(0, col, 1);
    }
    assert_eq!(matrix.columns_for_row(0), vec![3, 9, 5]);

    let err = matrix.remove(0, 5).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvariantViolation));
    assert_that!(err.message(), contains_substring("row list is not in ascending order"));
    assert!(matrix.contains(0, 5));
    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix.columns_for_row(0), vec![3, 9, 5]);
    assert_eq!(matrix.head_row(5), Some(0));

    // The head needs no walk, so it can always be removed.
    assert_eq!(matrix.remove(0, 3).unwrap(), Some(1));
    assert_eq!(matrix.columns_for_row(0), vec![9, 5]);
}

#[test]
fn test_remove_row_leaves_column_links_dangling() {
    let mut matrix = SparseMatrix::new();
    matrix.insert(5, 3, 1);
    matrix.insert(5, 8, 1);
    matrix.insert(1, 3, 2);
    matrix.insert(2, 8, 3);
    assert_eq!(matrix.rows_for_column(3), vec![1, 5]);
    assert_eq!(matrix.rows_for_column(8), vec![2, 5]);

    assert_eq!(matrix.remove_row(5), 2);
    assert_eq!(matrix.len(), 2);
    assert!(!matrix.contains(5, 3));
    assert_eq!(matrix.head_column(5), None);

    // Column lists still name the removed row.
    assert_eq!(matrix.rows_for_column(3), vec![1, 5]);
    assert_eq!(matrix.rows_for_column(8), vec![2, 5]);
}

#[test]
fn test_remove_row_truncates_columns_it_headed() {
    let mut matrix = SparseMatrix::new();
    matrix.insert(1, 3, 1);
    matrix.insert(5, 3, 1);
    assert_eq!(matrix.rows_for_column(3), vec![5, 1]);

    assert_eq!(matrix.remove_row(5), 1);
    // Row 1 is still stored but no longer reachable from column 3.
    assert!(matrix.contains(1, 3));
    assert_eq!(matrix.rows_for_column(3), vec![5]);
    assert_eq!(matrix.columns_for_row(1), vec![3]);
}

#[test]
fn test_remove_column_keeps_column_reported_by_rows() {
    let mut matrix = SparseMatrix::new();
    matrix.insert(4, 6, 1);
    assert_eq!(matrix.remove_column(6), 1);
    assert!(matrix.is_empty());
    assert!(matrix.columns().is_empty());

    // Row 4 still lists the removed column.
    assert_eq!(matrix.rows(), vec![4]);
    assert_eq!(matrix.columns_for_row(4), vec![6]);
}

#[test]
fn test_remove_row_and_column_of_absent_ids() {
    let mut matrix = SparseMatrix::new();
    matrix.insert(0, 0, 1);
    assert_eq!(matrix.remove_row(9), 0);
    assert_eq!(matrix.remove_column(9), 0);
    assert_eq!(matrix.len(), 1);
}

#[test]
fn test_reinsert_after_remove_row_cycles_column() {
    let mut matrix = SparseMatrix::new();
    for row in [5, 3, 1] {
        matrix.insert(row, 3, 1);
    }
    assert_eq!(matrix.rows_for_column(3), vec![1, 3, 5]);

    assert_eq!(matrix.remove_row(3), 1);
    assert_eq!(matrix.insert(3, 3, 9), None);

    // (1, 3) still links to row 3, which now links back to row 1.
    assert_eq!(matrix.rows_for_column(3), vec![3, 1, 3, 1]);
    assert!(matrix.contains(5, 3));

    let err = matrix.sort_rows_for_column(3).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvariantViolation));
    assert_that!(err.message(), contains_substring("more than once"));
    let err = matrix.sort_all(2).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvariantViolation));
    assert_eq!(matrix.rows_for_column(3), vec![3, 1, 3, 1]);
}

#[test]
fn test_reinsert_after_remove_column_cycles_row() {
    let mut matrix = SparseMatrix::new();
    for col in [5, 3, 1] {
        matrix.insert(2, col, 1);
    }
    assert_eq!(matrix.columns_for_row(2), vec![1, 3, 5]);

    assert_eq!(matrix.remove_column(3), 1);
    assert_eq!(matrix.insert(2, 3, 9), None);

    assert_eq!(matrix.columns_for_row(2), vec![3, 1, 3, 1]);
    let err = matrix.sort_columns_for_row(2).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvariantViolation));
}
