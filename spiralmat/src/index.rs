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

//! The spiral index that maps a `(row, col)` pair onto the flat key space.
//!
//! Keys grow outward in square rings around the origin. Ring `m` holds every
//! cell whose larger coordinate is `m` and covers the keys `m²..=m² + 2m`:
//!
//! ```text
//! row
//!  4 | 17 19 21 23 24
//!  3 | 10 12 14 15 22
//!  2 |  5  7  8 13 20
//!  1 |  2  3  6 11 18
//!  0 |  0  1  4  9 16
//!    +---------------
//!       0  1  2  3  4  col
//! ```
//!
//! A key depends on nothing but its coordinates, so growing or rehashing the
//! backing store never moves a cell to a different key.

/// The largest row or column id the matrix accepts.
///
/// `u32::MAX` is reserved as the end-of-list marker inside cell links.
pub const MAX_ID: u32 = u32::MAX - 1;

/// Computes the flat key for `(row, col)`.
///
/// The mapping is a bijection between pairs of ids in `0..=MAX_ID` and keys in
/// `0..(MAX_ID + 1)²`.
///
/// # Panics
///
/// Panics if `row` or `col` is greater than [`MAX_ID`].
///
/// # Examples
///
/// ```
/// use spiralmat::flat_index;
///
/// assert_eq!(flat_index(0, 0), 0);
/// assert_eq!(flat_index(0, 1), 1);
/// assert_eq!(flat_index(1, 0), 2);
/// assert_eq!(flat_index(4, 4), 24);
/// ```
pub fn flat_index(row: u32, col: u32) -> u64 {
    assert!(
        row <= MAX_ID && col <= MAX_ID,
        "row and col must be <= {MAX_ID}, got row={row}, col={col}"
    );
    spiral(row, col)
}

/// Like [`flat_index`], but returns `None` for ids outside `0..=MAX_ID`.
pub(crate) fn checked_flat_index(row: u32, col: u32) -> Option<u64> {
    (row <= MAX_ID && col <= MAX_ID).then(|| spiral(row, col))
}

/// Recovers `(row, col)` from a key produced by [`flat_index`].
///
/// # Examples
///
/// ```
/// use spiralmat::{flat_index, unflatten_index};
///
/// let key = flat_index(7, 3);
/// assert_eq!(unflatten_index(key), (7, 3));
/// ```
pub fn unflatten_index(key: u64) -> (u32, u32) {
    let ring = key.isqrt();
    let offset = key - ring * ring;
    // Even offsets sit on or above the diagonal (row <= col), odd ones below.
    if offset % 2 == 0 {
        ((offset / 2) as u32, ring as u32)
    } else {
        let diff = (2 * ring + 1 - offset) / 2;
        (ring as u32, (ring - diff) as u32)
    }
}

#[inline]
fn spiral(row: u32, col: u32) -> u64 {
    let row = row as u64;
    let col = col as u64;
    let diff = row.abs_diff(col);
    let diagonal = if row > col {
        (row + 1) * (row + 1)
    } else {
        (col + 1) * (col + 1) - 1
    };
    diagonal - 2 * diff
}
