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

//! Errors reported by [`SparseMatrix`](crate::SparseMatrix) operations.

use std::any::Any;
use std::fmt;

/// The category of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An argument passed to an operation is invalid, e.g. a zero worker count.
    ConfigInvalid,
    /// The operation exists in the API but has no implementation.
    NotImplemented,
    /// A row or column list does not match the cell store.
    ///
    /// Lists reach this state only through the bulk removals, which leave
    /// crossing lists linked to deleted cells.
    InvariantViolation,
    /// A worker of [`sort_all`](crate::SparseMatrix::sort_all) panicked.
    InterruptedWait,
}

impl ErrorKind {
    /// Returns the name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ConfigInvalid => "ConfigInvalid",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::InvariantViolation => "InvariantViolation",
            ErrorKind::InterruptedWait => "InterruptedWait",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned by every fallible matrix operation.
///
/// Besides its kind and message an error carries the coordinates or counts
/// it concerns as named context values, e.g. `row` and `col` for a cell that
/// a list links to but the store does not hold.
///
/// # Examples
///
/// ```
/// use spiralmat::SparseMatrix;
/// use spiralmat::error::ErrorKind;
///
/// let mut matrix = SparseMatrix::new();
/// let err = matrix.insert_sorted(4, 2, 1).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotImplemented);
/// assert_eq!(err.context("row"), Some("4"));
/// assert_eq!(err.context("col"), Some("2"));
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Creates an error of `kind` without context.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::new(),
            source: None,
        }
    }

    /// Attaches a named value, kept in insertion order.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Attaches the underlying cause.
    ///
    /// # Panics
    ///
    /// Panics if a source is already attached.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::error::Error as _;
    /// use spiralmat::error::{Error, ErrorKind};
    ///
    /// let error = Error::new(ErrorKind::InterruptedWait, "sort worker did not finish");
    /// assert!(error.source().is_none());
    /// let error = error.set_source(anyhow::anyhow!("worker panicked"));
    /// assert!(error.source().is_some());
    /// ```
    pub fn set_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        assert!(self.source.is_none(), "error source is already set");
        self.source = Some(src.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the first context value attached under `key`.
    pub fn context(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// A list names `(row, col)` but the cell store has no such cell.
    pub(crate) fn missing_cell(row: u32, col: u32) -> Self {
        Self::new(ErrorKind::InvariantViolation, "list links to a missing cell")
            .with_context("row", row)
            .with_context("col", col)
    }

    /// Worker `worker` of a parallel pass panicked with `payload`.
    pub(crate) fn interrupted(worker: usize, payload: &(dyn Any + Send)) -> Self {
        let cause = if let Some(message) = payload.downcast_ref::<&str>() {
            message.to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::new(ErrorKind::InterruptedWait, "worker panicked before it was joined")
            .with_context("worker", worker)
            .set_source(anyhow::anyhow!(cause))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        for (i, (key, value)) in self.context.iter().enumerate() {
            let sep = if i == 0 { " (" } else { ", " };
            write!(f, "{sep}{key}: {value}")?;
        }
        if !self.context.is_empty() {
            f.write_str(")")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|source| source.as_ref())
    }
}
