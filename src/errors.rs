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

//! Error types shared by every reader and writer in this crate.

use std::io;

use quick_error::quick_error;

quick_error! {
    /// The error type returned by bit-packing primitives and page readers.
    #[derive(Debug)]
    pub enum ParquetError {
        /// Clean exhaustion of a stream at a value or block boundary.
        Eof(message: String) {
            display("{}", message)
        }
        /// A short read in the middle of a multi-bit value, or in the middle
        /// of a promised value count that levels said should exist.
        UnexpectedEof(message: String) {
            display("unexpected EOF: {}", message)
        }
        /// A bit width argument is out of range for the call it was passed to.
        InvalidArgument(message: String) {
            display("invalid argument: {}", message)
        }
        /// A context-tagged error surfaced from an underlying `Decoder` or
        /// byte source.
        Decode(message: String) {
            display("{}", message)
        }
        /// An I/O error from the byte source backing a `BitReader`/`BitWriter`.
        Io(err: io::Error) {
            from()
            display("I/O error: {}", err)
            cause(err)
        }
        /// Catch-all for conditions not covered by the variants above.
        General(message: String) {
            display("parquet error: {}", message)
        }
    }
}

impl ParquetError {
    /// True if this error represents a clean, expected end of stream.
    ///
    /// `UnexpectedEof` is deliberately excluded: that variant signals an
    /// invariant violation, not a place a caller should stop silently.
    pub fn is_eof(&self) -> bool {
        matches!(self, ParquetError::Eof(_))
            || matches!(self, ParquetError::Io(err) if err.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// Wraps `self` with a short textual context identifying the stream it
    /// came from, e.g. `"reading parquet values from data page"`.
    pub fn in_context(self, context: &str) -> ParquetError {
        match self {
            ParquetError::Eof(m) => ParquetError::Decode(format!("{context}: {m}")),
            ParquetError::UnexpectedEof(m) => {
                ParquetError::UnexpectedEof(format!("{context}: {m}"))
            }
            other => ParquetError::Decode(format!("{context}: {other}")),
        }
    }
}

/// A specialized `Result` type used throughout this crate.
pub type Result<T> = ::std::result::Result<T, ParquetError>;

/// Shortcut to build a [`ParquetError::Eof`].
macro_rules! eof_err {
    ($fmt:expr) => (crate::errors::ParquetError::Eof(format!($fmt)));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::Eof(format!($fmt, $($args),*)));
}

/// Shortcut to build a [`ParquetError::UnexpectedEof`].
macro_rules! unexpected_eof_err {
    ($fmt:expr) => (crate::errors::ParquetError::UnexpectedEof(format!($fmt)));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::UnexpectedEof(format!($fmt, $($args),*)));
}

/// Shortcut to build a [`ParquetError::InvalidArgument`].
macro_rules! invalid_arg_err {
    ($fmt:expr) => (crate::errors::ParquetError::InvalidArgument(format!($fmt)));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::InvalidArgument(format!($fmt, $($args),*)));
}

/// Shortcut to build a [`ParquetError::General`].
macro_rules! general_err {
    ($fmt:expr) => (crate::errors::ParquetError::General(format!($fmt)));
    ($fmt:expr, $($args:expr),*) => (crate::errors::ParquetError::General(format!($fmt, $($args),*)));
}

pub(crate) use eof_err;
pub(crate) use general_err;
pub(crate) use invalid_arg_err;
pub(crate) use unexpected_eof_err;
