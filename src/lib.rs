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

//! Bit-packing primitives and page-level value readers for the Parquet
//! columnar format.
//!
//! This crate covers the core pull path from a page's raw byte streams up
//! to dense, level-tagged [`value::Value`]s: [`util::bit_util`] for
//! arbitrary-bit-width I/O, [`encodings::decoding`] for the abstract
//! `Decoder` boundary concrete codecs (PLAIN, RLE/BitPack, delta,
//! dictionary) sit behind, [`encodings::levels`] for buffered
//! repetition/definition level streams, [`column::page`] for per-type
//! buffered value readers, and [`column::reader`] for the `DataPageReader`
//! that assembles all of the above into one null-aware value stream.
//!
//! Concrete encodings, file-level metadata (Thrift footers, row groups),
//! compression codecs, and full nested-record assembly are out of scope;
//! see `DESIGN.md` for what this crate does and does not own.

pub mod basic;
pub mod column;
pub mod data_type;
pub mod encodings;
pub mod errors;
pub mod util;
pub mod value;

pub use crate::basic::Type;
pub use crate::column::page::PageReader;
pub use crate::column::reader::DataPageReader;
pub use crate::encodings::decoding::Decoder;
pub use crate::encodings::levels::LevelReader;
pub use crate::errors::{ParquetError, Result};
pub use crate::value::Value;
