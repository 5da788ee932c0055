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

//! Basic Parquet type tags shared across the crate.

use std::fmt;

/// The eight physical types a Parquet column can be stored as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    ByteArray,
    FixedLenByteArray,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Number of bits needed to represent every value in `0..=max_level`.
///
/// Grounded in `bits.Len8` from `internal/bits` in the Go original: a
/// repetition/definition level decoder is configured with exactly this many
/// bits before it can be used (spec.md section 4.6: `bit_width =
/// bits_needed(maxLevel)`).
pub fn bit_width(max_level: u8) -> u32 {
    // Number of bits required to hold `max_level` itself: `Len8` in the
    // original counts the bit length of the value, not of value+1, because
    // levels are stored 0-based and `max_level` is itself a valid level.
    8 - max_level.leading_zeros()
}
