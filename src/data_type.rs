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

//! Physical-type payloads carried by a [`crate::value::Value`].

use crate::util::memory::ByteBufferPtr;

/// A 12-byte Parquet `INT96` value (deprecated timestamp encoding, still
/// required for reading legacy files).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Int96 {
    data: [u32; 3],
}

impl Int96 {
    pub fn new(data: [u32; 3]) -> Self {
        Int96 { data }
    }

    pub fn data(&self) -> &[u32; 3] {
        &self.data
    }
}

/// A variable-length (or fixed-length) byte array value.
///
/// Backed by [`ByteBufferPtr`] so decoding a `BYTE_ARRAY`/`FIXED_LEN_BYTE_ARRAY`
/// column doesn't need to allocate until a [`crate::value::Value`] is handed
/// to the caller, matching spec.md section 4.4's `ByteArrayList`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteArray {
    data: ByteBufferPtr,
}

impl ByteArray {
    pub fn new(data: ByteBufferPtr) -> Self {
        ByteArray { data }
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Vec<u8>> for ByteArray {
    fn from(data: Vec<u8>) -> Self {
        ByteArray::new(ByteBufferPtr::new(data))
    }
}

impl AsRef<[u8]> for ByteArray {
    fn as_ref(&self) -> &[u8] {
        self.data()
    }
}

/// A compact container for bulk-decoded byte arrays: one concatenated data
/// buffer plus an offset index, so a `Decoder::decode_byte_array` call can
/// fill many values without allocating per element (spec.md section 3:
/// "supports bulk decode without per-element allocation until a value is
/// emitted").
#[derive(Debug, Default)]
pub struct ByteArrayList {
    data: Vec<u8>,
    offsets: Vec<usize>,
}

impl ByteArrayList {
    /// Creates an empty list with room for roughly `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        ByteArrayList {
            data: Vec::new(),
            offsets: Vec::with_capacity(capacity + 1),
        }
    }

    /// Appends one more entry, copying `bytes` into the shared data buffer.
    pub fn push(&mut self, bytes: &[u8]) {
        if self.offsets.is_empty() {
            self.offsets.push(0);
        }
        self.data.extend_from_slice(bytes);
        self.offsets.push(self.data.len());
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the `index`-th entry.
    pub fn index(&self, index: usize) -> &[u8] {
        &self.data[self.offsets[index]..self.offsets[index + 1]]
    }

    /// Drops every entry, keeping the backing allocations for reuse.
    pub fn reset(&mut self) {
        self.data.clear();
        self.offsets.clear();
    }
}
