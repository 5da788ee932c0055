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

//! A cheaply-cloneable, range-addressable view over an owned byte buffer.
//!
//! Pages are read in full before any value is decoded from them, so every
//! `Decoder` this crate hands out a slice of needs a way to share that slice
//! without copying it on every `range`/`start_from` call. `ByteBufferPtr` is
//! that handle: an `Rc<[u8]>` plus a `(start, len)` window. `Rc`, not `Arc`,
//! matches this crate's single-threaded, one-reader-per-caller concurrency
//! model (spec.md section 5) -- there is no cross-thread sharing to pay for.

use std::rc::Rc;

/// A reference-counted, range-addressable view over a byte buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteBufferPtr {
    data: Rc<[u8]>,
    start: usize,
    len: usize,
}

impl Default for ByteBufferPtr {
    fn default() -> Self {
        ByteBufferPtr::new(Vec::new())
    }
}

impl ByteBufferPtr {
    /// Wraps `data` as a buffer covering its entire length.
    pub fn new(data: Vec<u8>) -> Self {
        let len = data.len();
        ByteBufferPtr {
            data: Rc::from(data.into_boxed_slice()),
            start: 0,
            len,
        }
    }

    /// Number of bytes visible through this view.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if this view covers zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a view of `len` bytes starting at `start` within this view.
    ///
    /// Panics if the requested range falls outside the current view, the
    /// same contract as slice indexing.
    pub fn range(&self, start: usize, len: usize) -> Self {
        assert!(
            start + len <= self.len,
            "range [{start}, {start}+{len}) out of bounds for buffer of length {}",
            self.len
        );
        ByteBufferPtr {
            data: self.data.clone(),
            start: self.start + start,
            len,
        }
    }

    /// Returns a view over everything from `start` to the end of this view.
    pub fn start_from(&self, start: usize) -> Self {
        self.range(start, self.len - start)
    }

    /// Returns a view identical to this one (kept for call-site symmetry
    /// with `start_from`/`range`, matching the teacher's `data.all()`).
    pub fn all(&self) -> Self {
        self.clone()
    }
}

impl AsRef<[u8]> for ByteBufferPtr {
    fn as_ref(&self) -> &[u8] {
        &self.data[self.start..self.start + self.len]
    }
}

impl From<Vec<u8>> for ByteBufferPtr {
    fn from(data: Vec<u8>) -> Self {
        ByteBufferPtr::new(data)
    }
}
