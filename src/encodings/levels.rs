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

//! A buffered pull reader for 8-bit repetition/definition level streams.
//!
//! Grounded in `levelReader` in `examples/original_source/page_reader.go`:
//! a small ring of levels backed by a `Decoder::decode_i8` bulk call, with
//! a peek/discard pair so `DataPageReader` can look ahead at a run of
//! levels before deciding how many raw values to pull.

use crate::encodings::decoding::Decoder;
use crate::errors::Result;
use crate::util::bit_util::at_least_one;

/// A buffered reader over a stream of repetition or definition levels.
pub struct LevelReader<D> {
    decoder: D,
    levels: Vec<i8>,
    offset: usize,
    count: usize,
}

impl<D: Decoder> LevelReader<D> {
    /// Wraps `decoder`, buffering up to `buffer_size` levels at a time. A
    /// `buffer_size` of zero means this stream is absent from the page
    /// (top-level required column) and the reader is never pulled from.
    pub fn new(decoder: D, buffer_size: usize) -> Self {
        LevelReader {
            decoder,
            levels: Vec::with_capacity(at_least_one(buffer_size)),
            offset: 0,
            count: 0,
        }
    }

    /// Returns the currently unread buffered slice, refilling from the
    /// decoder first if the buffer is drained.
    ///
    /// Returns [`crate::errors::ParquetError::Eof`] only when the decoder
    /// reports zero levels at end of stream and nothing is buffered.
    pub fn peek_levels(&mut self) -> Result<&[i8]> {
        if self.offset == self.levels.len() {
            self.decode_levels()?;
        }
        Ok(&self.levels[self.offset..])
    }

    /// Advances the read offset by `n`.
    ///
    /// Panics if `n` exceeds the currently buffered remainder: a caller
    /// must never discard more than it just peeked.
    pub fn discard_levels(&mut self, n: usize) {
        let remain = self.levels.len() - self.offset;
        if n > remain {
            panic!("cannot discard more levels than buffered");
        }
        if n == remain {
            self.levels.clear();
            self.offset = 0;
        } else {
            self.offset += n;
        }
    }

    /// Reads a single level.
    pub fn read_level(&mut self) -> Result<i8> {
        loop {
            if self.offset < self.levels.len() {
                let lvl = self.levels[self.offset];
                self.offset += 1;
                return Ok(lvl);
            }
            self.decode_levels()?;
        }
    }

    /// Swaps in a new backing decoder and clears any buffered levels,
    /// without reallocating.
    pub fn reset(&mut self, decoder: D) {
        self.decoder = decoder;
        self.levels.clear();
        self.offset = 0;
        self.count = 0;
    }

    /// Total number of levels ever decoded by this reader, for diagnostics.
    pub fn levels_read(&self) -> usize {
        self.count
    }

    fn decode_levels(&mut self) -> Result<()> {
        let capacity = self.levels.capacity();
        self.levels.resize(capacity, 0);
        let n = match self.decoder.decode_i8(&mut self.levels) {
            Ok(n) => n,
            Err(e) => {
                self.levels.clear();
                self.offset = 0;
                return Err(e);
            }
        };
        self.levels.truncate(n);
        self.offset = 0;
        self.count += n;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::general_err;

    struct FixedLevels {
        values: Vec<i8>,
        offset: usize,
    }

    impl Decoder for FixedLevels {
        fn decode_i8(&mut self, buffer: &mut [i8]) -> Result<usize> {
            let remain = self.values.len() - self.offset;
            if remain == 0 {
                return Err(general_err!("end of levels"));
            }
            let n = buffer.len().min(remain);
            buffer[..n].copy_from_slice(&self.values[self.offset..self.offset + n]);
            self.offset += n;
            Ok(n)
        }
    }

    #[test]
    fn peek_then_discard_advances_offset() {
        let decoder = FixedLevels {
            values: vec![0, 1, 1, 0, 1],
            offset: 0,
        };
        let mut r = LevelReader::new(decoder, 8);

        let peeked = r.peek_levels().unwrap().to_vec();
        assert_eq!(peeked, vec![0, 1, 1, 0, 1]);
        r.discard_levels(2);
        assert_eq!(r.peek_levels().unwrap(), &[1, 0, 1]);
        r.discard_levels(3);
        assert_eq!(r.levels_read(), 5);
    }

    #[test]
    fn read_level_pulls_one_at_a_time() {
        let decoder = FixedLevels {
            values: vec![3, 2, 1],
            offset: 0,
        };
        let mut r = LevelReader::new(decoder, 8);
        assert_eq!(r.read_level().unwrap(), 3);
        assert_eq!(r.read_level().unwrap(), 2);
        assert_eq!(r.read_level().unwrap(), 1);
        assert!(r.read_level().is_err());
    }

    #[test]
    #[should_panic]
    fn discard_more_than_buffered_panics() {
        let decoder = FixedLevels {
            values: vec![1, 1],
            offset: 0,
        };
        let mut r = LevelReader::new(decoder, 8);
        r.peek_levels().unwrap();
        r.discard_levels(5);
    }

    #[test]
    fn reset_installs_new_decoder_and_clears_state() {
        let decoder = FixedLevels {
            values: vec![1, 1],
            offset: 0,
        };
        let mut r = LevelReader::new(decoder, 8);
        r.peek_levels().unwrap();
        r.reset(FixedLevels {
            values: vec![9],
            offset: 0,
        });
        assert_eq!(r.levels_read(), 0);
        assert_eq!(r.peek_levels().unwrap(), &[9]);
    }
}
