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

//! The `Decoder` contract: a typed, bulk-filling pull source (spec.md
//! section 3, "Decoder (external contract)").
//!
//! Concrete decoders (PLAIN, RLE/BitPack hybrid, DELTA, dictionary-indexed)
//! are external collaborators and out of scope for this crate -- only the
//! trait boundary lives here, mirroring `encoding.Decoder` in
//! `examples/original_source/page_reader.go`, where a single interface
//! value is threaded through every typed `*PageReader` and only the one
//! method matching that reader's physical type is ever called.

use crate::data_type::{ByteArrayList, Int96};
use crate::errors::{general_err, Result};

/// A pull source of typed values, configured with a bit width when it backs
/// a repetition/definition level stream.
///
/// Every method has a default implementation that reports "not supported",
/// the same shape as a Go value satisfying `encoding.Decoder` while only
/// implementing the one `Decode*` method its physical type calls -- a
/// concrete decoder overrides exactly the methods relevant to the type it
/// decodes and leaves the rest at their default.
pub trait Decoder {
    fn decode_bool(&mut self, _buffer: &mut [bool]) -> Result<usize> {
        Err(general_err!("decoder does not support BOOLEAN"))
    }

    fn decode_i32(&mut self, _buffer: &mut [i32]) -> Result<usize> {
        Err(general_err!("decoder does not support INT32"))
    }

    fn decode_i64(&mut self, _buffer: &mut [i64]) -> Result<usize> {
        Err(general_err!("decoder does not support INT64"))
    }

    fn decode_i96(&mut self, _buffer: &mut [Int96]) -> Result<usize> {
        Err(general_err!("decoder does not support INT96"))
    }

    fn decode_f32(&mut self, _buffer: &mut [f32]) -> Result<usize> {
        Err(general_err!("decoder does not support FLOAT"))
    }

    fn decode_f64(&mut self, _buffer: &mut [f64]) -> Result<usize> {
        Err(general_err!("decoder does not support DOUBLE"))
    }

    fn decode_byte_array(&mut self, _buffer: &mut ByteArrayList) -> Result<usize> {
        Err(general_err!("decoder does not support BYTE_ARRAY"))
    }

    fn decode_fixed_len_byte_array(&mut self, _size: usize, _buffer: &mut [u8]) -> Result<usize> {
        Err(general_err!("decoder does not support FIXED_LEN_BYTE_ARRAY"))
    }

    /// Bulk-fills 8-bit signed levels. Used only by [`crate::encodings::levels::LevelReader`].
    fn decode_i8(&mut self, _buffer: &mut [i8]) -> Result<usize> {
        Err(general_err!("decoder does not support level decoding"))
    }

    /// Configures the bit width used to decode each packed value. Only
    /// meaningful for level decoders and other fixed-width encodings; a
    /// decoder that ignores bit width (e.g. PLAIN) may leave this a no-op.
    fn set_bit_width(&mut self, _width: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A decoder that only ever implements `decode_i32`, standing in for a
    /// concrete PLAIN/RLE decoder in these trait-boundary tests.
    struct FixedInt32Decoder {
        values: Vec<i32>,
        offset: usize,
    }

    impl Decoder for FixedInt32Decoder {
        fn decode_i32(&mut self, buffer: &mut [i32]) -> Result<usize> {
            let n = std::cmp::min(buffer.len(), self.values.len() - self.offset);
            buffer[..n].copy_from_slice(&self.values[self.offset..self.offset + n]);
            self.offset += n;
            Ok(n)
        }
    }

    #[test]
    fn unimplemented_methods_report_an_error() {
        let mut d = FixedInt32Decoder {
            values: vec![1, 2, 3],
            offset: 0,
        };
        let mut scratch = [false; 4];
        assert!(d.decode_bool(&mut scratch).is_err());
    }

    #[test]
    fn overridden_method_works_normally() {
        let mut d = FixedInt32Decoder {
            values: vec![1, 2, 3],
            offset: 0,
        };
        let mut scratch = [0i32; 2];
        assert_eq!(d.decode_i32(&mut scratch).unwrap(), 2);
        assert_eq!(scratch, [1, 2]);
        let mut scratch2 = [0i32; 2];
        assert_eq!(d.decode_i32(&mut scratch2).unwrap(), 1);
        assert_eq!(scratch2[0], 3);
    }
}
