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

//! Typed, buffered pull readers over a single physical-type column page
//! (spec.md section 4.4), one per Parquet physical type.
//!
//! Grounded in the eight `*PageReader` structs of
//! `examples/original_source/page_reader.go`: each wraps a `Decoder`, a
//! scratch buffer sized from a byte-oriented `bufferSize` hint, and an
//! `offset` cursor, draining the scratch buffer into the caller's slice
//! before issuing another bulk decode call.

use crate::basic::Type;
use crate::data_type::{ByteArray, ByteArrayList, Int96};
use crate::encodings::decoding::Decoder;
use crate::errors::Result;
use crate::util::bit_util::at_least_one;
use crate::value::Value;

/// A buffered pull reader over one page's worth of values of a single
/// physical type. Values read here carry no repetition/definition levels;
/// level tagging and null injection are layered on top by
/// [`crate::column::reader::DataPageReader`].
pub trait PageReader {
    /// The physical type this reader produces.
    fn page_type(&self) -> Type;

    /// Fills `out` with decoded [`Value`]s, draining the internal scratch
    /// buffer first and refilling it from the decoder as needed.
    ///
    /// A short read (`n < out.len()`) is not itself an error: it means the
    /// decoder ran dry partway through this call. The decoder's error is
    /// swallowed as long as at least one value was produced this call and
    /// only surfaces on the next call, once there is nothing left to
    /// return in its place.
    fn read_values(&mut self, out: &mut [Value]) -> Result<usize>;
}

/// A page reader over fixed-width scalar values (bool, i32, i64, Int96,
/// f32, f64): the common shape behind six of the eight physical types.
struct ScalarPageReader<D, T> {
    typ: Type,
    decoder: D,
    values: Vec<T>,
    offset: usize,
    to_value: fn(T) -> Value,
    decode: fn(&mut D, &mut [T]) -> Result<usize>,
}

impl<D: Decoder, T: Copy + Default> ScalarPageReader<D, T> {
    fn new(
        typ: Type,
        decoder: D,
        capacity: usize,
        to_value: fn(T) -> Value,
        decode: fn(&mut D, &mut [T]) -> Result<usize>,
    ) -> Self {
        ScalarPageReader {
            typ,
            decoder,
            values: Vec::with_capacity(at_least_one(capacity)),
            offset: 0,
            to_value,
            decode,
        }
    }

    fn reset(&mut self, decoder: D) {
        self.decoder = decoder;
        self.values.clear();
        self.offset = 0;
    }

    fn read_values(&mut self, out: &mut [Value]) -> Result<usize> {
        let mut i = 0;
        loop {
            while self.offset < self.values.len() && i < out.len() {
                out[i] = (self.to_value)(self.values[self.offset]);
                self.offset += 1;
                i += 1;
            }

            if i == out.len() {
                return Ok(i);
            }

            let capacity = self.values.capacity();
            self.values.resize(capacity, T::default());
            let n = match (self.decode)(&mut self.decoder, &mut self.values) {
                Ok(n) => n,
                Err(_) if i > 0 => {
                    self.values.clear();
                    self.offset = 0;
                    return Ok(i);
                }
                Err(e) => return Err(e),
            };
            if n == 0 {
                return Ok(i);
            }
            self.values.truncate(n);
            self.offset = 0;
        }
    }
}

macro_rules! scalar_page_reader {
    ($name:ident, $elem:ty, $to_value:expr, $decode:expr, $element_size:expr) => {
        pub struct $name<D> {
            inner: ScalarPageReader<D, $elem>,
        }

        impl<D: Decoder> $name<D> {
            pub fn new(typ: Type, decoder: D, buffer_size: usize) -> Self {
                $name {
                    inner: ScalarPageReader::new(
                        typ,
                        decoder,
                        buffer_size / $element_size,
                        $to_value,
                        $decode,
                    ),
                }
            }
        }

        impl<D: Decoder> PageReader for $name<D> {
            fn page_type(&self) -> Type {
                self.inner.typ
            }

            fn read_values(&mut self, out: &mut [Value]) -> Result<usize> {
                self.inner.read_values(out)
            }
        }

        impl<D: Decoder> $name<D> {
            /// Swaps in a new backing decoder, discarding buffered values.
            pub fn reset(&mut self, decoder: D) {
                self.inner.reset(decoder);
            }
        }
    };
}

scalar_page_reader!(
    BooleanPageReader,
    bool,
    Value::boolean,
    Decoder::decode_bool,
    1
);
scalar_page_reader!(Int32PageReader, i32, Value::int32, Decoder::decode_i32, 4);
scalar_page_reader!(Int64PageReader, i64, Value::int64, Decoder::decode_i64, 8);
scalar_page_reader!(
    Int96PageReader,
    Int96,
    Value::int96,
    Decoder::decode_i96,
    12
);
scalar_page_reader!(FloatPageReader, f32, Value::float, Decoder::decode_f32, 4);
scalar_page_reader!(
    DoublePageReader,
    f64,
    Value::double,
    Decoder::decode_f64,
    8
);

/// A page reader over variable-length byte array values.
///
/// Scratch is an opaque [`ByteArrayList`] rather than `Vec<ByteArray>`, so a
/// bulk decode call can fill many entries into one concatenated buffer
/// without allocating per element (spec.md section 4.4). Each emitted
/// `Value` clones its bytes out of the shared scratch buffer so the caller
/// owns them independently of future `read_values` calls.
pub struct ByteArrayPageReader<D> {
    typ: Type,
    decoder: D,
    values: ByteArrayList,
    index: usize,
}

impl<D: Decoder> ByteArrayPageReader<D> {
    pub fn new(typ: Type, decoder: D, buffer_size: usize) -> Self {
        ByteArrayPageReader {
            typ,
            decoder,
            values: ByteArrayList::with_capacity(at_least_one(buffer_size / 16)),
            index: 0,
        }
    }

    pub fn reset(&mut self, decoder: D) {
        self.decoder = decoder;
        self.values.reset();
        self.index = 0;
    }
}

impl<D: Decoder> PageReader for ByteArrayPageReader<D> {
    fn page_type(&self) -> Type {
        self.typ
    }

    fn read_values(&mut self, out: &mut [Value]) -> Result<usize> {
        let mut i = 0;
        loop {
            while self.index < self.values.len() && i < out.len() {
                let bytes = self.values.index(self.index).to_vec();
                out[i] = Value::byte_array(ByteArray::from(bytes));
                self.index += 1;
                i += 1;
            }

            if i == out.len() {
                return Ok(i);
            }

            self.values.reset();
            let n = match self.decoder.decode_byte_array(&mut self.values) {
                Ok(n) => n,
                Err(_) if i > 0 => return Ok(i),
                Err(e) => return Err(e),
            };
            if n == 0 {
                return Ok(i);
            }
            self.index = 0;
        }
    }
}

/// A page reader over fixed-length byte array values.
///
/// Scratch is a flat byte buffer, capacity rounded down to a whole number
/// of `size`-byte elements (at least one element), matching
/// `newFixedLenByteArrayPageReader` in the original.
pub struct FixedLenByteArrayPageReader<D> {
    typ: Type,
    decoder: D,
    values: Vec<u8>,
    offset: usize,
    size: usize,
}

impl<D: Decoder> FixedLenByteArrayPageReader<D> {
    pub fn new(typ: Type, decoder: D, size: usize, buffer_size: usize) -> Self {
        let element_count = at_least_one(buffer_size / size.max(1));
        FixedLenByteArrayPageReader {
            typ,
            decoder,
            values: Vec::with_capacity(element_count * size),
            offset: 0,
            size,
        }
    }

    pub fn reset(&mut self, decoder: D) {
        self.decoder = decoder;
        self.values.clear();
        self.offset = 0;
    }
}

impl<D: Decoder> PageReader for FixedLenByteArrayPageReader<D> {
    fn page_type(&self) -> Type {
        self.typ
    }

    fn read_values(&mut self, out: &mut [Value]) -> Result<usize> {
        let mut i = 0;
        loop {
            while self.offset + self.size <= self.values.len() && i < out.len() {
                let bytes = self.values[self.offset..self.offset + self.size].to_vec();
                out[i] = Value::fixed_len_byte_array(ByteArray::from(bytes));
                self.offset += self.size;
                i += 1;
            }

            if i == out.len() {
                return Ok(i);
            }

            let capacity = self.values.capacity();
            self.values.clear();
            self.values.resize(capacity, 0);
            let n = match self
                .decoder
                .decode_fixed_len_byte_array(self.size, &mut self.values)
            {
                Ok(n) => n,
                Err(_) if i > 0 => {
                    self.values.clear();
                    self.offset = 0;
                    return Ok(i);
                }
                Err(e) => return Err(e),
            };
            if n == 0 {
                return Ok(i);
            }
            self.values.truncate(n * self.size);
            self.offset = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedInt32s {
        values: Vec<i32>,
        offset: usize,
    }

    impl Decoder for FixedInt32s {
        fn decode_i32(&mut self, buffer: &mut [i32]) -> Result<usize> {
            let remain = self.values.len() - self.offset;
            if remain == 0 {
                return Err(crate::errors::general_err!("eof"));
            }
            let n = buffer.len().min(remain);
            buffer[..n].copy_from_slice(&self.values[self.offset..self.offset + n]);
            self.offset += n;
            Ok(n)
        }
    }

    #[test]
    fn int32_page_reader_drains_then_refills() {
        let decoder = FixedInt32s {
            values: vec![10, 20, 30, 40, 50],
            offset: 0,
        };
        // buffer_size of 8 bytes / 4 bytes-per-element = capacity 2.
        let mut r = Int32PageReader::new(Type::Int32, decoder, 8);
        assert_eq!(r.page_type(), Type::Int32);

        let mut out = vec![Value::default(); 3];
        let n = r.read_values(&mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(out[0].as_i32(), Some(10));
        assert_eq!(out[1].as_i32(), Some(20));
        assert_eq!(out[2].as_i32(), Some(30));

        let mut out2 = vec![Value::default(); 4];
        let n2 = r.read_values(&mut out2).unwrap();
        assert_eq!(n2, 2);
        assert_eq!(out2[0].as_i32(), Some(40));
        assert_eq!(out2[1].as_i32(), Some(50));
    }

    struct FixedBytes {
        chunks: Vec<Vec<u8>>,
        offset: usize,
    }

    impl Decoder for FixedBytes {
        fn decode_byte_array(&mut self, buffer: &mut ByteArrayList) -> Result<usize> {
            if self.offset >= self.chunks.len() {
                return Err(crate::errors::general_err!("eof"));
            }
            let mut n = 0;
            while self.offset < self.chunks.len() {
                buffer.push(&self.chunks[self.offset]);
                self.offset += 1;
                n += 1;
            }
            Ok(n)
        }
    }

    #[test]
    fn byte_array_page_reader_clones_out_of_scratch() {
        let decoder = FixedBytes {
            chunks: vec![b"ab".to_vec(), b"cde".to_vec()],
            offset: 0,
        };
        let mut r = ByteArrayPageReader::new(Type::ByteArray, decoder, 32);
        let mut out = vec![Value::default(); 2];
        let n = r.read_values(&mut out).unwrap();
        assert_eq!(n, 2);
        assert_eq!(out[0].as_byte_array().unwrap().data(), b"ab");
        assert_eq!(out[1].as_byte_array().unwrap().data(), b"cde");
    }
}
