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

//! Bit-level read/write primitives: the foundation every higher-level
//! Parquet encoding (RLE/BitPack hybrid, delta, dictionary indices) is
//! built on top of.
//!
//! Bit ordering is little-endian within bytes (the LSB of each byte is the
//! earliest bit) and little-endian across bytes (the first byte holds the
//! lowest-order bits of the shift register). Grounded in
//! `examples/original_source/internal/bits/{reader,writer}.go`.

use std::io::{self, Read, Write};

use byteorder::{ByteOrder, LittleEndian};

use crate::errors::{eof_err, invalid_arg_err, unexpected_eof_err, ParquetError, Result};

/// Number of whole bytes needed to hold `bits` bits.
#[inline]
pub fn byte_count(bits: usize) -> usize {
    (bits + 7) / 8
}

/// Number of bits held by `bytes` whole bytes.
#[inline]
pub fn bit_count(bytes: usize) -> usize {
    bytes * 8
}

/// Smallest value `>= least`, used to enforce "at least one element" buffer
/// floors (spec.md section 9: "Buffer sizing").
#[inline]
pub fn at_least(size: usize, least: usize) -> usize {
    size.max(least)
}

/// Shortcut for `at_least(size, 1)`.
#[inline]
pub fn at_least_one(size: usize) -> usize {
    at_least(size, 1)
}

#[inline]
fn mask(n: u32) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Reads arbitrary-bit-width unsigned integers from an underlying byte
/// source, LSB-first within each byte, little-endian across bytes.
pub struct BitReader<R> {
    reader: R,
    cache: u64,
    length: u32,
    staging: [u8; 8],
}

impl<R: Read> BitReader<R> {
    /// Wraps `reader` as a fresh bit-level source.
    pub fn new(reader: R) -> Self {
        BitReader {
            reader,
            cache: 0,
            length: 0,
            staging: [0; 8],
        }
    }

    /// Swaps in a new backing reader and clears any buffered bits, without
    /// reallocating the staging buffer.
    pub fn reset(&mut self, reader: R) {
        self.reader = reader;
        self.cache = 0;
        self.length = 0;
    }

    /// Reads a single bit, returned as `0` or `1`.
    pub fn read_bit(&mut self) -> Result<u32> {
        Ok((self.read_bits(1)? & 1) as u32)
    }

    /// Reads `bit_width` bits (`1..=64`) and returns them as a `u64`.
    ///
    /// Returns [`ParquetError::Eof`] if the source is exhausted before any
    /// bits of this call were consumed, or [`ParquetError::UnexpectedEof`]
    /// if it runs out partway through the requested width.
    pub fn read_bits(&mut self, bit_width: u32) -> Result<u64> {
        assert!(
            (1..=64).contains(&bit_width),
            "bit_width must be in 1..=64, got {bit_width}"
        );

        let mut bits: u64 = 0;
        let mut nbits: u32 = 0;
        let mut remaining = bit_width;

        while remaining > 0 {
            if self.length == 0 {
                let to_read = byte_count(remaining as usize).min(8);
                let n = read_some(&mut self.reader, &mut self.staging[..to_read])?;
                if n == 0 {
                    return Err(if nbits != 0 {
                        unexpected_eof_err!(
                            "reached end of stream after {} of {} requested bits",
                            nbits,
                            bit_width
                        )
                    } else {
                        eof_err!("end of stream")
                    });
                }
                let mut padded = [0u8; 8];
                padded[..n].copy_from_slice(&self.staging[..n]);
                self.length = bit_count(n) as u32;
                self.cache = LittleEndian::read_u64(&padded);
            }

            let take = remaining.min(self.length);
            bits |= (self.cache & mask(take)) << nbits;
            nbits += take;
            remaining -= take;
            self.length -= take;
            self.cache >>= take;
        }

        Ok(bits)
    }
}

/// Reads as many bytes as are immediately available, treating `Ok(0)` as
/// end of stream rather than an error (matches `io.Reader.Read`'s contract,
/// which `Read::read_exact` does not expose).
fn read_some<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ParquetError::from(e)),
        }
    }
}

/// Writes arbitrary-bit-width unsigned integers to an underlying byte sink,
/// LSB-first within each byte, little-endian across bytes.
///
/// Bits accumulate in an internal 64-bit cache and spill into a pending
/// output buffer; nothing reaches the sink until [`BitWriter::flush`] is
/// called, which matches the "build a block, then emit it" shape of every
/// caller in this crate (spec.md section 4.2).
pub struct BitWriter<W> {
    writer: W,
    cache: u64,
    length: u32,
    buffer: Vec<u8>,
}

impl<W: Write> BitWriter<W> {
    /// Wraps `writer` as a fresh bit-level sink.
    pub fn new(writer: W) -> Self {
        BitWriter {
            writer,
            cache: 0,
            length: 0,
            buffer: Vec::new(),
        }
    }

    /// Swaps in a new backing writer and discards any unflushed bits.
    pub fn reset(&mut self, writer: W) {
        self.writer = writer;
        self.cache = 0;
        self.length = 0;
        self.buffer.clear();
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(bit as u64, 1);
    }

    /// Writes the low `bit_width` bits (`1..=64`) of `value`.
    pub fn write_bits(&mut self, value: u64, bit_width: u32) {
        assert!(
            (1..=64).contains(&bit_width),
            "bit_width must be in 1..=64, got {bit_width}"
        );

        let mut value = value & mask(bit_width);
        let mut remaining = bit_width;

        loop {
            if self.length + remaining <= 64 {
                self.cache |= value << self.length;
                self.length += remaining;
                return;
            }

            let avail = 64 - self.length;
            self.cache |= (value & mask(avail)) << self.length;
            self.length = 64;
            self.flush_cache();
            value >>= avail;
            remaining -= avail;
        }
    }

    /// Moves eight full bytes out of `cache` into the pending output buffer.
    fn flush_cache(&mut self) {
        let mut bytes = [0u8; 8];
        LittleEndian::write_u64(&mut bytes, self.cache);
        self.buffer.extend_from_slice(&bytes);
        self.cache = 0;
        self.length = 0;
    }

    /// Serializes any partial bits (zero-padded to the next byte boundary)
    /// and writes the whole pending buffer to the sink.
    pub fn flush(&mut self) -> Result<()> {
        if self.length > 0 {
            let nbytes = byte_count(self.length as usize);
            let mut bytes = [0u8; 8];
            LittleEndian::write_u64(&mut bytes, self.cache);
            self.buffer.extend_from_slice(&bytes[..nbytes]);
            self.cache = 0;
            self.length = 0;
        }
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        Ok(())
    }

    /// Number of bytes that would be written by the next [`flush`](Self::flush).
    pub fn buffered(&self) -> usize {
        self.buffer.len() + byte_count(self.length as usize)
    }
}

/// Packs groups of eight integers into bit-packed blocks and writes them
/// through a [`BitWriter`].
///
/// `w` denotes the width of the source integers (`8`, `16`, `32`, or `64`);
/// a block of 8 values at output bit width `b` is exactly `b` bytes, since
/// `8 * b` bits always land on a byte boundary (spec.md section 4.3).
/// Implemented directly in terms of `write_bits`, which spec.md section 4.3
/// notes is bit-exactly equivalent to any batched fast path; this crate
/// does not add a separate SIMD/batched code path (see DESIGN.md).
pub struct PackedBlockWriter<W> {
    inner: BitWriter<W>,
}

macro_rules! write_packed_x8 {
    ($name:ident, $elem:ty, $unsigned:ty, $width:expr) => {
        /// Packs each block of 8 values into exactly `bit_width` bytes.
        pub fn $name(&mut self, blocks: &[[$elem; 8]], bit_width: u32) -> Result<()> {
            if bit_width > $width {
                return Err(invalid_arg_err!(
                    "bit_width {} exceeds input width {}",
                    bit_width,
                    $width
                ));
            }
            for block in blocks {
                for &v in block {
                    self.inner.write_bits((v as $unsigned) as u64, bit_width);
                }
            }
            Ok(())
        }
    };
}

impl<W: Write> PackedBlockWriter<W> {
    /// Wraps `writer` as a fresh packed-block sink.
    pub fn new(writer: W) -> Self {
        PackedBlockWriter {
            inner: BitWriter::new(writer),
        }
    }

    write_packed_x8!(write_packed_8x8, i8, u8, 8);
    write_packed_x8!(write_packed_16x8, i16, u16, 16);
    write_packed_x8!(write_packed_32x8, i32, u32, 32);
    write_packed_x8!(write_packed_64x8, i64, u64, 64);

    /// Flushes any buffered bytes to the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}
