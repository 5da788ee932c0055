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

//! `DataPageReader`: the assembly algorithm that turns a column's raw
//! values plus its repetition/definition level streams into a dense
//! sequence of tagged [`Value`]s with nulls injected in place (spec.md
//! section 4.6).
//!
//! Grounded in `DataPageReader`/`NewDataPageReader`/`ReadValues` in
//! `examples/original_source/page_reader.go`.

use crate::basic::bit_width;
use crate::column::page::PageReader;
use crate::encodings::decoding::Decoder;
use crate::encodings::levels::LevelReader;
use crate::errors::{unexpected_eof_err, Result};
use crate::value::Value;

/// Orchestrates a value `PageReader` and two `LevelReader`s (repetition,
/// definition) into one stream of fully-tagged `Value`s, injecting nulls
/// for any position whose definition level falls short of the column's max.
pub struct DataPageReader<P, RD, DD> {
    page: P,
    remain: usize,
    max_repetition_level: u8,
    max_definition_level: u8,
    column_index: i16,
    repetitions: LevelReader<RD>,
    definitions: LevelReader<DD>,
}

impl<P: PageReader, RD: Decoder, DD: Decoder> DataPageReader<P, RD, DD> {
    /// Builds a new reader over `page`, reading at most `num_values`
    /// (the page's declared value count) before reporting end of stream.
    ///
    /// Level buffer sizing splits `buffer_size` in half when both streams
    /// are present, gives either one the whole hint alone, or allocates
    /// nothing when the column is top-level required (spec.md section 4.6).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mut repetitions: RD,
        mut definitions: DD,
        num_values: usize,
        page: P,
        max_repetition_level: u8,
        max_definition_level: u8,
        column_index: i16,
        buffer_size: usize,
    ) -> Self {
        let (repetition_buffer_size, definition_buffer_size) =
            match (max_repetition_level > 0, max_definition_level > 0) {
                (true, true) => (buffer_size / 2, buffer_size / 2),
                (true, false) => (buffer_size, 0),
                (false, true) => (0, buffer_size),
                (false, false) => (0, 0),
            };

        repetitions.set_bit_width(bit_width(max_repetition_level));
        definitions.set_bit_width(bit_width(max_definition_level));

        DataPageReader {
            page,
            remain: num_values,
            max_repetition_level,
            max_definition_level,
            column_index,
            repetitions: LevelReader::new(repetitions, repetition_buffer_size),
            definitions: LevelReader::new(definitions, definition_buffer_size),
        }
    }

    /// Swaps in new decoders and a new page for a fresh data page, without
    /// reallocating the level buffers.
    pub fn reset(&mut self, mut repetitions: RD, mut definitions: DD, num_values: usize, page: P) {
        repetitions.set_bit_width(bit_width(self.max_repetition_level));
        definitions.set_bit_width(bit_width(self.max_definition_level));
        self.page = page;
        self.remain = num_values;
        self.repetitions.reset(repetitions);
        self.definitions.reset(definitions);
    }

    /// Fills `out` with dense, level-tagged `Value`s, injecting nulls where
    /// the definition level indicates an absent value.
    ///
    /// Returns `Ok(0)` once the page is fully exhausted and nothing more
    /// was read this call; a caller pulling in a loop treats that as end
    /// of stream.
    pub fn read_values(&mut self, mut out: &mut [Value]) -> Result<usize> {
        let mut read = 0;

        while self.remain > 0 && !out.is_empty() {
            let mut num_values = self.remain.min(out.len());

            let rep: Vec<i8> = if self.max_repetition_level > 0 {
                let levels = self.repetitions.peek_levels().map_err(|e| {
                    e.in_context("reading parquet repetition level from data page")
                })?;
                num_values = num_values.min(levels.len());
                levels.to_vec()
            } else {
                Vec::new()
            };

            let def: Vec<i8> = if self.max_definition_level > 0 {
                let levels = self.definitions.peek_levels().map_err(|e| {
                    e.in_context("reading parquet definition level from data page")
                })?;
                num_values = num_values.min(levels.len());
                levels.to_vec()
            } else {
                Vec::new()
            };

            let rep = &rep[..rep.len().min(num_values)];
            let def = &def[..def.len().min(num_values)];

            let num_nulls = def
                .iter()
                .filter(|&&d| d != self.max_definition_level as i8)
                .count();

            let n = self
                .page
                .read_values(&mut out[..num_values - num_nulls])
                .map_err(|e| {
                    if e.is_eof() {
                        unexpected_eof_err!("reading parquet values from data page: {}", e)
                    } else {
                        e.in_context("reading parquet values from data page")
                    }
                })?;
            if n != num_values - num_nulls {
                return Err(unexpected_eof_err!(
                    "reading parquet values from data page: expected {} values, got {}",
                    num_values - num_nulls,
                    n
                ));
            }

            // Scatter dense values from out[0..n] into their level-indicated
            // positions, scanning right to left so no value is overwritten
            // before it has been read (spec.md section 4.6).
            if !def.is_empty() {
                let mut i = n;
                for j in (0..def.len()).rev() {
                    if def[j] != self.max_definition_level as i8 {
                        out[j] = Value::default();
                    } else {
                        i -= 1;
                        out[j] = out[i].clone();
                    }
                }
            }

            for (i, &lvl) in rep.iter().enumerate() {
                out[i].repetition_level = lvl as u8;
            }
            for (i, &lvl) in def.iter().enumerate() {
                out[i].definition_level = lvl as u8;
            }
            for v in out[..num_values].iter_mut() {
                v.set_column_index(self.column_index);
            }

            self.repetitions.discard_levels(rep.len());
            self.definitions.discard_levels(def.len());
            self.remain -= num_values;
            read += num_values;
            out = &mut out[num_values..];
        }

        Ok(read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Type;
    use crate::errors::{general_err, Result as PResult};

    struct FixedLevels {
        values: Vec<i8>,
        offset: usize,
    }

    impl Decoder for FixedLevels {
        fn decode_i8(&mut self, buffer: &mut [i8]) -> PResult<usize> {
            let remain = self.values.len() - self.offset;
            if remain == 0 {
                return Err(general_err!("eof"));
            }
            let n = buffer.len().min(remain);
            buffer[..n].copy_from_slice(&self.values[self.offset..self.offset + n]);
            self.offset += n;
            Ok(n)
        }
    }

    struct VecPage {
        values: Vec<i32>,
        offset: usize,
    }

    impl PageReader for VecPage {
        fn page_type(&self) -> Type {
            Type::Int32
        }

        fn read_values(&mut self, out: &mut [Value]) -> PResult<usize> {
            let n = (self.values.len() - self.offset).min(out.len());
            for i in 0..n {
                out[i] = Value::int32(self.values[self.offset + i]);
            }
            self.offset += n;
            Ok(n)
        }
    }

    fn empty_levels() -> FixedLevels {
        FixedLevels {
            values: vec![],
            offset: 0,
        }
    }

    // S2 from spec.md section 8: required column, no levels at all.
    #[test]
    fn required_column_with_no_levels() {
        let page = VecPage {
            values: vec![1, 2, 3, 4],
            offset: 0,
        };
        let mut reader =
            DataPageReader::new(empty_levels(), empty_levels(), 4, page, 0, 0, 0, 64);

        let mut out = vec![Value::default(); 4];
        let n = reader.read_values(&mut out).unwrap();
        assert_eq!(n, 4);
        for (i, v) in out.iter().enumerate() {
            assert_eq!(v.as_i32(), Some((i + 1) as i32));
            assert_eq!(v.column_index(), Some(0));
        }
    }

    // S3 from spec.md section 8: optional column, some nulls.
    #[test]
    fn optional_column_with_nulls() {
        let page = VecPage {
            values: vec![10, 20, 30],
            offset: 0,
        };
        // def levels: 1 means present (max=1), 0 means null.
        let definitions = FixedLevels {
            values: vec![1, 0, 1, 0, 1],
            offset: 0,
        };
        let mut reader = DataPageReader::new(empty_levels(), definitions, 5, page, 0, 1, 2, 64);

        let mut out = vec![Value::default(); 5];
        let n = reader.read_values(&mut out).unwrap();
        assert_eq!(n, 5);
        assert_eq!(out[0].as_i32(), Some(10));
        assert!(out[1].is_null());
        assert_eq!(out[2].as_i32(), Some(20));
        assert!(out[3].is_null());
        assert_eq!(out[4].as_i32(), Some(30));
        for v in &out {
            assert_eq!(v.column_index(), Some(2));
        }
        assert_eq!(out[1].definition_level, 0);
        assert_eq!(out[0].definition_level, 1);
    }

    // S4 from spec.md section 8: repeated optional column, rep + def levels.
    #[test]
    fn repeated_optional_with_rep_and_def() {
        let page = VecPage {
            values: vec![100, 200],
            offset: 0,
        };
        let definitions = FixedLevels {
            values: vec![2, 0, 2],
            offset: 0,
        };
        let repetitions = FixedLevels {
            values: vec![0, 0, 1],
            offset: 0,
        };
        let mut reader = DataPageReader::new(repetitions, definitions, 3, page, 1, 2, 0, 64);

        let mut out = vec![Value::default(); 3];
        let n = reader.read_values(&mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(out[0].as_i32(), Some(100));
        assert_eq!(out[0].repetition_level, 0);
        assert_eq!(out[0].definition_level, 2);
        assert!(out[1].is_null());
        assert_eq!(out[1].repetition_level, 0);
        assert_eq!(out[1].definition_level, 0);
        assert_eq!(out[2].as_i32(), Some(200));
        assert_eq!(out[2].repetition_level, 1);
        assert_eq!(out[2].definition_level, 2);
    }

    // S5 from spec.md section 8: the value page runs out mid-way through a
    // run that levels promised would be there -> UnexpectedEof.
    #[test]
    fn short_value_read_is_unexpected_eof() {
        let page = VecPage {
            values: vec![1],
            offset: 0,
        };
        let definitions = FixedLevels {
            values: vec![1, 1],
            offset: 0,
        };
        let mut reader = DataPageReader::new(empty_levels(), definitions, 2, page, 0, 1, 0, 64);

        let mut out = vec![Value::default(); 2];
        let err = reader.read_values(&mut out).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::ParquetError::UnexpectedEof(_)
        ));
    }

    #[test]
    fn exhausted_page_returns_zero_without_error() {
        let page = VecPage {
            values: vec![1, 2],
            offset: 0,
        };
        let mut reader =
            DataPageReader::new(empty_levels(), empty_levels(), 2, page, 0, 0, 0, 64);

        let mut out = vec![Value::default(); 2];
        assert_eq!(reader.read_values(&mut out).unwrap(), 2);
        let mut out2 = vec![Value::default(); 2];
        assert_eq!(reader.read_values(&mut out2).unwrap(), 0);
    }
}
