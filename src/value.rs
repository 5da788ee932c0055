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

//! `Value`, the tagged union every page reader ultimately hands back to its
//! caller (spec.md section 3).

use crate::data_type::{ByteArray, Int96};

/// The physical payload carried by a [`Value`].
///
/// `Null` is the first variant and the `#[default]`, so `Payload::default()`
/// (and therefore `Value::default()`) is always the null representation --
/// spec.md's invariant that "a default-constructed `Value` is distinguishable
/// from any real value" falls out of ordinary `derive(Default)` here rather
/// than needing a hand-rolled zero check.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Payload {
    #[default]
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Int96(Int96),
    Float(f32),
    Double(f64),
    ByteArray(ByteArray),
    FixedLenByteArray(ByteArray),
}

/// A single decoded value plus its repetition level, definition level, and
/// owning column index.
///
/// `column_index` is stored bit-inverted, grounded in
/// `examples/original_source/page_reader.go` (`columnIndex: ^columnIndex`)
/// and `column_reader_go18.go` (same trick): a freshly zeroed `Value` has
/// `column_index == 0`, which is not a valid bit-inverted index for any real
/// column (column 0 is stored as `!0`), so the field alone tells a fresh
/// slot apart from an assigned one even before `payload` is consulted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Value {
    payload: Payload,
    pub repetition_level: u8,
    pub definition_level: u8,
    column_index: i16,
}

impl Value {
    fn with_payload(payload: Payload) -> Self {
        Value {
            payload,
            repetition_level: 0,
            definition_level: 0,
            column_index: 0,
        }
    }

    pub fn boolean(v: bool) -> Self {
        Self::with_payload(Payload::Boolean(v))
    }

    pub fn int32(v: i32) -> Self {
        Self::with_payload(Payload::Int32(v))
    }

    pub fn int64(v: i64) -> Self {
        Self::with_payload(Payload::Int64(v))
    }

    pub fn int96(v: Int96) -> Self {
        Self::with_payload(Payload::Int96(v))
    }

    pub fn float(v: f32) -> Self {
        Self::with_payload(Payload::Float(v))
    }

    pub fn double(v: f64) -> Self {
        Self::with_payload(Payload::Double(v))
    }

    pub fn byte_array(v: ByteArray) -> Self {
        Self::with_payload(Payload::ByteArray(v))
    }

    pub fn fixed_len_byte_array(v: ByteArray) -> Self {
        Self::with_payload(Payload::FixedLenByteArray(v))
    }

    /// True if this value carries no payload (a null slot, or a never-touched
    /// default-constructed `Value`).
    pub fn is_null(&self) -> bool {
        matches!(self.payload, Payload::Null)
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the column index this value belongs to, or `None` if it was
    /// never assigned one.
    pub fn column_index(&self) -> Option<i16> {
        if self.column_index == 0 {
            None
        } else {
            Some(!self.column_index)
        }
    }

    /// Assigns the owning column index, storing it bit-inverted internally.
    pub fn set_column_index(&mut self, index: i16) {
        self.column_index = !index;
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self.payload {
            Payload::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self.payload {
            Payload::Int32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.payload {
            Payload::Int64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&ByteArray> {
        match &self.payload {
            Payload::ByteArray(v) | Payload::FixedLenByteArray(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_value_is_null_and_unassigned() {
        let v = Value::default();
        assert!(v.is_null());
        assert_eq!(v.column_index(), None);
        assert_eq!(v.repetition_level, 0);
        assert_eq!(v.definition_level, 0);
    }

    #[test]
    fn column_index_round_trips_through_bit_inversion() {
        let mut v = Value::int32(42);
        v.set_column_index(0);
        assert_eq!(v.column_index(), Some(0));

        v.set_column_index(7);
        assert_eq!(v.column_index(), Some(7));
    }

    #[test]
    fn typed_constructors_are_distinguishable_from_null() {
        assert!(!Value::boolean(false).is_null());
        assert!(!Value::int32(0).is_null());
        assert_eq!(Value::int32(5).as_i32(), Some(5));
        assert_eq!(Value::int64(5).as_i32(), None);
    }
}
