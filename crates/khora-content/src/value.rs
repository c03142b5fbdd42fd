// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The untyped value tree that flows between plugins and the text engine.

use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::error::{ContentError, Result, TypeError, WriterError};
use std::fmt;

/// A single scalar value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub enum Scalar {
    Boolean(bool),
    Byte(u8),
    SByte(i8),
    Char(char),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
}

impl Scalar {
    /// The primitive kind of this scalar.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Scalar::Boolean(_) => PrimitiveKind::Boolean,
            Scalar::Byte(_) => PrimitiveKind::Byte,
            Scalar::SByte(_) => PrimitiveKind::SByte,
            Scalar::Char(_) => PrimitiveKind::Char,
            Scalar::Int16(_) => PrimitiveKind::Int16,
            Scalar::UInt16(_) => PrimitiveKind::UInt16,
            Scalar::Int32(_) => PrimitiveKind::Int32,
            Scalar::UInt32(_) => PrimitiveKind::UInt32,
            Scalar::Int64(_) => PrimitiveKind::Int64,
            Scalar::UInt64(_) => PrimitiveKind::UInt64,
            Scalar::Single(_) => PrimitiveKind::Single,
            Scalar::Double(_) => PrimitiveKind::Double,
        }
    }

    /// Converts unescaped value text into a scalar of the given kind.
    ///
    /// Surrounding whitespace is ignored except for `CHAR`, whose text must
    /// be exactly one character. Booleans are matched case-insensitively.
    pub fn parse(kind: PrimitiveKind, text: &str) -> Result<Self> {
        fn number<T: std::str::FromStr>(kind: PrimitiveKind, text: &str) -> Result<T> {
            text.trim().parse::<T>().map_err(|_| conversion(kind, text))
        }

        Ok(match kind {
            PrimitiveKind::Boolean => {
                let trimmed = text.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Scalar::Boolean(true)
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Scalar::Boolean(false)
                } else {
                    return Err(conversion(kind, text));
                }
            }
            PrimitiveKind::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Scalar::Char(c),
                    _ => return Err(conversion(kind, text)),
                }
            }
            PrimitiveKind::Byte => Scalar::Byte(number(kind, text)?),
            PrimitiveKind::SByte => Scalar::SByte(number(kind, text)?),
            PrimitiveKind::Int16 => Scalar::Int16(number(kind, text)?),
            PrimitiveKind::UInt16 => Scalar::UInt16(number(kind, text)?),
            PrimitiveKind::Int32 => Scalar::Int32(number(kind, text)?),
            PrimitiveKind::UInt32 => Scalar::UInt32(number(kind, text)?),
            PrimitiveKind::Int64 => Scalar::Int64(number(kind, text)?),
            PrimitiveKind::UInt64 => Scalar::UInt64(number(kind, text)?),
            PrimitiveKind::Single => Scalar::Single(number(kind, text)?),
            PrimitiveKind::Double => Scalar::Double(number(kind, text)?),
        })
    }
}

fn conversion(kind: PrimitiveKind, text: &str) -> ContentError {
    TypeError::Conversion {
        type_name: kind.type_name().to_owned(),
        text: text.to_owned(),
    }
    .into()
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Boolean(v) => v.fmt(f),
            Scalar::Byte(v) => v.fmt(f),
            Scalar::SByte(v) => v.fmt(f),
            Scalar::Char(v) => v.fmt(f),
            Scalar::Int16(v) => v.fmt(f),
            Scalar::UInt16(v) => v.fmt(f),
            Scalar::Int32(v) => v.fmt(f),
            Scalar::UInt32(v) => v.fmt(f),
            Scalar::Int64(v) => v.fmt(f),
            Scalar::UInt64(v) => v.fmt(f),
            Scalar::Single(v) => v.fmt(f),
            Scalar::Double(v) => v.fmt(f),
        }
    }
}

/// A value of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A scalar.
    Primitive(Scalar),
    /// A string.
    String(String),
    /// An enum, by member name.
    Enum(String),
    /// A multi-dimensional array.
    Array(ArrayValue),
    /// A list, in order.
    List(Vec<Value>),
    /// Dictionary entries, in document order.
    Dictionary(Vec<(Value, Value)>),
    /// A custom object as its parsed fields.
    Object(ObjectValue),
}

impl Value {
    /// A short name of the variant, used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Primitive(_) => "a primitive",
            Value::String(_) => "a string",
            Value::Enum(_) => "an enum member",
            Value::Array(_) => "an array",
            Value::List(_) => "a list",
            Value::Dictionary(_) => "a dictionary",
            Value::Object(_) => "an object",
        }
    }

    /// Unwraps an object value.
    pub fn into_object(self) -> Result<ObjectValue> {
        match self {
            Value::Object(object) => Ok(object),
            other => Err(ContentError::mismatch("an object", other.kind_name())),
        }
    }
}

/// A row-major multi-dimensional array.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    /// The size of each dimension, outermost first.
    pub dims: Vec<usize>,
    /// The items in row-major order.
    pub items: Vec<Value>,
}

impl ArrayValue {
    /// Creates an array, checking that `items` fills the shape exactly.
    pub fn new(dims: Vec<usize>, items: Vec<Value>) -> Result<Self> {
        let array = Self { dims, items };
        array.check_shape()?;
        Ok(array)
    }

    /// Fails when the item count differs from the product of the dimensions.
    pub fn check_shape(&self) -> Result<()> {
        let expected = self
            .dims
            .iter()
            .try_fold(1usize, |total, dim| total.checked_mul(*dim));
        if self.dims.is_empty() || expected != Some(self.items.len()) {
            return Err(WriterError::ShapeMismatch {
                dims: self.dims.clone(),
                len: self.items.len(),
            }
            .into());
        }
        Ok(())
    }
}

/// One entry of an object: a key, its declared type and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The unique key inside the owning object.
    pub key: String,
    /// The declared type.
    pub descriptor: TypeDescriptor,
    /// The value.
    pub value: Value,
}

/// A custom object as an ordered list of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    /// The registered type name.
    pub type_name: String,
    /// The fields in insertion (or document) order.
    pub fields: Vec<Field>,
}

impl ObjectValue {
    /// Creates an object without fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Looks up a field by key.
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.key == key)
    }
}
