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

//! Runtime descriptions of the types a document can hold.
//!
//! A [`TypeDescriptor`] is the typed counterpart of the textual type info
//! carried by a tag (`LIST<DICTIONARY<STRING, INT32>>`). It is produced by
//! the [`Content`](crate::Content) implementations on the write side and by
//! the [`TypeResolver`](crate::engine::TypeResolver) on the read side.

use crate::handler::TypeHandler;
use std::fmt;

/// The fixed set of scalar types with their own handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `bool`
    Boolean,
    /// `u8`
    Byte,
    /// `i8`
    SByte,
    /// `char`
    Char,
    /// `i16`
    Int16,
    /// `u16`
    UInt16,
    /// `i32`
    Int32,
    /// `u32`
    UInt32,
    /// `i64`
    Int64,
    /// `u64`
    UInt64,
    /// `f32`
    Single,
    /// `f64`
    Double,
}

impl PrimitiveKind {
    /// Every primitive kind, in registration order.
    pub const ALL: [PrimitiveKind; 12] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::SByte,
        PrimitiveKind::Char,
        PrimitiveKind::Int16,
        PrimitiveKind::UInt16,
        PrimitiveKind::Int32,
        PrimitiveKind::UInt32,
        PrimitiveKind::Int64,
        PrimitiveKind::UInt64,
        PrimitiveKind::Single,
        PrimitiveKind::Double,
    ];

    /// The uppercase name used in tags.
    pub const fn type_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "BOOLEAN",
            PrimitiveKind::Byte => "BYTE",
            PrimitiveKind::SByte => "SBYTE",
            PrimitiveKind::Char => "CHAR",
            PrimitiveKind::Int16 => "INT16",
            PrimitiveKind::UInt16 => "UINT16",
            PrimitiveKind::Int32 => "INT32",
            PrimitiveKind::UInt32 => "UINT32",
            PrimitiveKind::Int64 => "INT64",
            PrimitiveKind::UInt64 => "UINT64",
            PrimitiveKind::Single => "SINGLE",
            PrimitiveKind::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// The declared type of a field, element or dictionary key.
///
/// Enum and object variants carry the registered type name; container
/// variants carry their element descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// One of the scalar types.
    Primitive(PrimitiveKind),
    /// A string, escaped on output.
    String,
    /// A registered enum, by name.
    Enum(String),
    /// A multi-dimensional array.
    Array(Box<TypeDescriptor>),
    /// A single-dimension growable list.
    List(Box<TypeDescriptor>),
    /// A dictionary whose key descriptor must be primitive.
    Dictionary(Box<TypeDescriptor>, Box<TypeDescriptor>),
    /// A custom object, by registered name.
    Object(String),
}

impl TypeDescriptor {
    /// Creates an `ARRAY<element>` descriptor.
    pub fn array(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(element))
    }

    /// Creates a `LIST<element>` descriptor.
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    /// Creates a `DICTIONARY<key, value>` descriptor.
    pub fn dictionary(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Dictionary(Box::new(key), Box::new(value))
    }

    /// Returns `true` for primitives and strings, the only valid dictionary keys.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeDescriptor::Primitive(_) | TypeDescriptor::String)
    }

    /// Returns `true` for custom objects.
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, TypeDescriptor::Object(_))
    }

    /// The full textual type info, as written after the key in a start tag.
    pub fn type_info(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match TypeHandler::classify(self) {
            Some(handler) if handler.is_primitive() => f.write_str(handler.type_name()),
            Some(handler) => write!(
                f,
                "{}<{}>",
                handler.type_name(),
                handler.create_type_info(self)
            ),
            None => match self {
                TypeDescriptor::Object(name) => f.write_str(name),
                other => write!(f, "{other:?}"),
            },
        }
    }
}
