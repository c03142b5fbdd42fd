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

//! Type handlers: one read/write strategy per kind of value.
//!
//! The set of handlers is closed. A value is routed to its handler once,
//! through [`TypeHandler::classify`], instead of probing its type at every
//! step. Custom objects have no handler; the engine recurses into them.

mod array;
mod dictionary;
mod enumeration;
mod list;
mod primitive;
mod string;

use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::engine::{ReadSession, TypeResolver, WriteSession};
use crate::error::{ContentError, Result, TypeError};
use crate::value::Value;
use std::io::Read;

pub(crate) use dictionary::check_key_type as check_dictionary_key;

/// The strategy for one kind of value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeHandler {
    /// One of the scalar types.
    Primitive(PrimitiveKind),
    /// `STRING`
    String,
    /// `ENUM<Name>`
    Enum,
    /// `ARRAY<Element>(d1,..,dN)`
    Array,
    /// `LIST<Element>(count)`
    List,
    /// `DICTIONARY<Key, Value>(count)`
    Dictionary,
}

impl TypeHandler {
    /// Every built-in handler, primitives first.
    pub fn builtin() -> impl Iterator<Item = TypeHandler> {
        PrimitiveKind::ALL
            .into_iter()
            .map(TypeHandler::Primitive)
            .chain([
                TypeHandler::String,
                TypeHandler::Enum,
                TypeHandler::Array,
                TypeHandler::List,
                TypeHandler::Dictionary,
            ])
    }

    /// The uppercase name this handler is registered under.
    pub fn type_name(self) -> &'static str {
        match self {
            TypeHandler::Primitive(kind) => kind.type_name(),
            TypeHandler::String => "STRING",
            TypeHandler::Enum => "ENUM",
            TypeHandler::Array => "ARRAY",
            TypeHandler::List => "LIST",
            TypeHandler::Dictionary => "DICTIONARY",
        }
    }

    /// Primitive handlers take neither generic nor dimension info.
    pub fn is_primitive(self) -> bool {
        matches!(self, TypeHandler::Primitive(_) | TypeHandler::String)
    }

    /// Selects the handler for a descriptor. Objects have none.
    pub fn classify(descriptor: &TypeDescriptor) -> Option<TypeHandler> {
        match descriptor {
            TypeDescriptor::Primitive(kind) => Some(TypeHandler::Primitive(*kind)),
            TypeDescriptor::String => Some(TypeHandler::String),
            TypeDescriptor::Enum(_) => Some(TypeHandler::Enum),
            TypeDescriptor::Array(_) => Some(TypeHandler::Array),
            TypeDescriptor::List(_) => Some(TypeHandler::List),
            TypeDescriptor::Dictionary(..) => Some(TypeHandler::Dictionary),
            TypeDescriptor::Object(_) => None,
        }
    }

    /// Builds a descriptor from the text between `<` and `>`.
    pub fn create_type(self, generic_info: &str, resolver: &TypeResolver<'_>) -> Result<TypeDescriptor> {
        match self {
            TypeHandler::Primitive(kind) => primitive::create_type(kind, generic_info),
            TypeHandler::String => string::create_type(generic_info),
            TypeHandler::Enum => enumeration::create_type(generic_info, resolver),
            TypeHandler::Array => array::create_type(generic_info, resolver),
            TypeHandler::List => list::create_type(generic_info, resolver),
            TypeHandler::Dictionary => dictionary::create_type(generic_info, resolver),
        }
    }

    /// The text between `<` and `>` for a descriptor of this handler.
    ///
    /// Empty for primitive handlers.
    pub fn create_type_info(self, descriptor: &TypeDescriptor) -> String {
        match descriptor {
            TypeDescriptor::Enum(name) => name.clone(),
            TypeDescriptor::Array(element) | TypeDescriptor::List(element) => element.type_info(),
            TypeDescriptor::Dictionary(key, value) => {
                format!("{}, {}", key.type_info(), value.type_info())
            }
            _ => String::new(),
        }
    }

    /// Reads a value whose start tag has just been consumed, through the
    /// end tag `[/end_key]`.
    pub fn read<R: Read>(
        self,
        session: &mut ReadSession<'_, R>,
        end_key: &str,
        descriptor: &TypeDescriptor,
        dimension_info: &str,
    ) -> Result<Value> {
        match self {
            TypeHandler::Primitive(kind) => primitive::read(session, end_key, kind, dimension_info),
            TypeHandler::String => string::read(session, end_key, dimension_info),
            TypeHandler::Enum => enumeration::read(session, end_key, descriptor, dimension_info),
            TypeHandler::Array => array::read(session, end_key, descriptor, dimension_info),
            TypeHandler::List => list::read(session, end_key, descriptor, dimension_info),
            TypeHandler::Dictionary => {
                dictionary::read(session, end_key, descriptor, dimension_info)
            }
        }
    }

    /// Writes a value under `tag_key`.
    ///
    /// With `use_type_info` unset the type info is left out of the start tag,
    /// as for collection elements whose type is known from their container.
    pub fn write(
        self,
        session: &mut WriteSession<'_>,
        depth: usize,
        tag_key: &str,
        use_type_info: bool,
        descriptor: &TypeDescriptor,
        value: &Value,
    ) -> Result<()> {
        let type_info = use_type_info.then(|| descriptor.type_info());
        let type_info = type_info.as_deref();
        match self {
            TypeHandler::Primitive(kind) => {
                primitive::write(session, depth, tag_key, type_info, kind, value)
            }
            TypeHandler::String => string::write(session, depth, tag_key, type_info, value),
            TypeHandler::Enum => enumeration::write(session, depth, tag_key, type_info, value),
            TypeHandler::Array => {
                array::write(session, depth, tag_key, type_info, descriptor, value)
            }
            TypeHandler::List => list::write(session, depth, tag_key, type_info, descriptor, value),
            TypeHandler::Dictionary => {
                dictionary::write(session, depth, tag_key, type_info, descriptor, value)
            }
        }
    }
}

fn reject_generic(type_name: &str, generic_info: &str) -> Result<()> {
    if !generic_info.is_empty() {
        return Err(TypeError::UnexpectedTypeInfo {
            type_name: type_name.to_owned(),
            extra: format!("<{generic_info}>"),
        }
        .into());
    }
    Ok(())
}

fn reject_dimensions(type_name: &str, dimension_info: &str) -> Result<()> {
    if !dimension_info.is_empty() {
        return Err(TypeError::UnexpectedTypeInfo {
            type_name: type_name.to_owned(),
            extra: format!("({dimension_info})"),
        }
        .into());
    }
    Ok(())
}

fn require_generic(type_name: &str, generic_info: &str) -> Result<()> {
    if generic_info.trim().is_empty() {
        return Err(TypeError::MissingGenericInfo {
            type_name: type_name.to_owned(),
        }
        .into());
    }
    Ok(())
}

fn shape_error(descriptor: &TypeDescriptor, value: &Value) -> ContentError {
    ContentError::mismatch(
        format!("a value of type {descriptor}"),
        value.kind_name(),
    )
}
