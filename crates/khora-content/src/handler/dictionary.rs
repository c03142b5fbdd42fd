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

use super::list::MAX_PREALLOCATION;
use super::{require_generic, shape_error};
use crate::descriptor::TypeDescriptor;
use crate::engine::{ReadSession, TypeResolver, WriteSession};
use crate::error::{ContentError, ReaderError, Result, TypeError};
use crate::grammar;
use crate::value::{Scalar, Value};
use std::collections::HashSet;
use std::io::Read;

const TYPE_NAME: &str = "DICTIONARY";

pub(super) fn create_type(generic_info: &str, resolver: &TypeResolver<'_>) -> Result<TypeDescriptor> {
    require_generic(TYPE_NAME, generic_info)?;
    let (key_info, value_info) = grammar::split_key_value(generic_info)?;
    let key = resolver.parse_descriptor(key_info)?;
    check_key_type(&key)?;
    let value = resolver.parse_descriptor(value_info)?;
    Ok(TypeDescriptor::dictionary(key, value))
}

/// Entry keys are written as tag text, so only primitives qualify.
pub(crate) fn check_key_type(key: &TypeDescriptor) -> Result<()> {
    if !key.is_primitive() {
        return Err(TypeError::UnsupportedKeyType {
            type_info: key.type_info(),
        }
        .into());
    }
    Ok(())
}

fn parse_key(descriptor: &TypeDescriptor, text: &str) -> Result<Value> {
    match descriptor {
        TypeDescriptor::Primitive(kind) => Scalar::parse(*kind, text).map(Value::Primitive),
        _ => Ok(Value::String(text.to_owned())),
    }
}

fn key_text(key: &Value) -> Result<String> {
    match key {
        Value::Primitive(scalar) => Ok(scalar.to_string()),
        Value::String(text) => Ok(text.clone()),
        other => Err(ContentError::mismatch("a primitive key", other.kind_name())),
    }
}

pub(super) fn read<R: Read>(
    session: &mut ReadSession<'_, R>,
    end_key: &str,
    descriptor: &TypeDescriptor,
    dimension_info: &str,
) -> Result<Value> {
    let TypeDescriptor::Dictionary(key_type, value_type) = descriptor else {
        return Err(ContentError::mismatch(
            format!("{TYPE_NAME} type info"),
            descriptor.type_info(),
        ));
    };
    check_key_type(key_type)?;
    let count = grammar::parse_count(dimension_info)?;

    let mut entries = Vec::with_capacity(count.min(MAX_PREALLOCATION));
    let mut seen = HashSet::with_capacity(count.min(MAX_PREALLOCATION));
    for _ in 0..count {
        let tag = grammar::read_element_start_tag(session.stream())?;
        let key = parse_key(key_type, &tag.key)?;
        if !seen.insert(key_text(&key)?) {
            return Err(ReaderError::DuplicateEntry { key: tag.key }.into());
        }
        let value = session.read_entry(&tag.raw_key, value_type, &tag.dimension_info)?;
        entries.push((key, value));
    }
    session.read_close(end_key)?;
    Ok(Value::Dictionary(entries))
}

pub(super) fn write(
    session: &mut WriteSession<'_>,
    depth: usize,
    tag_key: &str,
    type_info: Option<&str>,
    descriptor: &TypeDescriptor,
    value: &Value,
) -> Result<()> {
    let TypeDescriptor::Dictionary(key_type, value_type) = descriptor else {
        return Err(shape_error(descriptor, value));
    };
    check_key_type(key_type)?;
    let Value::Dictionary(entries) = value else {
        return Err(shape_error(descriptor, value));
    };

    session.open(depth, tag_key, type_info, &entries.len().to_string())?;
    for (key, value) in entries {
        let entry_key = grammar::escape_key(&key_text(key)?)?;
        session.write_entry(depth + 1, &entry_key, false, value_type, value)?;
    }
    session.close(depth, tag_key)
}
