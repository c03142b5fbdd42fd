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

use super::{require_generic, shape_error};
use crate::descriptor::TypeDescriptor;
use crate::engine::{ReadSession, TypeResolver, WriteSession};
use crate::error::{ContentError, Result};
use crate::grammar;
use crate::value::Value;
use std::io::Read;

const TYPE_NAME: &str = "LIST";

/// Upper bound on pre-allocation driven by a count read from the document.
pub(super) const MAX_PREALLOCATION: usize = 1024;

pub(super) fn create_type(generic_info: &str, resolver: &TypeResolver<'_>) -> Result<TypeDescriptor> {
    require_generic(TYPE_NAME, generic_info)?;
    resolver.parse_descriptor(generic_info).map(TypeDescriptor::list)
}

pub(super) fn read<R: Read>(
    session: &mut ReadSession<'_, R>,
    end_key: &str,
    descriptor: &TypeDescriptor,
    dimension_info: &str,
) -> Result<Value> {
    let TypeDescriptor::List(element) = descriptor else {
        return Err(ContentError::mismatch(
            format!("{TYPE_NAME} type info"),
            descriptor.type_info(),
        ));
    };
    let count = grammar::parse_count(dimension_info)?;

    let mut items = Vec::with_capacity(count.min(MAX_PREALLOCATION));
    for _ in 0..count {
        items.push(session.read_element(element)?);
    }
    session.read_close(end_key)?;
    Ok(Value::List(items))
}

pub(super) fn write(
    session: &mut WriteSession<'_>,
    depth: usize,
    tag_key: &str,
    type_info: Option<&str>,
    descriptor: &TypeDescriptor,
    value: &Value,
) -> Result<()> {
    let (TypeDescriptor::List(element), Value::List(items)) = (descriptor, value) else {
        return Err(shape_error(descriptor, value));
    };

    session.open(depth, tag_key, type_info, &items.len().to_string())?;
    for item in items {
        session.write_entry(depth + 1, "", false, element, item)?;
    }
    session.close(depth, tag_key)
}
