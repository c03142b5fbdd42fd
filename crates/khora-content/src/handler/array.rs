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
use crate::error::{ContentError, ReaderError, Result, TypeError, WriterError};
use crate::grammar;
use crate::value::{ArrayValue, Value};
use std::io::Read;

const TYPE_NAME: &str = "ARRAY";

pub(super) fn create_type(generic_info: &str, resolver: &TypeResolver<'_>) -> Result<TypeDescriptor> {
    require_generic(TYPE_NAME, generic_info)?;
    resolver.parse_descriptor(generic_info).map(TypeDescriptor::array)
}

pub(super) fn read<R: Read>(
    session: &mut ReadSession<'_, R>,
    end_key: &str,
    descriptor: &TypeDescriptor,
    dimension_info: &str,
) -> Result<Value> {
    let TypeDescriptor::Array(element) = descriptor else {
        return Err(ContentError::mismatch(
            format!("{TYPE_NAME} type info"),
            descriptor.type_info(),
        ));
    };
    let dims = grammar::parse_dimensions(dimension_info)?;
    let total = dims
        .iter()
        .try_fold(1usize, |total, dim| total.checked_mul(*dim))
        .ok_or_else(|| TypeError::InvalidDimensions {
            dimension_info: dimension_info.to_owned(),
        })?;

    let mut items = Vec::with_capacity(total.min(MAX_PREALLOCATION));
    read_level(session, element, &dims, &mut items)?;
    session.read_close(end_key)?;
    Ok(Value::Array(ArrayValue { dims, items }))
}

/// Every dimension but the last is wrapped in `[:]`..`[/]` groups.
fn read_level<R: Read>(
    session: &mut ReadSession<'_, R>,
    element: &TypeDescriptor,
    dims: &[usize],
    items: &mut Vec<Value>,
) -> Result<()> {
    match dims {
        [] => Ok(()),
        [len] => {
            for _ in 0..*len {
                items.push(session.read_element(element)?);
            }
            Ok(())
        }
        [len, inner @ ..] => {
            for _ in 0..*len {
                let tag = grammar::read_element_start_tag(session.stream())?;
                if !tag.raw_key.is_empty() || !tag.dimension_info.is_empty() {
                    return Err(ReaderError::MalformedElementTag {
                        tag: format!("{}:{}", tag.raw_key, tag.dimension_info),
                    }
                    .into());
                }
                read_level(session, element, inner, items)?;
                session.read_close("")?;
            }
            Ok(())
        }
    }
}

pub(super) fn write(
    session: &mut WriteSession<'_>,
    depth: usize,
    tag_key: &str,
    type_info: Option<&str>,
    descriptor: &TypeDescriptor,
    value: &Value,
) -> Result<()> {
    let (TypeDescriptor::Array(element), Value::Array(array)) = (descriptor, value) else {
        return Err(shape_error(descriptor, value));
    };
    array.check_shape()?;

    let dimension_info = array
        .dims
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",");
    session.open(depth, tag_key, type_info, &dimension_info)?;
    write_level(session, depth + 1, element, &array.dims, &array.items)?;
    session.close(depth, tag_key)
}

fn write_level(
    session: &mut WriteSession<'_>,
    depth: usize,
    element: &TypeDescriptor,
    dims: &[usize],
    items: &[Value],
) -> Result<()> {
    match dims {
        [] => Ok(()),
        [_] => {
            for item in items {
                session.write_entry(depth, "", false, element, item)?;
            }
            Ok(())
        }
        [0, ..] => Ok(()),
        [len, inner @ ..] => {
            let stride = inner
                .iter()
                .try_fold(1usize, |total, dim| total.checked_mul(*dim))
                .ok_or_else(|| WriterError::ShapeMismatch {
                    dims: dims.to_vec(),
                    len: items.len(),
                })?;
            for index in 0..*len {
                session.open(depth, "", None, "")?;
                let group = &items[index * stride..(index + 1) * stride];
                write_level(session, depth + 1, element, inner, group)?;
                session.close(depth, "")?;
            }
            Ok(())
        }
    }
}
