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

use super::{reject_dimensions, reject_generic};
use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::engine::{ReadSession, WriteSession};
use crate::error::{ContentError, Result};
use crate::grammar;
use crate::value::{Scalar, Value};
use std::io::Read;

pub(super) fn create_type(kind: PrimitiveKind, generic_info: &str) -> Result<TypeDescriptor> {
    reject_generic(kind.type_name(), generic_info)?;
    Ok(TypeDescriptor::Primitive(kind))
}

pub(super) fn read<R: Read>(
    session: &mut ReadSession<'_, R>,
    end_key: &str,
    kind: PrimitiveKind,
    dimension_info: &str,
) -> Result<Value> {
    reject_dimensions(kind.type_name(), dimension_info)?;
    let text = grammar::read_content(session.stream())?;
    grammar::read_end_tag(session.stream(), end_key)?;
    Scalar::parse(kind, &text).map(Value::Primitive)
}

pub(super) fn write(
    session: &mut WriteSession<'_>,
    depth: usize,
    tag_key: &str,
    type_info: Option<&str>,
    kind: PrimitiveKind,
    value: &Value,
) -> Result<()> {
    let scalar = match value {
        Value::Primitive(scalar) if scalar.kind() == kind => scalar,
        Value::Primitive(scalar) => {
            return Err(ContentError::mismatch(kind.type_name(), scalar.kind().type_name()))
        }
        other => return Err(ContentError::mismatch(kind.type_name(), other.kind_name())),
    };
    // Only CHAR can produce a bracket or a backslash.
    let text = grammar::escape(&scalar.to_string());
    session.write_inline(depth, tag_key, type_info, &text)
}
