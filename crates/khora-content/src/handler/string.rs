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
use crate::descriptor::TypeDescriptor;
use crate::engine::{ReadSession, WriteSession};
use crate::error::{ContentError, Result};
use crate::grammar;
use crate::value::Value;
use std::io::Read;

const TYPE_NAME: &str = "STRING";

pub(super) fn create_type(generic_info: &str) -> Result<TypeDescriptor> {
    reject_generic(TYPE_NAME, generic_info)?;
    Ok(TypeDescriptor::String)
}

pub(super) fn read<R: Read>(
    session: &mut ReadSession<'_, R>,
    end_key: &str,
    dimension_info: &str,
) -> Result<Value> {
    reject_dimensions(TYPE_NAME, dimension_info)?;
    let text = grammar::read_content(session.stream())?;
    grammar::read_end_tag(session.stream(), end_key)?;
    Ok(Value::String(text))
}

pub(super) fn write(
    session: &mut WriteSession<'_>,
    depth: usize,
    tag_key: &str,
    type_info: Option<&str>,
    value: &Value,
) -> Result<()> {
    let Value::String(text) = value else {
        return Err(ContentError::mismatch("a string", value.kind_name()));
    };
    session.write_inline(depth, tag_key, type_info, &grammar::escape(text))
}
