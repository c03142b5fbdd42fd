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

use super::{reject_dimensions, require_generic};
use crate::descriptor::TypeDescriptor;
use crate::engine::{ReadSession, TypeResolver, WriteSession};
use crate::error::{ContentError, Result, TypeError};
use crate::grammar;
use crate::value::Value;
use std::io::Read;

const TYPE_NAME: &str = "ENUM";

/// The generic part names exactly one enum type, with no nesting.
pub(super) fn create_type(generic_info: &str, resolver: &TypeResolver<'_>) -> Result<TypeDescriptor> {
    require_generic(TYPE_NAME, generic_info)?;
    let name = generic_info.trim();
    if name.contains(['<', '>', ',']) {
        return Err(TypeError::InvalidGenericInfo {
            generic_info: generic_info.to_owned(),
        }
        .into());
    }
    resolver.resolve_enum(name).map(TypeDescriptor::Enum)
}

pub(super) fn read<R: Read>(
    session: &mut ReadSession<'_, R>,
    end_key: &str,
    descriptor: &TypeDescriptor,
    dimension_info: &str,
) -> Result<Value> {
    let TypeDescriptor::Enum(enum_name) = descriptor else {
        return Err(TypeError::NotAnEnum {
            type_name: descriptor.type_info(),
        }
        .into());
    };
    reject_dimensions(TYPE_NAME, dimension_info)?;

    let text = grammar::read_content(session.stream())?;
    grammar::read_end_tag(session.stream(), end_key)?;
    let member = text.trim();
    session.resolver().check_enum_member(enum_name, member)?;
    Ok(Value::Enum(member.to_owned()))
}

pub(super) fn write(
    session: &mut WriteSession<'_>,
    depth: usize,
    tag_key: &str,
    type_info: Option<&str>,
    value: &Value,
) -> Result<()> {
    let Value::Enum(member) = value else {
        return Err(ContentError::mismatch("an enum member", value.kind_name()));
    };
    session.write_inline(depth, tag_key, type_info, &grammar::escape(member))
}
