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

//! Turns textual type info back into [`TypeDescriptor`]s.

use crate::descriptor::TypeDescriptor;
use crate::error::{ReaderError, Result, TypeError};
use crate::grammar::{self, FieldTag};
use crate::registry::ContentRegistry;

/// Resolves type names found in a document against a registry.
///
/// In strict mode every object name must have a registered reader and every
/// enum member must exist. Otherwise unknown names are kept as written, which
/// lets a document be parsed and re-emitted without its Rust types.
#[derive(Clone, Copy)]
pub struct TypeResolver<'r> {
    registry: &'r ContentRegistry,
    strict: bool,
}

impl<'r> TypeResolver<'r> {
    /// Creates a resolver over `registry`.
    pub fn new(registry: &'r ContentRegistry, strict: bool) -> Self {
        Self { registry, strict }
    }

    /// The registry names are resolved against.
    pub fn registry(&self) -> &'r ContentRegistry {
        self.registry
    }

    /// Returns `true` if unknown names are errors.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parses a complete type info string such as `LIST<ENUM<demo::Color>>`.
    pub fn parse_descriptor(&self, type_info: &str) -> Result<TypeDescriptor> {
        let (base, generic) = grammar::split_type_info(type_info)?;
        self.resolve(base, generic)
    }

    /// Resolves the type of a field start tag.
    pub fn resolve_field(&self, tag: &FieldTag) -> Result<TypeDescriptor> {
        self.resolve(&tag.base_type_info, &tag.generic_type_info)
    }

    fn resolve(&self, base: &str, generic: &str) -> Result<TypeDescriptor> {
        if let Some(handler) = self.registry.handler(base) {
            return handler.create_type(generic, self);
        }
        if !generic.is_empty() {
            return Err(TypeError::UnexpectedTypeInfo {
                type_name: base.to_owned(),
                extra: format!("<{generic}>"),
            }
            .into());
        }
        self.resolve_object(base)
    }

    /// Resolves a custom object name, probing known namespaces for bare names.
    pub fn resolve_object(&self, name: &str) -> Result<TypeDescriptor> {
        match self.registry.resolve_object_name(name) {
            Some(resolved) => {
                if self.strict && !self.registry.has_reader_for(resolved) {
                    return Err(TypeError::NoReader {
                        type_name: resolved.to_owned(),
                    }
                    .into());
                }
                Ok(TypeDescriptor::Object(resolved.to_owned()))
            }
            None if self.strict => Err(TypeError::Unresolved {
                type_info: name.to_owned(),
            }
            .into()),
            None => Ok(TypeDescriptor::Object(name.to_owned())),
        }
    }

    /// Resolves the name inside `ENUM<..>`.
    pub fn resolve_enum(&self, name: &str) -> Result<String> {
        if let Some(resolved) = self.registry.resolve_enum_name(name) {
            return Ok(resolved.to_owned());
        }
        if let Some(object) = self.registry.resolve_object_name(name) {
            return Err(TypeError::NotAnEnum {
                type_name: object.to_owned(),
            }
            .into());
        }
        if self.strict {
            return Err(TypeError::Unresolved {
                type_info: name.to_owned(),
            }
            .into());
        }
        Ok(name.to_owned())
    }

    /// Requires `member` to name a member of the enum, matching case.
    pub fn check_enum_member(&self, enum_name: &str, member: &str) -> Result<()> {
        match self.registry.enum_members(enum_name) {
            Some(members) if members.contains(&member) => Ok(()),
            None if !self.strict => Ok(()),
            _ => Err(ReaderError::UnknownEnumMember {
                enum_name: enum_name.to_owned(),
                member: member.to_owned(),
            }
            .into()),
        }
    }
}
