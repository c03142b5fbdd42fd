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

use super::TypeResolver;
use crate::context::ContentContext;
use crate::descriptor::TypeDescriptor;
use crate::error::{ReaderError, Result, TypeError};
use crate::grammar::{self, StartTag};
use crate::handler::TypeHandler;
use crate::stream::ContentStream;
use crate::value::{Field, ObjectValue, Value};
use std::io::Read;

/// One read over one stream.
///
/// Nested objects reuse the same stream cursor and get their own field map,
/// so every tag an object opens must be closed before its reader returns.
pub struct ReadSession<'a, R> {
    stream: &'a mut ContentStream<R>,
    resolver: TypeResolver<'a>,
}

impl<'a, R: Read> ReadSession<'a, R> {
    /// Creates a session reading from `stream`.
    pub fn new(stream: &'a mut ContentStream<R>, resolver: TypeResolver<'a>) -> Self {
        Self { stream, resolver }
    }

    /// The underlying stream.
    pub fn stream(&mut self) -> &mut ContentStream<R> {
        &mut *self.stream
    }

    /// The resolver used for type info.
    pub fn resolver(&self) -> &TypeResolver<'a> {
        &self.resolver
    }

    /// Reads a whole document whose wrapper tag must be `[expected]`.
    pub fn read_document(&mut self, expected: &str) -> Result<ObjectValue> {
        grammar::read_object_start_tag(self.stream, expected)?;
        log::debug!("Reading document '{expected}'");
        let fields = self.read_object_fields(expected)?;
        Ok(ObjectValue {
            type_name: expected.to_owned(),
            fields,
        })
    }

    /// Reads a whole document, taking its type from the wrapper tag.
    pub fn read_any_document(&mut self) -> Result<ObjectValue> {
        let name = grammar::read_any_object_start_tag(self.stream)?;
        let type_name = match self.resolver.resolve_object(&name)? {
            TypeDescriptor::Object(resolved) => resolved,
            other => other.type_info(),
        };
        log::debug!("Reading document '{type_name}'");
        let fields = self.read_object_fields(&name)?;
        Ok(ObjectValue { type_name, fields })
    }

    /// The tag loop: reads fields until `[/obj_key]`.
    ///
    /// Separators between tags are skipped and other stray characters only
    /// produce a warning, except a bare `/`, which is an error.
    pub fn read_object_fields(&mut self, obj_key: &str) -> Result<Vec<Field>> {
        let mut context = ContentContext::new(self.resolver.registry());
        loop {
            match self.stream.read_char()? {
                None => {
                    return Err(ReaderError::UnexpectedEof {
                        expected: format!("'[/{obj_key}]'"),
                    }
                    .into())
                }
                Some('[') => match grammar::read_start_tag(self.stream)? {
                    StartTag::Field(tag) => {
                        log::trace!(
                            "Field '{}' of type '{}' at line {}",
                            tag.key,
                            tag.base_type_info,
                            self.stream.line()
                        );
                        let descriptor = self.resolver.resolve_field(&tag)?;
                        let value = self.read_entry(&tag.key, &descriptor, &tag.dimension_info)?;
                        context.insert_field(Field {
                            key: tag.key,
                            descriptor,
                            value,
                        })?;
                    }
                    StartTag::Unmatched(body) => {
                        if body.strip_prefix('/') == Some(obj_key) {
                            return Ok(context.into_fields());
                        }
                        return Err(ReaderError::TagMismatch {
                            expected: format!("/{obj_key}"),
                            found: body,
                        }
                        .into());
                    }
                },
                Some('/') => return Err(ReaderError::UnexpectedCharacter { found: '/' }.into()),
                Some(c) if grammar::is_separator(c) => {}
                Some(c) => log::warn!(
                    "Ignoring stray character {c:?} at line {} inside '{obj_key}'",
                    self.stream.line()
                ),
            }
        }
    }

    /// Reads a value whose start tag was just consumed, through `[/end_key]`.
    pub fn read_entry(
        &mut self,
        end_key: &str,
        descriptor: &TypeDescriptor,
        dimension_info: &str,
    ) -> Result<Value> {
        match TypeHandler::classify(descriptor) {
            Some(handler) => handler.read(self, end_key, descriptor, dimension_info),
            None => {
                if !dimension_info.is_empty() {
                    return Err(TypeError::UnexpectedTypeInfo {
                        type_name: descriptor.type_info(),
                        extra: format!("({dimension_info})"),
                    }
                    .into());
                }
                let fields = self.read_object_fields(end_key)?;
                Ok(Value::Object(ObjectValue {
                    type_name: descriptor.type_info(),
                    fields,
                }))
            }
        }
    }

    /// Reads one keyless collection element, `[:(dims)]..[/]`.
    pub fn read_element(&mut self, descriptor: &TypeDescriptor) -> Result<Value> {
        let tag = grammar::read_element_start_tag(self.stream)?;
        if !tag.raw_key.is_empty() {
            return Err(ReaderError::MalformedElementTag {
                tag: format!("{}:{}", tag.raw_key, tag.dimension_info),
            }
            .into());
        }
        self.read_entry("", descriptor, &tag.dimension_info)
    }

    /// Consumes the closing `[/end_key]` of a collection.
    pub fn read_close(&mut self, end_key: &str) -> Result<()> {
        grammar::read_tag(self.stream, &format!("/{end_key}"))
    }
}
