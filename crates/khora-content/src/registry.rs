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

//! The registry of type handlers, object plugins and enums.
//!
//! A [`ContentRegistry`] is built once, then shared read-only (usually behind
//! an `Arc`) by every serializer. Tests build their own isolated instances.

use crate::content::{ContentEnum, ContentObject};
use crate::context::ContentContext;
use crate::error::{ContentError, Result, TypeError, WriterError};
use crate::handler::TypeHandler;
use crate::registration::ContentRegistration;
use crate::value::{ObjectValue, Value};
use std::any::{Any, TypeId};
use std::collections::{BTreeSet, HashMap};

/// Rebuilds one custom type from the fields of its context.
///
/// The context holds exactly the fields found between the object's tags.
pub trait ObjectReader<T>: Send + Sync + 'static {
    /// Materializes the object.
    fn read(&self, context: &mut ContentContext<'_>) -> Result<T>;
}

/// Stores the fields of one custom type into a fresh context.
pub trait ObjectWriter<T>: Send + Sync + 'static {
    /// Fills `context` from `value`. Fields are written in insertion order.
    fn write(&self, context: &mut ContentContext<'_>, value: &T) -> Result<()>;
}

/// Plugins are stored as `Box<dyn Any>` wrapping `Box<dyn ObjectReader<T>>`
/// (or writer), and downcast back with the caller's `T`.
struct ObjectEntry {
    name: String,
    reader: Option<Box<dyn Any + Send + Sync>>,
    writer: Option<Box<dyn Any + Send + Sync>>,
}

struct EnumEntry {
    members: &'static [&'static str],
}

/// Type handlers plus the reader/writer plugins of custom types.
///
/// # Example
///
/// ```rust
/// use khora_content::ContentRegistry;
///
/// let registry = ContentRegistry::new();
/// assert!(registry.handler("INT32").is_some());
/// assert_eq!(registry.resolve_object_name("Vec2"), Some("khora_math::Vec2"));
/// ```
pub struct ContentRegistry {
    handlers: HashMap<&'static str, TypeHandler>,
    objects: HashMap<TypeId, ObjectEntry>,
    object_names: HashMap<String, TypeId>,
    enums: HashMap<String, EnumEntry>,
    enum_types: HashMap<TypeId, String>,
    namespaces: BTreeSet<String>,
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRegistry {
    /// Creates a registry holding only the built-in type handlers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: TypeHandler::builtin()
                .map(|handler| (handler.type_name(), handler))
                .collect(),
            objects: HashMap::new(),
            object_names: HashMap::new(),
            enums: HashMap::new(),
            enum_types: HashMap::new(),
            namespaces: BTreeSet::new(),
        }
    }

    /// Creates a registry with the type handlers and the built-in math
    /// plugins (`Vec2`, `Vec3`, `Vec4`, `LinearRgba`, `Rect`).
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        let installed = crate::builtin::install(&mut registry);
        debug_assert!(installed.is_ok(), "built-in plugins collided: {installed:?}");
        registry
    }

    /// Like [`new`](Self::new), then applies every registration submitted by
    /// `#[derive(Content)]` and `#[derive(ContentEnum)]` across the binary.
    pub fn discover() -> Result<Self> {
        let mut registry = Self::empty();
        crate::builtin::install(&mut registry)?;
        for registration in inventory::iter::<ContentRegistration> {
            registration.apply(&mut registry)?;
        }
        log::debug!(
            "Discovered {} object types and {} enums",
            registry.object_names.len(),
            registry.enums.len()
        );
        Ok(registry)
    }

    /// Registers the reader of `T`. A second reader for `T` is an error.
    pub fn add_reader<T, R>(&mut self, reader: R) -> Result<()>
    where
        T: ContentObject,
        R: ObjectReader<T>,
    {
        let entry = self.entry::<T>()?;
        if entry.reader.is_some() {
            return Err(WriterError::DuplicateRegistration {
                type_name: entry.name.clone(),
                role: "reader",
            }
            .into());
        }
        let boxed: Box<dyn ObjectReader<T>> = Box::new(reader);
        entry.reader = Some(Box::new(boxed));
        let name = entry.name.clone();
        self.record_namespace(&name);
        log::debug!("Registered content reader for '{name}'");
        Ok(())
    }

    /// Registers the writer of `T`. A second writer for `T` is an error.
    pub fn add_writer<T, W>(&mut self, writer: W) -> Result<()>
    where
        T: ContentObject,
        W: ObjectWriter<T>,
    {
        let entry = self.entry::<T>()?;
        if entry.writer.is_some() {
            return Err(WriterError::DuplicateRegistration {
                type_name: entry.name.clone(),
                role: "writer",
            }
            .into());
        }
        let boxed: Box<dyn ObjectWriter<T>> = Box::new(writer);
        entry.writer = Some(Box::new(boxed));
        log::debug!("Registered content writer for '{}'", entry.name);
        Ok(())
    }

    /// Registers both plugins of `T`.
    pub fn register<T, R, W>(&mut self, reader: R, writer: W) -> Result<()>
    where
        T: ContentObject,
        R: ObjectReader<T>,
        W: ObjectWriter<T>,
    {
        self.add_reader::<T, R>(reader)?;
        self.add_writer::<T, W>(writer)
    }

    /// Registers an enum so its members can be checked on read.
    pub fn register_enum<E: ContentEnum>(&mut self) -> Result<()> {
        let name = E::type_name();
        self.check_type_name(name)?;
        if self.enum_types.contains_key(&TypeId::of::<E>())
            || self.enums.contains_key(name)
            || self.object_names.contains_key(name)
        {
            return Err(WriterError::DuplicateRegistration {
                type_name: name.to_owned(),
                role: "enum",
            }
            .into());
        }
        self.enums.insert(
            name.to_owned(),
            EnumEntry {
                members: E::MEMBERS,
            },
        );
        self.enum_types.insert(TypeId::of::<E>(), name.to_owned());
        self.record_namespace(name);
        log::debug!("Registered content enum '{name}'");
        Ok(())
    }

    /// Looks up a type handler by its uppercase name.
    pub fn handler(&self, name: &str) -> Option<TypeHandler> {
        self.handlers.get(name).copied()
    }

    /// Resolves an object name, trying each known namespace for bare names.
    pub fn resolve_object_name(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.object_names.get_key_value(name) {
            return Some(key.as_str());
        }
        self.namespaces.iter().find_map(|namespace| {
            self.object_names
                .get_key_value(format!("{namespace}::{name}").as_str())
                .map(|(key, _)| key.as_str())
        })
    }

    /// Resolves an enum name, trying each known namespace for bare names.
    pub fn resolve_enum_name(&self, name: &str) -> Option<&str> {
        if let Some((key, _)) = self.enums.get_key_value(name) {
            return Some(key.as_str());
        }
        self.namespaces.iter().find_map(|namespace| {
            self.enums
                .get_key_value(format!("{namespace}::{name}").as_str())
                .map(|(key, _)| key.as_str())
        })
    }

    /// The members of a registered enum.
    pub fn enum_members(&self, name: &str) -> Option<&'static [&'static str]> {
        self.enums.get(name).map(|entry| entry.members)
    }

    /// Returns `true` if the named object type has a reader.
    pub fn has_reader_for(&self, name: &str) -> bool {
        self.object_names
            .get(name)
            .and_then(|id| self.objects.get(id))
            .is_some_and(|entry| entry.reader.is_some())
    }

    /// The registered names of all object types, sorted.
    pub fn object_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.object_names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs the registered writer of `T` in a fresh context.
    pub fn write_object<T: ContentObject>(&self, value: &T) -> Result<Value> {
        let entry = self.objects.get(&TypeId::of::<T>());
        let writer = entry
            .and_then(|entry| entry.writer.as_ref())
            .and_then(|writer| writer.downcast_ref::<Box<dyn ObjectWriter<T>>>());
        let (Some(entry), Some(writer)) = (entry, writer) else {
            return Err(WriterError::NoWriter {
                type_name: T::type_name().to_owned(),
            }
            .into());
        };

        let mut context = ContentContext::new(self);
        writer.write(&mut context, value)?;
        Ok(Value::Object(ObjectValue {
            type_name: entry.name.clone(),
            fields: context.into_fields(),
        }))
    }

    /// Runs the registered reader of `T` over the fields of `value`.
    pub fn read_object<T: ContentObject>(&self, value: Value) -> Result<T> {
        let object = value.into_object()?;
        let entry = self.objects.get(&TypeId::of::<T>());
        let reader = entry
            .and_then(|entry| entry.reader.as_ref())
            .and_then(|reader| reader.downcast_ref::<Box<dyn ObjectReader<T>>>());
        let (Some(entry), Some(reader)) = (entry, reader) else {
            return Err(TypeError::NoReader {
                type_name: T::type_name().to_owned(),
            }
            .into());
        };
        if object.type_name != entry.name {
            return Err(ContentError::mismatch(
                format!("an object of type {}", entry.name),
                format!("an object of type {}", object.type_name),
            ));
        }

        let mut context = ContentContext::from_fields(self, object.fields);
        let materialized = reader.read(&mut context)?;
        if !context.is_empty() {
            log::debug!(
                "Reader for '{}' left {} field(s) unused",
                entry.name,
                context.len()
            );
        }
        Ok(materialized)
    }

    fn entry<T: ContentObject>(&mut self) -> Result<&mut ObjectEntry> {
        let id = TypeId::of::<T>();
        if !self.objects.contains_key(&id) {
            let name = T::type_name();
            self.check_type_name(name)?;
            if self.object_names.contains_key(name) || self.enums.contains_key(name) {
                return Err(WriterError::DuplicateRegistration {
                    type_name: name.to_owned(),
                    role: "type name",
                }
                .into());
            }
            self.object_names.insert(name.to_owned(), id);
            self.objects.insert(
                id,
                ObjectEntry {
                    name: name.to_owned(),
                    reader: None,
                    writer: None,
                },
            );
        }
        self.objects.get_mut(&id).ok_or_else(|| {
            TypeError::NoReader {
                type_name: T::type_name().to_owned(),
            }
            .into()
        })
    }

    /// Names appear verbatim in tags, so they may not contain tag syntax
    /// or shadow a handler.
    fn check_type_name(&self, name: &str) -> Result<()> {
        let has_tag_syntax = name.chars().any(|c| {
            c.is_whitespace() || matches!(c, '[' | ']' | '<' | '>' | '(' | ')' | ',' | '/' | '\\')
        });
        let bad_colons = name
            .split("::")
            .any(|segment| segment.is_empty() || segment.contains(':'));
        if has_tag_syntax || bad_colons || self.handlers.contains_key(name) {
            return Err(TypeError::InvalidTypeName {
                type_name: name.to_owned(),
            }
            .into());
        }
        Ok(())
    }

    fn record_namespace(&mut self, name: &str) {
        if let Some((namespace, _)) = name.rsplit_once("::") {
            if self.namespaces.insert(namespace.to_owned()) {
                log::trace!("Recorded content namespace '{namespace}'");
            }
        }
    }
}
