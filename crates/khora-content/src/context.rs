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

//! The per-object field map handed to reader and writer plugins.

use crate::content::Content;
use crate::error::{ContextError, Result};
use crate::registry::ContentRegistry;
use crate::value::Field;

/// An ordered `key -> (type, value)` map for exactly one object.
///
/// A fresh context is created for every object, nested ones included.
/// Writers fill it with [`insert`](Self::insert); readers empty it with
/// [`take`](Self::take). Keys are unique inside one context.
///
/// # Example
///
/// ```rust
/// use khora_content::{ContentContext, ContentRegistry};
///
/// let registry = ContentRegistry::new();
/// let mut context = ContentContext::new(&registry);
/// context.insert("x", &3i32).unwrap();
/// assert!(context.insert("x", &4i32).is_err());
///
/// let x: i32 = context.take("x").unwrap();
/// assert_eq!(x, 3);
/// ```
pub struct ContentContext<'r> {
    registry: &'r ContentRegistry,
    fields: Vec<Field>,
}

impl<'r> ContentContext<'r> {
    /// Creates an empty context.
    pub fn new(registry: &'r ContentRegistry) -> Self {
        Self {
            registry,
            fields: Vec::new(),
        }
    }

    pub(crate) fn from_fields(registry: &'r ContentRegistry, fields: Vec<Field>) -> Self {
        Self { registry, fields }
    }

    /// The registry nested values are converted with.
    pub fn registry(&self) -> &'r ContentRegistry {
        self.registry
    }

    /// Stores `value` under `key`.
    pub fn insert<T: Content>(&mut self, key: &str, value: &T) -> Result<()> {
        self.check_new_key(key)?;
        let field = Field {
            key: key.to_owned(),
            descriptor: T::descriptor(),
            value: value.to_value(self.registry)?,
        };
        self.fields.push(field);
        Ok(())
    }

    /// Stores `value` under `key` when present. `None` writes nothing.
    pub fn insert_opt<T: Content>(&mut self, key: &str, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => self.insert(key, value),
            None => Ok(()),
        }
    }

    /// Stores an already converted field.
    pub fn insert_field(&mut self, field: Field) -> Result<()> {
        self.check_new_key(&field.key)?;
        self.fields.push(field);
        Ok(())
    }

    /// Removes the field stored under `key` and converts it to `T`.
    pub fn take<T: Content>(&mut self, key: &str) -> Result<T> {
        self.take_opt(key)?.ok_or_else(|| {
            ContextError::MissingKey {
                key: key.to_owned(),
            }
            .into()
        })
    }

    /// Like [`take`](Self::take), but a missing key yields `None`.
    pub fn take_opt<T: Content>(&mut self, key: &str) -> Result<Option<T>> {
        match self.fields.iter().position(|field| field.key == key) {
            Some(index) => {
                let field = self.fields.remove(index);
                T::from_value(field.value, self.registry).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Looks up a field without removing it.
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Returns `true` if a field is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the context holds no field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the context, returning its fields in insertion order.
    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    fn check_new_key(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        if self.contains(key) {
            return Err(ContextError::DuplicateKey {
                key: key.to_owned(),
            }
            .into());
        }
        Ok(())
    }
}

/// Field keys are embedded verbatim in tags.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let invalid = key.is_empty()
        || key.chars().any(|c| {
            c.is_whitespace() || matches!(c, '[' | ']' | ':' | '<' | '>' | '(' | ')' | '/' | '\\')
        });
    if invalid {
        return Err(ContextError::InvalidKey {
            key: key.to_owned(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;
    use crate::value::{Scalar, Value};

    #[test]
    fn test_keys_are_unique() {
        let registry = ContentRegistry::new();
        let mut context = ContentContext::new(&registry);
        context.insert("name", &"a".to_owned()).unwrap();
        let error = context.insert("name", &1u8).unwrap_err();
        assert!(matches!(
            error,
            ContentError::Context(ContextError::DuplicateKey { .. })
        ));
        assert_eq!(context.len(), 1);
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        let registry = ContentRegistry::new();
        let mut context = ContentContext::new(&registry);
        for key in ["", "a b", "a:b", "[x", "x/y"] {
            assert!(matches!(
                context.insert(key, &1i32).unwrap_err(),
                ContentError::Context(ContextError::InvalidKey { .. })
            ));
        }
    }

    #[test]
    fn test_none_is_skipped() {
        let registry = ContentRegistry::new();
        let mut context = ContentContext::new(&registry);
        context.insert_opt::<i32>("missing", None).unwrap();
        context.insert_opt("present", Some(&5i32)).unwrap();
        assert!(!context.contains("missing"));
        assert_eq!(
            context.get("present").map(|field| &field.value),
            Some(&Value::Primitive(Scalar::Int32(5)))
        );
    }

    #[test]
    fn test_take_preserves_order_and_reports_missing_keys() {
        let registry = ContentRegistry::new();
        let mut context = ContentContext::new(&registry);
        context.insert("a", &1i64).unwrap();
        context.insert("b", &2i64).unwrap();
        context.insert("c", &3i64).unwrap();

        assert_eq!(context.take::<i64>("b").unwrap(), 2);
        let keys: Vec<_> = context.iter().map(|field| field.key.as_str()).collect();
        assert_eq!(keys, ["a", "c"]);

        assert!(context.take_opt::<i64>("b").unwrap().is_none());
        assert!(matches!(
            context.take::<i64>("b").unwrap_err(),
            ContentError::Context(ContextError::MissingKey { .. })
        ));
    }

    #[test]
    fn test_take_with_wrong_type_fails() {
        let registry = ContentRegistry::new();
        let mut context = ContentContext::new(&registry);
        context.insert("flag", &true).unwrap();
        assert!(context.take::<String>("flag").is_err());
    }
}
