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

use super::Content;
use crate::descriptor::TypeDescriptor;
use crate::error::{ContentError, Result};
use crate::handler::check_dictionary_key;
use crate::registry::ContentRegistry;
use crate::value::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

impl<T: Content> Content for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::list(T::descriptor())
    }

    fn to_value(&self, registry: &ContentRegistry) -> Result<Value> {
        self.iter()
            .map(|item| item.to_value(registry))
            .collect::<Result<_>>()
            .map(Value::List)
    }

    fn from_value(value: Value, registry: &ContentRegistry) -> Result<Self> {
        match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| T::from_value(item, registry))
                .collect(),
            other => Err(ContentError::mismatch("a list", other.kind_name())),
        }
    }
}

fn dictionary_entries<'a, K, V>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    registry: &ContentRegistry,
) -> Result<Value>
where
    K: Content,
    V: Content,
{
    check_dictionary_key(&K::descriptor())?;
    entries
        .map(|(key, value)| -> Result<(Value, Value)> {
            Ok((key.to_value(registry)?, value.to_value(registry)?))
        })
        .collect::<Result<_>>()
        .map(Value::Dictionary)
}

fn dictionary_pairs<K, V>(
    value: Value,
    registry: &ContentRegistry,
) -> Result<impl Iterator<Item = Result<(K, V)>> + '_>
where
    K: Content,
    V: Content,
{
    check_dictionary_key(&K::descriptor())?;
    match value {
        Value::Dictionary(entries) => Ok(entries.into_iter().map(move |(key, value)| -> Result<(K, V)> {
            Ok((K::from_value(key, registry)?, V::from_value(value, registry)?))
        })),
        other => Err(ContentError::mismatch("a dictionary", other.kind_name())),
    }
}

impl<K, V, S> Content for HashMap<K, V, S>
where
    K: Content + Eq + Hash,
    V: Content,
    S: BuildHasher + Default + 'static,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::dictionary(K::descriptor(), V::descriptor())
    }

    fn to_value(&self, registry: &ContentRegistry) -> Result<Value> {
        dictionary_entries(self.iter(), registry)
    }

    fn from_value(value: Value, registry: &ContentRegistry) -> Result<Self> {
        dictionary_pairs(value, registry)?.collect()
    }
}

impl<K, V> Content for BTreeMap<K, V>
where
    K: Content + Ord,
    V: Content,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::dictionary(K::descriptor(), V::descriptor())
    }

    fn to_value(&self, registry: &ContentRegistry) -> Result<Value> {
        dictionary_entries(self.iter(), registry)
    }

    fn from_value(value: Value, registry: &ContentRegistry) -> Result<Self> {
        dictionary_pairs(value, registry)?.collect()
    }
}
