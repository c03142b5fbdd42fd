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

//! Link-time registration of content types.
//!
//! `#[derive(Content)]` with a `#[content(reader = .., writer = ..)]`
//! attribute and `#[derive(ContentEnum)]` submit a [`ContentRegistration`]
//! through `inventory`. [`ContentRegistry::discover`] applies all of them.

use crate::content::{ContentEnum, ContentObject};
use crate::error::Result;
use crate::registry::{ContentRegistry, ObjectReader, ObjectWriter};

/// A deferred registration of one object type or enum.
pub struct ContentRegistration {
    type_name: fn() -> &'static str,
    register: fn(&mut ContentRegistry) -> Result<()>,
}

impl ContentRegistration {
    /// Registers `T` with default-constructed `R` and `W` plugins.
    pub const fn object<T, R, W>() -> Self
    where
        T: ContentObject,
        R: ObjectReader<T> + Default,
        W: ObjectWriter<T> + Default,
    {
        Self {
            type_name: T::type_name,
            register: register_object::<T, R, W>,
        }
    }

    /// Registers the enum `E`.
    pub const fn enumeration<E: ContentEnum>() -> Self {
        Self {
            type_name: E::type_name,
            register: register_enum::<E>,
        }
    }

    /// The name of the registered type.
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Applies the registration to `registry`.
    pub fn apply(&self, registry: &mut ContentRegistry) -> Result<()> {
        (self.register)(registry)
    }
}

fn register_object<T, R, W>(registry: &mut ContentRegistry) -> Result<()>
where
    T: ContentObject,
    R: ObjectReader<T> + Default,
    W: ObjectWriter<T> + Default,
{
    registry.register::<T, R, W>(R::default(), W::default())
}

fn register_enum<E: ContentEnum>(registry: &mut ContentRegistry) -> Result<()> {
    registry.register_enum::<E>()
}

inventory::collect!(ContentRegistration);
