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

//! The typed layer: conversions between Rust values and [`Value`] trees.
//!
//! [`Content`] is implemented here for primitives, `String`, `Vec`,
//! `HashMap`, `BTreeMap`, fixed-size arrays and [`ContentArray`]. Custom
//! objects and enums get theirs from the derives or from
//! [`impl_content_object!`](crate::impl_content_object) and
//! [`impl_content_enum!`](crate::impl_content_enum).

mod array;
mod collection;
mod primitive;

pub use array::ContentArray;

use crate::descriptor::TypeDescriptor;
use crate::error::{ContentError, ReaderError, Result};
use crate::registry::ContentRegistry;
use crate::value::Value;

/// A type that can be stored in a content document.
pub trait Content: Sized + 'static {
    /// The declared type written in front of values of this type.
    fn descriptor() -> TypeDescriptor;

    /// Converts `self` into a value tree, running object writers as needed.
    fn to_value(&self, registry: &ContentRegistry) -> Result<Value>;

    /// Rebuilds `Self` from a value tree, running object readers as needed.
    fn from_value(value: Value, registry: &ContentRegistry) -> Result<Self>;
}

/// A custom type stored through registered reader and writer plugins.
pub trait ContentObject: 'static {
    /// The name used in tags. Defaults to the Rust type path.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A fieldless enum stored by member name.
pub trait ContentEnum: Sized + 'static {
    /// The member names, in declaration order.
    const MEMBERS: &'static [&'static str];

    /// The name used inside `ENUM<..>`. Defaults to the Rust type path.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The name of this member.
    fn member_name(&self) -> &'static str;

    /// The member with the given name, matching case.
    fn from_member_name(name: &str) -> Option<Self>;
}

/// The descriptor of a custom object.
pub fn object_descriptor<T: ContentObject>() -> TypeDescriptor {
    TypeDescriptor::Object(T::type_name().to_owned())
}

/// The descriptor of an enum.
pub fn enum_descriptor<E: ContentEnum>() -> TypeDescriptor {
    TypeDescriptor::Enum(E::type_name().to_owned())
}

/// Converts an enum member to its value.
pub fn enum_to_value<E: ContentEnum>(member: &E) -> Value {
    Value::Enum(member.member_name().to_owned())
}

/// Converts a value back to an enum member.
pub fn enum_from_value<E: ContentEnum>(value: Value) -> Result<E> {
    match value {
        Value::Enum(member) => E::from_member_name(&member).ok_or_else(|| {
            ReaderError::UnknownEnumMember {
                enum_name: E::type_name().to_owned(),
                member,
            }
            .into()
        }),
        other => Err(ContentError::mismatch(
            format!("a member of {}", E::type_name()),
            other.kind_name(),
        )),
    }
}

/// Implements [`ContentObject`] and [`Content`] for a type with registered
/// plugins.
///
/// ```rust
/// use khora_content::impl_content_object;
///
/// struct Marker;
/// impl_content_object!(Marker, "demo::Marker");
/// ```
#[macro_export]
macro_rules! impl_content_object {
    ($ty:ty) => {
        $crate::impl_content_object!($ty, ::std::any::type_name::<$ty>());
    };
    ($ty:ty, $name:expr) => {
        impl $crate::ContentObject for $ty {
            fn type_name() -> &'static str {
                $name
            }
        }

        impl $crate::Content for $ty {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::content::object_descriptor::<Self>()
            }

            fn to_value(
                &self,
                registry: &$crate::ContentRegistry,
            ) -> $crate::Result<$crate::Value> {
                registry.write_object(self)
            }

            fn from_value(
                value: $crate::Value,
                registry: &$crate::ContentRegistry,
            ) -> $crate::Result<Self> {
                registry.read_object(value)
            }
        }
    };
}

/// Implements [`ContentEnum`] and [`Content`] for a fieldless enum.
///
/// ```rust
/// use khora_content::impl_content_enum;
///
/// enum Axis { X, Y }
/// impl_content_enum!(Axis, "demo::Axis", { X, Y });
/// ```
#[macro_export]
macro_rules! impl_content_enum {
    ($ty:ty { $($member:ident),+ $(,)? }) => {
        $crate::impl_content_enum!($ty, ::std::any::type_name::<$ty>(), { $($member),+ });
    };
    ($ty:ty, $name:expr, { $($member:ident),+ $(,)? }) => {
        impl $crate::ContentEnum for $ty {
            const MEMBERS: &'static [&'static str] = &[$(stringify!($member)),+];

            fn type_name() -> &'static str {
                $name
            }

            fn member_name(&self) -> &'static str {
                match self {
                    $(Self::$member => stringify!($member),)+
                }
            }

            fn from_member_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($member) => Some(Self::$member),)+
                    _ => None,
                }
            }
        }

        impl $crate::Content for $ty {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::content::enum_descriptor::<Self>()
            }

            fn to_value(
                &self,
                _registry: &$crate::ContentRegistry,
            ) -> $crate::Result<$crate::Value> {
                Ok($crate::content::enum_to_value(self))
            }

            fn from_value(
                value: $crate::Value,
                _registry: &$crate::ContentRegistry,
            ) -> $crate::Result<Self> {
                $crate::content::enum_from_value(value)
            }
        }
    };
}
