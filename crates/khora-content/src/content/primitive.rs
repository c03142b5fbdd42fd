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
use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::error::{ContentError, Result};
use crate::registry::ContentRegistry;
use crate::value::{Scalar, Value};

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Primitive(scalar) => scalar.kind().type_name(),
        other => other.kind_name(),
    }
}

macro_rules! impl_primitive_content {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Content for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Primitive(PrimitiveKind::$variant)
                }

                fn to_value(&self, _registry: &ContentRegistry) -> Result<Value> {
                    Ok(Value::Primitive(Scalar::$variant(*self)))
                }

                fn from_value(value: Value, _registry: &ContentRegistry) -> Result<Self> {
                    match value {
                        Value::Primitive(Scalar::$variant(inner)) => Ok(inner),
                        other => Err(ContentError::mismatch(
                            PrimitiveKind::$variant.type_name(),
                            describe(&other),
                        )),
                    }
                }
            }
        )+
    };
}

impl_primitive_content! {
    bool => Boolean,
    u8 => Byte,
    i8 => SByte,
    char => Char,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Single,
    f64 => Double,
}

impl Content for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::String
    }

    fn to_value(&self, _registry: &ContentRegistry) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }

    fn from_value(value: Value, _registry: &ContentRegistry) -> Result<Self> {
        match value {
            Value::String(text) => Ok(text),
            other => Err(ContentError::mismatch("STRING", describe(&other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_conversions() {
        let registry = ContentRegistry::empty();
        let value = (-7i16).to_value(&registry).unwrap();
        assert_eq!(value, Value::Primitive(Scalar::Int16(-7)));
        assert_eq!(i16::from_value(value, &registry).unwrap(), -7);
        assert_eq!(
            char::descriptor(),
            TypeDescriptor::Primitive(PrimitiveKind::Char)
        );
    }

    #[test]
    fn test_kind_mismatch_names_both_types() {
        let registry = ContentRegistry::empty();
        let error = u32::from_value(Value::Primitive(Scalar::Int32(1)), &registry).unwrap_err();
        assert_eq!(error.to_string(), "expected UINT32 but found INT32");
    }
}
