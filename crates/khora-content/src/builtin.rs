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

//! Reader and writer plugins for the `khora-math` value types.
//!
//! Every registry created with [`ContentRegistry::new`] carries them, under
//! the names `khora_math::Vec2`, `khora_math::Vec3`, `khora_math::Vec4`,
//! `khora_math::LinearRgba` and `khora_math::Rect`.

use crate::context::ContentContext;
use crate::error::Result;
use crate::registry::{ContentRegistry, ObjectReader, ObjectWriter};
use khora_math::{LinearRgba, Rect, Vec2, Vec3, Vec4};

crate::impl_content_object!(Vec2, "khora_math::Vec2");
crate::impl_content_object!(Vec3, "khora_math::Vec3");
crate::impl_content_object!(Vec4, "khora_math::Vec4");
crate::impl_content_object!(LinearRgba, "khora_math::LinearRgba");
crate::impl_content_object!(Rect, "khora_math::Rect");

/// Declares a reader/writer pair storing each listed `f32` field under its
/// own name.
macro_rules! float_fields_plugin {
    ($ty:ident, $reader:ident, $writer:ident, [$($field:ident),+]) => {
        #[derive(Debug, Default)]
        pub(crate) struct $reader;

        impl ObjectReader<$ty> for $reader {
            fn read(&self, context: &mut ContentContext<'_>) -> Result<$ty> {
                Ok($ty {
                    $($field: context.take::<f32>(stringify!($field))?,)+
                })
            }
        }

        #[derive(Debug, Default)]
        pub(crate) struct $writer;

        impl ObjectWriter<$ty> for $writer {
            fn write(&self, context: &mut ContentContext<'_>, value: &$ty) -> Result<()> {
                $(context.insert(stringify!($field), &value.$field)?;)+
                Ok(())
            }
        }
    };
}

float_fields_plugin!(Vec2, Vec2Reader, Vec2Writer, [x, y]);
float_fields_plugin!(Vec3, Vec3Reader, Vec3Writer, [x, y, z]);
float_fields_plugin!(Vec4, Vec4Reader, Vec4Writer, [x, y, z, w]);
float_fields_plugin!(LinearRgba, LinearRgbaReader, LinearRgbaWriter, [r, g, b, a]);
float_fields_plugin!(Rect, RectReader, RectWriter, [x, y, width, height]);

/// Registers every plugin above. Fails if one of the types already has a
/// reader or a writer.
pub(crate) fn install(registry: &mut ContentRegistry) -> Result<()> {
    registry.register::<Vec2, _, _>(Vec2Reader, Vec2Writer)?;
    registry.register::<Vec3, _, _>(Vec3Reader, Vec3Writer)?;
    registry.register::<Vec4, _, _>(Vec4Reader, Vec4Writer)?;
    registry.register::<LinearRgba, _, _>(LinearRgbaReader, LinearRgbaWriter)?;
    registry.register::<Rect, _, _>(RectReader, RectWriter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;

    #[test]
    fn test_math_types_round_trip_through_values() {
        let registry = ContentRegistry::new();
        let rect = Rect::new(1.0, 2.0, 30.0, 40.5);
        let value = rect.to_value(&registry).unwrap();
        assert_eq!(Rect::from_value(value, &registry).unwrap(), rect);

        let color = LinearRgba::new(0.25, 0.5, 1.0, 0.75);
        let value = color.to_value(&registry).unwrap();
        assert_eq!(LinearRgba::from_value(value, &registry).unwrap(), color);
    }

    #[test]
    fn test_builtin_names() {
        let registry = ContentRegistry::new();
        assert_eq!(
            registry.object_names(),
            [
                "khora_math::LinearRgba",
                "khora_math::Rect",
                "khora_math::Vec2",
                "khora_math::Vec3",
                "khora_math::Vec4",
            ]
        );
        assert_eq!(Vec3::descriptor().type_info(), "khora_math::Vec3");
    }

    #[test]
    fn test_second_install_is_rejected() {
        let mut registry = ContentRegistry::empty();
        install(&mut registry).unwrap();
        let err = install(&mut registry).unwrap_err();
        assert!(err.to_string().contains("khora_math::Vec2"), "{err}");
    }
}
