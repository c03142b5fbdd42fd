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

//! 2D, 3D and 4D vectors with `f32` components.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

macro_rules! vector_type {
    ($(#[$doc:meta])* $name:ident, $len:literal, [$($field:ident),+]) => {
        $(#[$doc])*
        #[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
        #[repr(C)]
        pub struct $name {
            $(#[allow(missing_docs)] pub $field: f32,)+
        }

        impl $name {
            /// All components zero.
            pub const ZERO: Self = Self { $($field: 0.0),+ };

            /// Creates a vector from its components.
            #[inline]
            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            /// The components, in declaration order.
            #[inline]
            pub const fn to_array(self) -> [f32; $len] {
                [$(self.$field),+]
            }
        }

        impl From<[f32; $len]> for $name {
            #[inline]
            fn from([$($field),+]: [f32; $len]) -> Self {
                Self { $($field),+ }
            }
        }
    };
}

vector_type!(
    /// A 2-dimensional vector.
    Vec2, 2, [x, y]
);
vector_type!(
    /// A 3-dimensional vector.
    Vec3, 3, [x, y, z]
);
vector_type!(
    /// A 4-dimensional vector.
    Vec4, 4, [x, y, z, w]
);

impl Vec3 {
    /// Appends a `w` component.
    #[inline]
    pub const fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}
