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

//! # Khora Math
//!
//! The geometry and color value types that content files can store out of
//! the box.

#![warn(missing_docs)]

pub mod color;
pub mod rect;
pub mod vector;

pub use self::color::LinearRgba;
pub use self::rect::Rect;
pub use self::vector::{Vec2, Vec3, Vec4};
