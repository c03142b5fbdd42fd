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

//! # Khora Content
//!
//! A human-readable, tag-based text format for engine content, and the
//! engine that reads and writes it.
//!
//! ```text
//! [demo::Player]
//!     [name:STRING]Ada[/name]
//!     [position:khora_math::Vec2]
//!         [x:SINGLE]3[/x]
//!         [y:SINGLE]-7[/y]
//!     [/position]
//!     [scores:LIST<INT32>(2)]
//!         [:]10[/]
//!         [:]20[/]
//!     [/scores]
//! [/demo::Player]
//! ```
//!
//! Custom types are stored through an [`ObjectWriter`] filling a
//! [`ContentContext`] and rebuilt through an [`ObjectReader`] emptying it.
//! Both are registered in a [`ContentRegistry`], either by hand or with
//! `#[derive(Content)]` and [`ContentRegistry::discover`].

#![warn(missing_docs)]

extern crate self as khora_content;

mod builtin;
pub mod content;
pub mod context;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod handler;
pub mod registration;
pub mod registry;
pub mod serializer;
pub mod settings;
pub mod stream;
pub mod value;

pub use content::{Content, ContentArray, ContentEnum, ContentObject};
pub use context::ContentContext;
pub use descriptor::{PrimitiveKind, TypeDescriptor};
pub use engine::{LineSink, TextSink};
pub use error::{ContentError, ContextError, ReaderError, Result, TypeError, WriterError};
pub use registration::ContentRegistration;
pub use registry::{ContentRegistry, ObjectReader, ObjectWriter};
pub use serializer::ContentSerializer;
pub use settings::{ContentSettings, DEFAULT_EXTENSION};
pub use value::{ArrayValue, Field, ObjectValue, Scalar, Value};

/// `#[derive(Content)]` and `#[derive(ContentEnum)]`.
pub use khora_content_derive::{Content, ContentEnum};

#[doc(hidden)]
pub mod __private {
    pub use inventory;
}
