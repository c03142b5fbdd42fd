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

//! The reader/writer engine.
//!
//! [`ReadSession`] drives the tag loop over one stream, recursing into nested
//! objects with the same stream cursor. [`WriteSession`] walks a value tree and
//! hands each line to a [`LineSink`]. Neither knows about concrete Rust
//! types; that translation lives in the [`registry`](crate::registry).

mod reader;
mod resolver;
mod writer;

pub use reader::ReadSession;
pub use resolver::TypeResolver;
pub use writer::{LineSink, TextSink, WriteSession};
