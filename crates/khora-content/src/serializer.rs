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

//! The top-level entry point: typed values to text files and back.

use crate::content::Content;
use crate::descriptor::TypeDescriptor;
use crate::engine::{LineSink, ReadSession, TextSink, TypeResolver, WriteSession};
use crate::error::{Result, WriterError};
use crate::registry::ContentRegistry;
use crate::settings::ContentSettings;
use crate::stream::ContentStream;
use crate::value::{ObjectValue, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writes custom objects as tagged text and reads them back.
///
/// The root of every document is a custom object with registered plugins:
/// `[TypeName]` .. `[/TypeName]`.
///
/// # Example
///
/// ```rust
/// use khora_content::ContentSerializer;
/// use khora_math::Vec2;
///
/// let serializer = ContentSerializer::default();
/// let text = serializer.to_string(&Vec2::new(3.0, -7.0)).unwrap();
/// assert!(text.starts_with("[khora_math::Vec2]"));
///
/// let back: Vec2 = serializer.from_str(&text).unwrap();
/// assert_eq!(back, Vec2::new(3.0, -7.0));
/// ```
#[derive(Clone)]
pub struct ContentSerializer {
    registry: Arc<ContentRegistry>,
    settings: ContentSettings,
}

impl Default for ContentSerializer {
    fn default() -> Self {
        Self::new(Arc::new(ContentRegistry::new()))
    }
}

impl ContentSerializer {
    /// Creates a serializer with default settings.
    pub fn new(registry: Arc<ContentRegistry>) -> Self {
        Self::with_settings(registry, ContentSettings::default())
    }

    /// Creates a serializer with explicit settings.
    pub fn with_settings(registry: Arc<ContentRegistry>, settings: ContentSettings) -> Self {
        Self { registry, settings }
    }

    /// The shared registry.
    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// The active settings.
    pub fn settings(&self) -> &ContentSettings {
        &self.settings
    }

    /// The file a [`write`](Self::write) under `name` goes to.
    pub fn target_path(&self, name: impl AsRef<Path>) -> Result<PathBuf> {
        let name = name.as_ref();
        if name.as_os_str().is_empty() {
            return Err(WriterError::EmptyName.into());
        }
        let mut path = name.to_path_buf();
        if path.extension().is_none() && !self.settings.extension.is_empty() {
            path.set_extension(&self.settings.extension);
        }
        Ok(path)
    }

    /// Writes `value` to the file `name`, adding the default extension if
    /// `name` has none. Returns the path written.
    ///
    /// A failed write may leave a truncated file behind.
    pub fn write<T: Content>(&self, name: impl AsRef<Path>, value: &T) -> Result<PathBuf> {
        let path = self.target_path(name)?;
        let file = File::create(&path)?;
        self.write_to(BufWriter::new(file), value)?;
        log::debug!("Wrote content file '{}'", path.display());
        Ok(path)
    }

    /// Writes `value` as text into `out`.
    pub fn write_to<T: Content, W: Write>(&self, out: W, value: &T) -> Result<()> {
        let mut sink = TextSink::new(out, &self.settings);
        self.write_to_sink(&mut sink, value)?;
        sink.into_inner()?;
        Ok(())
    }

    /// Writes `value` line by line into a sink.
    pub fn write_to_sink<T: Content>(&self, sink: &mut dyn LineSink, value: &T) -> Result<()> {
        let document = self.to_document(value)?;
        WriteSession::new(sink).write_document(&document)
    }

    /// Writes `value` into a string.
    pub fn to_string<T: Content>(&self, value: &T) -> Result<String> {
        let mut out = Vec::new();
        self.write_to(&mut out, value)?;
        String::from_utf8(out).map_err(|e| {
            crate::error::ReaderError::InvalidEncoding {
                position: e.utf8_error().valid_up_to(),
            }
            .into()
        })
    }

    /// Converts `value` into its untyped document.
    pub fn to_document<T: Content>(&self, value: &T) -> Result<ObjectValue> {
        root_name::<T>()?;
        value.to_value(&self.registry)?.into_object()
    }

    /// Reads a `T` from `reader`.
    ///
    /// Errors carry the line they occurred on. The reader is dropped when done;
    /// pass `&mut reader` to keep it.
    pub fn read<T: Content, R: Read>(&self, reader: R) -> Result<T> {
        let name = root_name::<T>()?;
        let mut stream = ContentStream::new(reader);
        self.read_typed(&mut stream, &name)
            .map_err(|e| e.at_line(stream.line()))
    }

    /// Reads a `T` from the file at `path`.
    pub fn read_file<T: Content>(&self, path: impl AsRef<Path>) -> Result<T> {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file))
    }

    /// Reads a `T` from text.
    pub fn from_str<T: Content>(&self, text: &str) -> Result<T> {
        self.read(text.as_bytes())
    }

    /// Reads a document of any type into its untyped form.
    ///
    /// With `strict_types` unset this needs no registration at all.
    pub fn read_document<R: Read>(&self, reader: R) -> Result<ObjectValue> {
        let mut stream = ContentStream::new(reader);
        let resolver = TypeResolver::new(&self.registry, self.settings.strict_types);
        let result = ReadSession::new(&mut stream, resolver).read_any_document();
        result.map_err(|e| e.at_line(stream.line()))
    }

    /// Writes an untyped document into `out`.
    pub fn write_document<W: Write>(&self, out: W, document: &ObjectValue) -> Result<()> {
        let mut sink = TextSink::new(out, &self.settings);
        WriteSession::new(&mut sink).write_document(document)?;
        sink.into_inner()?;
        Ok(())
    }

    fn read_typed<T: Content, R: Read>(
        &self,
        stream: &mut ContentStream<R>,
        name: &str,
    ) -> Result<T> {
        let resolver = TypeResolver::new(&self.registry, self.settings.strict_types);
        let document = ReadSession::new(stream, resolver).read_document(name)?;
        T::from_value(Value::Object(document), &self.registry)
    }
}

/// Only custom objects can be the root of a document.
fn root_name<T: Content>() -> Result<String> {
    match T::descriptor() {
        TypeDescriptor::Object(name) => Ok(name),
        other => Err(WriterError::NotAnObject {
            type_info: other.type_info(),
        }
        .into()),
    }
}
