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

use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::handler::TypeHandler;
use crate::settings::ContentSettings;
use crate::value::{Field, ObjectValue, Value};
use std::io::Write;

/// The destination of written text, one logical line at a time.
///
/// `depth` is the nesting level of the line; sinks decide how (or whether)
/// to indent it. Closures taking `(depth, line)` are sinks too.
pub trait LineSink {
    /// Receives one line, without a trailing newline.
    fn write_line(&mut self, depth: usize, line: &str) -> Result<()>;
}

impl<F> LineSink for F
where
    F: FnMut(usize, &str) -> Result<()>,
{
    fn write_line(&mut self, depth: usize, line: &str) -> Result<()> {
        self(depth, line)
    }
}

/// A [`LineSink`] writing text to any [`Write`].
///
/// Lines are indented and newline-terminated, or simply concatenated when
/// minified.
#[derive(Debug)]
pub struct TextSink<W> {
    out: W,
    minify: bool,
    indent: String,
}

impl<W: Write> TextSink<W> {
    /// Creates a sink following the layout options of `settings`.
    pub fn new(out: W, settings: &ContentSettings) -> Self {
        Self {
            out,
            minify: settings.minify,
            indent: settings.indent.clone(),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> LineSink for TextSink<W> {
    fn write_line(&mut self, depth: usize, line: &str) -> Result<()> {
        if self.minify {
            self.out.write_all(line.as_bytes())?;
            return Ok(());
        }
        for _ in 0..depth {
            self.out.write_all(self.indent.as_bytes())?;
        }
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// One write of a value tree into a sink.
pub struct WriteSession<'a> {
    sink: &'a mut dyn LineSink,
}

impl<'a> WriteSession<'a> {
    /// Creates a session writing into `sink`.
    pub fn new(sink: &'a mut dyn LineSink) -> Self {
        Self { sink }
    }

    /// Writes `[TypeName]`, the fields and `[/TypeName]`.
    pub fn write_document(&mut self, object: &ObjectValue) -> Result<()> {
        log::debug!("Writing document '{}'", object.type_name);
        self.sink.write_line(0, &format!("[{}]", object.type_name))?;
        self.write_fields(1, &object.fields)?;
        self.sink.write_line(0, &format!("[/{}]", object.type_name))
    }

    /// Writes each field with its type info, in order.
    pub fn write_fields(&mut self, depth: usize, fields: &[Field]) -> Result<()> {
        for field in fields {
            self.write_entry(depth, &field.key, true, &field.descriptor, &field.value)?;
        }
        Ok(())
    }

    /// Writes one value, dispatching to its handler or recursing into an object.
    pub fn write_entry(
        &mut self,
        depth: usize,
        tag_key: &str,
        use_type_info: bool,
        descriptor: &TypeDescriptor,
        value: &Value,
    ) -> Result<()> {
        match TypeHandler::classify(descriptor) {
            Some(handler) => handler.write(self, depth, tag_key, use_type_info, descriptor, value),
            None => {
                let object = match value {
                    Value::Object(object) => object,
                    other => {
                        return Err(crate::error::ContentError::mismatch(
                            format!("an object of type {descriptor}"),
                            other.kind_name(),
                        ))
                    }
                };
                let type_info = use_type_info.then_some(object.type_name.as_str());
                self.open(depth, tag_key, type_info, "")?;
                self.write_fields(depth + 1, &object.fields)?;
                self.close(depth, tag_key)
            }
        }
    }

    /// Writes `[key:type_info]content[/key]` on one line.
    pub fn write_inline(
        &mut self,
        depth: usize,
        tag_key: &str,
        type_info: Option<&str>,
        content: &str,
    ) -> Result<()> {
        let line = format!(
            "{}{content}[/{tag_key}]",
            start_tag(tag_key, type_info, "")
        );
        self.sink.write_line(depth, &line)
    }

    /// Writes a start tag on its own line.
    pub fn open(
        &mut self,
        depth: usize,
        tag_key: &str,
        type_info: Option<&str>,
        dimension_info: &str,
    ) -> Result<()> {
        self.sink
            .write_line(depth, &start_tag(tag_key, type_info, dimension_info))
    }

    /// Writes `[/key]` on its own line.
    pub fn close(&mut self, depth: usize, tag_key: &str) -> Result<()> {
        self.sink.write_line(depth, &format!("[/{tag_key}]"))
    }
}

fn start_tag(tag_key: &str, type_info: Option<&str>, dimension_info: &str) -> String {
    let mut tag = format!("[{tag_key}:{}", type_info.unwrap_or_default());
    if !dimension_info.is_empty() {
        tag.push('(');
        tag.push_str(dimension_info);
        tag.push(')');
    }
    tag.push(']');
    tag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PrimitiveKind;
    use crate::value::Scalar;

    fn point() -> ObjectValue {
        ObjectValue {
            type_name: "demo::Point".into(),
            fields: vec![
                Field {
                    key: "x".into(),
                    descriptor: TypeDescriptor::Primitive(PrimitiveKind::Int32),
                    value: Value::Primitive(Scalar::Int32(3)),
                },
                Field {
                    key: "tags".into(),
                    descriptor: TypeDescriptor::list(TypeDescriptor::String),
                    value: Value::List(vec![Value::String("a]b".into())]),
                },
            ],
        }
    }

    fn render(settings: &ContentSettings) -> String {
        let mut sink = TextSink::new(Vec::new(), settings);
        WriteSession::new(&mut sink).write_document(&point()).unwrap();
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_indented_output() {
        let text = render(&ContentSettings::default());
        assert_eq!(
            text,
            "[demo::Point]\n\
             \t[x:INT32]3[/x]\n\
             \t[tags:LIST<STRING>(1)]\n\
             \t\t[:]a\\]b[/]\n\
             \t[/tags]\n\
             [/demo::Point]\n"
        );
    }

    #[test]
    fn test_minified_output() {
        let settings = ContentSettings {
            minify: true,
            ..ContentSettings::default()
        };
        assert_eq!(
            render(&settings),
            "[demo::Point][x:INT32]3[/x][tags:LIST<STRING>(1)][:]a\\]b[/][/tags][/demo::Point]"
        );
    }

    #[test]
    fn test_closure_sink_receives_depths() {
        let mut lines = Vec::new();
        let mut sink = |depth: usize, line: &str| -> Result<()> {
            lines.push((depth, line.to_owned()));
            Ok(())
        };
        WriteSession::new(&mut sink).write_document(&point()).unwrap();
        assert_eq!(lines[0], (0, "[demo::Point]".to_owned()));
        assert_eq!(lines[3], (2, "[:]a\\]b[/]".to_owned()));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_value_must_match_descriptor() {
        let mut object = point();
        object.fields[0].value = Value::String("3".into());
        let mut sink = |_: usize, _: &str| -> Result<()> { Ok(()) };
        assert!(WriteSession::new(&mut sink).write_document(&object).is_err());
    }
}
