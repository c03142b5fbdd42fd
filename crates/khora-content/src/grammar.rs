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

//! The tag grammar: turns a character stream into discrete tag events.
//!
//! A field tag has the shape `[key:Base<Generic>(dims)]`, an end tag
//! `[/key]`, a collection element tag `[key:(dims)]` and an object wrapper
//! `[TypeName]`. Inside a tag body a backslash escapes the next character
//! and a raw newline, carriage return or tab is a hard error. Between tags,
//! whitespace is skipped and any other character only produces a warning.

use crate::error::{ReaderError, Result, TypeError, WriterError};
use crate::stream::ContentStream;
use std::io::Read;

/// A start tag that matched the full `key:Base<Generic>(dims)` grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTag {
    /// The field key.
    pub key: String,
    /// The handler name or custom type name.
    pub base_type_info: String,
    /// The text between `<` and `>`, or empty.
    pub generic_type_info: String,
    /// The text between `(` and `)`, or empty.
    pub dimension_info: String,
}

/// The outcome of reading a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartTag {
    /// A well-formed field tag.
    Field(FieldTag),
    /// Anything else, usually an end tag such as `/key`. Holds the raw body.
    Unmatched(String),
}

/// A collection element tag: `[key:(dims)]`, `[key:]` or `[:]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTag {
    /// The key exactly as written, escapes included. End tags repeat it.
    pub raw_key: String,
    /// The key with escapes removed.
    pub key: String,
    /// The text between `(` and `)`, or empty.
    pub dimension_info: String,
}

#[inline]
pub(crate) fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\r' | '\t')
}

/// Reads a tag body up to the closing `]`; the opening `[` is already consumed.
///
/// Escapes are kept verbatim so that `\]` does not close the tag.
pub fn read_tag_body<R: Read>(stream: &mut ContentStream<R>) -> Result<String> {
    let mut body = String::new();
    loop {
        match stream.read_char()? {
            None => {
                return Err(ReaderError::UnexpectedEof {
                    expected: format!("']' closing '[{body}'"),
                }
                .into())
            }
            Some(']') => return Ok(body),
            Some(c @ ('\n' | '\r' | '\t')) => {
                return Err(ReaderError::InvalidTagCharacter { found: c, tag: body }.into())
            }
            Some('\\') => {
                body.push('\\');
                match stream.read_char()? {
                    Some(c @ ('\n' | '\r' | '\t')) => {
                        return Err(ReaderError::InvalidTagCharacter { found: c, tag: body }.into())
                    }
                    Some(c) => body.push(c),
                    None => {
                        return Err(ReaderError::UnexpectedEof {
                            expected: "an escaped character".to_owned(),
                        }
                        .into())
                    }
                }
            }
            Some(c) => body.push(c),
        }
    }
}

/// Skips separators up to the next `[`, warning about anything else.
fn skip_to_tag<R: Read>(stream: &mut ContentStream<R>, expecting: &str) -> Result<()> {
    loop {
        match stream.read_char()? {
            None => {
                return Err(ReaderError::UnexpectedEof {
                    expected: format!("'[{expecting}]'"),
                }
                .into())
            }
            Some('[') => return Ok(()),
            Some(c) if is_separator(c) => {}
            Some(c) => log::warn!(
                "Ignoring stray character {c:?} at line {} before '[{expecting}]'",
                stream.line()
            ),
        }
    }
}

/// Skips leading separators and fails on anything but `[`.
fn expect_tag_open<R: Read>(stream: &mut ContentStream<R>) -> Result<()> {
    loop {
        match stream.read_char()? {
            None => {
                return Err(ReaderError::UnexpectedEof {
                    expected: "a document start tag".to_owned(),
                }
                .into())
            }
            Some('[') => return Ok(()),
            Some(c) if is_separator(c) => {}
            Some(c) => return Err(ReaderError::UnexpectedCharacter { found: c }.into()),
        }
    }
}

/// Reads the document wrapper tag and requires it to be exactly `[expected]`.
pub fn read_object_start_tag<R: Read>(stream: &mut ContentStream<R>, expected: &str) -> Result<()> {
    expect_tag_open(stream)?;
    let body = read_tag_body(stream)?;
    if body != expected {
        return Err(ReaderError::TagMismatch {
            expected: expected.to_owned(),
            found: body,
        }
        .into());
    }
    Ok(())
}

/// Reads the document wrapper tag and returns the type name it carries.
pub fn read_any_object_start_tag<R: Read>(stream: &mut ContentStream<R>) -> Result<String> {
    expect_tag_open(stream)?;
    let body = read_tag_body(stream)?;
    if body.is_empty() || body.starts_with('/') || body.contains(['<', '>', '(', ')', '\\']) {
        return Err(ReaderError::MalformedElementTag { tag: body }.into());
    }
    Ok(body)
}

/// Reads a start tag; the opening `[` is already consumed.
pub fn read_start_tag<R: Read>(stream: &mut ContentStream<R>) -> Result<StartTag> {
    let body = read_tag_body(stream)?;
    Ok(parse_start_tag(body))
}

/// Matches a tag body against the `key:Base<Generic>(dims)` grammar.
pub fn parse_start_tag(body: String) -> StartTag {
    match match_field_tag(&body) {
        Some(tag) => StartTag::Field(tag),
        None => StartTag::Unmatched(body),
    }
}

fn match_field_tag(body: &str) -> Option<FieldTag> {
    let (key, rest) = body.split_once(':')?;
    if key.is_empty() || key.starts_with('/') || key.contains(['<', '>', '(', ')', '\\']) {
        return None;
    }

    let base_end = rest.find(['<', '(']).unwrap_or(rest.len());
    let base = rest[..base_end].trim();
    if base.is_empty() || base.contains(['>', ')', ',']) {
        return None;
    }

    let mut remainder = &rest[base_end..];
    let mut generic = "";
    if remainder.starts_with('<') {
        let close = matching_angle(remainder)?;
        generic = &remainder[1..close];
        remainder = &remainder[close + 1..];
    }

    let dims = if remainder.is_empty() {
        ""
    } else {
        let inner = remainder.strip_prefix('(')?.strip_suffix(')')?;
        if inner.contains(['(', ')']) {
            return None;
        }
        inner
    };

    Some(FieldTag {
        key: key.to_owned(),
        base_type_info: base.to_owned(),
        generic_type_info: generic.to_owned(),
        dimension_info: dims.to_owned(),
    })
}

/// Index of the `>` closing the `<` at the start of `text`.
fn matching_angle(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Reads an end tag; the opening `[` is already consumed.
pub fn read_end_tag<R: Read>(stream: &mut ContentStream<R>, key: &str) -> Result<()> {
    let body = read_tag_body(stream)?;
    if body.strip_prefix('/') != Some(key) {
        return Err(ReaderError::TagMismatch {
            expected: format!("/{key}"),
            found: body,
        }
        .into());
    }
    Ok(())
}

/// Skips to the next tag and requires its body to equal `expected`.
pub fn read_tag<R: Read>(stream: &mut ContentStream<R>, expected: &str) -> Result<()> {
    skip_to_tag(stream, expected)?;
    let body = read_tag_body(stream)?;
    if body != expected {
        return Err(ReaderError::TagMismatch {
            expected: expected.to_owned(),
            found: body,
        }
        .into());
    }
    Ok(())
}

/// Skips to the next tag and parses it as a collection element tag.
pub fn read_element_start_tag<R: Read>(stream: &mut ContentStream<R>) -> Result<ElementTag> {
    skip_to_tag(stream, ":")?;
    let body = read_tag_body(stream)?;
    parse_element_tag(&body).ok_or_else(|| ReaderError::MalformedElementTag { tag: body }.into())
}

/// Matches a tag body against the element grammar `key:(dims)`.
pub fn parse_element_tag(body: &str) -> Option<ElementTag> {
    let mut escaped = false;
    let mut separator = None;
    for (index, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            ':' => {
                separator = Some(index);
                break;
            }
            _ => {}
        }
    }

    let separator = separator?;
    let raw_key = &body[..separator];
    if raw_key.starts_with('/') {
        return None;
    }
    let rest = &body[separator + 1..];
    let dims = if rest.is_empty() {
        ""
    } else {
        let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
        if inner.contains(['(', ')']) {
            return None;
        }
        inner
    };

    Some(ElementTag {
        raw_key: raw_key.to_owned(),
        key: unescape(raw_key),
        dimension_info: dims.to_owned(),
    })
}

/// Reads value text up to the `[` that starts its end tag, resolving escapes.
pub fn read_content<R: Read>(stream: &mut ContentStream<R>) -> Result<String> {
    let mut content = String::new();
    loop {
        match stream.read_char()? {
            None => {
                return Err(ReaderError::UnexpectedEof {
                    expected: "an end tag after the value".to_owned(),
                }
                .into())
            }
            Some('[') => return Ok(content),
            Some('\\') => match stream.read_char()? {
                Some(c) => content.push(c),
                None => {
                    return Err(ReaderError::UnexpectedEof {
                        expected: "an escaped character".to_owned(),
                    }
                    .into())
                }
            },
            Some(c) => content.push(c),
        }
    }
}

/// Parses comma-separated dimension sizes or element counts.
pub fn parse_dimensions(dimension_info: &str) -> Result<Vec<usize>> {
    let invalid = || TypeError::InvalidDimensions {
        dimension_info: dimension_info.to_owned(),
    };
    if dimension_info.trim().is_empty() {
        return Err(invalid().into());
    }
    dimension_info
        .split(',')
        .map(|part| part.trim().parse::<usize>().map_err(|_| invalid().into()))
        .collect()
}

/// Parses a single element count, as used by lists and dictionaries.
pub fn parse_count(dimension_info: &str) -> Result<usize> {
    match parse_dimensions(dimension_info)?.as_slice() {
        [count] => Ok(*count),
        _ => Err(TypeError::InvalidDimensions {
            dimension_info: dimension_info.to_owned(),
        }
        .into()),
    }
}

/// Splits `Base<Generic>` into its base and generic parts.
pub fn split_type_info(type_info: &str) -> Result<(&str, &str)> {
    let text = type_info.trim();
    let invalid = || TypeError::InvalidGenericInfo {
        generic_info: text.to_owned(),
    };

    let (base, generic) = match text.find('<') {
        None if text.contains('>') => return Err(invalid().into()),
        None => (text, ""),
        Some(open) => {
            let close = matching_angle(&text[open..]).ok_or_else(invalid)? + open;
            if close != text.len() - 1 {
                return Err(invalid().into());
            }
            (text[..open].trim(), &text[open + 1..close])
        }
    };

    if base.is_empty() {
        return Err(TypeError::Unresolved {
            type_info: text.to_owned(),
        }
        .into());
    }
    Ok((base, generic))
}

/// Splits a `Key, Value` generic pair at its top-level comma.
pub fn split_key_value(generic_info: &str) -> Result<(&str, &str)> {
    let mut depth = 0usize;
    let mut split = None;
    for (index, c) in generic_info.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                if split.is_some() {
                    split = None;
                    break;
                }
                split = Some(index);
            }
            _ => {}
        }
    }

    let invalid = || TypeError::InvalidGenericInfo {
        generic_info: generic_info.to_owned(),
    };
    let index = split.ok_or_else(invalid)?;
    let (key, value) = (generic_info[..index].trim(), generic_info[index + 1..].trim());
    if key.is_empty() || value.is_empty() {
        return Err(invalid().into());
    }
    Ok((key, value))
}

/// Escapes `\`, `[` and `]` in string content.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escapes a dictionary key for use inside an element tag.
///
/// Besides the string escapes, `:` and `/` are escaped so the key cannot end
/// the key part early or pass for an end tag.
pub fn escape_key(key: &str) -> Result<String> {
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        match c {
            '\n' | '\r' | '\t' => {
                return Err(WriterError::UnrepresentableKey {
                    key: key.to_owned(),
                }
                .into())
            }
            '\\' | '[' | ']' | ':' | '/' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    Ok(escaped)
}

/// Removes backslash escapes, keeping each escaped character verbatim.
pub fn unescape(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                text.push(next);
            }
        } else {
            text.push(c);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;

    fn stream(text: &str) -> ContentStream<&[u8]> {
        ContentStream::new(text.as_bytes())
    }

    fn field(body: &str) -> FieldTag {
        match parse_start_tag(body.to_owned()) {
            StartTag::Field(tag) => tag,
            StartTag::Unmatched(raw) => panic!("'{raw}' did not match"),
        }
    }

    #[test]
    fn test_parse_full_field_tag() {
        let tag = field("grid:ARRAY<LIST<INT32>>(2,3)");
        assert_eq!(tag.key, "grid");
        assert_eq!(tag.base_type_info, "ARRAY");
        assert_eq!(tag.generic_type_info, "LIST<INT32>");
        assert_eq!(tag.dimension_info, "2,3");
    }

    #[test]
    fn test_parse_simple_and_qualified_tags() {
        let tag = field("x:INT32");
        assert_eq!(tag.base_type_info, "INT32");
        assert!(tag.generic_type_info.is_empty());
        assert!(tag.dimension_info.is_empty());

        let tag = field("origin:demo::shapes::Point");
        assert_eq!(tag.key, "origin");
        assert_eq!(tag.base_type_info, "demo::shapes::Point");
    }

    #[test]
    fn test_end_tags_do_not_match_the_field_grammar() {
        assert_eq!(
            parse_start_tag("/x".to_owned()),
            StartTag::Unmatched("/x".to_owned())
        );
        assert_eq!(
            parse_start_tag("/demo::Point".to_owned()),
            StartTag::Unmatched("/demo::Point".to_owned())
        );
        assert!(matches!(
            parse_start_tag("a:LIST<INT32".to_owned()),
            StartTag::Unmatched(_)
        ));
        assert!(matches!(
            parse_start_tag("a:LIST<INT32>(3)x".to_owned()),
            StartTag::Unmatched(_)
        ));
    }

    #[test]
    fn test_tag_body_rejects_control_characters() {
        let error = read_tag_body(&mut stream("a:\nINT32]")).unwrap_err();
        assert!(matches!(
            error,
            ContentError::Reader(ReaderError::InvalidTagCharacter { found: '\n', .. })
        ));
    }

    #[test]
    fn test_tag_body_keeps_escapes() {
        let body = read_tag_body(&mut stream(r"a\]b:]")).unwrap();
        assert_eq!(body, r"a\]b:");
    }

    #[test]
    fn test_object_start_tag_must_match_exactly() {
        read_object_start_tag(&mut stream("\n  [demo::Point]"), "demo::Point").unwrap();
        let error = read_object_start_tag(&mut stream("[demo::Other]"), "demo::Point").unwrap_err();
        assert!(matches!(
            error,
            ContentError::Reader(ReaderError::TagMismatch { .. })
        ));
    }

    #[test]
    fn test_read_tag_tolerates_stray_characters() {
        read_tag(&mut stream("  junk [/items]"), "/items").unwrap();
    }

    #[test]
    fn test_read_content_resolves_escapes() {
        let mut input = stream(r"a\[b\]c\\d[/s]");
        assert_eq!(read_content(&mut input).unwrap(), r"a[b]c\d");
        read_end_tag(&mut input, "s").unwrap();
    }

    #[test]
    fn test_element_tags() {
        let tag = parse_element_tag(":(2,3)").unwrap();
        assert_eq!(tag.raw_key, "");
        assert_eq!(tag.dimension_info, "2,3");

        let tag = parse_element_tag(r"a\:b:").unwrap();
        assert_eq!(tag.raw_key, r"a\:b");
        assert_eq!(tag.key, "a:b");
        assert!(tag.dimension_info.is_empty());

        assert!(parse_element_tag("/").is_none());
        assert!(parse_element_tag("k:3").is_none());
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(parse_dimensions("2, 3,4").unwrap(), vec![2, 3, 4]);
        assert_eq!(parse_count("7").unwrap(), 7);
        assert!(parse_dimensions("").is_err());
        assert!(parse_dimensions("2,x").is_err());
        assert!(parse_count("2,3").is_err());
    }

    #[test]
    fn test_split_type_info() {
        assert_eq!(split_type_info("INT32").unwrap(), ("INT32", ""));
        assert_eq!(
            split_type_info("DICTIONARY<STRING, LIST<INT32>>").unwrap(),
            ("DICTIONARY", "STRING, LIST<INT32>")
        );
        assert!(split_type_info("LIST<INT32>>").is_err());
        assert!(split_type_info("LIST<INT32>x").is_err());
    }

    #[test]
    fn test_split_key_value() {
        assert_eq!(
            split_key_value("STRING, DICTIONARY<INT32, BOOLEAN>").unwrap(),
            ("STRING", "DICTIONARY<INT32, BOOLEAN>")
        );
        assert!(split_key_value("STRING").is_err());
        assert!(split_key_value("A, B, C").is_err());
    }

    #[test]
    fn test_escaping() {
        let raw = r"path\to[0]";
        let escaped = escape(raw);
        assert_eq!(escaped, r"path\\to\[0\]");
        assert_eq!(unescape(&escaped), raw);
        assert_eq!(escape_key("a:b").unwrap(), r"a\:b");
        assert_eq!(escape_key("/x").unwrap(), r"\/x");
        assert!(escape_key("a\nb").is_err());
    }
}
