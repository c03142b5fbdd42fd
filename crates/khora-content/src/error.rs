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

//! Defines the hierarchy of error types for content serialization.
//!
//! Every failure is one of four kinds: structural problems in the text
//! ([`ReaderError`]), type resolution and conversion problems ([`TypeError`]),
//! problems producing output or registering plugins ([`WriterError`]) and
//! key bookkeeping problems inside one object ([`ContextError`]). None of them
//! is recovered from internally.

use thiserror::Error;

/// A structural violation found while reading the tag stream.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The stream ended before the expected token was found.
    #[error("unexpected end of stream while looking for {expected}")]
    UnexpectedEof {
        /// What the reader was waiting for.
        expected: String,
    },
    /// A newline, carriage return or tab appeared inside a tag body.
    #[error("invalid character {found:?} inside tag '[{tag}'")]
    InvalidTagCharacter {
        /// The offending character.
        found: char,
        /// The part of the tag read so far.
        tag: String,
    },
    /// A tag did not have the expected content.
    #[error("expected tag '[{expected}]' but found '[{found}]'")]
    TagMismatch {
        /// The literal tag content that was required.
        expected: String,
        /// The tag content that was actually read.
        found: String,
    },
    /// A character that may not appear between tags.
    #[error("unexpected character {found:?} outside of a tag")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
    },
    /// A collection element tag that does not follow the `key:(dims)` grammar.
    #[error("malformed element tag '[{tag}]'")]
    MalformedElementTag {
        /// The tag content.
        tag: String,
    },
    /// An enum value that names no member of its enum.
    #[error("'{member}' is not a member of enum '{enum_name}'")]
    UnknownEnumMember {
        /// The resolved enum type name.
        enum_name: String,
        /// The member text found in the stream.
        member: String,
    },
    /// The same key appeared twice in one dictionary.
    #[error("duplicate dictionary entry '{key}'")]
    DuplicateEntry {
        /// The textual dictionary key.
        key: String,
    },
    /// The byte stream is not valid UTF-8.
    #[error("invalid UTF-8 sequence at byte {position}")]
    InvalidEncoding {
        /// Byte offset of the first byte of the sequence.
        position: usize,
    },
}

/// A failure to resolve, describe or convert a type.
#[derive(Debug, Error)]
pub enum TypeError {
    /// No handler, registered object or namespace probe matches the type text.
    #[error("unable to resolve type '{type_info}'")]
    Unresolved {
        /// The type text as written.
        type_info: String,
    },
    /// The type is known but has no registered reader.
    #[error("no reader registered for type '{type_name}'")]
    NoReader {
        /// The registered type name.
        type_name: String,
    },
    /// An `ENUM<..>` type that resolves to something other than an enum.
    #[error("type '{type_name}' is not an enum")]
    NotAnEnum {
        /// The resolved type name.
        type_name: String,
    },
    /// Dictionary keys must use a primitive handler.
    #[error("dictionary key type '{type_info}' is not supported; keys must be primitive")]
    UnsupportedKeyType {
        /// The key type text.
        type_info: String,
    },
    /// Dimension or count information that is missing or not a list of integers.
    #[error("invalid dimension info '({dimension_info})'")]
    InvalidDimensions {
        /// The text between the parentheses.
        dimension_info: String,
    },
    /// A container handler was used without its `<..>` part.
    #[error("type '{type_name}' requires generic type info")]
    MissingGenericInfo {
        /// The handler name.
        type_name: String,
    },
    /// Generic or dimension info was attached to a type that takes none.
    #[error("type '{type_name}' does not take '{extra}'")]
    UnexpectedTypeInfo {
        /// The type name.
        type_name: String,
        /// The superfluous part.
        extra: String,
    },
    /// The `<..>` part could not be split into its element types.
    #[error("invalid generic type info '<{generic_info}>'")]
    InvalidGenericInfo {
        /// The text between the angle brackets.
        generic_info: String,
    },
    /// A name that cannot be embedded in a tag.
    #[error("'{type_name}' cannot be used as a content type name")]
    InvalidTypeName {
        /// The rejected name.
        type_name: String,
    },
    /// Text that does not parse as the declared primitive.
    #[error("cannot convert '{text}' to {type_name}")]
    Conversion {
        /// The primitive type name.
        type_name: String,
        /// The text that failed to convert.
        text: String,
    },
    /// A value that does not have the shape the caller asked for.
    #[error("expected {expected} but found {found}")]
    Mismatch {
        /// Description of the expected value.
        expected: String,
        /// Description of the value found.
        found: String,
    },
}

/// A failure producing output or registering plugins.
#[derive(Debug, Error)]
pub enum WriterError {
    /// The type has no registered writer.
    #[error("no writer registered for type '{type_name}'")]
    NoWriter {
        /// The type name.
        type_name: String,
    },
    /// A reader, writer or enum was registered twice.
    #[error("a {role} is already registered for type '{type_name}'")]
    DuplicateRegistration {
        /// The type name.
        type_name: String,
        /// `"reader"`, `"writer"` or `"enum"`.
        role: &'static str,
    },
    /// The output name was empty.
    #[error("the content name must not be empty")]
    EmptyName,
    /// Only custom objects can be the root of a document.
    #[error("'{type_info}' cannot be written as a document root")]
    NotAnObject {
        /// The descriptor of the rejected type.
        type_info: String,
    },
    /// A dictionary key whose text cannot be placed inside a tag.
    #[error("dictionary key {key:?} cannot be represented in a tag")]
    UnrepresentableKey {
        /// The key text.
        key: String,
    },
    /// The array item count does not match the product of its dimensions.
    #[error("array of shape {dims:?} holds {len} items")]
    ShapeMismatch {
        /// The declared dimensions.
        dims: Vec<usize>,
        /// The actual number of items.
        len: usize,
    },
}

/// A key bookkeeping failure inside one object's context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The key was already present in the context.
    #[error("key '{key}' is already present in this object")]
    DuplicateKey {
        /// The duplicated key.
        key: String,
    },
    /// A reader asked for a key the context does not hold.
    #[error("key '{key}' is missing from this object")]
    MissingKey {
        /// The missing key.
        key: String,
    },
    /// The key cannot be written as a tag key.
    #[error("'{key}' is not a valid field key")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },
}

/// The error type of every content operation.
#[derive(Debug, Error)]
pub enum ContentError {
    /// See [`ReaderError`].
    #[error(transparent)]
    Reader(#[from] ReaderError),
    /// See [`TypeError`].
    #[error(transparent)]
    Type(#[from] TypeError),
    /// See [`WriterError`].
    #[error(transparent)]
    Writer(#[from] WriterError),
    /// See [`ContextError`].
    #[error(transparent)]
    Context(#[from] ContextError),
    /// The underlying stream or file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A settings file could not be parsed.
    #[error("invalid content settings: {0}")]
    Settings(#[from] toml::de::Error),
    /// An error raised while reading, annotated with the line it occurred on.
    #[error("line {line}: {source}")]
    AtLine {
        /// The 1-based line number.
        line: usize,
        /// The annotated error.
        source: Box<ContentError>,
    },
}

impl ContentError {
    /// Wraps `self` with a line number, unless it already carries one.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            already @ ContentError::AtLine { .. } => already,
            other => ContentError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// The line number attached by a top-level read, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ContentError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The innermost error, with any line annotation removed.
    pub fn root(&self) -> &ContentError {
        match self {
            ContentError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        TypeError::Mismatch {
            expected: expected.into(),
            found: found.into(),
        }
        .into()
    }
}

/// A specialized `Result` for content operations.
pub type Result<T> = std::result::Result<T, ContentError>;
