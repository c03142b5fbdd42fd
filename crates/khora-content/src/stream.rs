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

//! Character-at-a-time access to a byte stream.
//!
//! [`ContentStream`] never looks ahead: callers accumulate characters into
//! their own buffers until they see a delimiter. It keeps a 1-based line
//! counter and a byte offset for diagnostics.

use crate::error::{ReaderError, Result};
use std::io::{ErrorKind, Read};

/// Wraps a reader and hands out one character at a time.
///
/// The reader is read byte by byte, so wrap files in a `BufReader`.
/// Passing `&mut reader` keeps ownership with the caller; dropping the
/// stream otherwise drops (and closes) the underlying reader.
#[derive(Debug)]
pub struct ContentStream<R> {
    inner: R,
    line: usize,
    position: usize,
}

impl<R: Read> ContentStream<R> {
    /// Creates a stream positioned at the start of `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 1,
            position: 0,
        }
    }

    /// Reads the next character, or `None` at end of stream.
    ///
    /// Multi-byte UTF-8 sequences are decoded into a single character.
    pub fn read_char(&mut self) -> Result<Option<char>> {
        let start = self.position;
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };

        let width = match first {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(ReaderError::InvalidEncoding { position: start }.into()),
        };

        let mut buffer = [first, 0, 0, 0];
        for slot in buffer.iter_mut().take(width).skip(1) {
            *slot = self.read_byte()?.ok_or_else(|| ReaderError::UnexpectedEof {
                expected: "the rest of a UTF-8 sequence".to_owned(),
            })?;
        }

        let ch = std::str::from_utf8(&buffer[..width])
            .ok()
            .and_then(|text| text.chars().next())
            .ok_or(ReaderError::InvalidEncoding { position: start })?;

        if ch == '\n' {
            self.line += 1;
        }
        Ok(Some(ch))
    }

    /// The current 1-based line number.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
