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

//! Serializer settings, loadable from a TOML file.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

/// The extension appended to output paths that have none.
pub const DEFAULT_EXTENSION: &str = "kcn";

/// Options of a [`ContentSerializer`](crate::ContentSerializer).
///
/// Missing keys in a settings file keep their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Appended to output paths without an extension.
    pub extension: String,
    /// Writes everything on one line, without indentation.
    pub minify: bool,
    /// One level of indentation in non-minified output.
    pub indent: String,
    /// Unknown type names and enum members are errors when set. When unset,
    /// they are kept as written, which only makes sense for untyped documents.
    pub strict_types: bool,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_owned(),
            minify: false,
            indent: "\t".to_owned(),
            strict_types: true,
        }
    }
}

impl ContentSettings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads settings from a TOML file, or returns the defaults if the file
    /// does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "No content settings at '{}', using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
