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

use anyhow::{bail, Result};
use khora_content::{ContentRegistry, ContentSerializer, ContentSettings};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";

pub const CHECK: &str = "✓";
pub const CROSS: &str = "✗";

pub fn print_success(message: &str) {
    eprintln!("{}{} {} {}{}", BOLD, GREEN, CHECK, message, RESET);
}

pub fn print_error(message: &str) {
    eprintln!("{}{} {} {}{}", BOLD, RED, CROSS, message, RESET);
}

pub fn print_summary(passed: usize, total: usize) {
    let color = if passed == total { GREEN } else { YELLOW };
    eprintln!("{}{}{}/{} files OK{}", BOLD, color, passed, total, RESET);
}

/// Loads the settings file. Without one, unknown types are accepted.
/// `--strict` can only turn strict types on.
pub fn load_settings(path: &Path, strict: bool) -> Result<ContentSettings> {
    let mut settings = if path.exists() {
        ContentSettings::load(path)?
    } else {
        ContentSettings {
            strict_types: false,
            ..ContentSettings::default()
        }
    };
    if strict {
        settings.strict_types = true;
    }
    Ok(settings)
}

/// A serializer that knows the built-in types only.
pub fn serializer(settings: ContentSettings) -> ContentSerializer {
    ContentSerializer::with_settings(Arc::new(ContentRegistry::new()), settings)
}

/// Expands directories into the content files they contain, recursively.
///
/// Files named explicitly are kept whatever their extension.
pub fn collect_files(paths: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .map(|entry| entry.into_path())
                    .filter(|p| p.is_file() && has_extension(p, extension)),
            );
        } else {
            bail!("'{}' does not exist", path.display());
        }
    }
    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}
