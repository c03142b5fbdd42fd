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

use crate::helpers::*;
use anyhow::{Context, Result};
use khora_content::{ContentSerializer, ContentSettings};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub fn run(paths: &[PathBuf], settings: ContentSettings, write: bool) -> Result<()> {
    let files = collect_files(paths, &settings.extension)?;
    let serializer = serializer(settings);

    for file in &files {
        let text = format_file(&serializer, file)?;
        if write {
            fs::write(file, &text)
                .with_context(|| format!("Failed to write '{}'", file.display()))?;
            print_success(&format!("Formatted {}", file.display()));
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if serializer.settings().minify {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

/// Reads a document and writes it back with the serializer's layout.
///
/// Nothing is written anywhere if the file does not parse.
pub fn format_file(serializer: &ContentSerializer, path: &Path) -> Result<String> {
    let text =
        fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    let document = serializer
        .read_document(text.as_slice())
        .with_context(|| format!("Failed to parse '{}'", path.display()))?;

    let mut out = Vec::with_capacity(text.len());
    serializer.write_document(&mut out, &document)?;
    Ok(String::from_utf8(out)?)
}
