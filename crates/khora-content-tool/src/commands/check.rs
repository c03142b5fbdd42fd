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
use anyhow::{bail, Context, Result};
use khora_content::{ContentSerializer, ContentSettings};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub fn run(paths: &[PathBuf], settings: ContentSettings) -> Result<()> {
    let files = collect_files(paths, &settings.extension)?;
    let serializer = serializer(settings);

    let mut passed = 0;
    for file in &files {
        match check_file(&serializer, file) {
            Ok(fields) => {
                print_success(&format!("{} ({} fields)", file.display(), fields));
                passed += 1;
            }
            Err(e) => print_error(&format!("{}: {:#}", file.display(), e)),
        }
    }

    print_summary(passed, files.len());
    if passed != files.len() {
        bail!("{} of {} files failed", files.len() - passed, files.len());
    }
    Ok(())
}

/// Parses one file, returning the number of top-level fields.
pub fn check_file(serializer: &ContentSerializer, path: &Path) -> Result<usize> {
    let file =
        File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?;
    let document = serializer.read_document(BufReader::new(file))?;
    log::debug!(
        "'{}' holds a '{}' document",
        path.display(),
        document.type_name
    );
    Ok(document.fields.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn lenient() -> ContentSerializer {
        serializer(ContentSettings {
            strict_types: false,
            ..ContentSettings::default()
        })
    }

    #[test]
    fn test_valid_file_passes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("player.kcn");
        fs::write(
            &path,
            "[demo::Player]\n\t[name:STRING]Ada[/name]\n\t[team:ENUM<demo::Team>]Blue[/team]\n[/demo::Player]\n",
        )?;
        assert_eq!(check_file(&lenient(), &path)?, 2);
        Ok(())
    }

    #[test]
    fn test_broken_file_fails_with_line() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.kcn");
        fs::write(&path, "[demo::Player]\n\t[name:STRING]Ada[/nam]\n[/demo::Player]\n")?;
        let error = check_file(&lenient(), &path).unwrap_err();
        assert!(error.to_string().starts_with("line 2:"), "{error}");
        Ok(())
    }

    #[test]
    fn test_strict_mode_rejects_unknown_types() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("player.kcn");
        fs::write(&path, "[demo::Player][name:STRING]Ada[/name][/demo::Player]")?;
        let strict = serializer(ContentSettings::default());
        assert!(check_file(&strict, &path).is_err());
        Ok(())
    }
}
