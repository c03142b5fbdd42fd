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

//! Untyped documents: reading without plugins and writing them back.

mod common;

use common::{init_logging, sample_scene};
use khora_content::{
    ContentRegistry, ContentSerializer, ContentSettings, Scalar, TypeDescriptor, Value,
};
use std::sync::Arc;

fn lenient() -> ContentSerializer {
    init_logging();
    let settings = ContentSettings {
        strict_types: false,
        ..ContentSettings::default()
    };
    ContentSerializer::with_settings(Arc::new(ContentRegistry::empty()), settings)
}

fn typed_scene_text() -> anyhow::Result<String> {
    let serializer = ContentSerializer::new(Arc::new(ContentRegistry::discover()?));
    Ok(serializer.to_string(&sample_scene())?)
}

#[test]
fn test_lenient_read_needs_no_registration() -> anyhow::Result<()> {
    let text = typed_scene_text()?;
    let document = lenient().read_document(text.as_bytes())?;

    assert_eq!(document.type_name, "demo::Scene");
    let color = document.field("color").expect("color field");
    assert_eq!(color.descriptor, TypeDescriptor::Enum("demo::Color".into()));
    assert_eq!(color.value, Value::Enum("Green".into()));

    let origin = document.field("origin").expect("origin field");
    assert!(origin.descriptor.is_object());
    let Value::Object(origin) = &origin.value else {
        panic!("origin is not an object");
    };
    assert_eq!(
        origin.field("Y").map(|field| &field.value),
        Some(&Value::Primitive(Scalar::Int32(-7)))
    );
    Ok(())
}

#[test]
fn test_lenient_documents_are_rewritten_unchanged() -> anyhow::Result<()> {
    let text = typed_scene_text()?;
    let serializer = lenient();
    let document = serializer.read_document(text.as_bytes())?;

    let mut out = Vec::new();
    serializer.write_document(&mut out, &document)?;
    assert_eq!(String::from_utf8(out)?, text);
    Ok(())
}

#[test]
fn test_strict_read_rejects_unknown_types() -> anyhow::Result<()> {
    init_logging();
    let text = typed_scene_text()?;
    let serializer = ContentSerializer::new(Arc::new(ContentRegistry::empty()));
    assert!(serializer.read_document(text.as_bytes()).is_err());
    Ok(())
}

#[test]
fn test_minify_then_expand() -> anyhow::Result<()> {
    let text = typed_scene_text()?;
    let minifier = ContentSerializer::with_settings(
        Arc::new(ContentRegistry::empty()),
        ContentSettings {
            strict_types: false,
            minify: true,
            ..ContentSettings::default()
        },
    );

    let document = minifier.read_document(text.as_bytes())?;
    let mut minified = Vec::new();
    minifier.write_document(&mut minified, &document)?;
    let minified = String::from_utf8(minified)?;
    assert!(!minified.contains(['\n', '\t']));
    assert!(minified.len() < text.len());

    let expanded = lenient().read_document(minified.as_bytes())?;
    assert_eq!(expanded, document);
    Ok(())
}

#[test]
fn test_stray_characters_between_fields_are_skipped() -> anyhow::Result<()> {
    let text = "[demo::Thing] junk [n:INT32]5[/n] ; [/demo::Thing]";
    let document = lenient().read_document(text.as_bytes())?;
    assert_eq!(document.fields.len(), 1);
    assert_eq!(
        document.field("n").map(|field| &field.value),
        Some(&Value::Primitive(Scalar::Int32(5)))
    );
    Ok(())
}

#[test]
fn test_settings_file_drives_the_output() -> anyhow::Result<()> {
    init_logging();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("content.toml");
    std::fs::write(&path, "minify = true\nextension = \"txt\"\n")?;

    let settings = ContentSettings::load(&path)?;
    assert!(settings.minify);
    assert!(settings.strict_types);

    let serializer =
        ContentSerializer::with_settings(Arc::new(ContentRegistry::discover()?), settings);
    let written = serializer.write(dir.path().join("scene"), &sample_scene())?;
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("txt"));
    assert!(!std::fs::read_to_string(&written)?.contains('\n'));
    Ok(())
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_empty_arrays_with_huge_dimensions_are_rewritten() -> anyhow::Result<()> {
    let serializer = lenient();
    for text in [
        "[d][a:ARRAY<INT32>(0,4294967296,4294967296)][/a][/d]",
        "[d][a:ARRAY<INT32>(2,0,4294967296,4294967296)][:][/][:][/][/a][/d]",
    ] {
        let document = serializer.read_document(text.as_bytes())?;
        let Value::Array(array) = &document.field("a").expect("a field").value else {
            panic!("a is not an array");
        };
        assert!(array.items.is_empty());

        let mut out = Vec::new();
        serializer.write_document(&mut out, &document)?;
        assert_eq!(serializer.read_document(out.as_slice())?, document);
    }
    Ok(())
}
