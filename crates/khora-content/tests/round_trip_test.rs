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

//! Typed write/read round trips through derived registrations.

mod common;

use common::{init_logging, sample_scene, Color, Numbers, Point, Scene};
use khora_content::{ContentArray, ContentRegistry, ContentSerializer, ContentSettings};
use std::collections::BTreeMap;
use std::sync::Arc;

fn serializer() -> anyhow::Result<ContentSerializer> {
    init_logging();
    Ok(ContentSerializer::new(Arc::new(ContentRegistry::discover()?)))
}

#[test]
fn test_point_text_and_round_trip() -> anyhow::Result<()> {
    let serializer = serializer()?;
    let point = Point { x: 3, y: -7 };

    let text = serializer.to_string(&point)?;
    assert_eq!(
        text,
        "[demo::Point]\n\
         \t[Key:STRING]Point[/Key]\n\
         \t[X:INT32]3[/X]\n\
         \t[Y:INT32]-7[/Y]\n\
         [/demo::Point]\n"
    );

    let back: Point = serializer.from_str(&text)?;
    assert_eq!(back, point);
    Ok(())
}

#[test]
fn test_list_elements_use_the_element_tag() -> anyhow::Result<()> {
    let serializer = serializer()?;
    let numbers = Numbers {
        items: vec![1, 2, 3],
    };

    let text = serializer.to_string(&numbers)?;
    assert!(text.contains("\t[items:LIST<INT32>(3)]\n"));
    assert!(text.contains("\t\t[:]1[/]\n\t\t[:]2[/]\n\t\t[:]3[/]\n\t[/items]\n"));

    let back: Numbers = serializer.from_str(&text)?;
    assert_eq!(back, numbers);
    Ok(())
}

#[test]
fn test_empty_list_round_trips() -> anyhow::Result<()> {
    let serializer = serializer()?;
    let numbers = Numbers { items: Vec::new() };

    let text = serializer.to_string(&numbers)?;
    assert!(text.contains("[items:LIST<INT32>(0)]"));
    assert_eq!(serializer.from_str::<Numbers>(&text)?, numbers);
    Ok(())
}

#[test]
fn test_scene_round_trips_every_kind_of_value() -> anyhow::Result<()> {
    let serializer = serializer()?;
    let scene = sample_scene();

    let text = serializer.to_string(&scene)?;
    let back: Scene = serializer.from_str(&text)?;
    assert_eq!(back, scene);

    // Writing what was read gives the same text.
    assert_eq!(serializer.to_string(&back)?, text);
    Ok(())
}

#[test]
fn test_scene_type_info() -> anyhow::Result<()> {
    let serializer = serializer()?;
    let text = serializer.to_string(&sample_scene())?;

    for expected in [
        "[title:STRING]Level \\[1\\] \\\\ intro[/title]",
        "[initial:CHAR]\\][/initial]",
        "[visible:BOOLEAN]true[/visible]",
        "[color:ENUM<demo::Color>]Green[/color]",
        "[origin:demo::Point]",
        "[grid:ARRAY<INT32>(2,3)]",
        "[waypoints:ARRAY<demo::Point>(2)]",
        "[jagged:ARRAY<ARRAY<INT32>>(2)]",
        "[:(3)]",
        "[:(1)]",
        "[lookup:DICTIONARY<STRING, demo::Point>(2)]",
        "[a\\:b:]",
        "[/a\\:b]",
        "[\\[x\\]:]",
        "[weights:DICTIONARY<INT32, DOUBLE>(2)]",
        "[-2:]0.001[/-2]",
        "[palette:LIST<ENUM<demo::Color>>(2)]",
        "[bounds:khora_math::Rect]",
        "[width:SINGLE]640[/width]",
    ] {
        assert!(text.contains(expected), "missing {expected:?} in\n{text}");
    }
    assert!(!text.contains("[note:"));
    Ok(())
}

#[test]
fn test_two_dimensional_array_layout() -> anyhow::Result<()> {
    let serializer = serializer()?;
    let mut scene = sample_scene();
    scene.grid = ContentArray::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]])?;

    let text = serializer.to_string(&scene)?;
    let expected = "\t[grid:ARRAY<INT32>(2,3)]\n\
                    \t\t[:]\n\
                    \t\t\t[:]1[/]\n\
                    \t\t\t[:]2[/]\n\
                    \t\t\t[:]3[/]\n\
                    \t\t[/]\n\
                    \t\t[:]\n\
                    \t\t\t[:]4[/]\n\
                    \t\t\t[:]5[/]\n\
                    \t\t\t[:]6[/]\n\
                    \t\t[/]\n\
                    \t[/grid]\n";
    assert!(text.contains(expected), "unexpected layout:\n{text}");

    let back: Scene = serializer.from_str(&text)?;
    assert_eq!(back.grid.dims(), &[2, 3]);
    assert_eq!(back.grid.get(&[1, 2]), Some(&6));
    Ok(())
}

#[test]
fn test_optional_field_round_trips() -> anyhow::Result<()> {
    let serializer = serializer()?;
    let mut scene = sample_scene();
    scene.note = Some("  padded  ".to_owned());

    let text = serializer.to_string(&scene)?;
    assert!(text.contains("[note:STRING]  padded  [/note]"));
    let back: Scene = serializer.from_str(&text)?;
    assert_eq!(back.note.as_deref(), Some("  padded  "));
    Ok(())
}

#[test]
fn test_minified_output_round_trips() -> anyhow::Result<()> {
    init_logging();
    let registry = Arc::new(ContentRegistry::discover()?);
    let settings = ContentSettings {
        minify: true,
        ..ContentSettings::default()
    };
    let serializer = ContentSerializer::with_settings(registry, settings);

    let point = Point { x: 3, y: -7 };
    let text = serializer.to_string(&point)?;
    assert_eq!(
        text,
        "[demo::Point][Key:STRING]Point[/Key][X:INT32]3[/X][Y:INT32]-7[/Y][/demo::Point]"
    );

    let scene = sample_scene();
    let text = serializer.to_string(&scene)?;
    assert!(!text.contains('\n'));
    assert_eq!(serializer.from_str::<Scene>(&text)?, scene);
    Ok(())
}

#[test]
fn test_reading_tolerates_extra_whitespace() -> anyhow::Result<()> {
    let serializer = serializer()?;
    let text = "  [demo::Point]\r\n\
                \t\t[Key:STRING]Point[/Key]  \r\n\
                [X:INT32] 3 [/X]\n\n\
                [Y:INT32]-7[/Y][/demo::Point]";
    let point: Point = serializer.from_str(text)?;
    assert_eq!(point, Point { x: 3, y: -7 });
    Ok(())
}

#[test]
fn test_nested_collections_of_objects() -> anyhow::Result<()> {
    use khora_content::{
        Content, ContentContext, ContentObject, ObjectReader, ObjectWriter, Result,
    };

    #[derive(Debug, PartialEq)]
    struct Route {
        legs: Vec<BTreeMap<String, [Point; 1]>>,
        stops: BTreeMap<u16, Vec<Color>>,
    }
    khora_content::impl_content_object!(Route, "demo::Route");

    struct RouteReader;
    impl ObjectReader<Route> for RouteReader {
        fn read(&self, context: &mut ContentContext<'_>) -> Result<Route> {
            Ok(Route {
                legs: context.take("legs")?,
                stops: context.take("stops")?,
            })
        }
    }

    struct RouteWriter;
    impl ObjectWriter<Route> for RouteWriter {
        fn write(&self, context: &mut ContentContext<'_>, route: &Route) -> Result<()> {
            context.insert("legs", &route.legs)?;
            context.insert("stops", &route.stops)
        }
    }

    init_logging();
    let mut registry = ContentRegistry::discover()?;
    registry.register::<Route, _, _>(RouteReader, RouteWriter)?;
    let serializer = ContentSerializer::new(Arc::new(registry));

    let route = Route {
        legs: vec![
            BTreeMap::from([("start".to_owned(), [Point { x: 0, y: 0 }])]),
            BTreeMap::new(),
        ],
        stops: BTreeMap::from([(7, vec![Color::Blue]), (9, Vec::new())]),
    };

    assert_eq!(
        Route::descriptor().type_info(),
        <Route as ContentObject>::type_name()
    );
    let text = serializer.to_string(&route)?;
    assert!(text.contains("[legs:LIST<DICTIONARY<STRING, ARRAY<demo::Point>>>(2)]"));
    assert!(text.contains("[start:(1)]"));
    assert!(text.contains("[9:(0)]"));
    assert_eq!(serializer.from_str::<Route>(&text)?, route);
    Ok(())
}

#[test]
fn test_file_round_trip() -> anyhow::Result<()> {
    let serializer = serializer()?;
    let dir = tempfile::tempdir()?;
    let scene = sample_scene();

    let path = serializer.write(dir.path().join("level"), &scene)?;
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("kcn"));
    assert!(path.exists());

    let back: Scene = serializer.read_file(&path)?;
    assert_eq!(back, scene);
    Ok(())
}
