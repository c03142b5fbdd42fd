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

//! Content types shared by the integration tests.

#![allow(dead_code)]

use khora_content::{
    Content, ContentArray, ContentContext, ContentEnum, ObjectReader, ObjectWriter, Result,
};
use khora_math::Rect;
use std::collections::BTreeMap;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ContentEnum)]
#[content(name = "demo::Color")]
pub enum Color {
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, PartialEq, Content)]
#[content(name = "demo::Point", reader = PointReader, writer = PointWriter)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Default)]
pub struct PointReader;

impl ObjectReader<Point> for PointReader {
    fn read(&self, context: &mut ContentContext<'_>) -> Result<Point> {
        let _key: String = context.take("Key")?;
        Ok(Point {
            x: context.take("X")?,
            y: context.take("Y")?,
        })
    }
}

#[derive(Default)]
pub struct PointWriter;

impl ObjectWriter<Point> for PointWriter {
    fn write(&self, context: &mut ContentContext<'_>, point: &Point) -> Result<()> {
        context.insert("Key", &"Point".to_owned())?;
        context.insert("X", &point.x)?;
        context.insert("Y", &point.y)
    }
}

#[derive(Debug, Clone, PartialEq, Content)]
#[content(name = "demo::Numbers", reader = NumbersReader, writer = NumbersWriter)]
pub struct Numbers {
    pub items: Vec<i32>,
}

#[derive(Default)]
pub struct NumbersReader;

impl ObjectReader<Numbers> for NumbersReader {
    fn read(&self, context: &mut ContentContext<'_>) -> Result<Numbers> {
        Ok(Numbers {
            items: context.take("items")?,
        })
    }
}

#[derive(Default)]
pub struct NumbersWriter;

impl ObjectWriter<Numbers> for NumbersWriter {
    fn write(&self, context: &mut ContentContext<'_>, numbers: &Numbers) -> Result<()> {
        context.insert("items", &numbers.items)
    }
}

/// Exercises every kind of value at once.
#[derive(Debug, Clone, PartialEq, Content)]
#[content(name = "demo::Scene", reader = SceneReader, writer = SceneWriter)]
pub struct Scene {
    pub title: String,
    pub initial: char,
    pub visible: bool,
    pub color: Color,
    pub origin: Point,
    pub items: Vec<i32>,
    pub grid: ContentArray<i32>,
    pub waypoints: [Point; 2],
    pub jagged: ContentArray<ContentArray<i32>>,
    pub lookup: BTreeMap<String, Point>,
    pub weights: BTreeMap<i32, f64>,
    pub palette: Vec<Color>,
    pub note: Option<String>,
    pub bounds: Rect,
}

#[derive(Default)]
pub struct SceneReader;

impl ObjectReader<Scene> for SceneReader {
    fn read(&self, context: &mut ContentContext<'_>) -> Result<Scene> {
        Ok(Scene {
            title: context.take("title")?,
            initial: context.take("initial")?,
            visible: context.take("visible")?,
            color: context.take("color")?,
            origin: context.take("origin")?,
            items: context.take("items")?,
            grid: context.take("grid")?,
            waypoints: context.take("waypoints")?,
            jagged: context.take("jagged")?,
            lookup: context.take("lookup")?,
            weights: context.take("weights")?,
            palette: context.take("palette")?,
            note: context.take_opt("note")?,
            bounds: context.take("bounds")?,
        })
    }
}

#[derive(Default)]
pub struct SceneWriter;

impl ObjectWriter<Scene> for SceneWriter {
    fn write(&self, context: &mut ContentContext<'_>, scene: &Scene) -> Result<()> {
        context.insert("title", &scene.title)?;
        context.insert("initial", &scene.initial)?;
        context.insert("visible", &scene.visible)?;
        context.insert("color", &scene.color)?;
        context.insert("origin", &scene.origin)?;
        context.insert("items", &scene.items)?;
        context.insert("grid", &scene.grid)?;
        context.insert("waypoints", &scene.waypoints)?;
        context.insert("jagged", &scene.jagged)?;
        context.insert("lookup", &scene.lookup)?;
        context.insert("weights", &scene.weights)?;
        context.insert("palette", &scene.palette)?;
        context.insert_opt("note", scene.note.as_ref())?;
        context.insert("bounds", &scene.bounds)
    }
}

pub fn sample_scene() -> Scene {
    let jagged = ContentArray::new(
        vec![2],
        vec![
            ContentArray::new(vec![3], vec![1, 2, 3]).unwrap(),
            ContentArray::new(vec![1], vec![4]).unwrap(),
        ],
    )
    .unwrap();

    Scene {
        title: r"Level [1] \ intro".to_owned(),
        initial: ']',
        visible: true,
        color: Color::Green,
        origin: Point { x: 3, y: -7 },
        items: vec![1, 2, 3],
        grid: ContentArray::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap(),
        waypoints: [Point { x: 0, y: 0 }, Point { x: 10, y: -10 }],
        jagged,
        lookup: BTreeMap::from([
            ("a:b".to_owned(), Point { x: 1, y: 1 }),
            ("[x]".to_owned(), Point { x: 2, y: 2 }),
        ]),
        weights: BTreeMap::from([(1, 0.5), (-2, 1e-3)]),
        palette: vec![Color::Red, Color::Blue],
        note: None,
        bounds: Rect::new(0.0, 0.0, 640.0, 480.0),
    }
}
