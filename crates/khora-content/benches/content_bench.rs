use criterion::{black_box, criterion_group, criterion_main, Criterion};
use khora_content::{
    impl_content_object, ContentContext, ContentRegistry, ContentSerializer, ContentSettings,
    ObjectReader, ObjectWriter, Result,
};
use khora_math::Vec3;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct Mesh {
    name: String,
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
    tags: BTreeMap<String, String>,
}
impl_content_object!(Mesh, "bench::Mesh");

struct MeshReader;
impl ObjectReader<Mesh> for MeshReader {
    fn read(&self, context: &mut ContentContext<'_>) -> Result<Mesh> {
        Ok(Mesh {
            name: context.take("name")?,
            vertices: context.take("vertices")?,
            indices: context.take("indices")?,
            tags: context.take("tags")?,
        })
    }
}

struct MeshWriter;
impl ObjectWriter<Mesh> for MeshWriter {
    fn write(&self, context: &mut ContentContext<'_>, mesh: &Mesh) -> Result<()> {
        context.insert("name", &mesh.name)?;
        context.insert("vertices", &mesh.vertices)?;
        context.insert("indices", &mesh.indices)?;
        context.insert("tags", &mesh.tags)
    }
}

fn mesh(vertex_count: u32) -> Mesh {
    Mesh {
        name: "grid [bench]".to_owned(),
        vertices: (0..vertex_count)
            .map(|i| Vec3::new(i as f32, (i % 7) as f32 * 0.5, -(i as f32)))
            .collect(),
        indices: (0..vertex_count * 3).map(|i| i % vertex_count).collect(),
        tags: (0..16)
            .map(|i| (format!("tag:{i}"), format!("value {i}")))
            .collect(),
    }
}

fn bench_content(c: &mut Criterion) {
    let mut registry = ContentRegistry::new();
    registry
        .register::<Mesh, _, _>(MeshReader, MeshWriter)
        .expect("mesh registration");
    let registry = Arc::new(registry);

    let pretty = ContentSerializer::new(registry.clone());
    let minified = ContentSerializer::with_settings(
        registry,
        ContentSettings {
            minify: true,
            ..ContentSettings::default()
        },
    );

    // 1,000 vertices and 3,000 indices
    let mesh = mesh(1_000);
    let text = pretty.to_string(&mesh).expect("mesh text");
    let minified_text = minified.to_string(&mesh).expect("minified mesh text");

    let mut group = c.benchmark_group("Content Mesh");

    group.bench_function("Write (indented)", |b| {
        b.iter(|| black_box(pretty.to_string(black_box(&mesh)).expect("write")));
    });

    group.bench_function("Write (minified)", |b| {
        b.iter(|| black_box(minified.to_string(black_box(&mesh)).expect("write")));
    });

    group.bench_function("Read (indented)", |b| {
        b.iter(|| black_box(pretty.from_str::<Mesh>(black_box(&text)).expect("read")));
    });

    group.bench_function("Read (minified)", |b| {
        b.iter(|| black_box(pretty.from_str::<Mesh>(black_box(&minified_text)).expect("read")));
    });

    group.bench_function("Read document (untyped)", |b| {
        b.iter(|| black_box(pretty.read_document(black_box(text.as_bytes())).expect("read")));
    });

    group.finish();
}

criterion_group!(benches, bench_content);
criterion_main!(benches);
