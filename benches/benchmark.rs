//! Performance benchmarks for sphweb

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sphweb::config::{AnnotationMethod, Config};
use sphweb::model::{expand_chunk, ChunkKey, ChunkName, ChunkStore};
use sphweb::readers::parse_document;

fn generate_document(num_chunks: usize, lines_per_chunk: usize) -> String {
    let mut doc = String::from("Benchmark document.\n\n");

    doc.push_str("@(output.py@) = python\n");
    for i in 0..num_chunks {
        doc.push_str(&format!("    @<chunk{}@>\n", i));
    }
    doc.push_str("@\n\n");

    for i in 0..num_chunks {
        doc.push_str(&format!("Prose about chunk {}.\n@<chunk{}@> = python\n", i, i));
        for j in 0..lines_per_chunk {
            doc.push_str(&format!("print('chunk {} line {}')\n", i, j));
        }
        doc.push_str("@\n\n");
    }

    doc
}

fn generate_nested_document(depth: usize, breadth: usize) -> String {
    fn chunk(doc: &mut String, name: &str, depth: usize, breadth: usize, is_root: bool) {
        if is_root {
            doc.push_str(&format!("@({}@) = python\n", name));
        } else {
            doc.push_str(&format!("@<{}@> = python\n", name));
        }

        let children: Vec<String> = if depth > 0 {
            (0..breadth).map(|i| format!("{}_{}", name, i)).collect()
        } else {
            Vec::new()
        };
        if children.is_empty() {
            doc.push_str("pass\n");
        }
        for child in &children {
            doc.push_str(&format!("if x:\n    @<{}@>\n", child));
        }
        doc.push_str("@\n");

        for child in &children {
            chunk(doc, child, depth - 1, breadth, false);
        }
    }

    let mut doc = String::new();
    chunk(&mut doc, "main.py", depth, breadth, true);
    doc
}

fn parse(doc: &str) -> ChunkStore {
    let mut store = ChunkStore::new();
    parse_document(doc, Path::new("bench.sphweb"), &mut store).unwrap();
    store
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for num_chunks in [10, 50, 100, 500].iter() {
        let doc = generate_document(*num_chunks, 10);
        group.bench_with_input(BenchmarkId::new("chunks", num_chunks), &doc, |b, doc| {
            b.iter(|| parse(black_box(doc)))
        });
    }

    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");
    let naked = Config {
        annotation: AnnotationMethod::Naked,
        ..Config::default()
    };

    for num_chunks in [10, 50, 100, 500].iter() {
        let store = parse(&generate_document(*num_chunks, 10));
        let root = store.get(&ChunkKey::file("output.py")).unwrap();

        group.bench_with_input(BenchmarkId::new("anchored", num_chunks), &store, |b, store| {
            b.iter(|| expand_chunk(black_box(store), root, &Config::default()).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("naked", num_chunks), &store, |b, store| {
            b.iter(|| expand_chunk(black_box(store), root, &naked).unwrap())
        });
    }

    group.finish();
}

fn bench_expand_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand_nested");
    let config = Config::default();

    for depth in [2, 3, 4, 5].iter() {
        let store = parse(&generate_nested_document(*depth, 3));
        let root = store.get(&ChunkKey::file("main.py")).unwrap();

        group.bench_with_input(
            BenchmarkId::new("depth", format!("d{}({}chunks)", depth, store.len())),
            &store,
            |b, store| b.iter(|| expand_chunk(black_box(store), root, &config).unwrap()),
        );
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let store = parse(&generate_document(10000, 1));

    c.bench_function("lookup_10k", |b| {
        b.iter(|| {
            for i in 0..1000 {
                let name = ChunkName::new(format!("chunk{}", i * 10));
                black_box(store.lookup(&name));
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_expand, bench_expand_nested, bench_lookup);

criterion_main!(benches);
