//! Performance benchmarks for pathtree

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pathtree::output::{to_html, to_json, to_text};
use pathtree::test_utils::TestTree;
use pathtree::{OutputConfig, PathPolicy, ScanConfig, StructureDocument, TreeScanner};

fn create_tree(dirs: usize, files_per_dir: usize) -> TestTree {
    let tree = TestTree::new();
    for d in 0..dirs {
        for f in 0..files_per_dir {
            tree.add_file(&format!("dir_{}/sub_{}/file_{}.txt", d, d % 3, f), "");
        }
    }
    tree.add_file("node_modules/pkg/index.js", "");
    tree
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    let small = create_tree(10, 10);
    group.bench_function("small_tree_100_files", |b| {
        b.iter(|| {
            TreeScanner::new(ScanConfig::default())
                .scan(black_box(small.path()))
                .unwrap()
                .count()
        })
    });

    let large = create_tree(50, 40);
    group.bench_function("large_tree_2000_files", |b| {
        b.iter(|| {
            TreeScanner::new(ScanConfig::default().hide_node_modules())
                .scan(black_box(large.path()))
                .unwrap()
                .count()
        })
    });

    group.bench_function("large_tree_truncated", |b| {
        b.iter(|| {
            TreeScanner::new(ScanConfig::default().with_truncation(8))
                .scan(black_box(large.path()))
                .unwrap()
                .count()
        })
    });

    group.finish();
}

fn bench_document(c: &mut Criterion) {
    let tree = create_tree(50, 40);

    c.bench_function("build_document", |b| {
        b.iter(|| {
            StructureDocument::build(
                black_box(tree.path()),
                ScanConfig::default(),
                PathPolicy::windows(),
            )
            .unwrap()
        })
    });
}

fn bench_export(c: &mut Criterion) {
    let tree = create_tree(50, 40);
    let doc = StructureDocument::build(tree.path(), ScanConfig::default(), PathPolicy::windows())
        .unwrap();
    let config = OutputConfig::default().with_lengths(true);

    let mut group = c.benchmark_group("export");

    group.bench_function("text", |b| b.iter(|| to_text(black_box(&doc), &config)));
    group.bench_function("html", |b| b.iter(|| to_html(black_box(&doc), &config)));
    group.bench_function("json", |b| {
        b.iter(|| to_json(black_box(&doc), &config).unwrap())
    });
    group.bench_function("nested", |b| b.iter(|| black_box(&doc).nested()));
    group.bench_function("search", |b| b.iter(|| black_box(&doc).search("file_1")));

    group.finish();
}

criterion_group!(benches, bench_scan, bench_document, bench_export);
criterion_main!(benches);
