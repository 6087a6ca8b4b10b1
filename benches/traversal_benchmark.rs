use criterion::{black_box, criterion_group, criterion_main, Criterion};
use valgraph::{deep_clone, deep_freeze, structural_eq, NodeId, ValueGraph};

/// Build a tree of objects `depth` levels deep with `width` children per level
fn build_tree(g: &mut ValueGraph, depth: usize, width: usize) -> NodeId {
    if depth == 0 {
        return g.number(depth as f64);
    }
    let children: Vec<(String, NodeId)> = (0..width)
        .map(|i| (format!("child{}", i), build_tree(g, depth - 1, width)))
        .collect();
    g.object(children)
}

fn traversal_benchmark(c: &mut Criterion) {
    c.bench_function("deep_clone_tree", |b| {
        let mut g = ValueGraph::new();
        let root = build_tree(&mut g, 5, 4);
        b.iter(|| {
            let mut scratch = g.clone();
            black_box(deep_clone(&mut scratch, root));
        });
    });

    c.bench_function("deep_freeze_tree", |b| {
        let mut g = ValueGraph::new();
        let root = build_tree(&mut g, 5, 4);
        b.iter(|| {
            let mut scratch = g.clone();
            black_box(deep_freeze(&mut scratch, root));
        });
    });

    c.bench_function("structural_eq_tree", |b| {
        let mut g = ValueGraph::new();
        let left = build_tree(&mut g, 5, 4);
        let right = build_tree(&mut g, 5, 4);
        b.iter(|| {
            black_box(structural_eq(&g, left, right));
        });
    });
}

criterion_group!(benches, traversal_benchmark);
criterion_main!(benches);
