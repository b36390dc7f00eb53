use afgraph::{
    match_via_index, match_via_traversal, AlignmentFreeGraph, ColorConsistency, GfaDocument, GraphStore, KmerIndex,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Deterministic pseudo-random sequence (xorshift)
fn sequence(len: usize, seed: u64) -> String {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            BASES[(state % 4) as usize]
        })
        .collect()
}

/// Two haplotypes sharing a backbone, one segment per 32 bases
fn build_graph(len: usize) -> (AlignmentFreeGraph<GraphStore>, String) {
    let backbone = sequence(len, 42);
    let mut gfa = String::new();
    let mut steps = Vec::new();
    for (i, chunk) in backbone.as_bytes().chunks(32).enumerate() {
        gfa.push_str(&format!("S\t{}\t{}\n", i + 1, String::from_utf8_lossy(chunk)));
        steps.push(format!("{}+", i + 1));
    }
    gfa.push_str(&format!("P\thap1\t{}\t*\n", steps.join(",")));
    gfa.push_str(&format!("P\thap2\t{}\t*\n", steps.join(",")));

    let mut graph = AlignmentFreeGraph::in_memory().unwrap();
    let document = GfaDocument::parse_str(&gfa).unwrap();
    graph.import_gfa(&document, false).unwrap();
    (graph, backbone)
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [1_000, 5_000].iter() {
        let (graph, _) = build_graph(*size);
        for k in [3, 11] {
            group.bench_with_input(BenchmarkId::new(format!("k{}", k), size), &k, |b, &k| {
                b.iter(|| {
                    let index = KmerIndex::build(graph.backend(), k).unwrap();
                    criterion::black_box(index.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    let k = 11;

    for size in [1_000, 5_000].iter() {
        let (graph, backbone) = build_graph(*size);
        let index = KmerIndex::build(graph.backend(), k).unwrap();
        let query = &backbone[..backbone.len().min(220)];

        group.bench_with_input(BenchmarkId::new("index", size), query, |b, query| {
            b.iter(|| criterion::black_box(match_via_index(&index, query, ColorConsistency::Shared).len()));
        });
        group.bench_with_input(BenchmarkId::new("traversal", size), query, |b, query| {
            b.iter(|| criterion::black_box(match_via_traversal(graph.backend(), query, k).unwrap().len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_index_build, bench_match);
criterion_main!(benches);
