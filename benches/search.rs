//! Benchmarks for fuzzy ranking
//!
//! Run with: cargo bench search

use rowscope::fuzzy::{rank, similarity};
use rowscope::rows::RowStore;
use rowscope::Picker;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn labels(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("src/module_{}/file_{}.rs:{}:fn handler_{}()", i % 37, i, i % 500, i))
        .collect()
}

// ============================================================================
// Scoring
// ============================================================================

#[divan::bench(args = ["h", "handler", "module_12/file"])]
fn similarity_single(query: &str) {
    divan::black_box(similarity(
        query,
        divan::black_box("src/module_12/file_1234.rs:42:fn handler_1234()"),
    ));
}

#[divan::bench(args = [1_000, 10_000, 100_000])]
fn rank_labels(bencher: divan::Bencher, count: usize) {
    let labels = labels(count);
    bencher.bench_local(|| rank(divan::black_box("hndlr 42"), &labels));
}

#[divan::bench(args = [1_000, 10_000])]
fn rank_smart_case(bencher: divan::Bencher, count: usize) {
    let labels = labels(count);
    bencher.bench_local(|| rank(divan::black_box("Handler"), &labels));
}

// ============================================================================
// Picker
// ============================================================================

#[divan::bench(args = [1_000, 10_000])]
fn picker_incremental_query(bencher: divan::Bencher, count: usize) {
    let mut rows = RowStore::new();
    for label in labels(count) {
        rows.add_line(&label, '|');
    }
    let mut picker = Picker::new(rows);

    bencher.bench_local(|| {
        for query in ["f", "fi", "fil", "file", "file_9"] {
            picker.apply_query(query);
        }
        divan::black_box(picker.focused());
    });
}
