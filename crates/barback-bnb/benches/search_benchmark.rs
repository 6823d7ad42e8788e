// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use barback_bnb::bnb::{BnbSolver, SolverConfig};
use barback_bnb::bound::BoundSet;
use barback_bnb::branching::amortized::MinAmortizedCostRule;
use barback_bnb::monitor::no_op::NoOperationMonitor;
use barback_model::model::{Model, ModelBuilder};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

/// Generates a synthetic cocktail list: every drink uses two to five ingredients
/// drawn from a pantry of `num_elements`, with a few popular ingredients shared
/// by many drinks.
fn synthetic_model(seed: u64, num_items: usize, num_elements: usize) -> Model {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = ModelBuilder::with_capacity(num_items);
    for i in 0..num_items {
        let len = rng.random_range(2..=5);
        let mut elements = Vec::with_capacity(len);
        while elements.len() < len {
            let e = if rng.random_bool(0.4) {
                rng.random_range(0..num_elements.min(6))
            } else {
                rng.random_range(0..num_elements)
            };
            let label = format!("ingredient{}", e);
            if !elements.contains(&label) {
                elements.push(label);
            }
        }
        builder
            .add_item(format!("cocktail{}", i), elements)
            .expect("synthetic items are never empty");
    }
    builder.build()
}

fn bench_synthetic_instances(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_benchmark");
    group.sample_size(20);

    for &(num_items, num_elements, max_size) in &[(40, 25, 8), (80, 40, 10), (120, 60, 12)] {
        let model = synthetic_model(7, num_items, num_elements);
        let config = SolverConfig::new(max_size).with_search_budget(200_000);
        let mut solver = BnbSolver::preallocated(model.num_items());
        let label = format!("{}x{}", num_items, num_elements);

        group.throughput(Throughput::Elements(num_items as u64));

        for (bounds_label, make_bounds) in [
            ("default", BoundSet::default as fn() -> BoundSet),
            ("extended", BoundSet::extended as fn() -> BoundSet),
        ] {
            group.bench_with_input(
                BenchmarkId::new(bounds_label, &label),
                &model,
                |b, model| {
                    b.iter(|| {
                        let mut rule = MinAmortizedCostRule::new();
                        let mut bounds = make_bounds();
                        let outcome = solver.solve(
                            black_box(model),
                            black_box(&config),
                            &mut rule,
                            &mut bounds,
                            NoOperationMonitor::new(),
                        );
                        black_box(outcome.score())
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_synthetic_instances);
criterion_main!(benches);
