use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vend_eng::change::decompose;
use vend_eng::machine::SeededRandom;
use vend_eng::{Action, Denomination, Machine, MachineConfig, Product, Won};

/// Generates purchase sessions for benchmarking.
///
/// Pattern per session (repeating over the catalog):
/// 1. Select a product
/// 2. Insert a 5,000₩ bill
/// 3. Take the item
/// 4. Take the change
///
/// Stock is large enough that no selection ever runs out.
pub struct SessionGenerator {
    products: Vec<&'static str>,
    sessions: u32,
    current_session: u32,
    current_step: u8,
}

impl SessionGenerator {
    pub fn new(sessions: u32) -> Self {
        Self {
            products: vec!["cola", "water", "coffee"],
            sessions,
            current_session: 0,
            current_step: 0,
        }
    }
}

impl Iterator for SessionGenerator {
    type Item = Action;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_session >= self.sessions {
            return None;
        }

        let action = match self.current_step {
            0 => {
                let idx = self.current_session as usize % self.products.len();
                Action::SelectProduct(self.products[idx].to_string())
            }
            1 => Action::InsertCash(*Denomination::from_value(Won::new(5000))?),
            2 => Action::TakeItem,
            _ => Action::TakeChange,
        };

        self.current_step += 1;
        if self.current_step > 3 {
            self.current_step = 0;
            self.current_session += 1;
        }

        Some(action)
    }
}

fn stocked_machine(stock: u32) -> Machine {
    Machine::with_config(MachineConfig::reliable(), SeededRandom::from_seed(0)).with_products(
        vec![
            Product::new("cola", "Cola", 1100, stock),
            Product::new("water", "Water", 600, stock),
            Product::new("coffee", "Coffee", 700, stock),
        ],
    )
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");

    for amount in [100i64, 1_357, 98_700, 12_345_600] {
        group.bench_with_input(BenchmarkId::from_parameter(amount), &amount, |b, &amount| {
            b.iter(|| decompose(black_box(Won::new(amount))));
        });
    }

    group.finish();
}

fn bench_sessions(c: &mut Criterion) {
    let mut group = c.benchmark_group("sessions");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    for sessions in [1_000u32, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(sessions),
            &sessions,
            |b, &sessions| {
                b.iter(|| {
                    runtime.block_on(async {
                        let mut machine = stocked_machine(sessions);
                        machine
                            .run(tokio_stream::iter(SessionGenerator::new(sessions)))
                            .await;
                        machine
                    })
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decompose, bench_sessions);
criterion_main!(benches);
