//! Variant dispatch and replacement compared against a native enum

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use variant::dispatch::visit2;
use variant::*;

const ITEMS: usize = 1024;

type V = Variant![u64, u32, String, Vec<u8>];

enum Native {
    Wide(u64),
    Narrow(u32),
    Text(String),
    Bytes(Vec<u8>),
}

struct Weight;

impl Visitor<&u64> for Weight {
    type Output = u64;
    #[inline(always)]
    fn visit(&mut self, value: &u64) -> u64 {
        *value
    }
}

impl Visitor<&u32> for Weight {
    type Output = u64;
    #[inline(always)]
    fn visit(&mut self, value: &u32) -> u64 {
        u64::from(*value)
    }
}

impl Visitor<&String> for Weight {
    type Output = u64;
    #[inline(always)]
    fn visit(&mut self, value: &String) -> u64 {
        value.len() as u64
    }
}

impl Visitor<&Vec<u8>> for Weight {
    type Output = u64;
    #[inline(always)]
    fn visit(&mut self, value: &Vec<u8>) -> u64 {
        value.len() as u64
    }
}

struct Same;

impl<A, B> Visitor<(A, B)> for Same {
    type Output = u64;
    #[inline(always)]
    fn visit(&mut self, _: (A, B)) -> u64 {
        1
    }
}

fn variants() -> Vec<V> {
    (0..ITEMS)
        .map(|i| match i % 4 {
            0 => V::new(i as u64),
            1 => V::new(i as u32),
            2 => V::new(i.to_string()),
            _ => V::new(vec![0_u8; i % 16]),
        })
        .collect()
}

fn natives() -> Vec<Native> {
    (0..ITEMS)
        .map(|i| match i % 4 {
            0 => Native::Wide(i as u64),
            1 => Native::Narrow(i as u32),
            2 => Native::Text(i.to_string()),
            _ => Native::Bytes(vec![0_u8; i % 16]),
        })
        .collect()
}

fn bench_visit(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit");
    group.throughput(Throughput::Elements(ITEMS as u64));

    let items = variants();
    group.bench_function("variant_visit", |b| {
        b.iter(|| {
            let mut total = 0_u64;
            for item in &items {
                total = total.wrapping_add(item.visit(Weight).unwrap_or(0));
            }
            black_box(total)
        });
    });

    let items = natives();
    group.bench_function("enum_match", |b| {
        b.iter(|| {
            let mut total = 0_u64;
            for item in &items {
                let weight = match item {
                    Native::Wide(v) => *v,
                    Native::Narrow(v) => u64::from(*v),
                    Native::Text(s) => s.len() as u64,
                    Native::Bytes(v) => v.len() as u64,
                };
                total = total.wrapping_add(weight);
            }
            black_box(total)
        });
    });

    group.finish();
}

fn bench_visit2(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit2");
    group.throughput(Throughput::Elements(ITEMS as u64));

    let left = variants();
    let right: Vec<V> = variants().into_iter().rev().collect();
    group.bench_function("variant_visit2", |b| {
        b.iter(|| {
            let mut total = 0_u64;
            for (l, r) in left.iter().zip(&right) {
                total += visit2(l, r, Same).unwrap_or(0);
            }
            black_box(total)
        });
    });

    group.finish();
}

fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace");
    group.throughput(Throughput::Elements(ITEMS as u64));

    group.bench_function("variant_emplace", |b| {
        b.iter_batched(
            variants,
            |mut items| {
                for (i, item) in items.iter_mut().enumerate() {
                    item.emplace::<1>(black_box(i as u32));
                }
                items
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("enum_assign", |b| {
        b.iter_batched(
            natives,
            |mut items| {
                for (i, item) in items.iter_mut().enumerate() {
                    *item = Native::Narrow(black_box(i as u32));
                }
                items
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("variant_set_same_index", |b| {
        let mut slot = V::new(0_u64);
        b.iter(|| {
            for i in 0..ITEMS as u64 {
                slot.set::<0>(black_box(i));
            }
        });
    });

    group.finish();
}

fn bench_clone_from(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_from");
    group.throughput(Throughput::Elements(ITEMS as u64));

    let source = variants();
    group.bench_function("variant_clone_from", |b| {
        let mut target = variants();
        b.iter(|| {
            for (t, s) in target.iter_mut().zip(&source) {
                t.clone_from(s);
            }
            black_box(&target);
        });
    });

    group.bench_function("optional_clone_from", |b| {
        let source: Vec<Optional<String>> = (0..ITEMS).map(|i| Optional::from((i % 2 == 0).then(|| i.to_string()))).collect();
        let mut target = source.clone();
        target.reverse();
        b.iter(|| {
            for (t, s) in target.iter_mut().zip(&source) {
                t.clone_from(s);
            }
            black_box(&target);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_visit, bench_visit2, bench_replace, bench_clone_from);
criterion_main!(benches);
