use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use ordered_hashmap::OrderedHashMap;
use std::time::Duration;

// The byte-sum hash clusters similar keys, so sizes stay at 10k.
const N: usize = 10_000;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64) -> (OrderedHashMap, Vec<String>) {
    let mut m = OrderedHashMap::new();
    let keys: Vec<String> = lcg(seed).take(N).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        let _ = m.put(k, i as i32).unwrap();
    }
    (m, keys)
}

fn random_picks(keys: &[String], count: usize) -> Vec<String> {
    let n = keys.len();
    let mut s = 0x9e3779b97f4a7c15u64;
    (0..count)
        .map(|_| {
            s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            keys[(s as usize) % n].clone()
        })
        .collect()
}

fn bench_put_fresh(c: &mut Criterion) {
    c.bench_function("ordered::put_fresh_10k", |b| {
        let keys: Vec<String> = lcg(1).take(N).map(key).collect();
        b.iter_batched(
            OrderedHashMap::new,
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    let _ = m.put(k, i as i32).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_put_presized(c: &mut Criterion) {
    c.bench_function("ordered::put_presized_10k", |b| {
        let keys: Vec<String> = lcg(2).take(N).map(key).collect();
        b.iter_batched(
            || {
                let mut m = OrderedHashMap::new();
                m.reserve(N * 2).unwrap();
                m
            },
            |mut m| {
                for (i, k) in keys.iter().enumerate() {
                    let _ = m.put(k, i as i32).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("ordered::get_hit_1k_on_10k", |b| {
        let (m, keys) = filled(7);
        let queries = random_picks(&keys, 1_000);
        b.iter(|| {
            for k in &queries {
                black_box(m.get(k));
            }
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("ordered::get_miss_1k_on_10k", |b| {
        let (m, _) = filled(11);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..1_000 {
                let k = key(miss.next().unwrap_or_default());
                black_box(m.get(&k));
            }
        })
    });
}

fn bench_pop_then_put(c: &mut Criterion) {
    c.bench_function("ordered::pop_then_put_1k_on_10k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(5);
                let targets = random_picks(&keys, 1_000);
                (m, targets)
            },
            |(mut m, targets)| {
                for k in &targets {
                    if let Some(v) = m.pop(k) {
                        let _ = m.put(k, v.wrapping_add(1)).unwrap();
                    }
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iter(c: &mut Criterion) {
    c.bench_function("ordered::iter_all_10k", |b| {
        let (m, _) = filled(999);
        b.iter(|| {
            let mut sum = 0i64;
            for (_k, v) in m.iter() {
                sum = sum.wrapping_add(i64::from(v));
            }
            black_box(sum)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_put;
    config = bench_config();
    targets = bench_put_fresh, bench_put_presized
}

criterion_group! {
    name = benches_lookup;
    config = bench_config();
    targets = bench_get_hit, bench_get_miss, bench_iter
}

criterion_group! {
    name = benches_mutate;
    config = bench_config();
    targets = bench_pop_then_put
}

criterion_main!(benches_put, benches_lookup, benches_mutate);
