use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gencache::config::{ClockMapConfig, EvictionOrder, GenerationalCacheConfig, LruHashMapConfig};
use gencache::{ClockMap, FastHashMap, LruFastHashMap, LruHashMap, LruList};
use std::num::NonZeroUsize;

// Helper functions to create caches with the init pattern
fn make_lru_map<K: std::hash::Hash + Eq + Clone, V>(
    max_size: usize,
    order: EvictionOrder,
) -> LruHashMap<K, V> {
    let config = LruHashMapConfig {
        max_size: NonZeroUsize::new(max_size).unwrap(),
        order,
    };
    LruHashMap::init(config, None)
}

fn make_generational<K: std::hash::Hash + Eq + Clone, V: Clone>(
    capacity: usize,
) -> LruFastHashMap<K, V> {
    let config = GenerationalCacheConfig::new(NonZeroUsize::new(capacity).unwrap());
    LruFastHashMap::init(config, None)
}

fn make_clock<K: std::hash::Hash + Eq, V>(max_size: usize) -> ClockMap<K, V> {
    let config = ClockMapConfig {
        max_size: NonZeroUsize::new(max_size).unwrap(),
    };
    ClockMap::init(config, None)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    // Open-addressing map benchmarks
    {
        let mut map = FastHashMap::new();
        for i in 0..CACHE_SIZE {
            map.put(i, i);
        }

        group.bench_function("FastHashMap get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(map.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("FastHashMap get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(map.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("FastHashMap remove and re-put", |b| {
            b.iter(|| {
                for i in 0..100 {
                    let value = map.remove(&i);
                    black_box(map.put(i, value.unwrap_or(i)));
                }
            });
        });
    }

    // Size-capped map benchmarks
    for (name, order) in [
        ("LruHashMap (insertion)", EvictionOrder::Insertion),
        ("LruHashMap (access)", EvictionOrder::Access),
    ] {
        let mut map = make_lru_map(CACHE_SIZE, order);
        for i in 0..CACHE_SIZE {
            map.put(i, i);
        }

        group.bench_function(format!("{} get hit", name), |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(map.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function(format!("{} put evicting", name), |b| {
            let mut next = CACHE_SIZE;
            b.iter(|| {
                for _ in 0..100 {
                    black_box(map.put(next, next));
                    next += 1;
                }
            });
        });
    }

    // Size-capped list benchmarks
    {
        let mut list = LruList::new(NonZeroUsize::new(CACHE_SIZE).unwrap());
        for i in 0..CACHE_SIZE {
            list.add(i);
        }

        group.bench_function("LruList add evicting", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(list.add(i));
                }
            });
        });
    }

    // Generational cache benchmarks
    {
        let mut cache = make_generational(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LruFastHashMap get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LruFastHashMap put rotating", |b| {
            let mut next = CACHE_SIZE;
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.put(next, next));
                    next += 1;
                }
            });
        });
    }

    // CLOCK map benchmarks
    {
        let mut map = make_clock(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            map.put(i, i);
        }

        group.bench_function("ClockMap get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(map.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("ClockMap put evicting", |b| {
            let mut next = CACHE_SIZE;
            b.iter(|| {
                for _ in 0..100 {
                    black_box(map.put(next, next));
                    next += 1;
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
