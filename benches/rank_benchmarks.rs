use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rank_tree::{OrdPolicy, RankTree};

const N: usize = 10_000;

type Entry = (i64, u32);
type Board = RankTree<u32, Entry, OrdPolicy<Entry, fn(&Entry) -> u32>>;

// ─── Helper functions to generate score sequences ───────────────────────────

fn random_scores(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut scores = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        scores.push((x >> 33) as i64);
    }
    scores
}

fn board(scores: &[i64]) -> Board {
    let key_of: fn(&Entry) -> u32 = |e| e.1;
    let board = RankTree::with_capacity(OrdPolicy::new(key_of), scores.len());
    for (key, &score) in (0..).zip(scores) {
        board.put(key, (score, key)).unwrap();
    }
    board
}

// ─── Benchmarks ─────────────────────────────────────────────────────────────

fn bench_put_new(c: &mut Criterion) {
    let scores = random_scores(N);
    let mut group = c.benchmark_group("put_new");

    group.bench_function(BenchmarkId::new("random", N), |b| {
        b.iter(|| board(&scores));
    });

    group.finish();
}

fn bench_small_update(c: &mut Criterion) {
    let scores = random_scores(N);
    let mut group = c.benchmark_group("small_update");

    // Nudges every score by one step, so each update moves a rank or two.
    group.bench_function(BenchmarkId::new("reposition", N), |b| {
        let board = board(&scores);
        let mut delta = 1;
        b.iter(|| {
            for key in 0..N as u32 {
                let (score, _) = board.get(&key).unwrap();
                board.put(key, (score + delta, key)).unwrap();
            }
            delta = -delta;
        });
    });

    group.bench_function(BenchmarkId::new("remove_then_put", N), |b| {
        let board = board(&scores);
        let mut delta = 1;
        b.iter(|| {
            for key in 0..N as u32 {
                let (score, _) = board.remove(&key).unwrap();
                board.put(key, (score + delta, key)).unwrap();
            }
            delta = -delta;
        });
    });

    group.finish();
}

fn bench_get_rank(c: &mut Criterion) {
    let board = board(&random_scores(N));
    let mut group = c.benchmark_group("get_rank");

    group.bench_function(BenchmarkId::new("all_keys", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for key in 0..N as u32 {
                sum = sum.wrapping_add(board.get_rank(&key).unwrap());
            }
            sum
        });
    });

    group.finish();
}

fn bench_rank_range(c: &mut Criterion) {
    let board = board(&random_scores(N));
    let mut group = c.benchmark_group("rank_range");

    for page in [10, 100, 1_000] {
        group.bench_function(BenchmarkId::new("page", page), |b| {
            b.iter(|| board.rank_range(N / 2, N / 2 + page).unwrap());
        });
    }

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(put_benches, bench_put_new, bench_small_update,);

criterion_group!(query_benches, bench_get_rank, bench_rank_range,);

criterion_main!(put_benches, query_benches);
