//! Criterion benchmarks for roster generation and scoring.
//!
//! Uses synthetic leagues where every fourth participant asks to play
//! with the next one, over a two-session history.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rosterizer::evaluation::EvaluationConfig;
use rosterizer::generation::SamplerConfig;
use rosterizer::model::{
    Assignment, EligibilityEntry, EntryId, Participant, ParticipantId, PersistedTeam, Position,
    SessionId,
};
use rosterizer::{
    generate_single, InMemoryRecords, RosterEvaluator, RosterSampler, SessionRecords, TeamApplier,
};

// ===========================================================================
// Synthetic league
// ===========================================================================

const PAST: SessionId = SessionId { year: 2023, number: 1 };
const CURRENT: SessionId = SessionId { year: 2024, number: 1 };

fn league(n: u64) -> InMemoryRecords {
    let mut records = InMemoryRecords::new();
    for session in [PAST, CURRENT] {
        records.add_session(session);
        for id in 1..=n {
            let first = Position::ALL[(id % 4) as usize];
            let second = Position::ALL[((id + 1) % 4) as usize];
            let mut entry = EligibilityEntry::new(
                EntryId(session.year as u64 * 10_000 + id),
                session,
                Participant::new(ParticipantId(id), "Player", id.to_string()),
            )
            .with_preferences(Some(first), Some(second));
            if id % 4 == 0 && id < n {
                entry = entry.with_play_with(format!("Player {}", id + 1));
            }
            records.add_entry(entry);
        }
    }

    let past: Vec<PersistedTeam> = (0..n / 4)
        .map(|t| {
            Position::ALL
                .into_iter()
                .enumerate()
                .fold(PersistedTeam::new(PAST, t as u32 + 1), |team, (i, p)| {
                    team.with_player(p, ParticipantId(t * 4 + i as u64 + 1))
                })
        })
        .collect();
    rosterizer::TeamStore::insert_teams(&mut records, PAST, past).expect("seed past teams");
    records
}

fn entries(records: &InMemoryRecords) -> Vec<EligibilityEntry> {
    records.entries(CURRENT).unwrap_or_default()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_generate_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_single");
    for &n in &[16u64, 64, 256] {
        let pool = entries(&league(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &pool, |b, pool| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| black_box(generate_single(black_box(pool), true, &mut rng)))
        });
    }
    group.finish();
}

fn bench_sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler");
    group.sample_size(10);
    for &n in &[64u64, 256] {
        let pool = entries(&league(n));
        for parallel in [false, true] {
            let config = SamplerConfig::default()
                .with_batch_size(50)
                .with_parallel(parallel)
                .with_seed(42);
            group.bench_with_input(
                BenchmarkId::new(if parallel { "parallel" } else { "sequential" }, n),
                &(pool.clone(), config),
                |b, (p, c)| b.iter(|| black_box(RosterSampler::run(black_box(p), black_box(c)))),
            );
        }
    }
    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    group.sample_size(10);
    for &n in &[64u64, 256] {
        let records = league(n);
        let pool = entries(&records);
        let config = SamplerConfig::default().with_batch_size(50).with_seed(7);
        let assignments: Vec<Assignment> = RosterSampler::run(&pool, &config)
            .unwrap_or_default()
            .into_iter()
            .map(|g| g.assignment)
            .collect();
        let evaluator = RosterEvaluator::new(EvaluationConfig::default());

        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &assignments,
            |b, assignments| {
                b.iter(|| black_box(evaluator.rank(&records, CURRENT, black_box(assignments))))
            },
        );
    }
    group.finish();
}

fn bench_build_teams(c: &mut Criterion) {
    let records = league(256);
    let pool = entries(&records);
    let mut rng = StdRng::seed_from_u64(1);
    let generation = generate_single(&pool, true, &mut rng);

    c.bench_function("build_teams_256", |b| {
        b.iter(|| {
            black_box(TeamApplier::build_teams(
                black_box(&pool),
                CURRENT,
                &generation.assignment,
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_generate_single,
    bench_sampler,
    bench_rank,
    bench_build_teams
);
criterion_main!(benches);
