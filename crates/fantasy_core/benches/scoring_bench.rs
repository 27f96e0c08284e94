//! Scoring benchmarks using Criterion.
//!
//! Covers a full-attendance gameweek, a gameweek with several absent starters
//! that forces substitution, and Bench Boost.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fantasy_core::{
    Chip, Player, PlayerId, PlayerMeta, Position, Roster, RosterSelection, RulesConfig,
    ScoringEngine, StatLine, TeamRef,
};
use std::collections::HashMap;
use std::hint::black_box;

const SQUAD: [(&str, Position, bool); 17] = [
    ("gk1", Position::Goalkeeper, false),
    ("def1", Position::Defender, false),
    ("def2", Position::Defender, false),
    ("mid1", Position::Midfielder, false),
    ("mid2", Position::Midfielder, false),
    ("mid3", Position::Midfielder, false),
    ("mid4", Position::Midfielder, false),
    ("fwd1", Position::Forward, false),
    ("fwd2", Position::Forward, false),
    ("lady1", Position::Forward, true),
    ("gk2", Position::Goalkeeper, false),
    ("def3", Position::Defender, false),
    ("mid5", Position::Midfielder, false),
    ("mid6", Position::Midfielder, false),
    ("fwd3", Position::Forward, false),
    ("lady2", Position::Forward, true),
    ("def4", Position::Defender, false),
];

fn meta() -> HashMap<PlayerId, PlayerMeta> {
    SQUAD
        .iter()
        .enumerate()
        .map(|(i, &(id, position, is_lady))| {
            let mut player = Player::new(id, position, TeamRef::with_id(format!("t{}", i % 6)));
            player.is_lady = is_lady;
            (player.id.clone(), player.meta())
        })
        .collect()
}

fn roster(chip: Chip) -> Roster {
    let ids: Vec<PlayerId> = SQUAD.iter().map(|(id, _, _)| id.to_string()).collect();
    let selection = RosterSelection {
        starting_ids: ids[..10].to_vec(),
        squad_ids: ids,
        captain_id: Some("mid1".into()),
        vice_id: Some("fwd1".into()),
        chip: None,
        bench_order: None,
    };
    Roster::new("bench", 1, selection.to_slots()).with_chip(chip)
}

fn stats(absent: &[&str]) -> HashMap<PlayerId, StatLine> {
    SQUAD
        .iter()
        .enumerate()
        .map(|(i, (id, _, _))| {
            let line =
                if absent.contains(id) { StatLine::absent() } else { StatLine::played(i as i32) };
            (id.to_string(), line)
        })
        .collect()
}

fn bench_compute_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_score");
    let rules = RulesConfig::default();
    let engine = ScoringEngine::new(&rules);
    let meta = meta();

    let cases = [
        ("full_attendance", roster(Chip::None), stats(&[])),
        ("four_absent", roster(Chip::None), stats(&["gk1", "def1", "mid1", "lady1"])),
        ("bench_boost", roster(Chip::BenchBoost), stats(&["mid1"])),
    ];

    for (name, roster, stats) in &cases {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(roster, stats),
            |b, (roster, stats)| {
                b.iter(|| engine.compute_score(black_box(roster), black_box(stats), black_box(&meta)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_score);
criterion_main!(benches);
