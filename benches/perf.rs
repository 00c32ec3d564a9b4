use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use player_radar::chart::chart_from_players;
use player_radar::demo_feed::demo_provider;
use player_radar::fbref::parse_stat_table_html;
use player_radar::player_stats::SeasonTables;
use player_radar::provider::StatType;
use player_radar::radar::FrameKind;

const LEAGUE: &str = "Big 5 European Leagues Combined";
const SEASON: &str = "2024-2025";

fn roster() -> Vec<String> {
    [
        "Marcus Rashford",
        "Alejandro Garnacho",
        "Amad Diallo",
        "Antony",
        "Rasmus Højlund",
        "Joshua Zirkzee",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn bench_standard_parse(c: &mut Criterion) {
    c.bench_function("fbref_standard_parse", |b| {
        b.iter(|| {
            let table = parse_stat_table_html(
                black_box(STANDARD_HTML),
                StatType::Standard,
                LEAGUE,
                SEASON,
            )
            .unwrap();
            black_box(table.len());
        })
    });
}

fn bench_commented_parse(c: &mut Criterion) {
    c.bench_function("fbref_commented_parse", |b| {
        b.iter(|| {
            let table =
                parse_stat_table_html(black_box(PASSING_HTML), StatType::Passing, LEAGUE, SEASON)
                    .unwrap();
            black_box(table.len());
        })
    });
}

fn bench_derive_players(c: &mut Criterion) {
    let players = roster();
    let tables = SeasonTables::load(&demo_provider(&players), 4).unwrap();
    c.bench_function("derive_six_players", |b| {
        b.iter(|| {
            for name in &players {
                black_box(tables.player_stats(black_box(name)).unwrap());
            }
        })
    });
}

fn bench_chart_build(c: &mut Criterion) {
    let players = roster();
    let tables = SeasonTables::load(&demo_provider(&players), 4).unwrap();
    let stats: Vec<_> = players
        .iter()
        .map(|name| (name.clone(), tables.player_stats(name).unwrap()))
        .collect();
    c.bench_function("radar_chart_build", |b| {
        b.iter(|| {
            let chart = chart_from_players(black_box(&stats), FrameKind::Polygon).unwrap();
            black_box(chart.series.len());
        })
    });
}

criterion_group!(
    perf,
    bench_standard_parse,
    bench_commented_parse,
    bench_derive_players,
    bench_chart_build
);
criterion_main!(perf);

static STANDARD_HTML: &str = include_str!("../tests/fixtures/fbref_standard.html");
static PASSING_HTML: &str = include_str!("../tests/fixtures/fbref_passing.html");
