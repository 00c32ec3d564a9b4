use std::fs;
use std::path::PathBuf;

use player_radar::chart::chart_from_players;
use player_radar::demo_feed::demo_provider;
use player_radar::error::FetchError;
use player_radar::fbref::parse_stat_table_html;
use player_radar::player_stats::{
    Metric, SeasonTables, fetch_player, fetch_player_data, fetch_players,
};
use player_radar::provider::{MemoryProvider, StatType};
use player_radar::radar::FrameKind;
use player_radar::stat_table::{ColumnKey, RowIndex, StatTable};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn fixture_provider() -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    for (stat_type, file) in [
        (StatType::Standard, "fbref_standard.html"),
        (StatType::Passing, "fbref_passing.html"),
        (StatType::GoalShotCreation, "fbref_gca.html"),
        (StatType::Possession, "fbref_possession.html"),
    ] {
        let table = parse_stat_table_html(
            &read_fixture(file),
            stat_type,
            "Big 5 European Leagues Combined",
            "2024-2025",
        )
        .expect("fixture should parse");
        provider.insert(stat_type, table);
    }
    provider
}

fn fixture_tables() -> SeasonTables {
    SeasonTables::load(&fixture_provider(), 2).expect("fixture tables should load")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn single_row(columns: &[(&str, &str)], player: &str, values: &[f64]) -> StatTable {
    let mut table = StatTable::new(
        columns
            .iter()
            .map(|(group, stat)| ColumnKey::new(*group, *stat))
            .collect(),
    );
    table.push_row(
        RowIndex {
            league: "ENG-Premier League".to_string(),
            season: "2024-2025".to_string(),
            team: "Brentford".to_string(),
            player: player.to_string(),
        },
        values.to_vec(),
    );
    table
}

fn handmade_tables(player: &str, nineties: f64) -> SeasonTables {
    SeasonTables {
        standard: single_row(
            &[("Playing Time", "90s"), ("Expected", "xAG"), ("Expected", "xG")],
            player,
            &[nineties, 2.5, 7.1],
        ),
        passing: single_row(&[("KP", "")], player, &[30.0]),
        gca: single_row(&[("SCA", "SCA90")], player, &[2.4]),
        possession: single_row(
            &[("Carries", "PrgC"), ("Carries", "CPA"), ("Take-Ons", "Succ")],
            player,
            &[45.0, 15.0, 24.0],
        ),
    }
}

#[test]
fn derives_seven_metrics_in_axis_order() {
    let stats = fixture_tables().player_stats("Rasmus Højlund").unwrap();

    let keys: Vec<&str> = stats.keys().collect();
    let expected: Vec<&str> = Metric::ALL.iter().map(|m| m.label()).collect();
    assert_eq!(keys, expected);
    assert_eq!(keys[1], "Carries into Penalty Area per 90");

    let values = stats.values();
    assert!(approx(values[0], 2.0), "PrgC 36 over 18 nineties");
    assert!(approx(values[1], 0.5));
    assert!(approx(values[2], 0.5));
    assert!(approx(values[3], 1.78), "SCA90 is taken as published");
    assert!(approx(values[4], 0.9));
    assert!(approx(values[5], 5.4));
    assert!(approx(values[6], 0.5));
}

#[test]
fn first_row_wins_for_multi_club_season() {
    let stats = fixture_tables().player_stats("Marcus Rashford").unwrap();

    assert!(approx(stats.get("Progressive Carries per 90").unwrap(), 4.0));
    assert!(approx(stats.get("Key Passes per 90").unwrap(), 2.0));
    assert!(approx(stats.get("Expected Goals per 90").unwrap(), 3.2));
    assert!(approx(stats.get("Shot Creating Actions per 90").unwrap(), 3.1));
}

#[test]
fn unknown_player_is_reported_against_standard() {
    let err = fixture_tables().player_stats("Nobody Atall").unwrap_err();
    assert!(matches!(
        err,
        FetchError::PlayerNotFound {
            ref player,
            stat_type: StatType::Standard,
        } if player == "Nobody Atall"
    ));
}

#[test]
fn player_missing_from_secondary_table_names_it() {
    let err = fixture_tables().player_stats("Standard Only").unwrap_err();
    assert!(matches!(
        err,
        FetchError::PlayerNotFound {
            stat_type: StatType::Passing,
            ..
        }
    ));
}

#[test]
fn zero_nineties_is_an_error_not_infinity() {
    let err = fixture_tables().player_stats("Zero Minutes").unwrap_err();
    match err {
        FetchError::NoMinutesPlayed { player, nineties } => {
            assert_eq!(player, "Zero Minutes");
            assert_eq!(nineties, 0.0);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = handmade_tables("Blank Minutes", f64::NAN)
        .player_stats("Blank Minutes")
        .unwrap_err();
    assert!(matches!(err, FetchError::NoMinutesPlayed { .. }));
}

#[test]
fn handmade_tables_divide_by_nineties() {
    let stats = handmade_tables("Bryan Mbeumo", 15.0)
        .player_stats("Bryan Mbeumo")
        .unwrap();
    assert_eq!(stats.len(), 7);
    assert!(approx(stats.get("Progressive Carries per 90").unwrap(), 3.0));
    assert!(approx(stats.get("Carries into Penalty Area per 90").unwrap(), 1.0));
    assert!(approx(stats.get("Successful Take-ons per 90").unwrap(), 1.6));
    assert!(approx(stats.get("Key Passes per 90").unwrap(), 2.0));
    assert!(approx(stats.get("Expected Assists per 90").unwrap(), 2.5));
}

#[test]
fn missing_column_is_schema_mismatch() {
    let mut tables = handmade_tables("Bryan Mbeumo", 15.0);
    tables.possession = single_row(
        &[("Carries", "PrgC"), ("Take-Ons", "Succ")],
        "Bryan Mbeumo",
        &[45.0, 24.0],
    );

    let err = tables.player_stats("Bryan Mbeumo").unwrap_err();
    match err {
        FetchError::SchemaMismatch { stat_type, column } => {
            assert_eq!(stat_type, StatType::Possession);
            assert_eq!(column, ColumnKey::new("Carries", "CPA"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fetch_players_keeps_order_and_per_player_errors() {
    let players = vec![
        "Rasmus Højlund".to_string(),
        "Nobody Atall".to_string(),
        "Marcus Rashford".to_string(),
    ];
    let results = fetch_players(&fixture_provider(), &players, 4).unwrap();

    let names: Vec<&str> = results.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Rasmus Højlund", "Nobody Atall", "Marcus Rashford"]);
    assert!(results[0].1.is_ok());
    assert!(results[1].1.is_err());
    assert!(results[2].1.is_ok());
}

#[test]
fn missing_table_aborts_the_load() {
    let provider = MemoryProvider::new().with_table(StatType::Standard, StatTable::default());
    let err = fetch_players(&provider, &["Antony".to_string()], 2).unwrap_err();
    assert!(matches!(err, FetchError::MissingTable { .. }));
}

#[test]
fn fixtures_render_as_one_chart() {
    let tables = fixture_tables();
    let players: Vec<(String, _)> = ["Rasmus Højlund", "Marcus Rashford"]
        .into_iter()
        .map(|name| (name.to_string(), tables.player_stats(name).unwrap()))
        .collect();

    let chart = chart_from_players(&players, FrameKind::Polygon).unwrap();
    assert_eq!(chart.categories.len(), 7);
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.title, "Comparison of Rasmus Højlund and Marcus Rashford");
}

#[test]
fn demo_feed_covers_every_requested_player() {
    let players: Vec<String> = ["Antony", "Amad Diallo", "Joshua Zirkzee"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let results = fetch_players(&demo_provider(&players), &players, 2).unwrap();

    for (name, result) in &results {
        let stats = result.as_ref().unwrap_or_else(|err| panic!("{name}: {err}"));
        assert!(stats.values().iter().all(|v| v.is_finite() && *v >= 0.0));
    }
}

#[test]
fn single_player_fetch_matches_batch_fetch() {
    let provider = fixture_provider();
    let single = fetch_player(&provider, "Rasmus Højlund", 2).unwrap();
    let batch = fetch_players(&provider, &["Rasmus Højlund".to_string()], 2).unwrap();
    assert_eq!(batch[0].1.as_ref().unwrap(), &single);

    let err = fetch_player(&provider, "Nobody Atall", 2).unwrap_err();
    assert!(matches!(err, FetchError::PlayerNotFound { .. }));
}

#[test]
fn fbref_fetch_rejects_bad_scope_before_any_request() {
    let err = fetch_player_data("Antony", &["MLS"], &["2024-2025"]).unwrap_err();
    assert!(matches!(err, FetchError::UnknownLeague(ref name) if name == "MLS"));

    let err = fetch_player_data("Antony", &["ENG-Premier League"], &["next year"]).unwrap_err();
    assert!(matches!(err, FetchError::InvalidSeason(_)));
}
