use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use player_radar::chart::{RadarChart, chart_from_players};
use player_radar::config::{ComparisonConfig, OutputMode, ProviderKind};
use player_radar::demo_feed::demo_provider;
use player_radar::fbref::FbrefProvider;
use player_radar::player_stats::{PlayerStats, fetch_players};
use player_radar::provider::StatsProvider;
use player_radar::tui;

#[derive(Serialize)]
struct PlayerDump<'a> {
    name: &'a str,
    stats: &'a PlayerStats,
}

#[derive(Serialize)]
struct ComparisonDump<'a> {
    players: Vec<PlayerDump<'a>>,
    chart: &'a RadarChart,
}

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = ComparisonConfig::from_env().context("invalid configuration")?;
    println!("Soccer Player Comparison");

    let provider: Box<dyn StatsProvider> = match config.provider {
        ProviderKind::Fbref => Box::new(
            FbrefProvider::new(
                config.leagues.as_slice(),
                config.seasons.as_slice(),
                config.fbref_options(),
            )
            .context("opening fbref session")?,
        ),
        ProviderKind::Demo => Box::new(demo_provider(&config.players)),
    };

    let results = fetch_players(provider.as_ref(), &config.players, config.fetch_parallelism)
        .context("loading season tables")?;

    let mut players = Vec::with_capacity(results.len());
    let mut failed = Vec::new();
    for (name, result) in results {
        match result {
            Ok(stats) => players.push((name, stats)),
            Err(err) => {
                eprintln!("{err}");
                failed.push(name);
            }
        }
    }
    if !failed.is_empty() {
        return Err(anyhow!(
            "no chart drawn, {} player(s) failed: {}",
            failed.len(),
            failed.join(", ")
        ));
    }

    if !config.output.draws_chart() {
        print_stats(&players);
        return Ok(());
    }
    let chart = chart_from_players(&players, config.frame).context("building radar chart")?;

    if config.output == OutputMode::Json {
        let dump = ComparisonDump {
            players: players
                .iter()
                .map(|(name, stats)| PlayerDump {
                    name: name.as_str(),
                    stats,
                })
                .collect(),
            chart: &chart,
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
    } else {
        print_stats(&players);
        tui::show(&chart).context("terminal display failed")?;
    }
    Ok(())
}

fn print_stats(players: &[(String, PlayerStats)]) {
    let width = players
        .first()
        .map(|(_, stats)| stats.keys().map(|k| k.chars().count()).max().unwrap_or(0))
        .unwrap_or(0);
    for (name, stats) in players {
        println!("{name} Stats:");
        for (key, value) in stats.iter() {
            println!("  {key:<width$}  {value:>6.2}");
        }
    }
}
