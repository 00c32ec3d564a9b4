use anyhow::{Context, Result};

use player_radar::config::ComparisonConfig;
use player_radar::fbref::FbrefProvider;
use player_radar::provider::{StatType, StatsProvider};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let only = std::env::var("STAT_TYPE")
        .ok()
        .map(|v| v.trim().to_ascii_lowercase());
    let config = ComparisonConfig::from_env().context("invalid configuration")?;
    let provider = FbrefProvider::new(
        config.leagues.as_slice(),
        config.seasons.as_slice(),
        config.fbref_options(),
    )
    .context("opening fbref session")?;

    for stat_type in StatType::ALL {
        if only.as_deref().is_some_and(|wanted| wanted != stat_type.as_str()) {
            continue;
        }
        for url in provider.page_urls(stat_type) {
            println!("# {url}");
        }
        let table = provider
            .read_player_season_stats(stat_type)
            .with_context(|| format!("fetch {stat_type} table"))?;

        println!("{stat_type} ({} rows):", table.len());
        for column in table.columns() {
            let required = stat_type.required_columns().contains(column);
            let marker = if required { "*" } else { " " };
            println!("  {marker} {column}");
        }
        for column in stat_type.required_columns() {
            if !table.has_column(&column) {
                println!("  ! missing required column {column}");
            }
        }
    }

    Ok(())
}
