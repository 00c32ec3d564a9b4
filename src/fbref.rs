//! FBref season-stats provider.
//!
//! Player tables live at one page per (league, season, stat type). Secondary
//! tables are shipped inside HTML comments, so comment markers are stripped
//! before parsing.

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use crate::error::FetchError;
use crate::http_client::{RequestLimiter, fetch_page, http_client};
use crate::provider::{StatType, StatsProvider};
use crate::stat_table::{ColumnKey, RowIndex, StatTable};

const FBREF_BASE_URL: &str = "https://fbref.com/en/comps";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub id: &'static str,
    pub fbref_name: &'static str,
    comp: &'static str,
    slug: &'static str,
}

impl League {
    fn is_big5(&self) -> bool {
        self.comp == "Big5"
    }
}

const LEAGUES: &[League] = &[
    League {
        id: "Big 5 European Leagues Combined",
        fbref_name: "Big 5 European Leagues",
        comp: "Big5",
        slug: "Big-5-European-Leagues",
    },
    League {
        id: "ENG-Premier League",
        fbref_name: "Premier League",
        comp: "9",
        slug: "Premier-League",
    },
    League {
        id: "ESP-La Liga",
        fbref_name: "La Liga",
        comp: "12",
        slug: "La-Liga",
    },
    League {
        id: "FRA-Ligue 1",
        fbref_name: "Ligue 1",
        comp: "13",
        slug: "Ligue-1",
    },
    League {
        id: "GER-Bundesliga",
        fbref_name: "Bundesliga",
        comp: "20",
        slug: "Bundesliga",
    },
    League {
        id: "ITA-Serie A",
        fbref_name: "Serie A",
        comp: "11",
        slug: "Serie-A",
    },
];

/// Accepts the configured id ("ENG-Premier League") or FBref's own name
/// ("Premier League"), ignoring ASCII case.
pub fn lookup_league(name: &str) -> Result<&'static League, FetchError> {
    let wanted = name.trim();
    LEAGUES
        .iter()
        .find(|league| {
            league.id.eq_ignore_ascii_case(wanted)
                || league.fbref_name.eq_ignore_ascii_case(wanted)
                || league.comp.eq_ignore_ascii_case(wanted)
        })
        .ok_or_else(|| FetchError::UnknownLeague(name.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Season {
    start: u16,
}

impl Season {
    pub fn from_start_year(start: u16) -> Self {
        Self { start }
    }

    /// Parses `2024-2025`, `2024-25`, `2425` and `2024`. A four-digit code
    /// whose halves are consecutive (`2021`) reads as a two-year code, so it
    /// means 2020-2021 rather than the season starting in 2021.
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let code = raw.trim();
        let invalid = || FetchError::InvalidSeason(raw.to_string());
        let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

        if let Some((head, tail)) = code.split_once('-') {
            if head.len() != 4 || !all_digits(head) || !all_digits(tail) {
                return Err(invalid());
            }
            let start: u16 = head.parse().map_err(|_| invalid())?;
            let end: u16 = tail.parse().map_err(|_| invalid())?;
            let consistent = match tail.len() {
                4 => end == start + 1,
                2 => end == (start + 1) % 100,
                _ => false,
            };
            if !consistent {
                return Err(invalid());
            }
            return Ok(Self { start });
        }

        if code.len() != 4 || !all_digits(code) {
            return Err(invalid());
        }
        let first: u16 = code[..2].parse().map_err(|_| invalid())?;
        let second: u16 = code[2..].parse().map_err(|_| invalid())?;
        if second == (first + 1) % 100 {
            let century = if first >= 70 { 1900 } else { 2000 };
            return Ok(Self {
                start: century + first,
            });
        }
        let start: u16 = code.parse().map_err(|_| invalid())?;
        if start < 1900 {
            return Err(invalid());
        }
        Ok(Self { start })
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.start + 1)
    }
}

fn page_slug(stat_type: StatType) -> &'static str {
    match stat_type {
        StatType::Standard => "stats",
        StatType::Passing => "passing",
        StatType::GoalShotCreation => "gca",
        StatType::Possession => "possession",
    }
}

pub fn table_id(stat_type: StatType) -> &'static str {
    match stat_type {
        StatType::Standard => "stats_standard",
        StatType::Passing => "stats_passing",
        StatType::GoalShotCreation => "stats_gca",
        StatType::Possession => "stats_possession",
    }
}

pub fn stat_page_url(league: &League, season: Season, stat_type: StatType) -> String {
    let label = season.label();
    let page = page_slug(stat_type);
    if league.is_big5() {
        format!(
            "{FBREF_BASE_URL}/{}/{label}/{page}/players/{label}-{}-Stats",
            league.comp, league.slug
        )
    } else {
        format!(
            "{FBREF_BASE_URL}/{}/{label}/{page}/{label}-{}-Stats",
            league.comp, league.slug
        )
    }
}

enum HeaderRole {
    Player,
    Team,
    Skip,
    Value,
}

fn selector(raw: &str) -> Result<Selector, FetchError> {
    Selector::parse(raw).map_err(|err| FetchError::Selector(format!("{raw}: {err}")))
}

fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn cell_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn parse_cell(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn parse_stat_table_html(
    html: &str,
    stat_type: StatType,
    league: &str,
    season: &str,
) -> Result<StatTable, FetchError> {
    let uncommented = html.replace("<!--", "").replace("-->", "");
    let document = Html::parse_document(&uncommented);
    let id = table_id(stat_type);
    let missing = || FetchError::MissingTable {
        table_id: id.to_string(),
        location: format!("{league} {season}"),
    };

    let table_sel = selector(&format!("table#{id}"))?;
    let header_sel = selector("thead tr")?;
    let body_sel = selector("tbody tr")?;
    let cell_sel = selector("th, td")?;

    let table = document.select(&table_sel).next().ok_or_else(missing)?;
    let header_rows: Vec<ElementRef> = table.select(&header_sel).collect();
    let stat_row = header_rows.last().ok_or_else(missing)?;

    let mut groups: Vec<String> = Vec::new();
    if let Some(over) = header_rows.iter().find(|row| has_class(row, "over_header")) {
        for cell in over.select(&cell_sel) {
            let span = cell
                .value()
                .attr("colspan")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(1);
            let name = cell_text(&cell);
            groups.extend(std::iter::repeat_n(name, span));
        }
    }

    let mut roles = Vec::new();
    let mut columns = Vec::new();
    for (i, cell) in stat_row.select(&cell_sel).enumerate() {
        let role = match cell.value().attr("data-stat").unwrap_or_default() {
            "player" => HeaderRole::Player,
            "team" | "squad" => HeaderRole::Team,
            "ranker" | "matches" => HeaderRole::Skip,
            _ => HeaderRole::Value,
        };
        if matches!(role, HeaderRole::Value) {
            let stat = cell_text(&cell);
            let group = groups.get(i).map(|g| g.trim()).unwrap_or_default();
            columns.push(if group.is_empty() {
                ColumnKey::new(stat, "")
            } else {
                ColumnKey::new(group, stat)
            });
        }
        roles.push(role);
    }

    let mut parsed = StatTable::new(columns);
    for row in table.select(&body_sel) {
        if has_class(&row, "thead") || has_class(&row, "over_header") || has_class(&row, "spacer") {
            continue;
        }

        let mut player = String::new();
        let mut team = String::new();
        let mut values = Vec::new();
        for (role, cell) in roles.iter().zip(row.select(&cell_sel)) {
            match role {
                HeaderRole::Player => player = cell_text(&cell),
                HeaderRole::Team => team = cell_text(&cell),
                HeaderRole::Skip => {}
                HeaderRole::Value => values.push(parse_cell(&cell_text(&cell))),
            }
        }

        if player.is_empty() {
            log::debug!("skipping {id} row without a player in {league} {season}");
            continue;
        }
        parsed.push_row(
            RowIndex {
                league: league.to_string(),
                season: season.to_string(),
                team,
                player,
            },
            values,
        );
    }

    Ok(parsed)
}

#[derive(Debug, Clone, Copy)]
pub struct FbrefOptions {
    pub timeout: Duration,
    pub request_interval: Duration,
}

impl Default for FbrefOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            request_interval: Duration::from_millis(3000),
        }
    }
}

pub struct FbrefProvider {
    leagues: Vec<&'static League>,
    seasons: Vec<Season>,
    options: FbrefOptions,
    limiter: RequestLimiter,
}

impl FbrefProvider {
    pub fn new<L, S>(
        leagues: &[L],
        seasons: &[S],
        options: FbrefOptions,
    ) -> Result<Self, FetchError>
    where
        L: AsRef<str>,
        S: AsRef<str>,
    {
        let leagues = leagues
            .iter()
            .map(|l| lookup_league(l.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if leagues.is_empty() {
            return Err(FetchError::UnknownLeague(String::new()));
        }
        let seasons = seasons
            .iter()
            .map(|s| Season::parse(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if seasons.is_empty() {
            return Err(FetchError::InvalidSeason(String::new()));
        }

        Ok(Self {
            leagues,
            seasons,
            options,
            limiter: RequestLimiter::new(options.request_interval),
        })
    }

    pub fn page_urls(&self, stat_type: StatType) -> Vec<String> {
        let mut urls = Vec::with_capacity(self.leagues.len() * self.seasons.len());
        for league in &self.leagues {
            for season in &self.seasons {
                urls.push(stat_page_url(league, *season, stat_type));
            }
        }
        urls
    }
}

impl StatsProvider for FbrefProvider {
    fn read_player_season_stats(&self, stat_type: StatType) -> Result<StatTable, FetchError> {
        let client = http_client(self.options.timeout)?;
        let mut combined = StatTable::default();
        for league in &self.leagues {
            for season in &self.seasons {
                let url = stat_page_url(league, *season, stat_type);
                self.limiter.wait();
                log::info!("fetching {stat_type} for {} {}", league.id, season.label());
                let html = fetch_page(client, &url)?;
                let table = parse_stat_table_html(&html, stat_type, league.id, &season.label())?;
                log::debug!("{url}: {} rows", table.len());
                combined.append(table);
            }
        }
        Ok(combined)
    }
}
