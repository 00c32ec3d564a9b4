use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::provider::{MemoryProvider, StatType};
use crate::stat_table::{ColumnKey, RowIndex, StatTable};

const DEMO_LEAGUE: &str = "Demo League";
const DEMO_SEASON: &str = "2024-2025";
const DEMO_TEAM: &str = "Demo FC";

/// Offline provider with plausible attacking numbers for `players`. Values are
/// seeded from each name, so the same roster always draws the same chart.
pub fn demo_provider(players: &[String]) -> MemoryProvider {
    let mut standard = StatTable::new(columns(&[
        ("Playing Time", "MP"),
        ("Playing Time", "Min"),
        ("Playing Time", "90s"),
        ("Performance", "Gls"),
        ("Performance", "Ast"),
        ("Expected", "xG"),
        ("Expected", "xAG"),
    ]));
    let mut passing = StatTable::new(columns(&[("Total", "Cmp"), ("Total", "Att"), ("KP", "")]));
    let mut gca = StatTable::new(columns(&[
        ("SCA", "SCA"),
        ("SCA", "SCA90"),
        ("GCA", "GCA"),
        ("GCA", "GCA90"),
    ]));
    let mut possession = StatTable::new(columns(&[
        ("Carries", "Carries"),
        ("Carries", "PrgC"),
        ("Carries", "CPA"),
        ("Take-Ons", "Att"),
        ("Take-Ons", "Succ"),
    ]));

    for name in players {
        let mut rng = StdRng::seed_from_u64(name_seed(name));
        let matches = rng.gen_range(12..=34) as f64;
        let minutes = (matches * rng.gen_range(45.0..88.0_f64)).round();
        let nineties = (minutes / 90.0 * 10.0).round() / 10.0;

        let xg_per90 = rng.gen_range(0.08..0.65_f64);
        let xag_per90 = rng.gen_range(0.05..0.35_f64);
        let sca_per90 = rng.gen_range(1.5..5.5_f64);
        let attempts = (nineties * rng.gen_range(1.0..6.0_f64)).round();
        let carries = (nineties * rng.gen_range(20.0..45.0_f64)).round();

        let index = RowIndex {
            league: DEMO_LEAGUE.to_string(),
            season: DEMO_SEASON.to_string(),
            team: DEMO_TEAM.to_string(),
            player: name.clone(),
        };

        let xg = round2(xg_per90 * nineties);
        let xag = round2(xag_per90 * nineties);
        standard.push_row(
            index.clone(),
            vec![
                matches,
                minutes,
                nineties,
                (xg * rng.gen_range(0.7..1.3_f64)).round(),
                (xag * rng.gen_range(0.6..1.4_f64)).round(),
                xg,
                xag,
            ],
        );

        let att = (nineties * rng.gen_range(15.0..40.0_f64)).round();
        passing.push_row(
            index.clone(),
            vec![
                (att * rng.gen_range(0.65..0.9_f64)).round(),
                att,
                (nineties * rng.gen_range(0.4..2.8_f64)).round(),
            ],
        );

        let sca = (sca_per90 * nineties).round();
        let gca_total = (sca * rng.gen_range(0.05..0.2_f64)).round();
        gca.push_row(
            index.clone(),
            vec![sca, round2(sca_per90), gca_total, round2(gca_total / nineties)],
        );

        possession.push_row(
            index,
            vec![
                carries,
                (carries * rng.gen_range(0.05..0.2_f64)).round(),
                (carries * rng.gen_range(0.02..0.08_f64)).round(),
                attempts,
                (attempts * rng.gen_range(0.3..0.6_f64)).round(),
            ],
        );
    }

    MemoryProvider::new()
        .with_table(StatType::Standard, standard)
        .with_table(StatType::Passing, passing)
        .with_table(StatType::GoalShotCreation, gca)
        .with_table(StatType::Possession, possession)
}

fn columns(pairs: &[(&str, &str)]) -> Vec<ColumnKey> {
    pairs
        .iter()
        .map(|(group, stat)| ColumnKey::new(*group, *stat))
        .collect()
}

// FNV-1a, stable across builds unlike `DefaultHasher`.
fn name_seed(name: &str) -> u64 {
    name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
