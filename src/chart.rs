use serde::Serialize;

use crate::error::RenderError;
use crate::player_stats::PlayerStats;
use crate::radar::{AxisLabel, FrameKind, PolarPoint, RadarGeometry, to_axes};

pub const LINE_WIDTH: f64 = 2.0;
pub const FILL_ALPHA: f64 = 0.15;
pub const LEGEND_COLUMNS: usize = 2;
const RING_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesColor {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

pub const PALETTE: [SeriesColor; 6] = [
    SeriesColor {
        name: "blue",
        rgb: (0, 0, 255),
    },
    SeriesColor {
        name: "red",
        rgb: (255, 0, 0),
    },
    SeriesColor {
        name: "green",
        rgb: (0, 128, 0),
    },
    SeriesColor {
        name: "purple",
        rgb: (128, 0, 128),
    },
    SeriesColor {
        name: "orange",
        rgb: (255, 165, 0),
    },
    SeriesColor {
        name: "yellow",
        rgb: (255, 255, 0),
    },
];

pub fn palette_color(index: usize) -> SeriesColor {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInput {
    pub name: String,
    pub values: Vec<f64>,
    pub color: Option<SeriesColor>,
}

impl SeriesInput {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            color: None,
        }
    }

    pub fn with_color(mut self, color: SeriesColor) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarSeries {
    pub name: String,
    pub color: SeriesColor,
    pub line_width: f64,
    pub fill_alpha: f64,
    /// Closed: the last point repeats the first.
    pub points: Vec<PolarPoint>,
}

impl RadarSeries {
    pub fn axes_points(&self, r_max: f64) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| to_axes(*p, r_max)).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarChart {
    pub title: String,
    pub frame: FrameKind,
    pub categories: Vec<String>,
    pub angles: Vec<f64>,
    pub frame_outline: Vec<(f64, f64)>,
    pub labels: Vec<AxisLabel>,
    /// Grid ring radii in data units, innermost first. The outermost equals `r_max`.
    pub rings: Vec<f64>,
    pub r_max: f64,
    pub legend_columns: usize,
    pub series: Vec<RadarSeries>,
}

pub fn build_chart(
    categories: &[String],
    series: &[SeriesInput],
    frame: FrameKind,
) -> Result<RadarChart, RenderError> {
    if series.is_empty() {
        return Err(RenderError::NoSeries);
    }
    let n = categories.len();
    for input in series {
        if input.values.len() != n {
            return Err(RenderError::DimensionMismatch {
                series: input.name.clone(),
                expected: n,
                found: input.values.len(),
            });
        }
        if let Some(pos) = input.values.iter().position(|v| !v.is_finite()) {
            return Err(RenderError::NonFiniteValue {
                series: input.name.clone(),
                category: categories[pos].clone(),
            });
        }
    }

    let geometry = RadarGeometry::new(n)?;
    let strategy = frame.frame(geometry.clone());

    let peak = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);
    let r_max = nice_ceiling(peak);
    let rings = (1..=RING_COUNT)
        .map(|k| r_max * k as f64 / RING_COUNT as f64)
        .collect();

    let plotted = series
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let points = geometry
                .angles()
                .iter()
                .zip(&input.values)
                .map(|(theta, value)| PolarPoint::new(*theta, *value))
                .collect();
            RadarSeries {
                name: input.name.clone(),
                color: input.color.unwrap_or_else(|| palette_color(i)),
                line_width: LINE_WIDTH,
                fill_alpha: FILL_ALPHA,
                points: strategy.close_series(points),
            }
        })
        .collect::<Vec<_>>();

    let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    Ok(RadarChart {
        title: comparison_title(&names),
        frame,
        categories: categories.to_vec(),
        angles: geometry.angles().to_vec(),
        frame_outline: strategy.frame_shape(),
        labels: strategy.axis_labels(categories),
        rings,
        r_max,
        legend_columns: LEGEND_COLUMNS,
        series: plotted,
    })
}

/// Chart for derived player stats. Every player must carry the first player's
/// keys in the same order.
pub fn chart_from_players(
    players: &[(String, PlayerStats)],
    frame: FrameKind,
) -> Result<RadarChart, RenderError> {
    let Some((_, first)) = players.first() else {
        return Err(RenderError::NoSeries);
    };
    let categories: Vec<String> = first.keys().map(str::to_string).collect();

    let mut series = Vec::with_capacity(players.len());
    for (name, stats) in players {
        if stats.len() != categories.len() {
            return Err(RenderError::DimensionMismatch {
                series: name.clone(),
                expected: categories.len(),
                found: stats.len(),
            });
        }
        if !stats.same_keys(first) {
            return Err(RenderError::InconsistentCategories {
                series: name.clone(),
            });
        }
        series.push(SeriesInput::new(name.clone(), stats.values()));
    }

    build_chart(&categories, &series, frame)
}

pub fn comparison_title(names: &[&str]) -> String {
    let joined = match names {
        [] => String::new(),
        [one] => (*one).to_string(),
        [a, b] => format!("{a} and {b}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    };
    format!("Comparison of {joined}")
}

/// Smallest 1, 2, 2.5 or 5 times a power of ten that is >= `value`.
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let fraction = value / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|s| fraction <= *s + 1e-9)
        .unwrap_or(10.0);
    step * magnitude
}
