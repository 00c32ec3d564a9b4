//! Radar projection.
//!
//! Angles start at north and grow counter-clockwise on screen. Positions are
//! expressed in axes-fraction coordinates: the chart occupies the unit square
//! with its centre at (0.5, 0.5) and its outer frame at radius 0.5.

use std::f64::consts::TAU;
use std::str::FromStr;

use serde::Serialize;

use crate::error::RenderError;

pub const FRAME_CENTER: (f64, f64) = (0.5, 0.5);
pub const FRAME_RADIUS: f64 = 0.5;
const LABEL_RADIUS: f64 = 0.56;

pub fn radar_angles(n: usize) -> Vec<f64> {
    (0..n).map(|k| TAU * k as f64 / n as f64).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarGeometry {
    angles: Vec<f64>,
}

impl RadarGeometry {
    pub fn new(num_vars: usize) -> Result<Self, RenderError> {
        if num_vars < 3 {
            return Err(RenderError::TooFewCategories(num_vars));
        }
        Ok(Self {
            angles: radar_angles(num_vars),
        })
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarPoint {
    pub theta: f64,
    pub r: f64,
}

impl PolarPoint {
    pub fn new(theta: f64, r: f64) -> Self {
        Self { theta, r }
    }
}

/// Maps a polar point to axes-fraction coordinates, with `r_max` landing on
/// the frame.
pub fn to_axes(point: PolarPoint, r_max: f64) -> (f64, f64) {
    let scaled = if r_max > 0.0 { point.r / r_max } else { 0.0 };
    polar_to_axes(point.theta, scaled * FRAME_RADIUS)
}

fn polar_to_axes(theta: f64, radius: f64) -> (f64, f64) {
    (
        FRAME_CENTER.0 - radius * theta.sin(),
        FRAME_CENTER.1 + radius * theta.cos(),
    )
}

pub fn close_polyline(mut points: Vec<PolarPoint>) -> Vec<PolarPoint> {
    if let (Some(first), Some(last)) = (points.first().copied(), points.last()) {
        if first != *last {
            points.push(first);
        }
    }
    points
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub text: String,
    pub theta: f64,
    pub x: f64,
    pub y: f64,
}

pub trait RadarFrame {
    fn close_series(&self, points: Vec<PolarPoint>) -> Vec<PolarPoint>;

    fn frame_shape(&self) -> Vec<(f64, f64)>;

    fn axis_labels(&self, categories: &[String]) -> Vec<AxisLabel>;
}

pub struct PolygonFrame {
    geometry: RadarGeometry,
}

impl PolygonFrame {
    pub fn new(geometry: RadarGeometry) -> Self {
        Self { geometry }
    }
}

impl RadarFrame for PolygonFrame {
    fn close_series(&self, points: Vec<PolarPoint>) -> Vec<PolarPoint> {
        close_polyline(points)
    }

    fn frame_shape(&self) -> Vec<(f64, f64)> {
        let mut outline: Vec<(f64, f64)> = self
            .geometry
            .angles()
            .iter()
            .map(|theta| polar_to_axes(*theta, FRAME_RADIUS))
            .collect();
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }
        outline
    }

    fn axis_labels(&self, categories: &[String]) -> Vec<AxisLabel> {
        categories
            .iter()
            .zip(self.geometry.angles())
            .map(|(text, theta)| {
                let (x, y) = polar_to_axes(*theta, LABEL_RADIUS);
                AxisLabel {
                    text: text.clone(),
                    theta: *theta,
                    x,
                    y,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    #[default]
    Polygon,
}

impl FrameKind {
    pub fn frame(self, geometry: RadarGeometry) -> Box<dyn RadarFrame> {
        match self {
            FrameKind::Polygon => Box::new(PolygonFrame::new(geometry)),
        }
    }
}

impl FromStr for FrameKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polygon" => Ok(FrameKind::Polygon),
            _ => Err(RenderError::UnsupportedFrame(s.to_string())),
        }
    }
}
