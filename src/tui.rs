use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::chart::{RadarChart, SeriesColor};
use crate::radar::{FRAME_CENTER, FRAME_RADIUS};

const X_BOUNDS: [f64; 2] = [-0.6, 1.6];
const Y_BOUNDS: [f64; 2] = [-0.1, 1.1];
// Terminal cells are about twice as tall as wide.
const CELL_ASPECT: f64 = 2.0;
const LEGEND_ENTRY_WIDTH: usize = 32;

struct Viewer<'a> {
    chart: &'a RadarChart,
    show_fill: bool,
    should_quit: bool,
}

impl Viewer<'_> {
    fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('f') => self.show_fill = !self.show_fill,
            _ => {}
        }
    }
}

/// Shows `chart` full screen until the viewer presses `q` or `Esc`.
pub fn show(chart: &RadarChart) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut viewer = Viewer {
        chart,
        show_fill: true,
        should_quit: false,
    };
    let res = run_viewer(&mut terminal, &mut viewer);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res
}

fn run_viewer<B: Backend>(terminal: &mut Terminal<B>, viewer: &mut Viewer) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    loop {
        terminal.draw(|f| {
            let area = f.size();
            draw_chart(f, area, viewer.chart, viewer.show_fill);
        })?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    viewer.on_key(key.code);
                }
            }
        }

        if viewer.should_quit {
            return Ok(());
        }
    }
}

pub fn draw_chart(frame: &mut Frame, area: Rect, chart: &RadarChart, show_fill: bool) {
    let legend_rows = chart.series.len().div_ceil(chart.legend_columns.max(1)) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(legend_rows + 2),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(chart.title.clone())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, chunks[0]);

    let plot_area = fit_plot_area(chunks[1]);
    render_radar(frame, plot_area, chart, show_fill);

    let legend = Paragraph::new(legend_lines(chart))
        .block(Block::default().title("Players").borders(Borders::ALL));
    frame.render_widget(legend, chunks[2]);

    let footer = Paragraph::new("q/Esc Quit | f Toggle fill")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);
}

/// Largest centred sub-area whose cells keep the data aspect ratio square.
fn fit_plot_area(area: Rect) -> Rect {
    let x_span = X_BOUNDS[1] - X_BOUNDS[0];
    let y_span = Y_BOUNDS[1] - Y_BOUNDS[0];
    let ideal_width = (area.height as f64 * CELL_ASPECT * x_span / y_span).round() as u16;
    let width = ideal_width.min(area.width);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

fn render_radar(frame: &mut Frame, area: Rect, chart: &RadarChart, show_fill: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let outline = chart.frame_outline.clone();
    let rings: Vec<Vec<(f64, f64)>> = chart
        .rings
        .iter()
        .filter(|r| **r < chart.r_max)
        .map(|r| scale_outline(&outline, r / chart.r_max))
        .collect();
    let polygons: Vec<(Color, Vec<(f64, f64)>)> = chart
        .series
        .iter()
        .map(|s| (to_color(s.color), s.axes_points(chart.r_max)))
        .collect();
    let fills: Vec<(Color, Vec<(f64, f64)>)> = if show_fill {
        chart
            .series
            .iter()
            .zip(&polygons)
            .enumerate()
            .map(|(i, (s, (color, poly)))| {
                (*color, stipple(poly, s.fill_alpha, i, chart.series.len()))
            })
            .collect()
    } else {
        Vec::new()
    };

    let cell_width = (X_BOUNDS[1] - X_BOUNDS[0]) / area.width as f64;
    let labels: Vec<(f64, f64, String)> = chart
        .labels
        .iter()
        .map(|label| {
            let len = label.text.chars().count() as f64 * cell_width;
            let x = if label.x < FRAME_CENTER.0 - 0.05 {
                label.x - len
            } else if label.x <= FRAME_CENTER.0 + 0.05 {
                label.x - len / 2.0
            } else {
                label.x
            };
            (x.max(X_BOUNDS[0]), label.y, label.text.clone())
        })
        .collect();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(X_BOUNDS)
        .y_bounds(Y_BOUNDS)
        .paint(move |ctx| {
            for (color, coords) in &fills {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: *color,
                });
            }
            ctx.layer();

            for ring in &rings {
                draw_path(ctx, ring, Color::DarkGray);
            }
            for (x, y) in outline.iter().take(outline.len().saturating_sub(1)) {
                ctx.draw(&CanvasLine::new(FRAME_CENTER.0, FRAME_CENTER.1, *x, *y, Color::DarkGray));
            }
            draw_path(ctx, &outline, Color::White);

            for (color, poly) in &polygons {
                draw_path(ctx, poly, *color);
            }

            for (x, y, text) in &labels {
                ctx.print(*x, *y, Line::styled(text.clone(), Style::default().fg(Color::Gray)));
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_path(ctx: &mut ratatui::widgets::canvas::Context, path: &[(f64, f64)], color: Color) {
    for pair in path.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
    }
}

fn scale_outline(outline: &[(f64, f64)], factor: f64) -> Vec<(f64, f64)> {
    outline
        .iter()
        .map(|(x, y)| {
            (
                FRAME_CENTER.0 + (x - FRAME_CENTER.0) * factor,
                FRAME_CENTER.1 + (y - FRAME_CENTER.1) * factor,
            )
        })
        .collect()
}

/// Lattice points inside `polygon`, sparser for lower alpha. Each series gets
/// its own lattice offset so overlapping fills stay distinguishable.
fn stipple(polygon: &[(f64, f64)], alpha: f64, index: usize, total: usize) -> Vec<(f64, f64)> {
    let spacing = 0.012 / alpha.clamp(0.01, 1.0).sqrt();
    let offset = spacing * index as f64 / total.max(1) as f64;
    let lo = FRAME_CENTER.0 - FRAME_RADIUS;
    let steps = ((2.0 * FRAME_RADIUS) / spacing).ceil() as usize;

    let mut coords = Vec::new();
    for i in 0..=steps {
        for j in 0..=steps {
            let p = (lo + offset + i as f64 * spacing, lo + offset + j as f64 * spacing);
            if contains(polygon, p) {
                coords.push(p);
            }
        }
    }
    coords
}

// Even-odd rule.
fn contains(polygon: &[(f64, f64)], (px, py): (f64, f64)) -> bool {
    let mut inside = false;
    for pair in polygon.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        if (y1 > py) != (y2 > py) {
            let cross = x1 + (py - y1) * (x2 - x1) / (y2 - y1);
            if px < cross {
                inside = !inside;
            }
        }
    }
    inside
}

fn legend_lines(chart: &RadarChart) -> Vec<Line<'static>> {
    let columns = chart.legend_columns.max(1);
    chart
        .series
        .chunks(columns)
        .map(|row| {
            let mut spans = Vec::new();
            for s in row {
                let color = to_color(s.color);
                spans.push(Span::styled("━━ ", Style::default().fg(color)));
                spans.push(Span::raw(format!(
                    "{:<width$}",
                    s.name,
                    width = LEGEND_ENTRY_WIDTH - 3
                )));
            }
            Line::from(spans)
        })
        .collect()
}

fn to_color(color: SeriesColor) -> Color {
    let (r, g, b) = color.rgb;
    Color::Rgb(r, g, b)
}
