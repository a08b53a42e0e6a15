use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame,
};

use super::style::ChartStyle;
use crate::models::AbsenceMatrix;

/// Values closer than this within one month get pushed apart horizontally.
const OVERLAP_DISTANCE: u32 = 10;
const JITTER_STEP: f64 = 0.1;
const Y_HEADROOM: f64 = 20.0;
const LEGEND_WIDTH: u16 = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub school: usize,
    /// Month position, 1-based, plus jitter.
    pub x: f64,
    pub y: f64,
}

/// Horizontal offsets for one month's values, in school order.
///
/// Each previously plotted distinct value within [`OVERLAP_DISTANCE`] of a
/// non-zero value shifts it by one step: left for neighbours at an even
/// insertion index, right for odd ones.
pub fn jitter_offsets(values: &[u32]) -> Vec<f64> {
    let mut seen: Vec<u32> = Vec::new();
    values
        .iter()
        .map(|&value| {
            let offset = if value == 0 {
                0.0
            } else {
                seen.iter()
                    .enumerate()
                    .filter(|(_, prior)| prior.abs_diff(value) <= OVERLAP_DISTANCE)
                    .map(|(idx, _)| if idx % 2 == 0 { -JITTER_STEP } else { JITTER_STEP })
                    .sum::<f64>()
            };
            if !seen.contains(&value) {
                seen.push(value);
            }
            offset
        })
        .collect()
}

pub fn scatter_points(matrix: &AbsenceMatrix) -> Vec<ScatterPoint> {
    let mut points = Vec::with_capacity(matrix.num_schools() * matrix.num_months());
    for month in 0..matrix.num_months() {
        let column = matrix.month_column(month).unwrap_or_default();
        for (school, (&value, offset)) in column.iter().zip(jitter_offsets(&column)).enumerate() {
            points.push(ScatterPoint {
                school,
                x: (month + 1) as f64 + offset,
                y: value as f64,
            });
        }
    }
    points
}

fn y_ticks(y_max: f64) -> Vec<f64> {
    let step = if y_max > 150.0 { 50.0 } else { 25.0 };
    (0..)
        .map(|i| i as f64 * step)
        .take_while(|tick| *tick <= y_max)
        .collect()
}

pub fn draw(frame: &mut Frame, area: Rect, matrix: &AbsenceMatrix, style: &ChartStyle) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(LEGEND_WIDTH)])
        .split(area);

    let months = matrix.num_months();
    let points = scatter_points(matrix);
    let y_max = matrix.max_value() as f64 + Y_HEADROOM;
    let label_row = -y_max * 0.06;
    let ticks = y_ticks(y_max);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(style.scatter_title.as_str())
                .title_bottom(Line::from("Month").centered()),
        )
        .x_bounds([-0.5, months as f64 + 1.0])
        .y_bounds([label_row * 1.5, y_max])
        .paint(|ctx| {
            for &tick in &ticks {
                ctx.draw(&CanvasLine {
                    x1: 0.5,
                    y1: tick,
                    x2: months as f64 + 0.5,
                    y2: tick,
                    color: Color::DarkGray,
                });
            }
            ctx.layer();

            for &tick in &ticks {
                ctx.print(-0.5, tick, format!("{tick:>3.0}"));
            }
            ctx.print(-0.5, y_max, style.value_label.clone());
            for month in 0..months {
                ctx.print((month + 1) as f64 - 0.2, label_row, style.month_label(month));
            }
            for point in &points {
                ctx.print(
                    point.x,
                    point.y,
                    Span::styled(
                        style.marker(point.school).to_string(),
                        Style::default().fg(style.color(point.school)),
                    ),
                );
            }
        });
    frame.render_widget(canvas, columns[0]);

    let legend: Vec<Line> = (0..matrix.num_schools())
        .map(|school| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", style.marker(school)),
                    Style::default().fg(style.color(school)),
                ),
                Span::raw(style.school_label(school)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(legend).block(Block::default().borders(Borders::ALL)),
        columns[1],
    );
}
