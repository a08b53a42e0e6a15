use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::style::ChartStyle;
use crate::models::AbsenceMatrix;

/// Anchor colours of the plasma ramp, low to high.
const PLASMA: [(u8, u8, u8); 5] = [
    (13, 8, 135),
    (126, 3, 168),
    (204, 71, 120),
    (248, 149, 64),
    (240, 249, 33),
];

const LABEL_WIDTH: usize = 11;
const COLOR_BAR_STEPS: usize = 24;

/// Colour for a position in `0.0..=1.0` (clamped).
pub fn plasma(t: f64) -> (u8, u8, u8) {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (PLASMA.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(PLASMA.len() - 2);
    let frac = scaled - lower as f64;
    let (a, b) = (PLASMA[lower], PLASMA[lower + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Position of `value` between the matrix extremes. A flat matrix maps to 0.
pub fn normalise(value: u32, min: u32, max: u32) -> f64 {
    if max <= min {
        return 0.0;
    }
    (value.saturating_sub(min)) as f64 / (max - min) as f64
}

pub fn cell_color(value: u32, min: u32, max: u32) -> Color {
    let (r, g, b) = plasma(normalise(value, min, max));
    Color::Rgb(r, g, b)
}

fn cell_width(area: Rect, months: usize) -> usize {
    let usable = (area.width as usize).saturating_sub(LABEL_WIDTH + 2);
    (usable / months.max(1)).clamp(3, 8)
}

fn cell_height(area: Rect, schools: usize) -> usize {
    // Header, colour bar and borders take six lines.
    let usable = (area.height as usize).saturating_sub(6);
    (usable / schools.max(1)).clamp(1, 3)
}

pub fn heatmap_lines(
    matrix: &AbsenceMatrix,
    style: &ChartStyle,
    width: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let (min, max) = (matrix.min_value(), matrix.max_value());
    let mut lines = Vec::with_capacity(matrix.num_schools() * height + 3);

    let mut header = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
    header.extend((0..matrix.num_months()).map(|month| {
        Span::raw(format!("{:^width$}", style.month_label(month), width = width))
    }));
    lines.push(Line::from(header));

    for (school, row) in matrix.rows().iter().enumerate() {
        for repeat in 0..height {
            let label = if repeat == height / 2 {
                style.school_label(school)
            } else {
                String::new()
            };
            let mut spans = vec![Span::raw(format!("{:<width$}", label, width = LABEL_WIDTH))];
            spans.extend(row.iter().map(|&value| {
                Span::styled(" ".repeat(width), Style::default().bg(cell_color(value, min, max)))
            }));
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(""));
    let mut bar = vec![Span::raw(format!("{:<width$}", min, width = LABEL_WIDTH))];
    bar.extend((0..COLOR_BAR_STEPS).map(|step| {
        let (r, g, b) = plasma(step as f64 / (COLOR_BAR_STEPS - 1) as f64);
        Span::styled(" ", Style::default().bg(Color::Rgb(r, g, b)))
    }));
    bar.push(Span::raw(format!(" {}  {}", max, style.value_label)));
    lines.push(Line::from(bar));

    lines
}

pub fn draw(frame: &mut Frame, area: Rect, matrix: &AbsenceMatrix, style: &ChartStyle) {
    let width = cell_width(area, matrix.num_months());
    let height = cell_height(area, matrix.num_schools());
    let paragraph = Paragraph::new(heatmap_lines(matrix, style, width, height)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(style.heatmap_title.as_str())
            .title_bottom(Line::from("Month").centered()),
    );
    frame.render_widget(paragraph, area);
}
