use ratatui::style::Color;

use crate::models::MONTH_NAMES;

/// Labels, palette and titles for both chart kinds.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub month_labels: Vec<String>,
    pub colors: Vec<Color>,
    pub markers: Vec<char>,
    pub scatter_title: String,
    pub heatmap_title: String,
    pub value_label: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            month_labels: MONTH_NAMES.iter().map(|m| m[..3].to_string()).collect(),
            colors: vec![
                Color::Blue,
                Color::Rgb(255, 165, 0),
                Color::Green,
                Color::Red,
                Color::Rgb(128, 0, 128),
                Color::Rgb(139, 69, 19),
                Color::Rgb(255, 105, 180),
                Color::Gray,
                Color::Rgb(128, 128, 0),
                Color::Cyan,
            ],
            markers: vec!['o', 's', '^', 'D', 'v', 'P', 'H', 'X', '*', '>'],
            scatter_title: "Scatter Plot of Pupil Absences Across Schools Over 12 Months".into(),
            heatmap_title: "Heatmap of Pupil Absences Across Schools Over 12 Months".into(),
            value_label: "Number of Absences".into(),
        }
    }
}

impl ChartStyle {
    pub fn school_label(&self, school: usize) -> String {
        format!("School {}", school + 1)
    }

    pub fn month_label(&self, month: usize) -> String {
        self.month_labels
            .get(month)
            .cloned()
            .unwrap_or_else(|| (month + 1).to_string())
    }

    /// Colours and markers cycle when there are more schools than entries.
    pub fn color(&self, school: usize) -> Color {
        self.colors[school % self.colors.len()]
    }

    pub fn marker(&self, school: usize) -> char {
        self.markers[school % self.markers.len()]
    }
}
