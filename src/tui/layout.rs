use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Search dialog regions, top to bottom: query box, category toggles, results beside a
/// preview pane, status bar
pub struct AppLayout {
    pub input_area: Rect,
    pub toggles_area: Rect,
    pub results_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Bordered query input
                Constraint::Length(1), // Category toggles
                Constraint::Min(3),    // Results and preview
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[2]);

        Self {
            input_area: rows[0],
            toggles_area: rows[1],
            results_area: columns[0],
            preview_area: columns[1],
            status_area: rows[3],
        }
    }
}
