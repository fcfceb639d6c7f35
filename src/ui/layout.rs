use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub tabs_area: Rect,
    pub body_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Tab header (3 rows)
/// - Body: the active screen
pub fn create_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Active screen
        ])
        .split(area);

    MainLayout {
        keybindings_area: chunks[0],
        tabs_area: chunks[1],
        body_area: chunks[2],
    }
}

/// Reports screen: totals row, then charts beside the category breakdown, then sessions
pub struct ReportLayout {
    pub totals_area: Rect,
    pub minutes_area: Rect,
    pub distractions_area: Rect,
    pub categories_area: Rect,
    pub sessions_area: Rect,
}

pub fn create_report_layout(area: Rect) -> ReportLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Totals
            Constraint::Percentage(60), // Charts + categories
            Constraint::Min(0),         // Session list
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Charts
            Constraint::Percentage(30), // Categories
        ])
        .split(vertical[1]);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(middle[0]);

    ReportLayout {
        totals_area: vertical[0],
        minutes_area: charts[0],
        distractions_area: charts[1],
        categories_area: middle[1],
        sessions_area: vertical[2],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(16),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
