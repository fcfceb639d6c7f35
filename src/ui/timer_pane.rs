use crate::app::AppState;
use crate::domain::Phase;
use crate::ui::styles::{
    border_style, default_style, gauge_style, idle_style, paused_style, running_style,
    selected_style, tag_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Format seconds as "MM:SS"
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn phase_label(phase: Phase) -> (&'static str, Style) {
    match phase {
        Phase::Idle => ("Ready", idle_style()),
        Phase::Running => ("Focusing", running_style()),
        Phase::Paused => ("Paused", paused_style()),
        Phase::Finished => ("Done!", running_style()),
    }
}

/// Render the timer screen
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Focus ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Clock
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Min(0), // Details
        ])
        .split(inner);

    let engine = &app.engine;
    let (label, style) = phase_label(engine.phase());

    let clock = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(format_clock(engine.remaining_time), style)),
        Line::from(Span::styled(label, style)),
    ])
    .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(clock, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(engine.progress_ratio().clamp(0.0, 1.0))
        .label(format!(
            "{} / {}",
            format_clock(engine.elapsed_seconds()),
            format_clock(engine.session_duration)
        ));
    f.render_widget(gauge, chunks[1]);

    let mut lines = Vec::new();

    // Category chooser
    let mut category_spans = vec![Span::styled("Category: ", title_style())];
    for (idx, name) in app.categories.names().iter().enumerate() {
        let selected = engine.selected_category.as_deref() == Some(name.as_str());
        let text = format!(" {} {} ", idx + 1, name);
        category_spans.push(if selected {
            Span::styled(text, selected_style())
        } else {
            Span::styled(text, tag_style())
        });
    }
    lines.push(Line::from(category_spans));
    lines.push(Line::raw(""));

    lines.push(Line::from(vec![
        Span::styled("Duration: ", title_style()),
        Span::styled(format!("{} min", engine.session_duration / 60), default_style()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Distractions: ", title_style()),
        Span::styled(engine.distraction_count.to_string(), default_style()),
    ]));
    if let Some(task) = &engine.selected_task {
        lines.push(Line::from(vec![
            Span::styled("Task: ", title_style()),
            Span::styled(task.name.clone(), default_style()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), chunks[3]);
}
