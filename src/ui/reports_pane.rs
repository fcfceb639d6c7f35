use crate::app::AppState;
use crate::domain::Period;
use crate::report::{format_duration, saturating_sum, Report};
use crate::ui::layout::create_report_layout;
use crate::ui::styles::{
    bar_style, border_style, default_style, distraction_bar_style, tag_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn titled_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()))
}

/// Bar width that fits the bucket count into the available width
fn bar_width(area: Rect, buckets: usize) -> u16 {
    if buckets == 0 {
        return 1;
    }
    let usable = area.width.saturating_sub(2) as usize;
    ((usable / buckets).saturating_sub(1)).clamp(1, 5) as u16
}

/// Render the reports screen
pub fn render_reports_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let report = app.report();
    let layout = create_report_layout(area);

    render_totals(f, &report, layout.totals_area);

    let labels: Vec<String> = report
        .buckets
        .iter()
        .map(|b| match report.period {
            Period::Weekly => b.label.clone(),
            // Day of month only, to fit 30 bars
            Period::Monthly => b.label.chars().take(2).collect(),
        })
        .collect();
    let width = bar_width(layout.minutes_area, labels.len());

    let minutes: Vec<(&str, u64)> = labels
        .iter()
        .map(String::as_str)
        .zip(report.daily.minutes.iter().copied())
        .collect();
    let minutes_chart = BarChart::default()
        .block(titled_block(format!(" Minutes per day ({}) ", report.period.name())))
        .data(minutes.as_slice())
        .bar_width(width)
        .bar_gap(1)
        .bar_style(bar_style())
        .value_style(default_style());
    f.render_widget(minutes_chart, layout.minutes_area);

    let distractions: Vec<(&str, u64)> = labels
        .iter()
        .map(String::as_str)
        .zip(report.daily.distractions.iter().copied())
        .collect();
    let distraction_chart = BarChart::default()
        .block(titled_block(" Distractions ".to_string()))
        .data(distractions.as_slice())
        .bar_width(width)
        .bar_gap(1)
        .bar_style(distraction_bar_style())
        .value_style(default_style());
    f.render_widget(distraction_chart, layout.distractions_area);

    render_categories(f, &report, layout.categories_area);
    render_sessions(f, app, &report, layout.sessions_area);
}

fn render_totals(f: &mut Frame, report: &Report, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Today: ", title_style()),
        Span::raw(format!("{}   ", format_duration(report.totals.today_seconds))),
        Span::styled("All time: ", title_style()),
        Span::raw(format!("{}   ", format_duration(report.totals.all_time_seconds))),
        Span::styled("Distractions: ", title_style()),
        Span::raw(report.totals.total_distractions.to_string()),
    ]);
    f.render_widget(Paragraph::new(line).block(titled_block(" Totals ".to_string())), area);
}

fn render_categories(f: &mut Frame, report: &Report, area: Rect) {
    let total = saturating_sum(report.categories.iter().map(|s| s.minutes));

    let items: Vec<ListItem> = if report.categories.is_empty() {
        vec![ListItem::new(Line::styled("No focus time yet", border_style()))]
    } else {
        report
            .categories
            .iter()
            .map(|slice| {
                let pct = slice.minutes as f64 / total as f64 * 100.0;
                ListItem::new(Line::from(vec![
                    Span::styled(slice.category.clone(), tag_style()),
                    Span::raw(format!("  {} dk ({:.0}%)", slice.minutes, pct)),
                ]))
            })
            .collect()
    };

    f.render_widget(List::new(items).block(titled_block(" Categories ".to_string())), area);
}

fn render_sessions(f: &mut Frame, app: &AppState, report: &Report, area: Rect) {
    let items: Vec<ListItem> = report
        .sessions
        .iter()
        .map(|record| {
            let task = record
                .linked_task_name
                .as_deref()
                .map(|name| format!(" → {}", name))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}  ", record.date), border_style()),
                Span::styled(record.category.clone(), tag_style()),
                Span::raw(format!(
                    "{}  {} / {}  {}  {} distractions",
                    task,
                    format_duration(record.actual_seconds),
                    format_duration(record.target_seconds),
                    record.end_reason.to_tag(),
                    record.distraction_count
                )),
            ]))
        })
        .collect();

    let title = format!(
        " Sessions: {} ({}) ",
        app.report_view.category_filter.name(),
        report.sessions.len()
    );
    f.render_widget(List::new(items).block(titled_block(title)), area);
}
