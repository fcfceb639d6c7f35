use crate::domain::{CategoryList, Period};
use crate::persistence::{atomic_write, report_file, KeyValueStore, CATEGORIES, SESSIONS};
use crate::report::stats::{format_duration, saturating_sum};
use crate::report::view::{Report, ReportView};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Sessions listed in the "Recent Sessions" section
const RECENT_SESSION_LIMIT: usize = 10;

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Render a report as markdown
pub fn render_report(report: &Report, date: NaiveDate) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Focus Report - {} ({})\n\n", date, report.period.name()));

    // Summary
    out.push_str("## Summary\n\n");
    out.push_str(&format!("- **Today:** {}\n", format_duration(report.totals.today_seconds)));
    out.push_str(&format!("- **All Time:** {}\n", format_duration(report.totals.all_time_seconds)));
    out.push_str(&format!("- **Distractions:** {}\n", report.totals.total_distractions));

    let window_minutes = saturating_sum(report.daily.minutes.iter().copied());
    let window_distractions = saturating_sum(report.daily.distractions.iter().copied());
    out.push_str(&format!(
        "- **This {}:** {} minutes, {} distractions\n\n",
        match report.period {
            Period::Weekly => "week",
            Period::Monthly => "month",
        },
        window_minutes,
        window_distractions
    ));

    // Per-day table
    out.push_str("## Daily Focus\n\n");
    out.push_str("| Day | Date | Minutes | Distractions |\n");
    out.push_str("|-----|------|---------|--------------|\n");
    for (idx, bucket) in report.buckets.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            bucket.label,
            bucket.date_key,
            report.daily.minutes.get(idx).copied().unwrap_or(0),
            report.daily.distractions.get(idx).copied().unwrap_or(0)
        ));
    }
    out.push('\n');

    // Category breakdown
    if !report.categories.is_empty() {
        out.push_str("## Categories\n\n");
        let total = saturating_sum(report.categories.iter().map(|s| s.minutes));
        for slice in &report.categories {
            let pct = if total > 0 {
                slice.minutes as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            out.push_str(&format!(
                "- **{}:** {} min ({})\n",
                slice.category,
                slice.minutes,
                format_percent(pct)
            ));
        }
        out.push('\n');
    }

    // Recent sessions
    if !report.sessions.is_empty() {
        out.push_str("## Recent Sessions\n\n");
        for record in report.sessions.iter().take(RECENT_SESSION_LIMIT) {
            let task = record
                .linked_task_name
                .as_deref()
                .map(|name| format!(" → {}", name))
                .unwrap_or_default();
            out.push_str(&format!(
                "- {} **{}**{}: {} / {} ({}, {} distractions)\n",
                record.date,
                record.category,
                task,
                format_duration(record.actual_seconds),
                format_duration(record.target_seconds),
                record.end_reason.to_tag(),
                record.distraction_count
            ));
        }
        out.push('\n');
    }

    out
}

/// Generate a report from the store and write it to disk
pub fn generate_report(
    store: &dyn KeyValueStore,
    period: Period,
    date: Option<NaiveDate>,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let report_date = date.unwrap_or_else(|| Local::now().date_naive());

    let records = SESSIONS.load(store)?;
    let categories = CategoryList::from_stored(CATEGORIES.load(store)?);

    let view = ReportView {
        period,
        ..ReportView::default()
    };
    let report = view.build(&records, &categories, report_date);
    let content = render_report(&report, report_date);

    let output = match output_path {
        Some(path) => path,
        None => report_file(report_date)?,
    };
    atomic_write(&output, &content)?;

    log::info!("Wrote {} report to {}", period.name(), output.display());
    Ok(output)
}
