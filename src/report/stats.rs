use crate::domain::{day_key, CategoryList, Period, SessionRecord};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::{HashMap, HashSet};

/// Headline totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub today_seconds: u64,
    pub all_time_seconds: u64,
    pub total_distractions: u64,
}

/// One calendar day in a report window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub date_key: String,
    pub label: String,
}

/// Per-day series aligned with the bucket list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailySeries {
    pub minutes: Vec<u64>,
    pub distractions: Vec<u64>,
}

/// Minutes spent in one category inside the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlice {
    pub category: String,
    pub minutes: u64,
}

/// Session list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, record: &SessionRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => record.category == *name,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(name) => name,
        }
    }
}

/// Round seconds to whole minutes (half rounds up)
pub fn seconds_to_minutes(seconds: u64) -> u64 {
    seconds.saturating_add(30) / 60
}

/// Sum that stops at `u64::MAX` instead of overflowing
pub fn saturating_sum(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(0, u64::saturating_add)
}

pub fn compute_totals(records: &[SessionRecord], today: NaiveDate) -> Totals {
    let today_key = day_key(today);

    records.iter().fold(Totals::default(), |mut totals, record| {
        if record.date == today_key {
            totals.today_seconds = totals.today_seconds.saturating_add(record.actual_seconds);
        }
        totals.all_time_seconds = totals.all_time_seconds.saturating_add(record.actual_seconds);
        totals.total_distractions = totals.total_distractions.saturating_add(record.distraction_count);
        totals
    })
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Pzt",
        Weekday::Tue => "Sal",
        Weekday::Wed => "Çar",
        Weekday::Thu => "Per",
        Weekday::Fri => "Cum",
        Weekday::Sat => "Cmt",
        Weekday::Sun => "Paz",
    }
}

/// Consecutive days ending today, oldest first
pub fn build_day_buckets(period: Period, today: NaiveDate) -> Vec<DayBucket> {
    let days = period.days();

    (0..days)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let label = match period {
                Period::Weekly => weekday_label(date.weekday()).to_string(),
                Period::Monthly => date.format("%d.%m").to_string(),
            };
            DayBucket {
                date_key: day_key(date),
                label,
            }
        })
        .collect()
}

pub fn aggregate_by_day(records: &[SessionRecord], buckets: &[DayBucket]) -> DailySeries {
    let mut seconds: HashMap<&str, u64> = HashMap::new();
    let mut distractions: HashMap<&str, u64> = HashMap::new();

    for record in records {
        let day_seconds = seconds.entry(record.date.as_str()).or_default();
        *day_seconds = day_seconds.saturating_add(record.actual_seconds);
        let day_distractions = distractions.entry(record.date.as_str()).or_default();
        *day_distractions = day_distractions.saturating_add(record.distraction_count);
    }

    DailySeries {
        minutes: buckets
            .iter()
            .map(|b| seconds_to_minutes(seconds.get(b.date_key.as_str()).copied().unwrap_or(0)))
            .collect(),
        distractions: buckets
            .iter()
            .map(|b| distractions.get(b.date_key.as_str()).copied().unwrap_or(0))
            .collect(),
    }
}

/// Minutes per known category inside the window, in category order.
/// Record categories match the list case-insensitively, like
/// `CategoryList::contains`. Categories with nothing recorded are left out.
pub fn aggregate_by_category(
    records: &[SessionRecord],
    buckets: &[DayBucket],
    categories: &CategoryList,
) -> Vec<CategorySlice> {
    let window: HashSet<&str> = buckets.iter().map(|b| b.date_key.as_str()).collect();

    let mut seconds: HashMap<&str, u64> = HashMap::new();
    for record in records.iter().filter(|r| window.contains(r.date.as_str())) {
        let Some(name) = categories.canonical(&record.category) else {
            continue;
        };
        let total = seconds.entry(name).or_default();
        *total = total.saturating_add(record.actual_seconds);
    }

    categories
        .names()
        .iter()
        .filter_map(|name| {
            let minutes = seconds_to_minutes(seconds.get(name.as_str()).copied().unwrap_or(0));
            (minutes > 0).then(|| CategorySlice {
                category: name.clone(),
                minutes,
            })
        })
        .collect()
}

/// Sessions matching the filter, newest first
pub fn filter_sessions<'a>(records: &'a [SessionRecord], filter: &CategoryFilter) -> Vec<&'a SessionRecord> {
    records.iter().rev().filter(|r| filter.matches(r)).collect()
}

/// Format seconds as "H sa M dk" or "M dk"
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;

    if hours > 0 {
        format!("{} sa {} dk", hours, minutes)
    } else {
        format!("{} dk", minutes)
    }
}
