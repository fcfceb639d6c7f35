use super::stats::{
    aggregate_by_category, aggregate_by_day, build_day_buckets, compute_totals, filter_sessions,
    CategoryFilter, CategorySlice, DailySeries, DayBucket, Totals,
};
use crate::domain::{CategoryList, Period, SessionRecord};
use chrono::NaiveDate;

/// Everything the reports screen shows, derived from the full log
#[derive(Debug, Clone)]
pub struct Report {
    pub period: Period,
    pub totals: Totals,
    pub buckets: Vec<DayBucket>,
    pub daily: DailySeries,
    pub categories: Vec<CategorySlice>,
    pub sessions: Vec<SessionRecord>,
}

/// Period and filter selection for the reports screen
#[derive(Debug, Clone, Default)]
pub struct ReportView {
    pub period: Period,
    pub category_filter: CategoryFilter,
}

impl ReportView {
    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
    }

    /// Step the filter through All, then each category, then back to All
    pub fn cycle_category_filter(&mut self, categories: &CategoryList) {
        let names = categories.names();
        let next = match &self.category_filter {
            CategoryFilter::All => names.first().cloned(),
            CategoryFilter::Only(current) => names
                .iter()
                .position(|n| n == current)
                .and_then(|idx| names.get(idx + 1))
                .cloned(),
        };
        self.category_filter = next.map(CategoryFilter::Only).unwrap_or_default();
    }

    pub fn build(&self, records: &[SessionRecord], categories: &CategoryList, today: NaiveDate) -> Report {
        let buckets = build_day_buckets(self.period, today);
        let daily = aggregate_by_day(records, &buckets);
        let slices = aggregate_by_category(records, &buckets, categories);

        Report {
            period: self.period,
            totals: compute_totals(records, today),
            buckets,
            daily,
            categories: slices,
            sessions: filter_sessions(records, &self.category_filter)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
