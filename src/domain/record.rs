use super::enums::EndReason;
use crate::persistence::lenient;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calendar-day key shared by stored records and report buckets (YYYY-MM-DD)
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A task linked to a session, with its name captured at link time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLink {
    pub id: String,
    pub name: String,
}

/// One completed or reset focus session. Never modified after it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub id: String,
    /// Local calendar day the session ended on
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub date: String,
    /// RFC 3339 instant the session ended at
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub end_time: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub target_seconds: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub actual_seconds: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub distraction_count: u64,
    #[serde(default, deserialize_with = "lenient::end_reason")]
    pub end_reason: EndReason,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub linked_task_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub linked_task_name: Option<String>,
}

impl SessionRecord {
    /// Build a record ending at `ended_at`. Returns None when no time was
    /// credited, since zero-progress sessions are never stored.
    pub fn new(
        category: &str,
        target_seconds: u64,
        actual_seconds: u64,
        distraction_count: u64,
        end_reason: EndReason,
        link: Option<&TaskLink>,
        ended_at: DateTime<Local>,
    ) -> Option<Self> {
        if actual_seconds == 0 {
            return None;
        }

        Some(Self {
            id: Uuid::new_v4().to_string(),
            date: day_key(ended_at.date_naive()),
            end_time: ended_at.to_rfc3339(),
            category: category.to_string(),
            target_seconds,
            actual_seconds,
            distraction_count,
            end_reason,
            linked_task_id: link.map(|l| l.id.clone()),
            linked_task_name: link.map(|l| l.name.clone()),
        })
    }

    /// Parsed end instant, if the stored value is well formed
    pub fn ended_at(&self) -> Option<DateTime<Local>> {
        DateTime::parse_from_rfc3339(&self.end_time)
            .ok()
            .map(|dt| dt.with_timezone(&Local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_day_key() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(day_key(date), "2024-03-09");
    }

    #[test]
    fn test_new_record_uses_local_day() {
        let link = TaskLink {
            id: "t1".to_string(),
            name: "Write report".to_string(),
        };
        let record = SessionRecord::new(
            "Kodlama",
            1500,
            1500,
            1,
            EndReason::Finished,
            Some(&link),
            at(2024, 5, 1, 23),
        )
        .unwrap();

        assert_eq!(record.date, "2024-05-01");
        assert_eq!(record.linked_task_id.as_deref(), Some("t1"));
        assert_eq!(record.linked_task_name.as_deref(), Some("Write report"));
        assert_eq!(record.ended_at(), Some(at(2024, 5, 1, 23)));
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_zero_progress_is_not_a_record() {
        let record = SessionRecord::new("Proje", 1500, 0, 0, EndReason::Reset, None, at(2024, 5, 1, 9));
        assert!(record.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let record = SessionRecord::new("Proje", 600, 300, 2, EndReason::Reset, None, at(2024, 5, 1, 9)).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["targetSeconds"], 600);
        assert_eq!(json["actualSeconds"], 300);
        assert_eq!(json["distractionCount"], 2);
        assert_eq!(json["endReason"], "reset");
        assert!(json.get("linkedTaskId").is_none());
    }

    #[test]
    fn test_legacy_record_defaults_to_zero() {
        let json = r#"{"date": "2024-05-01", "category": "Kodlama", "actualSeconds": "90", "distractionCount": null}"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.actual_seconds, 90);
        assert_eq!(record.distraction_count, 0);
        assert_eq!(record.target_seconds, 0);
        assert_eq!(record.end_reason, EndReason::Finished);
        assert_eq!(record.linked_task_id, None);
        assert_eq!(record.ended_at(), None);
    }
}
