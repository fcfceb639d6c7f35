use serde::{Deserialize, Serialize};

/// Why a session record was written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// Countdown reached zero
    #[default]
    Finished,
    /// User reset the timer mid-session
    Reset,
}

impl EndReason {
    /// Parse a stored reason, tolerating case differences
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "finished" => Some(Self::Finished),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }

    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::Reset => "reset",
        }
    }
}

/// Foreground state of the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppActivity {
    Active,
    Inactive,
    Background,
}

impl AppActivity {
    /// True for the states that count as leaving the app
    pub fn is_away(&self) -> bool {
        matches!(self, Self::Inactive | Self::Background)
    }
}

/// Reporting window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Weekly,
    Monthly,
}

impl Period {
    /// Number of calendar days covered by the window
    pub fn days(&self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::Monthly => 30,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Weekly => Self::Monthly,
            Self::Monthly => Self::Weekly,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "weekly" | "week" | "7" => Some(Self::Weekly),
            "monthly" | "month" | "30" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// Top-level tab shown in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Timer,
    Tasks,
    Reports,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Timer, Tab::Tasks, Tab::Reports]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Timer => "Timer",
            Tab::Tasks => "Tasks",
            Tab::Reports => "Reports",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Timer => Tab::Tasks,
            Tab::Tasks => Tab::Reports,
            Tab::Reports => Tab::Timer,
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Choosing a task to link before a session starts
    TaskChoice,
    /// Asking whether the linked task is now done
    TaskCompletion,
    AddingTask,
    AddingCategory,
    /// Blocking notice (validation error)
    Notice,
}
