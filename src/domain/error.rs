use thiserror::Error;

/// User-facing validation failures. The rejected command leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Select a category before starting a session")]
    NoCategory,

    #[error("Stop the timer before changing the duration")]
    DurationLocked,

    #[error("Session length must stay between {min} and {max} minutes")]
    DurationOutOfRange { min: u32, max: u32 },

    #[error("Duration changes must be multiples of {0} minutes")]
    InvalidStep(i32),

    #[error("Cannot change the session setup while the timer is running")]
    SessionActive,

    #[error("Category name cannot be empty")]
    EmptyCategory,

    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    #[error("Task name cannot be empty")]
    EmptyTaskName,
}
