pub mod category;
pub mod enums;
pub mod error;
pub mod record;
pub mod session;
pub mod task;

pub use category::CategoryList;
pub use enums::{AppActivity, EndReason, Period, Tab, UiMode};
pub use error::ValidationError;
pub use record::{day_key, SessionRecord, TaskLink};
pub use session::{transition, Context, Effect, Phase, SessionEngineState, SessionEvent};
pub use task::{active_tasks, done_tasks, find_task_mut, Task};
