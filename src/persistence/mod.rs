pub mod collections;
pub mod files;
pub mod lenient;
pub mod settings;
pub mod store;

pub use collections::{Collection, CATEGORIES, SESSIONS, TASKS};
pub use files::{
    atomic_write, ensure_data_dir, get_data_dir, init_local_dir, log_file, read_file, report_file,
    settings_file,
};
pub use settings::{load_settings, save_settings, Settings};
pub use store::{FileStore, KeyValueStore};
#[cfg(test)]
pub use store::MemoryStore;
