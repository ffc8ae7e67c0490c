mod detect;
mod list;
mod source;

pub use detect::{detect_slow_tasks, slow_tasks};
pub use list::{list_tasks, parse_tasks};
pub use source::TaskSource;
