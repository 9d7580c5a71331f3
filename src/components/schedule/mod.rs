pub mod feed;
pub mod models;
pub mod week;

pub use feed::ScheduleFeed;
pub use models::{Prayer, ScheduleRow};
pub use week::filter_week;
