mod state;
pub mod time;

pub use state::AppState;
pub use time::TimeWindow;
