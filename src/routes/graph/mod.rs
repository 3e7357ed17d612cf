mod handlers;
mod types;

pub use handlers::{build_graph, default_view, update, update_form};
pub use types::{GraphParams, GraphPayload, GraphRequest, GraphView, SensorStat};

// Re-export utoipa path struct for OpenAPI documentation
pub use handlers::__path_update;
