mod api;
mod status;

pub use api::api_routes;
pub use status::status_routes;
