//! HTTP API handlers for artdrawer-discovery

pub mod collection;
pub mod compare;
pub mod connectivity;
pub mod discovery;
pub mod health;
pub mod session;

pub use collection::collection_routes;
pub use compare::compare_routes;
pub use connectivity::connectivity_routes;
pub use discovery::discovery_routes;
pub use health::health_routes;
pub use session::session_routes;
