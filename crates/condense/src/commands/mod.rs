pub mod analyze;
pub mod auto;
pub mod connection;
pub mod context;
pub mod profile;
pub mod version;
