pub mod adapters;
pub mod core;
pub mod error;
pub mod response;
