//! Shared utilities

pub mod responses;

pub use responses::ResponseBuilder;
