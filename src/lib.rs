#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the stashgate application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod handlers;
pub mod session;
pub mod settings;
pub mod token;
pub mod upstream;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use session::{SessionError, SessionManager};
pub use settings::StashgateSettings;
pub use token::{Claims, TokenCodec, TokenError};
pub use upstream::{StashClient, UpstreamError};
