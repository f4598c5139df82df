//! # etalage-storefront
//!
//! The storefront session: configuration, catalog selection, the commands a
//! shopper can run, and the views they see.
//!
//! ## Module Organization
//!
//! - [`config`] - Environment-based configuration
//! - [`error`] - `ApiError` reported to the shopper
//! - [`state`] - Cart state and catalog selection
//! - [`commands`] - Cart and product commands, input parser
//! - [`view`] - Cart, product and checkout views
//! - [`session`] - Line-based session loop

pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod view;

pub use config::{ConfigError, StorefrontConfig};
pub use error::{ApiError, ErrorCode};
pub use session::{Outcome, Session};
pub use state::{CartState, StorefrontCatalog};
