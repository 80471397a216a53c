//! dailybrief - client core for a one-task-a-day backend
//!
//! Finds the backend, talks to it with a bounded reconnect policy, and keeps
//! the client-side view of today's brief consistent.
//!
//! # Layers
//!
//! ```text
//! BriefController  ->  RequestClient  ->  ConnectionResolver  ->  Transport
//!  (state machine)     (retry once)       (probe / cache)         (reqwest)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dailybrief::{BriefController, Config, ConnectionResolver, ReqwestTransport, RequestClient};
//!
//! let config = Config::load(None)?;
//! let transport = Arc::new(ReqwestTransport::new(config.request_timeout())?);
//! let resolver = Arc::new(ConnectionResolver::new(config.resolver_settings(), transport.clone())?);
//! let controller = BriefController::new(RequestClient::new(resolver, transport), config.skip_reload_delay());
//! controller.load().await?;
//! controller.mark_done().await?;
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod connection;
pub mod controller;
mod error;
pub mod transport;
pub mod types;

pub use client::{ApiRequest, ConnectionReport, RequestClient};
pub use config::{Config, Mode};
pub use connection::{ConnectionResolver, ConnectionState, ResolverSettings};
pub use controller::{ActionOutcome, ActionState, ActionType, BriefController, ControllerState, Phase};
pub use error::ClientError;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
pub use types::{Brief, BriefResponse, Difficulty, StreakResponse, UserState};
