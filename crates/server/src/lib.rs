//! Lost & Found Server - HTTP REST API for the campus lost & found service
//!
//! This crate exposes the `lostfound` use cases over HTTP:
//!
//! - **Lost items**: students file reports with two private verification secrets
//! - **Found items**: staff log recovered items and move them through
//!   `available` / `claimed` / `returned`
//! - **Matching**: rank available found items against a report
//! - **Claims**: auto-verify ownership when both secrets match
//! - **Health & Metrics**: liveness/readiness probes and Prometheus metrics
//!
//! # Features
//!
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging, timeouts
//! - **Configuration**: `server.{toml,yaml,json}` plus `LOSTFOUND_SERVER__*` environment variables
//! - **Error Handling**: JSON error bodies `{"error": {"code", "message"}}`
//! - **Graceful Shutdown**: SIGTERM and Ctrl+C
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe with store counts
//! - `GET /metrics` - Prometheus metrics
//! - `POST /api/v1/lost-items` - File a lost-item report
//! - `GET /api/v1/lost-items` - All reports, newest first
//! - `GET /api/v1/lost-items/user/{user_id}` - One student's reports
//! - `GET /api/v1/lost-items/{id}/matches` - Ranked matches (`?limit=`, `?explain=`)
//! - `POST /api/v1/found-items` - Log a found item
//! - `GET /api/v1/found-items` - Available found items
//! - `GET /api/v1/found-items/{id}` - One found item
//! - `PUT /api/v1/found-items/{id}/status` - Change a found item's status
//! - `GET /api/v1/found-items/{id}/claims` - Claims against a found item
//! - `POST /api/v1/claims` - Submit an ownership claim
//!
//! Secrets and verification inputs are accepted on input and never appear
//! in any response.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
