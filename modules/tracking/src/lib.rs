//! Work-session tracking module: users registered by passport number and the
//! tasks (work sessions) they accumulate.
//!
//! Layered like every module in this workspace:
//! - `domain` — services, models and ports; no HTTP or SQL types leak in.
//! - `infra` — adapters: Postgres repositories, in-memory repositories, and
//!   the outbound people-directory HTTP client.
//! - `api::rest` — axum handlers, DTOs, validation and the router.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
