//! The `taskhub` library crate.
//!
//! This crate contains the core business logic of a multi-tenant task
//! tracking backend: credential hashing, the role model, tenant-scope
//! authorization, task lifecycle rules with per-role field visibility, and
//! organization administration. It is consumed by a request-handling layer
//! that authenticates callers, validates payload shapes and maps the
//! `AppError` outcomes onto HTTP responses; persistence is reached through
//! the store traits in [`store`].
//!
//! All services are stateless: every decision is a pure function of the
//! authenticated [`models::Principal`] and the state fetched from the stores
//! at call time, so the crate needs no internal synchronization.

pub mod access;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

// Re-export the types nearly every consumer needs.
pub use crate::error::AppError;
pub use crate::models::{Principal, Role};
pub use crate::service::{OrganizationService, TaskService, UserService};
