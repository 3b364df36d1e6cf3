//! Client for the remote video-synthesis service.
//!
//! This crate wraps the service's asynchronous job API: submit a generation
//! request, poll the job until it settles, download the finished bytes. The
//! pipeline depends on the [`GenerationService`] trait rather than the HTTP
//! implementation so tests can drive it with in-process stubs.
//!
//! Credentials are an external concern: callers supply a [`TokenProvider`]
//! and this crate only attaches whatever bearer token it hands out.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod service;

pub use auth::{StaticToken, TokenProvider};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::VideoApiClient;
pub use service::{GenerationService, Submission};
