//! CitiWatch gateway: edge authorization gate plus the thin pass-through API
//! layer in front of the remote CitiWatch backend.

pub mod clients;
pub mod config;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod rest_api;
pub mod session;
