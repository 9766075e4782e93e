//! Thin client for the Meevo public API.
//!
//! All reads the cancellation flow performs (client directory pages, client
//! detail, booked services) plus the two hard calls (token exchange and the
//! final cancellation) go through [`client::MeevoClient`]. Read endpoints are
//! called with short per-request timeouts so a slow page can be absorbed by
//! the caller instead of stalling a whole scan.

pub mod client;
pub mod models;

pub use client::{MeevoClient, MeevoError};
pub use models::{BookedService, ClientDetail, ClientRecord, TokenResponse};
