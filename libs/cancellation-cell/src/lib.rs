//! # Cancellation Cell
//!
//! Lets a voice-assistant caller cancel their next salon appointment through
//! the Meevo booking API. The caller is located by phone or email via a
//! paginated directory scan, appointments booked under linked minor/guest
//! profiles are folded in, and the soonest non-cancelled upcoming service is
//! cancelled.
//!
//! ```text
//! +---------------------------------------------------------+
//! |                    Cancellation Cell                    |
//! +---------------------------------------------------------+
//! |  handlers.rs     |  POST /cancel, GET /health           |
//! |  router.rs       |  Route definitions                   |
//! |  models.rs       |  DTOs & cell error enum              |
//! |  state.rs        |  Shared state (config, client, token)|
//! |  services/       |  Resolution logic                    |
//! |    token.rs      |  Bearer token slot with expiry margin|
//! |    directory.rs  |  Client search & linked profiles     |
//! |    appointments.rs| Booked-service fetch & filtering    |
//! |    cancellation.rs| Orchestration of the cancel flow    |
//! +---------------------------------------------------------+
//! ```
//!
//! The `/cancel` endpoint always answers HTTP 200; the outcome lives in the
//! body's `success` flag so voice platforms can branch on it directly.

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;

pub use models::{CancelRequest, CancelResponse, CancellationError};
pub use router::cancellation_routes;
pub use state::AppState;
