// libs/cancellation-cell/src/services/mod.rs

pub mod appointments;
pub mod cancellation;
pub mod directory;
pub mod token;

pub use appointments::AppointmentService;
pub use cancellation::CancellationService;
pub use directory::ClientDirectoryService;
pub use token::TokenCache;
