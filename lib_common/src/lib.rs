// Declare the modules to re-export
#[cfg(feature = "samples")]
pub mod samples;
#[cfg(feature = "service")]
pub mod service;

// Re-export everything
#[cfg(feature = "samples")]
pub use samples::dataset::*;
#[cfg(feature = "service")]
pub use service::routes::*;
#[cfg(feature = "service")]
pub use service::state::*;
