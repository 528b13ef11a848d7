//! Repository layer
//!
//! Repositories wrap the typed HTTP clients and reduce every failure to an
//! absent value (`None` / `false`), logging the diagnostic body on the way.
//! The workflow above them only decides whether to continue.
//!
//! All repositories are trait-based to enable testing and mocking.

mod control_plane;
mod provider;

// Re-export traits
pub use control_plane::ControlPlaneRepository;
pub use provider::ProviderRepository;

// Re-export implementations
pub use control_plane::HttpControlPlaneRepository;
pub use provider::HttpProviderRepository;

#[cfg(test)]
pub use control_plane::MockControlPlaneRepository;
#[cfg(test)]
pub use provider::MockProviderRepository;
