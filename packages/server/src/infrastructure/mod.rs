//! Infrastructure layer: adapters for domain ports and transport DTOs.

pub mod auth;
pub mod dto;
pub mod space;

pub use auth::JwtTokenVerifier;
pub use space::InMemorySpaceDirectory;
