//! View models for the terminal front-end

pub mod admin;
pub mod events;

pub use events::Listing;
