//! Data models for Chorale

mod event;

pub use event::*;
