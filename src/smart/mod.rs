//! SMART (Simple Additive Weighting) decision support.
//!
//! The engine is pure: handlers load criteria and alternatives from the
//! store, reshape them into [`Criterion`] and [`Alternative`], and call
//! [`rank`].

pub mod engine;

pub use engine::{rank, Alternative, Criterion, RankedResult};
