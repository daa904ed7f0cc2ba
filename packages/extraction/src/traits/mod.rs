//! Core trait abstractions for the extraction library.
//!
//! These traits define the seams applications plug engines and browser
//! backends into.

pub mod browser;
pub mod engine;
