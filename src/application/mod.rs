//! Application layer: use cases built on the tariff domain.

pub mod services;

pub use services::{RatingService, UsageQuote};
