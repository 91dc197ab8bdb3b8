pub mod rating;

pub use rating::{RatingService, UsageQuote};
