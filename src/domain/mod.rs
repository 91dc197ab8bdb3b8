pub mod error;
pub mod tariff;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use tariff::{OverageBreakdown, TariffCatalog, TariffPlan, Tier};
