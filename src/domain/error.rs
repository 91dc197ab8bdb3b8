//! Domain errors

use thiserror::Error;

/// Domain-level error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// No tariff plan is registered under the requested name.
    ///
    /// Callers must decide whether to skip, default, or abort the
    /// surrounding batch; the catalog never substitutes a default plan.
    #[error("Tariff plan not found: {name}")]
    PlanNotFound { name: String },

    /// A plan definition violates the tier invariants. Raised at
    /// construction/registration time, never during rating.
    #[error("Invalid tariff plan: {0}")]
    InvalidPlan(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
