//! Common value types used across the application.

pub mod money;
pub mod percentage;

pub use money::Money;
pub use percentage::Percentage;
