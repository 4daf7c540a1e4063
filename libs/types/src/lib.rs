//! Types library for the cardiovascular risk engine
//!
//! This library provides the core type definitions shared by the risk engine
//! and the gateway, so that the feature layout handed to the classifier is
//! defined in exactly one place.
//!
//! # Modules
//! - `ids`: Session identifiers
//! - `vitals`: Patient vital signs, their domains and single-field edits
//! - `features`: The fixed-order classifier feature vector
//! - `assessment`: Risk assessment output, risk bands and radar profile
//! - `errors`: Error taxonomy

pub mod ids;
pub mod vitals;
pub mod features;
pub mod assessment;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::vitals::*;
    pub use crate::features::*;
    pub use crate::assessment::*;
    pub use crate::errors::*;
}
