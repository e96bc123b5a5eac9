//! # mph-engine
//!
//! Rule-based multiple-primary determination for cancer-registry tumor
//! pairs.
//!
//! The engine answers one question: given two reported tumors from the same
//! patient, are they one primary cancer or two? The answer comes from
//! published rule sets organized as ordered yes/no chains, one chain per
//! anatomic group. [`Catalog`] holds every chain; a determination resolves
//! each tumor to its governing group, then walks that group's chain until a
//! rule decides.
//!
//! ## Usage
//!
//! ```rust
//! use mph_engine::Catalog;
//! use mph_types::{MpResult, PartialDate, TumorRecord};
//!
//! let catalog = Catalog::new()?;
//! let first = TumorRecord::builder()
//!     .site("C180")
//!     .histology("8140")
//!     .behavior("3")
//!     .diagnosis_date(PartialDate::new(Some(2015), Some(6), Some(1)))
//!     .build();
//! let second = TumorRecord::builder()
//!     .site("C187")
//!     .histology("8140")
//!     .behavior("3")
//!     .diagnosis_date(PartialDate::new(Some(2015), Some(6), Some(20)))
//!     .build();
//!
//! let output = catalog.determine(&first, &second);
//! println!("{:?}: {}", output.result, output.reason);
//! # Ok::<(), mph_engine::CatalogError>(())
//! ```
//!
//! Determinations never fail: invalid codes, unknown diagnosis years, and
//! unanswerable rule questions all surface as verdicts
//! ([`MpResult::Questionable`] or [`MpResult::NotApplicable`]) with a reason.
//! [`CatalogError`] is a construction-time concern only.
//!
//! [`MpResult::Questionable`]: mph_types::MpResult::Questionable
//! [`MpResult::NotApplicable`]: mph_types::MpResult::NotApplicable

#![warn(missing_docs)]

pub mod dates;
pub mod ranges;

mod catalog;
mod constants;
mod determine;
mod error;
mod group;
mod rule;
mod tables;

pub use determine::Catalog;
pub use error::CatalogError;

// Re-export mph-types for convenience
pub use mph_types;
