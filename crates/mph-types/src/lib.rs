//! # mph-types
//!
//! Type definitions for cancer-registry multiple-primary determination.
//!
//! This crate provides the input and output data model shared by the
//! determination engine and its callers: reported tumor records, partially
//! known diagnosis dates, coded-value enums, and the determination output.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use mph_types::{Laterality, PartialDate, TumorRecord};
//!
//! let tumor = TumorRecord::builder()
//!     .site("C649")
//!     .histology("8312")
//!     .behavior("3")
//!     .laterality(Laterality::Right)
//!     .diagnosis_date(PartialDate::new(Some(2016), Some(2), Some(11)))
//!     .build();
//!
//! assert_eq!(tumor.site_number(), Some(649));
//! ```
//!
//! ## Without Serde
//!
//! To use this crate without serde (zero dependencies):
//!
//! ```toml
//! [dependencies]
//! mph-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod date;
mod enums;
mod output;
mod record;

// Re-export all public types at crate root
pub use date::PartialDate;
pub use enums::{Behavior, Laterality, MpResult};
pub use output::{ComputeOptions, DeterminationOutput, HistologyMatching};
pub use record::{TumorRecord, TumorRecordBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let _date = PartialDate::UNKNOWN;
        let _behavior = Behavior::Malignant;
        let _laterality = Laterality::Left;
        let _result = MpResult::SinglePrimary;
        let _options = ComputeOptions::default();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_record_serde_roundtrip() {
        let tumor = TumorRecord::builder()
            .site("C182")
            .histology("8140")
            .behavior("3")
            .diagnosis_date(PartialDate::new(Some(2012), None, None))
            .build();

        let json = serde_json::to_string(&tumor).unwrap();
        let parsed: TumorRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(tumor, parsed);
    }
}
