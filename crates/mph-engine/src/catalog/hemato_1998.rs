//! Hematopoietic rules for diagnoses through 2000.
//!
//! The 1998 revision is a lookup, not a chain: a single table pairs the
//! histology of the earlier diagnosis with the histology ranges that count
//! as the same primary when diagnosed later.

use std::sync::Arc;

use crate::dates::{self, DxOrder};
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{Rule, RuleOutcome, RuleVerdict};
use crate::tables::HematoTables;

use super::MISSING_DATE_ORDER_DETAIL;

pub(super) fn build(tables: Arc<HematoTables>) -> Result<RuleGroup, CatalogError> {
    let rule = Rule::new(
        "M1",
        "Does the histology pair, ordered by diagnosis date, appear in the \
         single versus subsequent primaries table?",
        "The 1998 hematopoietic single versus subsequent primaries table \
         decides whether the histology pair is a single primary.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let single = match dates::compare_diagnosis_dates(
                first.diagnosis_date,
                second.diagnosis_date,
            ) {
                DxOrder::Indeterminate => {
                    return RuleOutcome::Indeterminate(MISSING_DATE_ORDER_DETAIL.to_string())
                }
                DxOrder::FirstLater => tables.single_primary_1998(h2, h1),
                DxOrder::SecondLater => tables.single_primary_1998(h1, h2),
                DxOrder::Same => {
                    tables.single_primary_1998(h1, h2) || tables.single_primary_1998(h2, h1)
                }
            };
            if single {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            }
        },
    );
    RuleGroup::new(
        "hematopoietic-1998",
        "Hematopoietic",
        GroupScope {
            site_inclusion: Some("C000-C809"),
            histology_inclusion: Some(crate::constants::HEMATO),
            behavior_inclusion: "2-3,6",
            year_inclusion: "0000-2000",
            ..Default::default()
        },
        vec![rule],
    )
}
