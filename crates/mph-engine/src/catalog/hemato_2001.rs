//! Hematopoietic rules for diagnoses from 2001 through 2009.
//!
//! The 2001 revision maps each histology to a disease group and pairs the
//! groups: an ordered group pair listed in the pair table stays one primary,
//! anything else is a new primary.

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
        "Do the disease groups of the two histologies, ordered by diagnosis \
         date, appear in the single versus multiple primaries group pair \
         table?",
        "The 2001 hematopoietic disease-group pair table decides whether the \
         histology pair is a single primary.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            // A histology outside every disease group cannot pair up.
            let (g1, g2) = match (tables.group_2001(h1), tables.group_2001(h2)) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::Matched(RuleVerdict::MultiplePrimaries),
            };
            let single = match dates::compare_diagnosis_dates(
                first.diagnosis_date,
                second.diagnosis_date,
            ) {
                DxOrder::Indeterminate => {
                    return RuleOutcome::Indeterminate(MISSING_DATE_ORDER_DETAIL.to_string())
                }
                DxOrder::FirstLater => tables.single_primary_2001(g2, g1),
                DxOrder::SecondLater => tables.single_primary_2001(g1, g2),
                DxOrder::Same => {
                    tables.single_primary_2001(g1, g2) || tables.single_primary_2001(g2, g1)
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
        "hematopoietic-2001",
        "Hematopoietic",
        GroupScope {
            site_inclusion: Some("C000-C809"),
            histology_inclusion: Some(crate::constants::HEMATO),
            behavior_inclusion: "2-3,6",
            year_inclusion: "2001-2009",
            ..Default::default()
        },
        vec![rule],
    )
}

#[cfg(test)]
mod tests {
    use crate::Catalog;
    use mph_types::{MpResult, PartialDate, TumorRecord};

    fn tumor(hist: &str, year: u16, month: u8) -> TumorRecord {
        TumorRecord::builder()
            .site("C779")
            .histology(hist)
            .behavior("3")
            .diagnosis_date(PartialDate::new(Some(year), Some(month), Some(4)))
            .build()
    }

    #[test]
    fn test_same_group_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(&tumor("9670", 2004, 2), &tumor("9690", 2006, 7));
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.group_id.as_deref(), Some("hematopoietic-2001"));
        assert_eq!(out.applied_rules, vec!["M1"]);
    }

    #[test]
    fn test_lymphoma_nos_after_b_cell_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(&tumor("9680", 2004, 2), &tumor("9590", 2006, 7));
        assert_eq!(out.result, MpResult::SinglePrimary);
    }

    #[test]
    fn test_unpaired_groups_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(&tumor("9650", 2004, 2), &tumor("9700", 2006, 7));
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.applied_rules, vec!["M1"]);
    }

    #[test]
    fn test_ungrouped_histology_multiple() {
        let catalog = Catalog::new().unwrap();
        // 9970 falls outside every disease-group range
        let out = catalog.determine(&tumor("9727", 2004, 2), &tumor("9970", 2006, 7));
        assert_eq!(out.result, MpResult::MultiplePrimaries);
    }

    #[test]
    fn test_order_unknown_questionable() {
        let catalog = Catalog::new().unwrap();
        let a = TumorRecord::builder()
            .site("C779")
            .histology("9670")
            .behavior("3")
            .diagnosis_date(PartialDate::new(Some(2004), None, None))
            .build();
        let b = TumorRecord::builder()
            .site("C779")
            .histology("9690")
            .behavior("3")
            .diagnosis_date(PartialDate::new(Some(2004), None, None))
            .build();
        let out = catalog.determine(&a, &b);
        assert_eq!(out.result, MpResult::Questionable);
        assert!(out.reason.contains("M1"));
    }
}
