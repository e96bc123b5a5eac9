//! Urinary tract rules, 2007 revision.

use crate::constants::Charts;
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::ranges::{CodeKind, RangeSet};
use crate::rule::{
    histology_triplet_rule, invasive_after_in_situ_rule, no_criteria_rule, topography_code_rule,
    years_apart_rule, Rule, RuleOutcome, RuleVerdict,
};

use super::paired_organ_rule;

pub(super) fn build(charts: &'static Charts) -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        paired_organ_rule(
            "M3",
            659,
            "Are there tumors in both the right renal pelvis and the left \
             renal pelvis?",
            "When there are tumors in both the right renal pelvis and the \
             left renal pelvis, they are multiple primaries.",
        ),
        paired_organ_rule(
            "M4",
            669,
            "Are there tumors in both the right ureter and the left ureter?",
            "When there are tumors in both the right ureter and the left \
             ureter, they are multiple primaries.",
        ),
        invasive_after_in_situ_rule("M5"),
        bladder_carcinomas_rule(charts)?,
        years_apart_rule("M7", 3),
        urothelial_rule(charts),
        histology_triplet_rule("M9"),
        topography_code_rule("M10"),
        no_criteria_rule("M11"),
    ];
    RuleGroup::new(
        "urinary-2007",
        "Urinary",
        GroupScope {
            site_inclusion: Some("C659,C669,C670-C679,C680-C689"),
            histology_exclusion: Some(crate::constants::HEMATO_AND_KAPOSI),
            behavior_inclusion: "2-3,6",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

fn bladder_carcinomas_rule(charts: &'static Charts) -> Result<Rule, CatalogError> {
    let bladder = RangeSet::parse("C670-C679", CodeKind::Topography)?;
    Ok(Rule::new(
        "M6",
        "Are there multiple papillary carcinomas, transitional cell \
         carcinomas, or papillary transitional cell carcinomas of the \
         bladder?",
        "Bladder tumors with any combination of the following histologies: \
         papillary carcinoma (8050), transitional cell carcinoma \
         (8120-8124), or papillary transitional cell carcinoma (8130-8131) \
         are a single primary.",
        move |first, second, _| {
            let both_bladder = match (first.site_number(), second.site_number()) {
                (Some(a), Some(b)) => bladder.contains(a) && bladder.contains(b),
                _ => false,
            };
            if !both_bladder {
                return RuleOutcome::NotMatched;
            }
            let eligible = |h: u16| {
                h == 8050
                    || charts.transitional.contains(h)
                    || charts.papillary_transitional.contains(h)
            };
            if super::both_histologies_in(first, second, eligible) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    ))
}

fn urothelial_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M8",
        "Are there urothelial tumors in two or more urinary sites?",
        "Urothelial tumors in two or more of the following sites are a \
         single primary: renal pelvis, ureter, bladder, urethra.",
        move |first, second, _| {
            if super::both_histologies_in(first, second, |h| charts.urothelial.contains(h)) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::Catalog;
    use mph_types::{Laterality, MpResult, PartialDate, TumorRecord};

    fn tumor(site: &str, hist: &str, lat: Laterality, year: u16) -> TumorRecord {
        TumorRecord::builder()
            .site(site)
            .histology(hist)
            .behavior("3")
            .laterality(lat)
            .diagnosis_date(PartialDate::new(Some(year), Some(5), Some(16)))
            .build()
    }

    #[test]
    fn test_both_renal_pelves_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C659", "8120", Laterality::Right, 2015),
            &tumor("C659", "8120", Laterality::Left, 2015),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.group_id.as_deref(), Some("urinary-2007"));
        assert_eq!(out.applied_rules, vec!["M3"]);
        assert!(out.reason.contains("renal pelvis"));
    }

    #[test]
    fn test_renal_pelvis_unknown_side_questionable() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C659", "8120", Laterality::Right, 2015),
            &tumor("C659", "8120", Laterality::Unknown, 2015),
        );
        assert_eq!(out.result, MpResult::Questionable);
        assert!(out.reason.contains("M3"));
    }

    #[test]
    fn test_both_ureters_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C669", "8120", Laterality::Right, 2015),
            &tumor("C669", "8120", Laterality::Left, 2015),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.applied_rules.len(), 2);
        assert!(out.reason.contains("ureter"));
    }

    #[test]
    fn test_bladder_carcinomas_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C670", "8050", Laterality::NotPaired, 2015),
            &tumor("C675", "8122", Laterality::NotPaired, 2015),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.applied_rules, vec!["M3", "M4", "M5", "M6"]);
        assert!(out.reason.contains("Bladder"));
    }

    #[test]
    fn test_urothelial_multi_site_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C659", "8120", Laterality::Right, 2015),
            &tumor("C679", "8120", Laterality::NotPaired, 2015),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.applied_rules.len(), 6);
        assert!(out.reason.contains("Urothelial"));
    }

    #[test]
    fn test_three_years_apart_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C670", "8140", Laterality::NotPaired, 2010),
            &tumor("C670", "8140", Laterality::NotPaired, 2015),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.applied_rules.len(), 5);
    }

    #[test]
    fn test_different_urinary_sites_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C659", "8140", Laterality::Right, 2015),
            &tumor("C680", "8140", Laterality::NotPaired, 2015),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.applied_rules.len(), 8);
    }
}
