//! Breast rules, 2007 revision.

use mph_types::Behavior;

use crate::constants::Charts;
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{
    histology_triplet_rule, invasive_after_in_situ_rule, no_criteria_rule, topography_code_rule,
    years_apart_rule, Rule, RuleOutcome, RuleVerdict,
};

use super::MISSING_LATERALITY_DETAIL;

pub(super) fn build(charts: &'static Charts) -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        topography_code_rule("M4"),
        years_apart_rule("M5", 5),
        inflammatory_carcinoma_rule(),
        both_sides_rule(),
        invasive_after_in_situ_rule("M8"),
        paget_rule(charts),
        lobular_rule(charts),
        duct_carcinomas_rule(charts),
        histology_triplet_rule("M12"),
        no_criteria_rule("M13"),
    ];
    RuleGroup::new(
        "breast-2007",
        "Breast",
        GroupScope {
            site_inclusion: Some("C500-C509"),
            histology_exclusion: Some(crate::constants::HEMATO_AND_KAPOSI),
            behavior_inclusion: "2-3,6",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

fn inflammatory_carcinoma_rule() -> Rule {
    Rule::new(
        "M6",
        "Is the diagnosis inflammatory carcinoma in one or both breasts?",
        "Inflammatory carcinoma in one or both breasts is a single primary.",
        |first, second, _| {
            let inflammatory = |t: &mph_types::TumorRecord| {
                t.histology_number() == Some(8530)
                    && t.behavior_code() == Some(Behavior::Malignant)
            };
            if inflammatory(first) && inflammatory(second) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn both_sides_rule() -> Rule {
    Rule::new(
        "M7",
        "Are there tumors in both the right breast and the left breast?",
        "Tumors on both sides (right and left breast) are multiple \
         primaries.",
        |first, second, _| {
            let definite =
                |lat: Option<mph_types::Laterality>| matches!(lat, Some(l) if l.is_side());
            if !definite(first.laterality) || !definite(second.laterality) {
                return RuleOutcome::Indeterminate(MISSING_LATERALITY_DETAIL.to_string());
            }
            if first.laterality != second.laterality {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn paget_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M9",
        "Is the diagnosis intraductal or duct carcinoma and Paget disease?",
        "Tumors that are intraductal or duct carcinoma and Paget disease are \
         a single primary.",
        move |first, second, _| {
            let ductal =
                |h: u16| charts.intraductal.contains(h) || charts.duct.contains(h);
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let paget = |h: u16| charts.paget.contains(h);
            if (ductal(h1) && paget(h2)) || (ductal(h2) && paget(h1)) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn lobular_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M10",
        "Is the diagnosis lobular carcinoma and intraductal or duct \
         carcinoma?",
        "Tumors that are lobular carcinoma and intraductal or duct carcinoma \
         are a single primary.",
        move |first, second, _| {
            let ductal =
                |h: u16| charts.intraductal.contains(h) || charts.duct.contains(h);
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let lobular = |h: u16| charts.lobular.contains(h);
            if (lobular(h1) && ductal(h2)) || (lobular(h2) && ductal(h1)) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn duct_carcinomas_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M11",
        "Are there multiple intraductal and/or duct carcinomas?",
        "Multiple intraductal and/or duct carcinomas are a single primary.",
        move |first, second, _| {
            let ductal =
                |h: u16| charts.intraductal.contains(h) || charts.duct.contains(h);
            if super::both_histologies_in(first, second, ductal) {
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

    fn tumor(hist: &str, behavior: &str, lat: Laterality, year: u16, month: u8) -> TumorRecord {
        TumorRecord::builder()
            .site("C509")
            .histology(hist)
            .behavior(behavior)
            .laterality(lat)
            .diagnosis_date(PartialDate::new(Some(year), Some(month), Some(10)))
            .build()
    }

    #[test]
    fn test_inflammatory_carcinoma_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("8530", "3", Laterality::Right, 2015, 2),
            &tumor("8530", "3", Laterality::Left, 2015, 3),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.group_id.as_deref(), Some("breast-2007"));
        assert_eq!(out.applied_rules.len(), 3);
        assert!(out.reason.contains("carcinoma"));
    }

    #[test]
    fn test_both_sides_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("8500", "3", Laterality::Right, 2015, 2),
            &tumor("8090", "3", Laterality::Left, 2015, 3),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.applied_rules, vec!["M4", "M5", "M6", "M7"]);
        assert!(out.reason.contains("both sides"));
    }

    #[test]
    fn test_unknown_laterality_questionable() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("8500", "3", Laterality::Right, 2015, 2),
            &tumor("8090", "3", Laterality::Unknown, 2015, 3),
        );
        assert_eq!(out.result, MpResult::Questionable);
        assert!(out.reason.contains("M7"));
        assert!(out.reason.contains("laterality"));
    }

    #[test]
    fn test_invasive_after_in_situ_needs_dates() {
        let catalog = Catalog::new().unwrap();
        let in_situ = TumorRecord::builder()
            .site("C509")
            .histology("8500")
            .behavior("2")
            .laterality(Laterality::Right)
            .diagnosis_date(PartialDate::new(Some(2015), None, None))
            .build();
        let invasive = TumorRecord::builder()
            .site("C509")
            .histology("8500")
            .behavior("3")
            .laterality(Laterality::Right)
            .diagnosis_date(PartialDate::new(Some(2015), None, None))
            .build();
        let out = catalog.determine(&in_situ, &invasive);
        assert_eq!(out.result, MpResult::Questionable);
        assert!(out.reason.contains("M8"));
        assert!(out.reason.contains("diagnosis date"));
    }

    #[test]
    fn test_paget_and_duct_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("8543", "3", Laterality::Right, 2015, 2),
            &tumor("8501", "3", Laterality::Right, 2015, 3),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.applied_rules.len(), 6);
        assert!(out.reason.contains("Paget"));
    }

    #[test]
    fn test_lobular_and_duct_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("8520", "3", Laterality::Left, 2015, 2),
            &tumor("8500", "3", Laterality::Left, 2015, 3),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.applied_rules.len(), 7);
        assert!(out.reason.contains("lobular"));
    }

    #[test]
    fn test_multiple_duct_carcinomas_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("8500", "3", Laterality::Left, 2015, 2),
            &tumor("8035", "3", Laterality::Left, 2015, 3),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.applied_rules.len(), 8);
        assert!(out.reason.contains("duct"));
    }
}
