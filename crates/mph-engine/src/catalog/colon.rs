//! Colon rules, 2007 revision.

use mph_types::Behavior;

use crate::constants::Charts;
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{
    different_category, full_topography_rule, histology_triplet_rule, invasive_after_in_situ_rule,
    no_criteria_rule, nos_vs_specific_rule, years_apart_rule, Rule, RuleOutcome, RuleVerdict,
};

use super::nos_chart_subset;

pub(super) fn build(charts: &'static Charts) -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        familial_polyposis_rule(charts),
        full_topography_rule("M4"),
        years_apart_rule("M5", 1),
        invasive_after_in_situ_rule("M6"),
        adenocarcinoma_in_polyp_rule(charts),
        nos_vs_specific_rule("M8", nos_chart_subset(charts, &[8000, 8010, 8140, 8800])),
        multiple_polyps_rule(charts),
        histology_triplet_rule("M10"),
        no_criteria_rule("M11"),
    ];
    RuleGroup::new(
        "colon-2007",
        "Colon",
        GroupScope {
            site_inclusion: Some("C180-C189"),
            histology_exclusion: Some(crate::constants::HEMATO_AND_KAPOSI),
            behavior_inclusion: "2-3,6",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

fn familial_polyposis_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M3",
        "Is the diagnosis adenocarcinoma in adenomatous polyposis coli \
         (familial polyposis) with one or more in situ or malignant polyps?",
        "Adenocarcinoma in adenomatous polyposis coli (familial polyposis) \
         with one or more in situ or malignant polyps is a single primary.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let malignant = first.behavior_code() == Some(Behavior::Malignant)
                || second.behavior_code() == Some(Behavior::Malignant);
            if malignant && different_category(h1, h2, &charts.familial_polyposis, &charts.polyp) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn adenocarcinoma_in_polyp_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M7",
        "Is there a frank in situ or malignant adenocarcinoma and an in situ \
         or malignant tumor in an adenomatous polyp?",
        "A frank in situ or malignant adenocarcinoma and an in situ or \
         malignant tumor in an adenomatous polyp are a single primary.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let adeno = |h: u16| {
                charts.adenocarcinoma_specific.contains(h) || charts.adenocarcinoma_nos.contains(h)
            };
            let polyp = |h: u16| charts.polyp.contains(h);
            if (adeno(h1) && polyp(h2)) || (adeno(h2) && polyp(h1)) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn multiple_polyps_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M9",
        "Are there multiple in situ and/or malignant polyps?",
        "Multiple in situ and/or malignant polyps are a single primary.",
        move |first, second, _| {
            if super::both_histologies_in(first, second, |h| charts.polyp.contains(h)) {
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
    use mph_types::{MpResult, PartialDate, TumorRecord};

    fn tumor(site: &str, hist: &str, behavior: &str, year: u16, month: u8) -> TumorRecord {
        TumorRecord::builder()
            .site(site)
            .histology(hist)
            .behavior(behavior)
            .diagnosis_date(PartialDate::new(Some(year), Some(month), None))
            .build()
    }

    #[test]
    fn test_familial_polyposis_single_primary() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C181", "8220", "3", 2015, 5),
            &tumor("C181", "8262", "3", 2015, 5),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.group_id.as_deref(), Some("colon-2007"));
        assert_eq!(out.applied_rules.len(), 1);
        assert!(out.reason.contains("polyp"));
    }

    #[test]
    fn test_different_segments_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C180", "8140", "3", 2015, 5),
            &tumor("C187", "8140", "3", 2015, 5),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        // M3 did not match, M4 decided
        assert_eq!(out.applied_rules, vec!["M3", "M4"]);
    }

    #[test]
    fn test_one_year_apart_needs_months() {
        let catalog = Catalog::new().unwrap();
        // Exactly one calendar year apart with unknown months
        let a = TumorRecord::builder()
            .site("C182")
            .histology("8140")
            .behavior("3")
            .diagnosis_date(PartialDate::new(Some(2014), None, None))
            .build();
        let b = TumorRecord::builder()
            .site("C182")
            .histology("8140")
            .behavior("3")
            .diagnosis_date(PartialDate::new(Some(2015), None, None))
            .build();
        let out = catalog.determine(&a, &b);
        assert_eq!(out.result, MpResult::Questionable);
        assert!(out.reason.contains("M5"));
    }

    #[test]
    fn test_adenocarcinoma_and_polyp_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C183", "8140", "3", 2015, 5),
            &tumor("C183", "8210", "3", 2015, 7),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.applied_rules.len(), 5);
        assert!(out.reason.contains("adenomatous polyp"));
    }

    #[test]
    fn test_nos_vs_specific_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C184", "8000", "3", 2015, 5),
            &tumor("C184", "8490", "3", 2015, 6),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.applied_rules.len(), 6);
    }

    #[test]
    fn test_histology_difference_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C185", "8510", "3", 2015, 5),
            &tumor("C185", "8480", "3", 2015, 6),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.applied_rules.len(), 8);
    }

    #[test]
    fn test_no_criteria_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C186", "8480", "3", 2015, 5),
            &tumor("C186", "8482", "3", 2015, 6),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.applied_rules.len(), 9);
        assert!(out.reason.contains("single primary"));
    }
}
