//! Cutaneous melanoma rules, 2007 revision.

use mph_types::Laterality;

use crate::dates::{self, Apart};
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{
    self, full_topography_rule, histology_triplet_rule, no_criteria_rule, Rule, RuleOutcome,
    RuleVerdict, MISSING_DATE_DETAIL,
};

use super::MISSING_LATERALITY_DETAIL;

pub(super) fn build() -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        full_topography_rule("M3"),
        laterality_rule(),
        histology_triplet_rule("M5"),
        invasive_after_in_situ_rule(),
        sixty_days_rule(),
        no_criteria_rule("M8"),
    ];
    RuleGroup::new(
        "melanoma-2007",
        "Melanoma",
        GroupScope {
            site_inclusion: Some("C440-C449"),
            histology_inclusion: Some("8720-8790"),
            behavior_inclusion: "2-3,6",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

fn laterality_rule() -> Rule {
    Rule::new(
        "M4",
        "Are there melanomas with different lateralities?",
        "Melanomas with different lateralities are multiple primaries.",
        |first, second, _| {
            // Midline is its own position; a midline melanoma and a sided
            // melanoma are different primaries.
            let accepted = |lat: Option<Laterality>| {
                matches!(
                    lat,
                    Some(Laterality::Right | Laterality::Left | Laterality::Midline)
                )
            };
            if !accepted(first.laterality) || !accepted(second.laterality) {
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

fn invasive_after_in_situ_rule() -> Rule {
    Rule::new(
        "M6",
        "Is there an invasive melanoma more than 60 days after an in situ \
         melanoma?",
        "An invasive melanoma that occurs more than 60 days after an in situ \
         melanoma is a multiple primary.",
        |first, second, _| rule::invasive_after_in_situ(first, second),
    )
}

fn sixty_days_rule() -> Rule {
    Rule::new(
        "M7",
        "Are there melanomas diagnosed more than 60 days apart?",
        "Melanomas diagnosed more than 60 days apart are multiple primaries.",
        |first, second, _| {
            match dates::days_apart(first.diagnosis_date, second.diagnosis_date, 60) {
                Apart::Exceeds => RuleOutcome::Matched(RuleVerdict::MultiplePrimaries),
                Apart::Within => RuleOutcome::NotMatched,
                Apart::Indeterminate => {
                    RuleOutcome::Indeterminate(MISSING_DATE_DETAIL.to_string())
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use crate::Catalog;
    use mph_types::{Laterality, MpResult, PartialDate, TumorRecord};

    fn tumor(site: &str, hist: &str, lat: Laterality, date: PartialDate) -> TumorRecord {
        TumorRecord::builder()
            .site(site)
            .histology(hist)
            .behavior("3")
            .laterality(lat)
            .diagnosis_date(date)
            .build()
    }

    fn on(year: u16, month: u8, day: u8) -> PartialDate {
        PartialDate::new(Some(year), Some(month), Some(day))
    }

    #[test]
    fn test_fourth_character_site_difference() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C442", "8720", Laterality::Right, on(2015, 3, 1)),
            &tumor("C447", "8720", Laterality::Right, on(2015, 3, 1)),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.group_id.as_deref(), Some("melanoma-2007"));
        assert_eq!(out.applied_rules, vec!["M3"]);
    }

    #[test]
    fn test_different_laterality_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C442", "8720", Laterality::Right, on(2015, 3, 1)),
            &tumor("C442", "8720", Laterality::Left, on(2015, 3, 1)),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.applied_rules, vec!["M3", "M4"]);

        // Midline counts as a distinct position
        let out = catalog.determine(
            &tumor("C442", "8720", Laterality::Midline, on(2015, 3, 1)),
            &tumor("C442", "8720", Laterality::Left, on(2015, 3, 1)),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.applied_rules.len(), 2);
    }

    #[test]
    fn test_unknown_laterality_questionable() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C442", "8720", Laterality::Unknown, on(2015, 3, 1)),
            &tumor("C442", "8720", Laterality::Left, on(2015, 3, 1)),
        );
        assert_eq!(out.result, MpResult::Questionable);
        assert!(out.reason.contains("M4"));
    }

    #[test]
    fn test_sixty_days_apart_multiple() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C442", "8720", Laterality::Left, on(2015, 1, 10)),
            &tumor("C442", "8720", Laterality::Left, on(2015, 6, 10)),
        );
        assert_eq!(out.result, MpResult::MultiplePrimaries);
        assert_eq!(out.applied_rules, vec!["M3", "M4", "M5", "M6", "M7"]);
        assert!(out.reason.contains("60 days"));
    }

    #[test]
    fn test_sixty_days_indeterminate_questionable() {
        let catalog = Catalog::new().unwrap();
        let vague = PartialDate::new(Some(2015), None, None);
        let out = catalog.determine(
            &tumor("C442", "8720", Laterality::Left, vague),
            &tumor("C442", "8720", Laterality::Left, vague),
        );
        assert_eq!(out.result, MpResult::Questionable);
        assert!(out.reason.contains("M7"));
    }

    #[test]
    fn test_same_lesion_profile_single() {
        let catalog = Catalog::new().unwrap();
        let out = catalog.determine(
            &tumor("C442", "8720", Laterality::Left, on(2015, 3, 1)),
            &tumor("C442", "8721", Laterality::Left, on(2015, 3, 20)),
        );
        assert_eq!(out.result, MpResult::SinglePrimary);
        assert_eq!(out.applied_rules.len(), 6);
    }
}
