//! Residual rules for all remaining solid sites, 2007 revision.
//!
//! This is the catch-all group: it carries no site constraint and is
//! resolved last, so it governs every solid tumor no site-specific group
//! claims.

use mph_types::Behavior;

use crate::constants::{Charts, FOURTH_CHARACTER_SITES, KAPOSI, OTHER_PAIRED_SITES};
use crate::dates::{self, Apart};
use crate::error::CatalogError;
use crate::group::{GroupScope, RuleGroup};
use crate::rule::{
    different_category, histology_triplet_rule, invasive_after_in_situ_rule, no_criteria_rule,
    nos_vs_specific_rule, topography_code_rule, years_apart_rule, Rule, RuleOutcome, RuleVerdict,
    MISSING_DATE_DETAIL,
};

use super::{nos_chart_subset, paired_site_rule};

pub(super) fn build(charts: &'static Charts) -> Result<RuleGroup, CatalogError> {
    let rules = vec![
        prostate_rule(),
        retinoblastoma_rule(charts),
        kaposi_rule(),
        thyroid_rule(charts),
        ovary_rule(),
        paired_site_rule(
            "M8",
            OTHER_PAIRED_SITES,
            "Are there tumors on both sides of a paired site?",
            "Tumors on both sides (right and left) of a paired site are \
             multiple primaries.",
        )?,
        familial_polyposis_rule(charts),
        years_apart_rule("M10", 1),
        topography_code_rule("M11"),
        fourth_character_rule(),
        adenocarcinoma_in_polyp_rule(charts),
        multiple_polyps_rule(charts),
        invasive_after_in_situ_rule("M15"),
        nos_vs_specific_rule(
            "M16",
            nos_chart_subset(charts, &[8000, 8010, 8070, 8140, 8720, 8800]),
        ),
        histology_triplet_rule("M17"),
        no_criteria_rule("M18"),
    ];
    RuleGroup::new(
        "other-sites-2007",
        "Other Sites",
        GroupScope {
            histology_exclusion: Some(crate::constants::HEMATO),
            behavior_inclusion: "2-3,6",
            year_inclusion: "2007-9999",
            ..Default::default()
        },
        rules,
    )
}

fn prostate_rule() -> Rule {
    Rule::new(
        "M3",
        "Is the diagnosis adenocarcinoma of the prostate?",
        "Adenocarcinoma of the prostate is always a single primary.",
        |first, second, _| {
            let prostate_adeno = |t: &mph_types::TumorRecord| {
                t.site_number() == Some(619) && t.histology_number() == Some(8140)
            };
            if prostate_adeno(first) && prostate_adeno(second) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn retinoblastoma_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M4",
        "Is the diagnosis retinoblastoma?",
        "Retinoblastoma is always a single primary (unilateral or \
         bilateral).",
        move |first, second, _| {
            if super::both_histologies_in(first, second, |h| charts.retinoblastoma.contains(h)) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn kaposi_rule() -> Rule {
    Rule::new(
        "M5",
        "Is the diagnosis Kaposi sarcoma?",
        "Kaposi sarcoma is always a single primary.",
        |first, second, _| {
            if super::both_histologies_in(first, second, |h| h == KAPOSI) {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn thyroid_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M6",
        "Are there follicular and/or papillary tumors of the thyroid within \
         60 days of diagnosis?",
        "Follicular and papillary tumors of the thyroid diagnosed within 60 \
         days are a single primary.",
        move |first, second, _| {
            let both_thyroid =
                first.site_number() == Some(739) && second.site_number() == Some(739);
            let eligible =
                |h: u16| charts.follicular.contains(h) || charts.papillary.contains(h);
            if !both_thyroid || !super::both_histologies_in(first, second, eligible) {
                return RuleOutcome::NotMatched;
            }
            match dates::days_apart(first.diagnosis_date, second.diagnosis_date, 60) {
                Apart::Within => RuleOutcome::Matched(RuleVerdict::SinglePrimary),
                Apart::Exceeds => RuleOutcome::NotMatched,
                Apart::Indeterminate => {
                    RuleOutcome::Indeterminate(MISSING_DATE_DETAIL.to_string())
                }
            }
        },
    )
}

fn ovary_rule() -> Rule {
    Rule::new(
        "M7",
        "Are there bilateral epithelial tumors (8000-8799) of the ovary \
         within 60 days of diagnosis?",
        "Bilateral epithelial tumors (8000-8799) of the ovary within 60 days \
         of diagnosis are a single primary.",
        |first, second, _| {
            let both_ovary =
                first.site_number() == Some(569) && second.site_number() == Some(569);
            let epithelial = |h: u16| (8000..=8799).contains(&h);
            if !both_ovary || !super::both_histologies_in(first, second, epithelial) {
                return RuleOutcome::NotMatched;
            }
            match dates::days_apart(first.diagnosis_date, second.diagnosis_date, 60) {
                Apart::Within => RuleOutcome::Matched(RuleVerdict::SinglePrimary),
                Apart::Exceeds => RuleOutcome::NotMatched,
                Apart::Indeterminate => {
                    RuleOutcome::Indeterminate(MISSING_DATE_DETAIL.to_string())
                }
            }
        },
    )
}

fn familial_polyposis_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M9",
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

fn fourth_character_rule() -> Rule {
    Rule::new(
        "M12",
        "Are there tumors with ICD-O-3 topography codes that differ only at \
         the fourth character (Cxx?) in C21, C40, C41, C44, C47 or C49?",
        "Tumors with ICD-O-3 topography codes that differ only at the fourth \
         character (Cxx?) in C21, C40, C41, C44, C47 or C49 are multiple \
         primaries.",
        |first, second, _| {
            if first.site == second.site || first.site.get(..3) != second.site.get(..3) {
                return RuleOutcome::NotMatched;
            }
            let listed = first
                .site
                .get(..3)
                .is_some_and(|prefix| FOURTH_CHARACTER_SITES.contains(&prefix));
            if listed {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

fn adenocarcinoma_in_polyp_rule(charts: &'static Charts) -> Rule {
    Rule::new(
        "M13",
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
        "M14",
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
