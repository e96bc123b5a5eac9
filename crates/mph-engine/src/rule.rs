//! The rule abstraction and the rule constructors shared across groups.
//!
//! A rule is one yes/no question asked of the two tumors. Its answer is one
//! of three things: the question does not apply (move on to the next rule),
//! the question matched (the chain stops with this rule's verdict), or the
//! question cannot be answered with the information provided (the chain
//! stops with a manual-review outcome).

use mph_types::{Behavior, ComputeOptions, HistologyMatching, TumorRecord};

use crate::dates::{self, Apart, DxOrder};
use crate::ranges::RangeSet;

/// Verdict a matched rule assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleVerdict {
    /// Same primary cancer.
    SinglePrimary,
    /// Separate primary cancers.
    MultiplePrimaries,
}

/// Outcome of evaluating one rule against a tumor pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule's criteria are not met; try the next rule.
    NotMatched,
    /// The rule decides the determination.
    Matched(RuleVerdict),
    /// The rule applies but cannot be answered; the detail says what was
    /// missing. The chain stops with a questionable outcome.
    Indeterminate(String),
}

type EvalFn = Box<dyn Fn(&TumorRecord, &TumorRecord, &ComputeOptions) -> RuleOutcome + Send + Sync>;

/// One step of a rule group's ordered chain.
pub struct Rule {
    /// Step label within the group, e.g. `M7`.
    pub step: String,
    /// The question this rule asks.
    pub question: String,
    /// Reason text reported when this rule matches.
    pub reason: String,
    eval: EvalFn,
}

impl Rule {
    /// Creates a rule from its texts and evaluation closure.
    pub fn new<F>(step: &str, question: &str, reason: &str, eval: F) -> Self
    where
        F: Fn(&TumorRecord, &TumorRecord, &ComputeOptions) -> RuleOutcome + Send + Sync + 'static,
    {
        Rule {
            step: step.to_string(),
            question: question.to_string(),
            reason: reason.to_string(),
            eval: Box::new(eval),
        }
    }

    /// Evaluates the rule against a tumor pair.
    pub fn evaluate(
        &self,
        first: &TumorRecord,
        second: &TumorRecord,
        options: &ComputeOptions,
    ) -> RuleOutcome {
        (self.eval)(first, second, options)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("step", &self.step)
            .field("question", &self.question)
            .finish()
    }
}

/// Detail text for rules stopped by missing date information.
pub(crate) const MISSING_DATE_DETAIL: &str =
    "There is not enough diagnosis date information.";

/// Whether one value sits in `a` and the other in `b`, in either order.
pub(crate) fn different_category(v1: u16, v2: u16, a: &RangeSet, b: &RangeSet) -> bool {
    (a.contains(v1) && b.contains(v2)) || (a.contains(v2) && b.contains(v1))
}

/// Whether both values sit in the union of the given sets.
pub(crate) fn both_in_union(v1: u16, v2: u16, sets: &[&RangeSet]) -> bool {
    let hit = |v: u16| sets.iter().any(|s| s.contains(v));
    hit(v1) && hit(v2)
}

/// Rule: histology codes that differ at the first three digits are multiple
/// primaries.
///
/// In lenient mode `8000` (neoplasm NOS) is compatible with every other
/// `8xxx` code.
pub fn histology_triplet_rule(step: &str) -> Rule {
    Rule::new(
        step,
        "Do the tumors have ICD-O-3 histology codes that are different at the \
         first (xxx)x number?",
        "Tumors with ICD-O-3 histology codes that are different at the first \
         (xxx)x number are multiple primaries.",
        |first, second, options| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            if options.histology_matching == HistologyMatching::Lenient
                && ((h1 == 8000 && (8000..9000).contains(&h2))
                    || (h2 == 8000 && (8000..9000).contains(&h1)))
            {
                return RuleOutcome::NotMatched;
            }
            if h1 / 10 != h2 / 10 {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

/// Rule: topography codes that differ at the second or third character are
/// multiple primaries.
pub fn topography_code_rule(step: &str) -> Rule {
    Rule::new(
        step,
        "Are there tumors in sites with ICD-O-3 topography codes that are \
         different at the second (Cxxx) and/or third (Cxxx) character?",
        "Tumors in sites with ICD-O-3 topography codes that are different at \
         the second (Cxxx) and/or third (Cxxx) character are multiple \
         primaries.",
        |first, second, _| {
            if first.site.get(..3) != second.site.get(..3) {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

/// Rule: topography codes that differ at the second, third, or fourth
/// character are multiple primaries.
pub fn full_topography_rule(step: &str) -> Rule {
    Rule::new(
        step,
        "Are there tumors in sites with ICD-O-3 topography codes that are \
         different at the second (Cxxx), third (Cxxx) and/or fourth (Cxxx) \
         character?",
        "Tumors in sites with ICD-O-3 topography codes that are different at \
         the second (Cxxx), third (Cxxx) and/or fourth (Cxxx) character are \
         multiple primaries.",
        |first, second, _| {
            if first.site != second.site {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

/// Rule: an invasive tumor following an in situ tumor more than 60 days
/// after diagnosis is a multiple primary.
pub fn invasive_after_in_situ_rule(step: &str) -> Rule {
    Rule::new(
        step,
        "Is there an invasive tumor following an in situ tumor more than 60 \
         days after diagnosis?",
        "An invasive tumor following an in situ tumor more than 60 days after \
         diagnosis is a multiple primary.",
        |first, second, _| invasive_after_in_situ(first, second),
    )
}

pub(crate) fn invasive_after_in_situ(first: &TumorRecord, second: &TumorRecord) -> RuleOutcome {
    let (b1, b2) = match (first.behavior_code(), second.behavior_code()) {
        (Some(a), Some(b)) => (a, b),
        _ => return RuleOutcome::NotMatched,
    };
    let invasive_is_first = match (b1, b2) {
        (Behavior::Malignant, Behavior::InSitu) => true,
        (Behavior::InSitu, Behavior::Malignant) => false,
        _ => return RuleOutcome::NotMatched,
    };
    let (invasive, in_situ) = if invasive_is_first {
        (first, second)
    } else {
        (second, first)
    };
    match dates::compare_diagnosis_dates(invasive.diagnosis_date, in_situ.diagnosis_date) {
        DxOrder::Indeterminate => {
            // Order unknown; the day gap can still settle it when the
            // diagnoses are provably close or provably far apart.
        }
        DxOrder::FirstLater => {}
        DxOrder::SecondLater | DxOrder::Same => return RuleOutcome::NotMatched,
    }
    match dates::days_apart(invasive.diagnosis_date, in_situ.diagnosis_date, 60) {
        Apart::Exceeds => {
            if dates::compare_diagnosis_dates(invasive.diagnosis_date, in_situ.diagnosis_date)
                == DxOrder::FirstLater
            {
                RuleOutcome::Matched(RuleVerdict::MultiplePrimaries)
            } else {
                RuleOutcome::Indeterminate(MISSING_DATE_DETAIL.to_string())
            }
        }
        Apart::Within => RuleOutcome::NotMatched,
        Apart::Indeterminate => RuleOutcome::Indeterminate(MISSING_DATE_DETAIL.to_string()),
    }
}

/// Rule: tumors diagnosed more than `years` apart are multiple primaries.
pub fn years_apart_rule(step: &str, years: u16) -> Rule {
    let plural = if years == 1 { "year" } else { "years" };
    Rule::new(
        step,
        &format!(
            "Are there tumors diagnosed more than {years} {plural} apart?"
        ),
        &format!(
            "Tumors diagnosed more than {years} {plural} apart are multiple \
             primaries."
        ),
        move |first, second, _| {
            match dates::years_apart(first.diagnosis_date, second.diagnosis_date, years) {
                Apart::Exceeds => RuleOutcome::Matched(RuleVerdict::MultiplePrimaries),
                Apart::Within => RuleOutcome::NotMatched,
                Apart::Indeterminate => {
                    RuleOutcome::Indeterminate(MISSING_DATE_DETAIL.to_string())
                }
            }
        },
    )
}

/// Rule: a histology coded NOS alongside a more specific histology of the
/// same basic type is a single primary.
///
/// `chart` pairs each NOS code with the specific codes it covers.
pub fn nos_vs_specific_rule(step: &str, chart: Vec<(u16, RangeSet)>) -> Rule {
    Rule::new(
        step,
        "Is there a frank histology coded as NOS and another tumor with a \
         more specific histology of the same basic type?",
        "A histology coded as NOS and a more specific histology of the same \
         basic type are a single primary.",
        move |first, second, _| {
            let (h1, h2) = match (first.histology_number(), second.histology_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return RuleOutcome::NotMatched,
            };
            let matched = chart.iter().any(|(nos, specific)| {
                (h1 == *nos && specific.contains(h2)) || (h2 == *nos && specific.contains(h1))
            });
            if matched {
                RuleOutcome::Matched(RuleVerdict::SinglePrimary)
            } else {
                RuleOutcome::NotMatched
            }
        },
    )
}

/// Rule: tumors that meet none of the preceding criteria are a single
/// primary. Terminates every chain.
pub fn no_criteria_rule(step: &str) -> Rule {
    Rule::new(
        step,
        "Do the tumors meet any of the preceding criteria?",
        "Tumors that do not meet any of the criteria are abstracted as a \
         single primary.",
        |_, _, _| RuleOutcome::Matched(RuleVerdict::SinglePrimary),
    )
}
