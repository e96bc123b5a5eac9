//! Determination output and compute options.

use crate::MpResult;

/// The complete result of one multiple-primary determination.
///
/// `applied_rules` lists the step label of every rule that was evaluated, in
/// order, up to and including the one that decided the outcome. It is empty
/// when no rule chain ran (invalid input, tumors in different rule groups,
/// or no applicable group).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeterminationOutput {
    /// The verdict.
    pub result: MpResult,
    /// Identifier of the rule group both tumors resolved to, if any.
    pub group_id: Option<String>,
    /// Step labels of the rules evaluated, in order.
    pub applied_rules: Vec<String>,
    /// Human-readable explanation of the verdict.
    pub reason: String,
}

impl DeterminationOutput {
    /// Builds an output with no rule chain involvement.
    pub fn without_rules(result: MpResult, reason: impl Into<String>) -> Self {
        DeterminationOutput {
            result,
            group_id: None,
            applied_rules: Vec::new(),
            reason: reason.into(),
        }
    }
}

/// How histology codes are compared by the three-digit difference rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HistologyMatching {
    /// `8000` (neoplasm NOS) is a distinct code like any other.
    #[default]
    Strict,
    /// `8000` is treated as compatible with every other `8xxx` code.
    Lenient,
}

/// Caller-tunable determination settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputeOptions {
    /// Histology comparison mode.
    pub histology_matching: HistologyMatching,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ComputeOptions::default();
        assert_eq!(options.histology_matching, HistologyMatching::Strict);
    }

    #[test]
    fn test_without_rules() {
        let out = DeterminationOutput::without_rules(MpResult::Questionable, "why");
        assert!(out.applied_rules.is_empty());
        assert_eq!(out.group_id, None);
        assert_eq!(out.reason, "why");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_output_roundtrip() {
        let out = DeterminationOutput {
            result: MpResult::SinglePrimary,
            group_id: Some("colon-2007".to_string()),
            applied_rules: vec!["M3".to_string()],
            reason: "reason text".to_string(),
        };
        let json = serde_json::to_string(&out).unwrap();
        let parsed: DeterminationOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(out, parsed);
    }
}
