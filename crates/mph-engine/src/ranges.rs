//! Code range sets.
//!
//! Rule groups and individual rules scope themselves with compact range
//! notation over topography, morphology, behavior, and year codes:
//! `"C180-C189"`, `"8220-8221"`, `"2-3,6"`, `"2007-9999"`. A [`RangeSet`]
//! is the parsed form, a list of inclusive numeric intervals.

use crate::error::CatalogError;

/// Whether a specification describes topography codes (leading `C`) or
/// plain numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// Topography codes such as `C182`; the leading letter is stripped
    /// before numeric comparison.
    Topography,
    /// Plain numeric codes (morphology, behavior, year).
    Numeric,
}

/// A set of inclusive numeric intervals parsed from range notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSet {
    intervals: Vec<(u16, u16)>,
}

impl RangeSet {
    /// Parses a comma-separated range specification.
    ///
    /// Each token is either a single code or `low-high` (inclusive both
    /// ends). Topography tokens carry a leading `C` which is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use mph_engine::ranges::{CodeKind, RangeSet};
    ///
    /// let sites = RangeSet::parse("C180-C189", CodeKind::Topography).unwrap();
    /// assert!(sites.contains(182));
    /// assert!(!sites.contains(190));
    /// ```
    pub fn parse(spec: &str, kind: CodeKind) -> Result<RangeSet, CatalogError> {
        let mut intervals = Vec::new();
        for token in spec.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err(invalid(spec, "empty token"));
            }
            let (low, high) = match token.split_once('-') {
                Some((low, high)) => (
                    parse_code(spec, low.trim(), kind)?,
                    parse_code(spec, high.trim(), kind)?,
                ),
                None => {
                    let value = parse_code(spec, token, kind)?;
                    (value, value)
                }
            };
            if low > high {
                return Err(invalid(spec, "descending interval"));
            }
            intervals.push((low, high));
        }
        if intervals.is_empty() {
            return Err(invalid(spec, "no tokens"));
        }
        Ok(RangeSet { intervals })
    }

    /// Whether `value` falls inside any interval.
    pub fn contains(&self, value: u16) -> bool {
        self.intervals
            .iter()
            .any(|&(low, high)| value >= low && value <= high)
    }

    /// The lowest value in the set.
    pub fn min_value(&self) -> u16 {
        // parse() guarantees at least one interval
        self.intervals.iter().map(|&(low, _)| low).min().unwrap_or(0)
    }

    /// The highest value in the set.
    pub fn max_value(&self) -> u16 {
        self.intervals
            .iter()
            .map(|&(_, high)| high)
            .max()
            .unwrap_or(0)
    }
}

fn parse_code(spec: &str, token: &str, kind: CodeKind) -> Result<u16, CatalogError> {
    let digits = match kind {
        CodeKind::Topography => token
            .strip_prefix('C')
            .ok_or_else(|| invalid(spec, "topography code without leading C"))?,
        CodeKind::Numeric => token,
    };
    digits
        .parse()
        .map_err(|_| invalid(spec, "non-numeric code"))
}

fn invalid(spec: &str, detail: &str) -> CatalogError {
    CatalogError::InvalidRangeSpec {
        spec: spec.to_string(),
        detail: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topography_ranges() {
        let set = RangeSet::parse("C000-C148, C300-C329", CodeKind::Topography).unwrap();
        assert!(set.contains(0));
        assert!(set.contains(148));
        assert!(set.contains(301));
        assert!(!set.contains(200));
        assert_eq!(set.min_value(), 0);
        assert_eq!(set.max_value(), 329);
    }

    #[test]
    fn test_numeric_singletons_and_ranges() {
        let set = RangeSet::parse("2-3,6", CodeKind::Numeric).unwrap();
        assert!(set.contains(2));
        assert!(set.contains(3));
        assert!(set.contains(6));
        assert!(!set.contains(4));
    }

    #[test]
    fn test_year_window() {
        let set = RangeSet::parse("2007-9999", CodeKind::Numeric).unwrap();
        assert!(set.contains(2007));
        assert!(!set.contains(2006));
        assert_eq!(set.min_value(), 2007);
    }

    #[test]
    fn test_parse_errors() {
        assert!(RangeSet::parse("", CodeKind::Numeric).is_err());
        assert!(RangeSet::parse("8-3", CodeKind::Numeric).is_err());
        assert!(RangeSet::parse("180-189", CodeKind::Topography).is_err());
        assert!(RangeSet::parse("C18x", CodeKind::Topography).is_err());
    }
}
