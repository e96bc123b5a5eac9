//! Partially known diagnosis dates.
//!
//! Registry records routinely carry diagnosis dates with unknown components:
//! a known year with an unknown month, or a fully unknown date. [`PartialDate`]
//! keeps each component independently optional and absorbs the registry
//! sentinel values at construction time.

/// A diagnosis date in which any component may be unknown.
///
/// Unknown components are `None`. The registry sentinels (`9999` for year,
/// `99` for month or day), blank strings, and non-numeric text all map to
/// `None` rather than an error; an unparseable date is valid input that
/// simply provides no information.
///
/// # Examples
///
/// ```
/// use mph_types::PartialDate;
///
/// let dx = PartialDate::from_fields("2015", "06", "99");
/// assert_eq!(dx.year, Some(2015));
/// assert_eq!(dx.month, Some(6));
/// assert_eq!(dx.day, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialDate {
    /// Four-digit diagnosis year, if known.
    pub year: Option<u16>,
    /// Diagnosis month (1-12), if known.
    pub month: Option<u8>,
    /// Diagnosis day of month (1-31), if known.
    pub day: Option<u8>,
}

impl PartialDate {
    /// A fully unknown date.
    pub const UNKNOWN: PartialDate = PartialDate {
        year: None,
        month: None,
        day: None,
    };

    /// Creates a date from already-validated components.
    pub fn new(year: Option<u16>, month: Option<u8>, day: Option<u8>) -> Self {
        PartialDate { year, month, day }
    }

    /// Creates a date from raw registry field strings.
    ///
    /// Sentinels, blanks, and out-of-range values become unknown components.
    pub fn from_fields(year: &str, month: &str, day: &str) -> Self {
        PartialDate {
            year: parse_component(year, 1850, 9998).map(|v| v as u16),
            month: parse_component(month, 1, 12).map(|v| v as u8),
            day: parse_component(day, 1, 31).map(|v| v as u8),
        }
    }

    /// Whether the diagnosis year is known.
    pub fn has_year(&self) -> bool {
        self.year.is_some()
    }

    /// Whether all three components are known.
    pub fn is_complete(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }
}

fn parse_component(raw: &str, min: u32, max: u32) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: u32 = trimmed.parse().ok()?;
    if value < min || value > max {
        return None;
    }
    Some(value)
}
