//! Coded-value enumerations.
//!
//! This module provides enum representations for the ICD-O-3 behavior code,
//! the registry laterality code, and the multiple-primary determination
//! verdict.

/// ICD-O-3 behavior code of a tumor.
///
/// # Examples
///
/// ```
/// use mph_types::Behavior;
///
/// let behavior = Behavior::from_code('3');
/// assert_eq!(behavior, Some(Behavior::Malignant));
/// assert_eq!(Behavior::InSitu.code(), '2');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    /// Benign (/0).
    Benign,
    /// Uncertain whether benign or malignant (/1).
    Uncertain,
    /// In situ (/2).
    InSitu,
    /// Malignant, primary site (/3).
    Malignant,
    /// Malignant, metastatic site (/6).
    Metastatic,
}

impl Behavior {
    /// Creates a Behavior from its single-digit code.
    ///
    /// Returns `None` for anything outside the ICD-O-3 behavior digits
    /// accepted for registry reporting (0, 1, 2, 3, 6).
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(Self::Benign),
            '1' => Some(Self::Uncertain),
            '2' => Some(Self::InSitu),
            '3' => Some(Self::Malignant),
            '6' => Some(Self::Metastatic),
            _ => None,
        }
    }

    /// Returns the single-digit code for this behavior.
    pub fn code(self) -> char {
        match self {
            Self::Benign => '0',
            Self::Uncertain => '1',
            Self::InSitu => '2',
            Self::Malignant => '3',
            Self::Metastatic => '6',
        }
    }

    /// Returns the code as a numeric digit.
    pub fn digit(self) -> u8 {
        match self {
            Self::Benign => 0,
            Self::Uncertain => 1,
            Self::InSitu => 2,
            Self::Malignant => 3,
            Self::Metastatic => 6,
        }
    }
}

/// Registry laterality code of a tumor.
///
/// Code 3 ("only one side involved, side unspecified") and code 9 (unknown)
/// are distinct from code 0 (site is not a paired organ); rules that compare
/// sides treat all three as insufficient information rather than as a side.
///
/// # Examples
///
/// ```
/// use mph_types::Laterality;
///
/// assert_eq!(Laterality::from_code('1'), Some(Laterality::Right));
/// assert_eq!(Laterality::Left.code(), '2');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Laterality {
    /// Not a paired site (0).
    NotPaired,
    /// Right side (1).
    Right,
    /// Left side (2).
    Left,
    /// One side involved, right or left unspecified (3).
    OneSide,
    /// Bilateral involvement (4).
    Bilateral,
    /// Midline tumor (5).
    Midline,
    /// Paired site but laterality unknown (9).
    Unknown,
}

impl Laterality {
    /// Creates a Laterality from its single-digit code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(Self::NotPaired),
            '1' => Some(Self::Right),
            '2' => Some(Self::Left),
            '3' => Some(Self::OneSide),
            '4' => Some(Self::Bilateral),
            '5' => Some(Self::Midline),
            '9' => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Returns the single-digit code for this laterality.
    pub fn code(self) -> char {
        match self {
            Self::NotPaired => '0',
            Self::Right => '1',
            Self::Left => '2',
            Self::OneSide => '3',
            Self::Bilateral => '4',
            Self::Midline => '5',
            Self::Unknown => '9',
        }
    }

    /// Whether this code names a definite single side.
    pub fn is_side(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }
}

/// The verdict of a multiple-primary determination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MpResult {
    /// The two reported tumors are the same primary cancer.
    SinglePrimary,
    /// The two reported tumors are separate primary cancers.
    MultiplePrimaries,
    /// The rules cannot decide with the information provided; manual
    /// review is required.
    Questionable,
    /// The inputs fall outside the scope of every rule set (for example a
    /// diagnosis year before any rule revision applies).
    NotApplicable,
}
