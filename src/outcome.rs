//! The comparison outcome taxonomy.
//!
//! Every compared cell pair is classified into exactly one [`Outcome`].
//! Outcomes split into an acceptable set ([`Outcome::ok`]), an unacceptable
//! set ([`Outcome::foul`]), and the two structural outcomes `Shorter` /
//! `Longer` which belong to neither set. Each outcome carries a fixed
//! display color pair used by downstream consumers.

use serde::{Deserialize, Serialize};

/// Classification of one compared cell pair or one structural row-length
/// deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Values are exactly equal.
    Equals,
    /// Values match, possibly expressed in different formats.
    Matching,
    /// Values are nearly equal (rounding, date compared at coarse precision).
    Almost,
    /// Values differ within an accepted tolerance band.
    Accepted,
    /// Comparison was deliberately omitted.
    Omitted,
    /// Values are different.
    Different,
    /// At least one value is invalid for the comparison asked of it.
    Corrupted,
    /// The measured row is shorter than the reference row.
    Shorter,
    /// The measured row is longer than the reference row.
    Longer,
}

/// Display color pair for one outcome, as RGB strings ("RRGGBB").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellColors {
    /// Color applied to the inserted measured-side row.
    pub measured: &'static str,
    /// Color applied to the reference-side row.
    pub reference: &'static str,
}

impl Outcome {
    /// All outcomes, in declaration order. Used for deterministic
    /// iteration over summary buckets.
    pub const ALL: [Outcome; 9] = [
        Outcome::Equals,
        Outcome::Matching,
        Outcome::Almost,
        Outcome::Accepted,
        Outcome::Omitted,
        Outcome::Different,
        Outcome::Corrupted,
        Outcome::Shorter,
        Outcome::Longer,
    ];

    /// Whether the outcome is acceptable.
    pub fn ok(&self) -> bool {
        matches!(
            self,
            Outcome::Equals
                | Outcome::Matching
                | Outcome::Almost
                | Outcome::Accepted
                | Outcome::Omitted
        )
    }

    /// Whether the outcome is unacceptable. Structural outcomes are
    /// neither `ok` nor `foul`.
    pub fn foul(&self) -> bool {
        matches!(self, Outcome::Different | Outcome::Corrupted)
    }

    /// Stable uppercase name, also used as the serde representation and
    /// as the key in summary count maps.
    pub fn name(&self) -> &'static str {
        match self {
            Outcome::Equals => "EQUALS",
            Outcome::Matching => "MATCHING",
            Outcome::Almost => "ALMOST",
            Outcome::Accepted => "ACCEPTED",
            Outcome::Omitted => "OMITTED",
            Outcome::Different => "DIFFERENT",
            Outcome::Corrupted => "CORRUPTED",
            Outcome::Shorter => "SHORTER",
            Outcome::Longer => "LONGER",
        }
    }

    /// The display color pair for this outcome.
    pub fn cell_colors(&self) -> CellColors {
        match self {
            Outcome::Equals => CellColors {
                measured: "FFFFFF",
                reference: "FFFFFF",
            },
            Outcome::Matching => CellColors {
                measured: "FFFFFF",
                reference: "CCFFCC",
            },
            Outcome::Almost => CellColors {
                measured: "FFFFFF",
                reference: "CCFFFF",
            },
            Outcome::Accepted => CellColors {
                measured: "CCFF99",
                reference: "FFFF99",
            },
            Outcome::Omitted => CellColors {
                measured: "CCCCCC",
                reference: "CCCCCC",
            },
            Outcome::Different => CellColors {
                measured: "CCFFCC",
                reference: "FF9999",
            },
            Outcome::Corrupted => CellColors {
                measured: "FF9999",
                reference: "FF0000",
            },
            Outcome::Shorter => CellColors {
                measured: "E0CCFF",
                reference: "990000",
            },
            Outcome::Longer => CellColors {
                measured: "660066",
                reference: "FFFF99",
            },
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
