//! The two symmetric labels a signal or report can take.
use crate::experiment::errors::{ExperimentError, ExperimentResult};
use std::str::FromStr;

/// Signal / report label.
///
/// The experiment uses two candy labels, `"MM"` (the first label) and `"GB"`
/// (the second label). Every strategy and payment rule is written in terms of
/// these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Mm,
    Gb,
}

impl Label {
    /// Both labels in canonical order (first label first).
    pub const ALL: [Label; 2] = [Label::Mm, Label::Gb];

    /// The label that differs from `self`.
    pub fn other(self) -> Label {
        match self {
            Label::Mm => Label::Gb,
            Label::Gb => Label::Mm,
        }
    }

    /// Position in [`Label::ALL`]; used to index 2×2 tables.
    pub fn index(self) -> usize {
        match self {
            Label::Mm => 0,
            Label::Gb => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Mm => "MM",
            Label::Gb => "GB",
        }
    }
}

impl FromStr for Label {
    type Err = ExperimentError;

    /// Parse `"MM"` / `"GB"` (case-insensitive).
    fn from_str(s: &str) -> ExperimentResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "MM" => Ok(Label::Mm),
            "GB" => Ok(Label::Gb),
            _ => Err(ExperimentError::UnknownLabel { label: s.to_string() }),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Labels parse case-insensitively and print back in canonical form.
    //
    // Given
    // -----
    // - Strings "mm", " GB ", and "xx".
    //
    // Expect
    // ------
    // - The first two parse and display as "MM"/"GB"; "xx" is rejected.
    fn label_parses_and_displays() {
        // Act
        let mm: Label = "mm".parse().expect("mm should parse");
        let gb: Label = " GB ".parse().expect("GB should parse");
        let bad = "xx".parse::<Label>();

        // Assert
        assert_eq!(mm.to_string(), "MM");
        assert_eq!(gb.to_string(), "GB");
        assert_eq!(bad, Err(ExperimentError::UnknownLabel { label: "xx".to_string() }));
    }

    #[test]
    // Purpose
    // -------
    // `other` is an involution and `index` follows `ALL`.
    fn other_and_index_are_consistent() {
        for (i, label) in Label::ALL.into_iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_ne!(label.other(), label);
            assert_eq!(label.other().other(), label);
        }
    }
}
