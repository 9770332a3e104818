use serde::{Deserialize, Serialize};

/// One of the three sequential pages of the wizard.
///
/// 向导的三个页面之一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Personal,
    Family,
    Situation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Personal,
        WizardStep::Family,
        WizardStep::Situation,
    ];
    pub const FIRST: WizardStep = WizardStep::Personal;
    pub const LAST: WizardStep = WizardStep::Situation;

    pub fn index(self) -> usize {
        match self {
            WizardStep::Personal => 0,
            WizardStep::Family => 1,
            WizardStep::Situation => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Following step, clamped at the last one.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(Self::LAST)
    }

    /// Preceding step, clamped at the first one.
    pub fn previous(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(Self::from_index)
            .unwrap_or(Self::FIRST)
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Namespace suffix for this step's persisted record.
    pub fn storage_suffix(self) -> &'static str {
        match self {
            WizardStep::Personal => "personal",
            WizardStep::Family => "family",
            WizardStep::Situation => "situation",
        }
    }

    /// Parse a persisted step index (`"0"`, `"1"`, `"2"`).
    ///
    /// Anything else, including out-of-range numbers, yields `None`.
    pub fn parse_stored(raw: &str) -> Option<Self> {
        raw.trim().parse::<usize>().ok().and_then(Self::from_index)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::FIRST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_clamps_at_bounds() {
        assert_eq!(WizardStep::Personal.previous(), WizardStep::Personal);
        assert_eq!(WizardStep::Personal.next(), WizardStep::Family);
        assert_eq!(WizardStep::Family.next(), WizardStep::Situation);
        assert_eq!(WizardStep::Situation.next(), WizardStep::Situation);
        assert_eq!(WizardStep::Situation.previous(), WizardStep::Family);
    }

    #[test]
    fn parse_stored_accepts_only_known_indices() {
        assert_eq!(WizardStep::parse_stored("1"), Some(WizardStep::Family));
        assert_eq!(WizardStep::parse_stored(" 2\n"), Some(WizardStep::Situation));
        assert_eq!(WizardStep::parse_stored("3"), None);
        assert_eq!(WizardStep::parse_stored("-1"), None);
        assert_eq!(WizardStep::parse_stored("two"), None);
    }

    #[test]
    fn index_round_trips_for_all_steps() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()), Some(step));
        }
        assert_eq!(WizardStep::from_index(3), None);
    }
}
