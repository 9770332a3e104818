//! Storage key namespacing.
//!
//! Every persisted record lives under `<prefix>-<suffix>`; each key has a
//! single writer, so a failed write for one step never touches another.

use crate::wizard::WizardStep;

pub const DEFAULT_NAMESPACE: &str = "social-support-form-data";
pub const CURRENT_STEP_SUFFIX: &str = "currentStep";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageNamespace {
    prefix: String,
}

impl StorageNamespace {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn key(&self, suffix: &str) -> String {
        format!("{}-{}", self.prefix, suffix)
    }

    pub fn step_key(&self, step: WizardStep) -> String {
        self.key(step.storage_suffix())
    }

    pub fn current_step_key(&self) -> String {
        self.key(CURRENT_STEP_SUFFIX)
    }

    /// Every key the wizard owns: the three step records and the step index.
    pub fn all_keys(&self) -> Vec<String> {
        WizardStep::ALL
            .iter()
            .map(|step| self.step_key(*step))
            .chain(std::iter::once(self.current_step_key()))
            .collect()
    }
}

impl Default for StorageNamespace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_namespace_produces_expected_keys() {
        let ns = StorageNamespace::default();

        assert_eq!(
            ns.all_keys(),
            vec![
                "social-support-form-data-personal",
                "social-support-form-data-family",
                "social-support-form-data-situation",
                "social-support-form-data-currentStep",
            ]
        );
    }

    #[test]
    fn custom_prefix_is_applied() {
        let ns = StorageNamespace::new("test");
        assert_eq!(ns.step_key(WizardStep::Family), "test-family");
        assert_eq!(ns.current_step_key(), "test-currentStep");
    }
}
