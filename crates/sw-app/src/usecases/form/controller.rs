//! Per-step form controller.
//!
//! Holds the in-memory record for one step, decides which validation errors
//! are visible, and hands every change to its persistence adapter.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use sw_core::application::{FieldErrors, StepRecord};
use sw_core::WizardStep;

use super::persistence_adapter::PersistenceAdapter;

/// Errors produced when applying loosely-typed edits to a form.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("unknown field `{field}` for the {step:?} step")]
    UnknownField { step: WizardStep, field: String },
    #[error("form patch must be a JSON object")]
    NotAnObject,
    #[error("invalid value for the {step:?} step: {source}")]
    InvalidValue {
        step: WizardStep,
        #[source]
        source: serde_json::Error,
    },
}

pub struct StepFormController<T: StepRecord> {
    values: T,
    adapter: PersistenceAdapter<T>,
    visible_errors: FieldErrors,
    dirty: BTreeSet<&'static str>,
    touched: BTreeSet<&'static str>,
    /// Set by an explicit validation request; every error is shown until reset.
    reveal_all: bool,
    restored: bool,
}

impl<T: StepRecord> StepFormController<T> {
    /// Load the saved record (if any) and start tracking changes.
    ///
    /// Loaded values replace the defaults wholesale.
    pub async fn mount(adapter: PersistenceAdapter<T>) -> Self {
        let loaded = adapter.load().await;
        let restored = loaded.is_some();
        debug!(step = ?T::STEP, restored, "form mounted");

        Self {
            values: loaded.unwrap_or_default(),
            adapter,
            visible_errors: FieldErrors::new(),
            dirty: BTreeSet::new(),
            touched: BTreeSet::new(),
            reveal_all: false,
            restored,
        }
    }

    pub fn step(&self) -> WizardStep {
        T::STEP
    }

    pub fn values(&self) -> &T {
        &self.values
    }

    /// Errors currently shown to the user: those of dirty or touched fields,
    /// or all of them after [`Self::trigger_validation`].
    pub fn errors(&self) -> &FieldErrors {
        &self.visible_errors
    }

    /// Full validation of the current values, regardless of visibility.
    pub fn is_valid(&self) -> bool {
        self.values.validate().is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn dirty_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.dirty.iter().copied()
    }

    pub fn touched_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.touched.iter().copied()
    }

    /// Whether the values came from storage when the form was mounted.
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    pub fn adapter(&self) -> &PersistenceAdapter<T> {
        &self.adapter
    }

    /// Edit the record in place.
    pub fn update(&mut self, edit: impl FnOnce(&mut T)) {
        let mut next = self.values.clone();
        edit(&mut next);
        self.apply(next);
    }

    /// Shallow-merge a JSON object into the record, e.g. `{"city": "Dubai"}`.
    pub fn patch(&mut self, changes: Value) -> Result<(), FormError> {
        let Value::Object(changes) = changes else {
            return Err(FormError::NotAnObject);
        };
        if let Some(field) = changes.keys().find(|k| !T::has_field(k)) {
            return Err(FormError::UnknownField {
                step: T::STEP,
                field: field.clone(),
            });
        }

        let mut merged = serde_json::to_value(&self.values).map_err(|source| FormError::InvalidValue {
            step: T::STEP,
            source,
        })?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(changes);
        }
        let next: T = serde_json::from_value(merged).map_err(|source| FormError::InvalidValue {
            step: T::STEP,
            source,
        })?;

        self.apply(next);
        Ok(())
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<Value>) -> Result<(), FormError> {
        let mut changes = serde_json::Map::new();
        changes.insert(field.to_string(), value.into());
        self.patch(Value::Object(changes))
    }

    /// Record that `field` lost focus; its errors become visible.
    pub fn mark_touched(&mut self, field: &str) -> Result<(), FormError> {
        let name = Self::field_name(field)?;
        if self.touched.insert(name) {
            self.refresh_errors();
        }
        Ok(())
    }

    /// Authoritative validation: reveal every error and report whether the
    /// step passes.
    pub fn trigger_validation(&mut self) -> bool {
        self.reveal_all = true;
        self.refresh_errors();
        let valid = self.visible_errors.is_empty();
        debug!(step = ?T::STEP, valid, errors = self.visible_errors.len(), "step validated");
        valid
    }

    /// Replace the record wholesale, as if every changed field was edited.
    pub fn replace_values(&mut self, values: T) {
        self.apply(values);
    }

    /// Return to empty defaults without writing to storage.
    pub fn reset(&mut self) {
        self.values = T::default();
        self.visible_errors = FieldErrors::new();
        self.dirty.clear();
        self.touched.clear();
        self.reveal_all = false;
        self.restored = false;
    }

    fn apply(&mut self, next: T) {
        let changed = changed_fields(&self.values, &next);
        if changed.is_empty() {
            return;
        }
        self.values = next;
        self.dirty.extend(changed);
        self.refresh_errors();
        self.adapter.save(&self.values);
    }

    fn refresh_errors(&mut self) {
        let mut errors = self.values.validate();
        if !self.reveal_all {
            let (dirty, touched) = (&self.dirty, &self.touched);
            errors.retain(|field| dirty.contains(field) || touched.contains(field));
        }
        self.visible_errors = errors;
    }

    fn field_name(field: &str) -> Result<&'static str, FormError> {
        T::FIELDS
            .iter()
            .copied()
            .find(|name| *name == field)
            .ok_or_else(|| FormError::UnknownField {
                step: T::STEP,
                field: field.to_string(),
            })
    }
}

/// Fields whose JSON value differs between two records.
fn changed_fields<T: StepRecord>(before: &T, after: &T) -> Vec<&'static str> {
    if before == after {
        return Vec::new();
    }
    match (serde_json::to_value(before), serde_json::to_value(after)) {
        (Ok(Value::Object(a)), Ok(Value::Object(b))) => T::FIELDS
            .iter()
            .copied()
            .filter(|field| a.get(*field) != b.get(*field))
            .collect(),
        _ => T::FIELDS.to_vec(),
    }
}

/// Step-agnostic view of a form, used by the wizard to act on whichever
/// step is active.
#[async_trait]
pub trait StepForm: Send + Sync {
    fn step(&self) -> WizardStep;
    fn is_valid(&self) -> bool;
    fn errors(&self) -> &FieldErrors;
    fn trigger_validation(&mut self) -> bool;
    fn reset(&mut self);
    async fn has_saved_data(&self) -> bool;
    async fn clear_saved_data(&self);
}

#[async_trait]
impl<T: StepRecord> StepForm for StepFormController<T> {
    fn step(&self) -> WizardStep {
        T::STEP
    }

    fn is_valid(&self) -> bool {
        StepFormController::is_valid(self)
    }

    fn errors(&self) -> &FieldErrors {
        StepFormController::errors(self)
    }

    fn trigger_validation(&mut self) -> bool {
        StepFormController::trigger_validation(self)
    }

    fn reset(&mut self) {
        StepFormController::reset(self)
    }

    async fn has_saved_data(&self) -> bool {
        self.adapter.exists().await
    }

    async fn clear_saved_data(&self) {
        self.adapter.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::form::DEFAULT_DEBOUNCE;
    use serde_json::json;
    use std::sync::Arc;
    use sw_core::ports::KeyValueStorePort;
    use sw_core::{FamilyFinancialInfo, PersonalInfo};
    use sw_infra::storage::InMemoryKeyValueStore;

    async fn personal_form() -> (StepFormController<PersonalInfo>, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let adapter = PersistenceAdapter::new(
            Arc::clone(&store) as Arc<dyn KeyValueStorePort>,
            "test-personal",
            DEFAULT_DEBOUNCE,
        );
        (StepFormController::mount(adapter).await, store)
    }

    #[tokio::test(start_paused = true)]
    async fn untouched_fields_show_no_errors() {
        let (mut form, _) = personal_form().await;

        assert!(form.errors().is_empty());
        assert!(!form.is_valid());

        form.set_field("email", "not-an-email").unwrap();
        let visible: Vec<_> = form.errors().fields().collect();
        assert_eq!(visible, vec!["email"]);
        assert_eq!(
            form.errors().get("email").unwrap().message_key,
            "validation.emailInvalid"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn blur_reveals_required_error() {
        let (mut form, _) = personal_form().await;

        form.mark_touched("name").unwrap();

        assert!(form.errors().contains("name"));
        assert!(!form.is_dirty());
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_validation_reveals_everything() {
        let (mut form, _) = personal_form().await;

        assert!(!form.trigger_validation());
        assert_eq!(form.errors().len(), PersonalInfo::FIELDS.len());

        form.reset();
        assert!(form.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn patch_rejects_unknown_field() {
        let (mut form, _) = personal_form().await;

        let err = form.patch(json!({ "shoeSize": 42 })).unwrap_err();
        assert!(matches!(err, FormError::UnknownField { field, .. } if field == "shoeSize"));
        assert!(matches!(
            form.patch(json!("Alice")).unwrap_err(),
            FormError::NotAnObject
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn patch_rejects_unknown_enum_value() {
        let (mut form, _) = personal_form().await;

        let err = form.set_field("gender", "robot").unwrap_err();
        assert!(matches!(err, FormError::InvalidValue { .. }));
        assert_eq!(form.values(), &PersonalInfo::default());
    }

    #[tokio::test(start_paused = true)]
    async fn patch_tracks_only_changed_fields() {
        let (mut form, _) = personal_form().await;

        form.patch(json!({ "name": "Alice", "city": "" })).unwrap();

        assert_eq!(form.values().name, "Alice");
        assert_eq!(form.dirty_fields().collect::<Vec<_>>(), vec!["name"]);
    }

    #[tokio::test(start_paused = true)]
    async fn family_form_accepts_form_style_numbers() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let adapter = PersistenceAdapter::<FamilyFinancialInfo>::new(
            store as Arc<dyn KeyValueStorePort>,
            "test-family",
            DEFAULT_DEBOUNCE,
        );
        let mut form = StepFormController::mount(adapter).await;

        form.patch(json!({ "dependents": "2", "monthlyIncome": "1500.5" }))
            .unwrap();

        assert_eq!(form.values().dependents, Some(2));
        assert_eq!(form.values().monthly_income, Some(1500.5));
        assert!(!form.errors().contains("dependents"));
    }

    #[tokio::test(start_paused = true)]
    async fn mount_restores_saved_values() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store
            .set_item("test-personal", r#"{"name":"Saved","city":"Abu Dhabi"}"#)
            .await
            .unwrap();
        let adapter = PersistenceAdapter::<PersonalInfo>::new(
            store as Arc<dyn KeyValueStorePort>,
            "test-personal",
            DEFAULT_DEBOUNCE,
        );

        let form = StepFormController::mount(adapter).await;

        assert!(form.was_restored());
        assert_eq!(form.values().name, "Saved");
        assert_eq!(form.values().city, "Abu Dhabi");
        assert!(!form.is_dirty());
    }
}
