//! Field validation rules for the three wizard steps.
//!
//! Rules only produce stable message keys; turning a key into a localized
//! string is the i18n layer's job.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::records::{FamilyFinancialInfo, PersonalInfo, SituationDescriptions};

static NATIONAL_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{8,}$").expect("valid national id pattern"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[1-9]\d{7,15}$").expect("valid phone pattern"));
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

const COMMON_REQUIRED: &str = "common.required";

/// Which rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    Required,
    InvalidFormat,
    OutOfRange,
}

/// A single failed rule on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{field}: {message_key}")]
pub struct FieldError {
    pub field: &'static str,
    pub kind: ValidationErrorKind,
    /// i18n message key, e.g. `validation.emailInvalid`.
    pub message_key: &'static str,
}

/// Map of field identifier to the first rule that field failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.values()
    }

    /// Keep only the errors whose field satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|field, _| keep(field));
    }

    fn push(&mut self, field: &'static str, kind: ValidationErrorKind, message_key: &'static str) {
        // First failing rule wins, matching how the form shows one message per field.
        self.0.entry(field).or_insert(FieldError {
            field,
            kind,
            message_key,
        });
    }

    fn required(&mut self, field: &'static str, message_key: &'static str) {
        self.push(field, ValidationErrorKind::Required, message_key);
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_national_id(value: &str) -> bool {
    NATIONAL_ID_PATTERN.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_PATTERN.is_match(&compact)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

pub fn validate_personal_info(data: &PersonalInfo) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&data.name) {
        errors.required("name", "validation.nameRequired");
    }

    if is_blank(&data.national_id) {
        errors.required("nationalId", "validation.nationalIdRequired");
    } else if !is_valid_national_id(&data.national_id) {
        errors.push(
            "nationalId",
            ValidationErrorKind::InvalidFormat,
            "validation.nationalIdInvalid",
        );
    }

    if is_blank(&data.date_of_birth) {
        errors.required("dateOfBirth", "validation.dateOfBirthRequired");
    }
    if data.gender.is_none() {
        errors.required("gender", COMMON_REQUIRED);
    }
    if is_blank(&data.address) {
        errors.required("address", "validation.addressRequired");
    }
    if is_blank(&data.city) {
        errors.required("city", "validation.cityRequired");
    }
    if is_blank(&data.state) {
        errors.required("state", "validation.stateRequired");
    }
    if is_blank(&data.country) {
        errors.required("country", "validation.countryRequired");
    }

    if is_blank(&data.phone) {
        errors.required("phone", "validation.phoneRequired");
    } else if !is_valid_phone(&data.phone) {
        errors.push(
            "phone",
            ValidationErrorKind::InvalidFormat,
            "validation.phoneInvalid",
        );
    }

    if is_blank(&data.email) {
        errors.required("email", "validation.emailRequired");
    } else if !is_valid_email(&data.email) {
        errors.push(
            "email",
            ValidationErrorKind::InvalidFormat,
            "validation.emailInvalid",
        );
    }

    errors
}

pub fn validate_family_info(data: &FamilyFinancialInfo) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if data.marital_status.is_none() {
        errors.required("maritalStatus", COMMON_REQUIRED);
    }

    match data.dependents {
        None => errors.required("dependents", COMMON_REQUIRED),
        Some(n) if n < 0 => errors.push(
            "dependents",
            ValidationErrorKind::OutOfRange,
            "validation.dependentsInvalid",
        ),
        Some(_) => {}
    }

    if data.employment_status.is_none() {
        errors.required("employmentStatus", COMMON_REQUIRED);
    }

    match data.monthly_income {
        None => errors.required("monthlyIncome", COMMON_REQUIRED),
        Some(income) if !income.is_finite() || income < 0.0 => errors.push(
            "monthlyIncome",
            ValidationErrorKind::OutOfRange,
            "validation.incomeInvalid",
        ),
        Some(_) => {}
    }

    if data.housing_status.is_none() {
        errors.required("housingStatus", COMMON_REQUIRED);
    }

    errors
}

pub fn validate_situation(data: &SituationDescriptions) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&data.financial_situation) {
        errors.required("financialSituation", COMMON_REQUIRED);
    }
    if is_blank(&data.employment_circumstances) {
        errors.required("employmentCircumstances", COMMON_REQUIRED);
    }
    if is_blank(&data.reason_for_applying) {
        errors.required("reasonForApplying", COMMON_REQUIRED);
    }

    errors
}
