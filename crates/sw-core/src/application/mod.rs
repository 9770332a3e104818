//! Application domain module.
//!
//! The three step records that make up one benefits application, the
//! validation rules for each of them, and the trait the form layer uses to
//! treat them uniformly.

mod lenient;
pub mod records;
pub mod validation;

pub use records::{
    ApplicationData, EmploymentStatus, FamilyFinancialInfo, Gender, HousingStatus, MaritalStatus,
    PersonalInfo, SituationDescriptions,
};
pub use validation::{
    validate_family_info, validate_personal_info, validate_situation, FieldError, FieldErrors,
    ValidationErrorKind,
};

use serde::{de::DeserializeOwned, Serialize};

use crate::wizard::WizardStep;

/// A record edited by exactly one wizard step.
///
/// 由单个向导步骤编辑的记录。
pub trait StepRecord:
    Clone + Default + PartialEq + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Step that owns this record.
    const STEP: WizardStep;

    /// Field identifiers as they appear in the JSON shape.
    const FIELDS: &'static [&'static str];

    /// Evaluate every required/format rule for the record.
    fn validate(&self) -> FieldErrors;

    fn has_field(name: &str) -> bool {
        Self::FIELDS.contains(&name)
    }
}

impl StepRecord for PersonalInfo {
    const STEP: WizardStep = WizardStep::Personal;
    const FIELDS: &'static [&'static str] = &[
        "name",
        "nationalId",
        "dateOfBirth",
        "gender",
        "address",
        "city",
        "state",
        "country",
        "phone",
        "email",
    ];

    fn validate(&self) -> FieldErrors {
        validate_personal_info(self)
    }
}

impl StepRecord for FamilyFinancialInfo {
    const STEP: WizardStep = WizardStep::Family;
    const FIELDS: &'static [&'static str] = &[
        "maritalStatus",
        "dependents",
        "employmentStatus",
        "monthlyIncome",
        "housingStatus",
    ];

    fn validate(&self) -> FieldErrors {
        validate_family_info(self)
    }
}

impl StepRecord for SituationDescriptions {
    const STEP: WizardStep = WizardStep::Situation;
    const FIELDS: &'static [&'static str] = &[
        "financialSituation",
        "employmentCircumstances",
        "reasonForApplying",
    ];

    fn validate(&self) -> FieldErrors {
        validate_situation(self)
    }
}
