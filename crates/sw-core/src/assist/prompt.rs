use serde::{Deserialize, Serialize};

use crate::application::SituationDescriptions;
use crate::wizard::WizardStep;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that helps people write professional \
applications for government social support. Be empathetic, professional, and factual. Keep \
responses concise but complete.";

const NOT_SPECIFIED: &str = "Not specified";

/// Free-text field that can request a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionField {
    FinancialSituation,
    EmploymentCircumstances,
    ReasonForApplying,
}

impl SuggestionField {
    pub const ALL: [SuggestionField; 3] = [
        SuggestionField::FinancialSituation,
        SuggestionField::EmploymentCircumstances,
        SuggestionField::ReasonForApplying,
    ];

    /// Step whose record receives an accepted suggestion.
    pub fn step(self) -> WizardStep {
        WizardStep::Situation
    }

    /// Field identifier in the record's JSON shape.
    pub fn field_name(self) -> &'static str {
        match self {
            SuggestionField::FinancialSituation => "financialSituation",
            SuggestionField::EmploymentCircumstances => "employmentCircumstances",
            SuggestionField::ReasonForApplying => "reasonForApplying",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.field_name() == name)
    }

    /// Current value of this field in `data`.
    pub fn value_in(self, data: &SituationDescriptions) -> &str {
        match self {
            SuggestionField::FinancialSituation => &data.financial_situation,
            SuggestionField::EmploymentCircumstances => &data.employment_circumstances,
            SuggestionField::ReasonForApplying => &data.reason_for_applying,
        }
    }

    /// Mutable slot for this field in `data`.
    pub fn slot_in(self, data: &mut SituationDescriptions) -> &mut String {
        match self {
            SuggestionField::FinancialSituation => &mut data.financial_situation,
            SuggestionField::EmploymentCircumstances => &mut data.employment_circumstances,
            SuggestionField::ReasonForApplying => &mut data.reason_for_applying,
        }
    }

    fn field_prompt(self, current_value: &str, context: &str) -> String {
        match self {
            SuggestionField::FinancialSituation => format!(
                "Help me describe my current financial situation for a social support application. \
Context: {context}. Current text: \"{current_value}\". Please write a clear, honest description of \
financial hardship that would be appropriate for a government assistance application. Keep it \
professional and factual."
            ),
            SuggestionField::EmploymentCircumstances => format!(
                "Help me describe my employment circumstances for a social support application. \
Context: {context}. Current text: \"{current_value}\". Please write a clear description of my \
employment situation and any challenges I'm facing. Keep it professional and factual."
            ),
            SuggestionField::ReasonForApplying => format!(
                "Help me explain why I'm applying for financial assistance. Context: {context}. \
Current text: \"{current_value}\". Please write a compelling but honest reason for needing \
government financial support. Keep it professional and factual."
            ),
        }
    }
}

/// Full prompt sent to the suggestion endpoint: system instruction, blank
/// line, field-specific request.
pub fn compose_prompt(field: SuggestionField, current_value: &str, context: &str) -> String {
    format!(
        "{SYSTEM_PROMPT}\n\n{}",
        field.field_prompt(current_value, context)
    )
}

/// Context string summarising what the applicant already wrote.
pub fn situation_context(data: &SituationDescriptions) -> String {
    fn or_unspecified(value: &str) -> &str {
        if value.trim().is_empty() {
            NOT_SPECIFIED
        } else {
            value
        }
    }

    format!(
        "Employment: {}, Financial: {}",
        or_unspecified(&data.employment_circumstances),
        or_unspecified(&data.financial_situation)
    )
}
