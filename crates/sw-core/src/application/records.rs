use serde::{Deserialize, Serialize};

use super::lenient;

/// Gender options offered on the personal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    #[serde(rename = "self-employed")]
    SelfEmployed,
    Retired,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingStatus {
    Owned,
    Rented,
    StayingWithFamily,
    Homeless,
}

/// Step 1: who the applicant is and how to reach them.
///
/// 第一步：申请人身份与联系方式。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub national_id: String,
    pub date_of_birth: String,
    #[serde(deserialize_with = "lenient::optional")]
    pub gender: Option<Gender>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub phone: String,
    pub email: String,
}

/// Step 2: household and income.
///
/// Select and number inputs start unset; an unset value fails the
/// `required` rule rather than silently defaulting.
///
/// 第二步：家庭与收入情况。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyFinancialInfo {
    #[serde(deserialize_with = "lenient::optional")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(deserialize_with = "lenient::optional")]
    pub dependents: Option<i64>,
    #[serde(deserialize_with = "lenient::optional")]
    pub employment_status: Option<EmploymentStatus>,
    #[serde(deserialize_with = "lenient::optional")]
    pub monthly_income: Option<f64>,
    #[serde(deserialize_with = "lenient::optional")]
    pub housing_status: Option<HousingStatus>,
}

/// Step 3: free-text descriptions of the applicant's circumstances.
///
/// 第三步：申请人情况的文字描述。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SituationDescriptions {
    pub financial_situation: String,
    pub employment_circumstances: String,
    pub reason_for_applying: String,
}

/// One complete application as sent to the submission endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationData {
    pub personal_info: PersonalInfo,
    pub family_financial_info: FamilyFinancialInfo,
    pub situation_descriptions: SituationDescriptions,
}
