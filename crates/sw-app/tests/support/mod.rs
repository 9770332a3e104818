//! Shared fixtures for the sw-app integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sw_app::{WizardCoordinator, WizardOptions};
use sw_core::application::{EmploymentStatus, Gender, HousingStatus, MaritalStatus};
use sw_core::ports::KeyValueStorePort;
use sw_core::{FamilyFinancialInfo, PersonalInfo, SituationDescriptions, StorageNamespace};
use sw_infra::storage::InMemoryKeyValueStore;

pub const NAMESPACE: &str = "test-wizard";

/// In-memory store that records every write.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryKeyValueStore,
    writes: Mutex<Vec<(String, String)>>,
    write_delay: Option<Duration>,
}

impl CountingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store whose writes take `delay` before they land.
    pub fn with_write_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            write_delay: Some(delay),
            ..Self::default()
        })
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn writes_to(&self, key: &str) -> usize {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == key)
            .count()
    }

    pub async fn keys(&self) -> Vec<String> {
        self.inner.keys().await
    }
}

#[async_trait]
impl KeyValueStorePort for CountingStore {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        self.inner.remove_item(key).await
    }
}

pub fn options() -> WizardOptions {
    WizardOptions {
        namespace: StorageNamespace::new(NAMESPACE),
        debounce: Duration::from_millis(500),
    }
}

pub fn key(suffix: &str) -> String {
    format!("{NAMESPACE}-{suffix}")
}

pub async fn start_wizard(store: &Arc<CountingStore>) -> WizardCoordinator {
    WizardCoordinator::start(Arc::clone(store) as Arc<dyn KeyValueStorePort>, options()).await
}

/// Let every debounced write land.
pub async fn flush_writes() {
    tokio::time::advance(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;
}

pub fn valid_personal() -> PersonalInfo {
    PersonalInfo {
        name: "Amina Yusuf".into(),
        national_id: "784199012345".into(),
        date_of_birth: "1990-04-12".into(),
        gender: Some(Gender::Female),
        address: "12 Palm Street".into(),
        city: "Dubai".into(),
        state: "Dubai".into(),
        country: "UAE".into(),
        phone: "+971 50 123 4567".into(),
        email: "amina@example.com".into(),
    }
}

pub fn valid_family() -> FamilyFinancialInfo {
    FamilyFinancialInfo {
        marital_status: Some(MaritalStatus::Married),
        dependents: Some(2),
        employment_status: Some(EmploymentStatus::Unemployed),
        monthly_income: Some(1200.0),
        housing_status: Some(HousingStatus::Rented),
    }
}

pub fn valid_situation() -> SituationDescriptions {
    SituationDescriptions {
        financial_situation: "Savings are exhausted.".into(),
        employment_circumstances: "Laid off in March.".into(),
        reason_for_applying: "Need help covering rent.".into(),
    }
}

/// Fill every step with valid data, walking forward to the final step.
pub async fn complete_all_steps(wizard: &mut WizardCoordinator) {
    wizard.personal_mut().replace_values(valid_personal());
    wizard.next().await;
    wizard.family_mut().replace_values(valid_family());
    wizard.next().await;
    wizard.situation_mut().replace_values(valid_situation());
}
