mod support;

use std::time::Duration;

use sw_core::ports::KeyValueStorePort;
use sw_core::{PersonalInfo, WizardStep};

use support::{
    flush_writes, key, start_wizard, valid_family, valid_personal, CountingStore,
};

#[tokio::test(start_paused = true)]
async fn wizard_flow_rapid_edits_collapse_into_one_write() {
    let store = CountingStore::new();
    let mut wizard = start_wizard(&store).await;

    wizard.personal_mut().set_field("name", "A").unwrap();
    tokio::time::advance(Duration::from_millis(100)).await;
    wizard.personal_mut().set_field("name", "Al").unwrap();
    flush_writes().await;

    assert_eq!(store.writes_to(&key("personal")), 1);
    let stored = store.get_item(&key("personal")).await.unwrap().unwrap();
    assert!(stored.contains(r#""name":"Al""#), "stored: {stored}");
    assert_eq!(store.writes().len(), 1, "no other key is written");
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_fresh_instance_reloads_typed_values() {
    let store = CountingStore::new();
    {
        let mut wizard = start_wizard(&store).await;
        assert!(!wizard.restore_pending());
        wizard.personal_mut().set_field("city", "Sharjah").unwrap();
        wizard
            .family_mut()
            .set_field("dependents", "3")
            .unwrap();
        flush_writes().await;
    }

    let wizard = start_wizard(&store).await;

    assert!(wizard.restore_pending());
    assert!(wizard.has_stored_data().await);
    assert_eq!(wizard.personal().values().city, "Sharjah");
    assert_eq!(wizard.family().values().dependents, Some(3));
    assert!(wizard.personal().was_restored());
    assert!(!wizard.situation().was_restored());
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_next_on_invalid_step_reveals_errors_and_stays() {
    let store = CountingStore::new();
    let mut wizard = start_wizard(&store).await;
    assert!(wizard.personal().errors().is_empty());

    let state = wizard.next().await;

    assert_eq!(state.current_step, WizardStep::Personal);
    assert_eq!(wizard.personal().errors().len(), 10);
    assert!(store.get_item(&key("currentStep")).await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_next_on_valid_step_advances_and_persists_index() {
    let store = CountingStore::new();
    let mut wizard = start_wizard(&store).await;
    wizard.personal_mut().replace_values(valid_personal());
    assert!(wizard.can_proceed());

    let state = wizard.next().await;

    assert_eq!(state.current_step, WizardStep::Family);
    assert_eq!(
        store.get_item(&key("currentStep")).await.unwrap().as_deref(),
        Some("1")
    );
    assert!(!wizard.can_proceed());
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_can_proceed_does_not_reveal_errors() {
    let store = CountingStore::new();
    let mut wizard = start_wizard(&store).await;
    wizard.personal_mut().set_field("name", "Amina").unwrap();

    assert!(!wizard.can_proceed());
    assert!(wizard.personal().errors().is_empty());
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_goto_skips_validation_and_ignores_out_of_range() {
    let store = CountingStore::new();
    let mut wizard = start_wizard(&store).await;

    assert_eq!(wizard.goto(2).await.current_step, WizardStep::Situation);
    assert_eq!(wizard.goto(7).await.current_step, WizardStep::Situation);
    assert_eq!(wizard.previous().await.current_step, WizardStep::Family);
    assert_eq!(
        store.get_item(&key("currentStep")).await.unwrap().as_deref(),
        Some("1")
    );
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_previous_on_first_step_is_noop() {
    let store = CountingStore::new();
    let mut wizard = start_wizard(&store).await;

    assert_eq!(wizard.previous().await.current_step, WizardStep::Personal);
    assert!(store.writes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_start_fresh_clears_every_key_and_form() {
    let store = CountingStore::new();
    let mut wizard = start_wizard(&store).await;
    wizard.personal_mut().replace_values(valid_personal());
    wizard.next().await;
    wizard.family_mut().replace_values(valid_family());
    wizard.next().await;
    flush_writes().await;
    assert_eq!(store.keys().await.len(), 3);

    let state = wizard.start_fresh().await;

    assert_eq!(state.current_step, WizardStep::Personal);
    assert!(!state.restore_pending);
    assert!(store.keys().await.is_empty());
    assert_eq!(wizard.personal().values(), &PersonalInfo::default());
    assert!(!wizard.family().is_dirty());
    assert!(!wizard.has_stored_data().await);
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_pending_restore_blocks_navigation_until_decided() {
    let store = CountingStore::new();
    store
        .set_item(&key("personal"), r#"{"name":"Saved Name"}"#)
        .await
        .unwrap();
    store.set_item(&key("currentStep"), "1").await.unwrap();

    let mut wizard = start_wizard(&store).await;
    assert!(wizard.restore_pending());
    assert_eq!(wizard.active_step(), WizardStep::Family);

    assert_eq!(wizard.goto(0).await.current_step, WizardStep::Family);
    assert_eq!(wizard.previous().await.current_step, WizardStep::Family);

    let state = wizard.restore().await;
    assert!(!state.restore_pending);
    assert_eq!(wizard.personal().values().name, "Saved Name");
    assert_eq!(wizard.previous().await.current_step, WizardStep::Personal);
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_start_fresh_from_restore_prompt_discards_saved_data() {
    let store = CountingStore::new();
    store
        .set_item(&key("situation"), r#"{"reasonForApplying":"old"}"#)
        .await
        .unwrap();
    store.set_item(&key("currentStep"), "2").await.unwrap();

    let mut wizard = start_wizard(&store).await;
    assert!(wizard.restore_pending());

    wizard.start_fresh().await;

    assert!(!wizard.restore_pending());
    assert_eq!(wizard.active_step(), WizardStep::Personal);
    assert!(wizard.situation().values().reason_for_applying.is_empty());
    assert!(store.keys().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_unparsable_step_index_defaults_to_first_step() {
    for raw in ["banana", "7", "-1", ""] {
        let store = CountingStore::new();
        store.set_item(&key("currentStep"), raw).await.unwrap();

        let wizard = start_wizard(&store).await;

        assert_eq!(wizard.active_step(), WizardStep::Personal, "raw index {raw:?}");
        assert!(!wizard.restore_pending());
    }
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_application_data_gathers_all_steps() {
    let store = CountingStore::new();
    let mut wizard = start_wizard(&store).await;
    wizard.personal_mut().replace_values(valid_personal());
    wizard.family_mut().replace_values(valid_family());

    let data = wizard.application_data();

    assert_eq!(data.personal_info, valid_personal());
    assert_eq!(data.family_financial_info, valid_family());
    assert!(data.situation_descriptions.reason_for_applying.is_empty());
}

#[tokio::test(start_paused = true)]
async fn wizard_flow_start_fresh_is_not_undone_by_slow_write() {
    let store = CountingStore::with_write_delay(Duration::from_millis(200));
    let mut wizard = start_wizard(&store).await;
    wizard.personal_mut().set_field("name", "Old").unwrap();
    tokio::time::advance(Duration::from_millis(501)).await;
    tokio::task::yield_now().await;

    wizard.start_fresh().await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(store.get_item(&key("personal")).await.unwrap(), None);
    let reopened = start_wizard(&store).await;
    assert!(!reopened.restore_pending());
    assert_eq!(reopened.personal().values().name, "");
}
