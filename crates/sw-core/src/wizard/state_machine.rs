//! Wizard navigation state machine.
//!
//! Defines a pure state transition function for step navigation and the
//! restore/discard decision. Validation happens before an event is built;
//! storage and form resets are returned as actions for the coordinator to run.

use serde::{Deserialize, Serialize};

use super::step::WizardStep;

/// Wizard navigation state.
///
/// 向导导航状态。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    /// Step currently being edited.
    ///
    /// 当前正在编辑的步骤。
    pub current_step: WizardStep,
    /// A previous session was found and the user has not yet chosen to
    /// restore or discard it.
    ///
    /// 检测到上次会话，用户尚未选择恢复或丢弃。
    pub restore_pending: bool,
}

impl WizardState {
    pub fn at(current_step: WizardStep) -> Self {
        Self {
            current_step,
            restore_pending: false,
        }
    }
}

/// Events that drive the wizard.
///
/// 驱动向导的事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardEvent {
    /// User pressed Next; `step_valid` is the result of the authoritative
    /// validation of the active step.
    ///
    /// 用户点击“下一步”。
    Advance { step_valid: bool },
    /// User pressed Previous.
    ///
    /// 用户点击“上一步”。
    Retreat,
    /// Direct jump to a step index.
    ///
    /// 直接跳转到指定步骤。
    GoTo { index: usize },
    /// Saved data from an earlier session was found at startup.
    ///
    /// 启动时发现上次会话的数据。
    SavedSessionDetected,
    /// User chose to resume with the loaded data.
    ///
    /// 用户选择恢复。
    RestoreSession,
    /// User chose to discard saved data.
    ///
    /// 用户选择重新开始。
    StartFresh,
    /// The application was accepted by the backend.
    ///
    /// 申请提交成功。
    Submitted,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    /// Write the step index entry.
    ///
    /// 持久化当前步骤索引。
    PersistCurrentStep(WizardStep),
    /// Remove every step's saved record.
    ///
    /// 清除所有步骤的已保存数据。
    ClearSavedSteps,
    /// Remove the step index entry.
    ///
    /// 清除步骤索引。
    ClearCurrentStep,
    /// Reset every step's in-memory values to empty defaults.
    ///
    /// 将所有表单重置为空。
    ResetForms,
}

/// Pure wizard state machine.
///
/// 纯状态机：不包含副作用。
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn transition(state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        match (state, event) {
            // Navigation waits for the restore/discard decision.
            (
                WizardState {
                    restore_pending: true,
                    ..
                },
                WizardEvent::Advance { .. } | WizardEvent::Retreat | WizardEvent::GoTo { .. },
            ) => (state, Vec::new()),

            (_, WizardEvent::Advance { step_valid: false }) => (state, Vec::new()),
            (WizardState { current_step, .. }, WizardEvent::Advance { step_valid: true }) => {
                if current_step.is_last() {
                    // Submission is a separate operation, not a transition.
                    return (state, Vec::new());
                }
                Self::move_to(state, current_step.next())
            }
            (WizardState { current_step, .. }, WizardEvent::Retreat) => {
                Self::move_to(state, current_step.previous())
            }
            (_, WizardEvent::GoTo { index }) => match WizardStep::from_index(index) {
                Some(target) => Self::move_to(state, target),
                None => (state, Vec::new()),
            },

            (WizardState { current_step, .. }, WizardEvent::SavedSessionDetected) => (
                WizardState {
                    current_step,
                    restore_pending: true,
                },
                Vec::new(),
            ),
            (WizardState { current_step, .. }, WizardEvent::RestoreSession) => {
                (WizardState::at(current_step), Vec::new())
            }
            (_, WizardEvent::StartFresh | WizardEvent::Submitted) => (
                WizardState::at(WizardStep::FIRST),
                vec![
                    WizardAction::ClearSavedSteps,
                    WizardAction::ClearCurrentStep,
                    WizardAction::ResetForms,
                ],
            ),
        }
    }

    fn move_to(state: WizardState, target: WizardStep) -> (WizardState, Vec<WizardAction>) {
        if target == state.current_step {
            return (state, Vec::new());
        }
        (
            WizardState {
                current_step: target,
                ..state
            },
            vec![WizardAction::PersistCurrentStep(target)],
        )
    }
}
