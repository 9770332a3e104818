//! Application submission use case.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, info_span, warn, Instrument};

use sw_core::ports::{ApplicationSubmissionPort, ClockPort};
use sw_core::{FieldErrors, SubmissionError, SubmissionFailurePolicy, SubmissionReceipt};

use crate::usecases::wizard::WizardCoordinator;

/// Ceiling for one submission round trip.
pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("final step has {} invalid field(s)", .errors.len())]
    Invalid { errors: FieldErrors },
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error(transparent)]
    Failed(#[from] SubmissionError),
}

impl SubmitError {
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitError::Invalid { .. } => "validation",
            SubmitError::AlreadySubmitting => "in_progress",
            SubmitError::Failed(err) => err.kind(),
        }
    }
}

/// Sends the completed application once and, on success, clears every
/// trace of it from storage and the forms.
///
/// The wizard is only locked to validate, snapshot and clear; it stays
/// readable while the request is out.
pub struct SubmitApplication {
    submission: Arc<dyn ApplicationSubmissionPort>,
    clock: Arc<dyn ClockPort>,
    policy: SubmissionFailurePolicy,
    timeout: Duration,
    in_flight: Arc<AtomicBool>,
}

impl SubmitApplication {
    pub fn new(
        submission: Arc<dyn ApplicationSubmissionPort>,
        clock: Arc<dyn ClockPort>,
        policy: SubmissionFailurePolicy,
    ) -> Self {
        Self {
            submission,
            clock,
            policy,
            timeout: DEFAULT_SUBMISSION_TIMEOUT,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn policy(&self) -> SubmissionFailurePolicy {
        self.policy
    }

    /// True while a call to [`execute`](Self::execute) is in progress.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub async fn execute(
        &self,
        wizard: &Mutex<WizardCoordinator>,
    ) -> Result<SubmissionReceipt, SubmitError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            warn!("submission refused, another one is in progress");
            return Err(SubmitError::AlreadySubmitting);
        }
        let _in_flight = InFlightGuard(Arc::clone(&self.in_flight));

        let span = info_span!("usecase.submit_application.execute", policy = ?self.policy);
        async {
            let payload = {
                let mut wizard = wizard.lock().await;
                if !wizard.situation_mut().trigger_validation() {
                    let errors = wizard.situation().errors().clone();
                    warn!(invalid = errors.len(), "submission blocked by validation");
                    return Err(SubmitError::Invalid { errors });
                }
                wizard.application_data()
            };
            let outcome = match tokio::time::timeout(self.timeout, self.submission.submit(&payload)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(SubmissionError::Timeout),
            };

            let receipt = match outcome {
                Ok(receipt) if receipt.reference_number.trim().is_empty() => {
                    let receipt = SubmissionReceipt::synthesized(self.clock.now_ms());
                    warn!(reference = %receipt.reference_number, "backend returned no reference number, using local one");
                    receipt
                }
                Ok(receipt) => receipt,
                Err(err) => match self.policy {
                    SubmissionFailurePolicy::Surface => {
                        warn!(kind = err.kind(), error = %err, "submission failed");
                        return Err(SubmitError::Failed(err));
                    }
                    SubmissionFailurePolicy::SynthesizeReference => {
                        let receipt = SubmissionReceipt::synthesized(self.clock.now_ms());
                        warn!(
                            kind = err.kind(),
                            error = %err,
                            reference = %receipt.reference_number,
                            "submission failed, reporting success with a local reference"
                        );
                        receipt
                    }
                },
            };

            wizard.lock().await.complete_submission().await;
            info!(reference = %receipt.reference_number, "application submitted");
            Ok(receipt)
        }
        .instrument(span)
        .await
    }
}

struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
