use crate::errors::{VizError, VizResult};
use crate::plot::{self, SceneDescription};
use crate::pricing::PricingClient;
use crate::summary::Summary;
use crate::validate::{FormFields, RequestParams};
use chrono::{DateTime, Utc};
use portable_atomic::{AtomicBool, Ordering};
use uuid::Uuid;

// ── Single in-flight submission ──

/// Busy flag for the submit control. At most one submission holds it.
pub struct SubmitGuard {
    busy: AtomicBool,
}

/// Held while a submission is outstanding; clears the flag when dropped,
/// whether the submission succeeded or failed.
pub struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight { flag: &self.busy })
    }
}

impl Default for SubmitGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// ── Submit flow ──

/// Everything the page needs after one successful submission.
#[derive(Debug, Clone)]
pub struct PlotOutcome {
    pub request_id: Uuid,
    pub fetched_at: DateTime<Utc>,
    pub scene: SceneDescription,
    pub summary: Summary,
}

pub struct Session {
    client: PricingClient,
    guard: SubmitGuard,
}

impl Session {
    pub fn new(client: PricingClient) -> Self {
        Self {
            client,
            guard: SubmitGuard::new(),
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Guard → validate → fetch → project → summarize.
    /// Service failures are logged and returned; nothing is retried.
    pub async fn submit(&self, form: &FormFields) -> VizResult<PlotOutcome> {
        let Some(_in_flight) = self.guard.try_begin() else {
            tracing::debug!("submission refused, request already in flight");
            return Err(VizError::Busy);
        };

        let params = match RequestParams::from_form(form) {
            Ok(p) => p,
            Err(state) => {
                let invalid: Vec<_> = state.invalid_fields().collect();
                tracing::debug!(?invalid, "submission refused, form invalid");
                return Err(VizError::InvalidInput(state));
            }
        };
        let request_id = Uuid::new_v4();

        tracing::info!(
            %request_id,
            ticker = %params.ticker,
            kind = %params.kind,
            days = params.days,
            strike = params.strike,
            depth = params.depth,
            "submitting pricing request"
        );

        let resp = match self.client.quote(&params).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%request_id, error = %e, "pricing request failed");
                return Err(e);
            }
        };

        let scene = plot::project(&resp.points, resp.depth)?;
        let summary = Summary::from_response(&resp)
            .ok_or_else(|| VizError::InsufficientData("empty price lattice".into()))?;

        tracing::info!(
            %request_id,
            nodes = resp.points.len(),
            option_price = summary.option_price,
            "lattice projected"
        );

        Ok(PlotOutcome {
            request_id,
            fetched_at: Utc::now(),
            scene,
            summary,
        })
    }
}
