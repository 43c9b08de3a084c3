//! Transfer / sale request submission.
//!
//! Requests are intents only: one row per submit, settled by an operator.
//! There is no idempotency key and no balance check; a double submit writes
//! two rows.

use uuid::Uuid;

use super::Notice;
use crate::backend::{RequestKind, TransactionRequest};
use crate::context::BackendContext;

pub const INVALID_AMOUNT: &str = "Enter a positive amount.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub notice: Notice,
    /// Whether the amount input should be emptied.
    pub clear_input: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RequestSubmitter {
    kind: RequestKind,
}

impl RequestSubmitter {
    #[must_use]
    pub fn new(kind: RequestKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub fn kind(self) -> RequestKind {
        self.kind
    }

    #[must_use]
    pub fn confirmation(self) -> &'static str {
        match self.kind {
            RequestKind::Transfer => "Transfer request submitted. Await manual processing.",
            RequestKind::Sale => "Sale request submitted. Await manual processing.",
        }
    }

    /// Insert one pending request for `user_id`. Amounts that are not finite
    /// positive numbers never reach the backend.
    pub async fn submit(self, ctx: &BackendContext, user_id: Uuid, raw_amount: &str) -> SubmitOutcome {
        let Some(amount) = parse_amount(raw_amount) else {
            return SubmitOutcome { notice: Notice::error(INVALID_AMOUNT), clear_input: false };
        };

        let request = TransactionRequest { user_id, kind: self.kind, amount };
        match ctx.insert_transaction_request(&request).await {
            Ok(()) => {
                tracing::info!(%user_id, kind = self.kind.as_str(), amount, "request submitted");
                SubmitOutcome { notice: Notice::success(self.confirmation()), clear_input: true }
            }
            Err(e) => SubmitOutcome { notice: Notice::error(e.message), clear_input: false },
        }
    }
}

/// Parse the amount field the way a `type=number` input constrains it.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    let amount = raw.trim().parse::<f64>().ok()?;
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;
