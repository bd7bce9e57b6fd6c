use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Represents a positive monetary amount for payment requests.
///
/// Wrapper around `rust_decimal::Decimal` that rejects zero and negative
/// values at construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, CoreError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(CoreError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = CoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Correlation token binding a payment initiation to its single completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentToken(Uuid);

impl PaymentToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaymentToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaymentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
    /// A request that was still pending when the session tore down. Its
    /// completion, if one ever arrives, is dropped without delivery.
    Terminated,
}

/// One outstanding or settled payment request.
///
/// Moves out of `Pending` at most once; the session enforces that any
/// further completion with the same token is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub token: PaymentToken,
    pub amount: Amount,
    pub status: PaymentStatus,
}

impl PaymentRequest {
    pub fn new(amount: Amount) -> Self {
        Self {
            token: PaymentToken::new(),
            amount,
            status: PaymentStatus::Pending,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status != PaymentStatus::Pending
    }
}

/// A completion reported by the payment surface, possibly from a foreign
/// thread, before it has been validated against the request table.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Success {
        token: PaymentToken,
        transaction_id: String,
        amount: Amount,
    },
    Failure {
        token: PaymentToken,
        error: String,
    },
}

impl Completion {
    pub fn token(&self) -> PaymentToken {
        match self {
            Completion::Success { token, .. } => *token,
            Completion::Failure { token, .. } => *token,
        }
    }
}

/// A validated completion waiting to be forwarded to the execution engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentDelivery {
    Success {
        transaction_id: String,
        amount: Amount,
    },
    Failure {
        error: String,
    },
}

/// Write half of the completion channel, handed to the payment surface.
///
/// Cloneable and callable from any thread; sends are marshaled onto the
/// controller's context and validated there. A send after the controller
/// is gone has nothing left to notify and is silently dropped.
#[derive(Clone)]
pub struct PaymentCompleter {
    tx: mpsc::UnboundedSender<Completion>,
}

impl PaymentCompleter {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Completion>) -> Self {
        Self { tx }
    }

    pub fn complete_success(
        &self,
        token: PaymentToken,
        transaction_id: impl Into<String>,
        amount: Amount,
    ) {
        let _ = self.tx.send(Completion::Success {
            token,
            transaction_id: transaction_id.into(),
            amount,
        });
    }

    pub fn complete_failure(&self, token: PaymentToken, error: impl Into<String>) {
        let _ = self.tx.send(Completion::Failure {
            token,
            error: error.into(),
        });
    }
}
