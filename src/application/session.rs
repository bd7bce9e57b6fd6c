use crate::domain::payment::{
    Amount, Completion, PaymentCompleter, PaymentDelivery, PaymentRequest, PaymentStatus,
    PaymentToken,
};
use crate::domain::ports::PaymentSurfaceBox;
use std::collections::{HashMap, VecDeque};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Tracks outstanding payment requests by correlation token and normalizes
/// asynchronous completions.
///
/// Completions arrive over an unbounded mpsc channel so the payment
/// surface can report from its own thread; they only touch the request
/// table when `drain` runs on the controller's context. Validated
/// deliveries queue up until the controller flushes them while resumed.
pub struct PaymentSession {
    surface: PaymentSurfaceBox,
    requests: HashMap<PaymentToken, PaymentRequest>,
    queued: VecDeque<PaymentDelivery>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl PaymentSession {
    pub fn new(surface: PaymentSurfaceBox) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            surface,
            requests: HashMap::new(),
            queued: VecDeque::new(),
            tx,
            rx,
        }
    }

    /// A fresh write half of the completion channel.
    pub fn completer(&self) -> PaymentCompleter {
        PaymentCompleter::new(self.tx.clone())
    }

    /// Registers a pending request under a fresh token and signals the
    /// payment surface to begin the transaction.
    pub async fn initiate(&mut self, amount: Amount) -> PaymentToken {
        let request = PaymentRequest::new(amount);
        let token = request.token;
        self.requests.insert(token, request);
        debug!(%token, %amount, "payment initiated");
        self.surface
            .begin_transaction(token, amount, self.completer())
            .await;
        token
    }

    /// Pulls every marshaled completion off the channel and settles it
    /// against the request table. Runs on the controller's context only.
    pub fn drain(&mut self) {
        while let Ok(completion) = self.rx.try_recv() {
            self.settle(completion);
        }
    }

    fn settle(&mut self, completion: Completion) {
        let token = completion.token();
        let Some(request) = self.requests.get_mut(&token) else {
            warn!(%token, "completion for unknown token dropped");
            return;
        };
        match request.status {
            PaymentStatus::Terminated => {
                info!(%token, "completion after teardown dropped");
            }
            PaymentStatus::Succeeded | PaymentStatus::Failed => {
                warn!(%token, "duplicate completion dropped");
            }
            PaymentStatus::Pending => {
                if let Completion::Success { amount, .. } = &completion
                    && *amount != request.amount
                {
                    warn!(%token, initiated = %request.amount, reported = %amount,
                        "gateway amount differs from initiated amount");
                }
                match completion {
                    Completion::Success {
                        transaction_id,
                        amount,
                        ..
                    } => {
                        request.status = PaymentStatus::Succeeded;
                        self.queued.push_back(PaymentDelivery::Success {
                            transaction_id,
                            amount,
                        });
                    }
                    Completion::Failure { error, .. } => {
                        request.status = PaymentStatus::Failed;
                        self.queued.push_back(PaymentDelivery::Failure { error });
                    }
                }
            }
        }
    }

    /// Hands over the deliveries queued so far, in arrival order.
    pub fn take_deliveries(&mut self) -> Vec<PaymentDelivery> {
        self.queued.drain(..).collect()
    }

    /// Teardown path: undelivered completions are dropped and every still
    /// pending request is marked terminated so a late completion can be
    /// told apart from an anomalous one.
    pub fn terminate_outstanding(&mut self) {
        for delivery in self.queued.drain(..) {
            info!(?delivery, "undelivered payment dropped at teardown");
        }
        for request in self.requests.values_mut() {
            if request.status == PaymentStatus::Pending {
                request.status = PaymentStatus::Terminated;
                info!(token = %request.token, "pending payment terminated");
            }
        }
    }

    pub fn request(&self, token: PaymentToken) -> Option<&PaymentRequest> {
        self.requests.get(&token)
    }
}
