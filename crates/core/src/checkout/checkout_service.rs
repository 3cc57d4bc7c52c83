//! Checkout orchestration.
//!
//! `CheckoutFlow` drives a submission through local validation, the order
//! gateway, and the payment-link countdown. The phase machine guards against
//! concurrent submissions from the same flow.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{error, info, warn};
use tokio::sync::oneshot;

use crate::cart::Cart;
use crate::constants::PAYMENT_REDIRECT_DELAY_SECS;
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};

use super::checkout_errors::CheckoutError;
use super::checkout_model::{CheckoutForm, CheckoutPhase, NewOrder, OrderItem, OrderReceipt};
use super::order_gateway::OrderGatewayTrait;
use super::validation::validate_form;

/// Opens the hosted payment page once the countdown elapses or the user
/// confirms early.
pub trait PaymentLauncherTrait: Send + Sync {
    fn open(&self, payment_link: &str);
}

/// Default launcher; the server hands the link back to the client, so
/// launching is just an audit line.
pub struct LoggingPaymentLauncher;

impl PaymentLauncherTrait for LoggingPaymentLauncher {
    fn open(&self, payment_link: &str) {
        info!("Redirecting to payment page: {}", payment_link);
    }
}

/// User input while the payment countdown runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationDecision {
    /// Open the payment page now instead of waiting out the countdown.
    Proceed,
    /// Abort; the payment page is never opened.
    Cancel,
}

/// How the countdown ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Launched { payment_link: String },
    Cancelled,
}

pub struct CheckoutFlow {
    gateway: Arc<dyn OrderGatewayTrait>,
    launcher: Arc<dyn PaymentLauncherTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    phase: RwLock<CheckoutPhase>,
    redirect_delay: Duration,
}

impl CheckoutFlow {
    pub fn new(gateway: Arc<dyn OrderGatewayTrait>) -> Self {
        Self::with_event_sink(gateway, Arc::new(NoOpDomainEventSink))
    }

    pub fn with_event_sink(
        gateway: Arc<dyn OrderGatewayTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            gateway,
            launcher: Arc::new(LoggingPaymentLauncher),
            event_sink,
            phase: RwLock::new(CheckoutPhase::Idle),
            redirect_delay: Duration::from_secs(PAYMENT_REDIRECT_DELAY_SECS),
        }
    }

    pub fn with_launcher(mut self, launcher: Arc<dyn PaymentLauncherTrait>) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.read_phase().clone()
    }

    /// Validates the form and submits the order.
    ///
    /// Validation failures and an empty cart never reach the gateway. On
    /// gateway failure the flow lands in `Failed` and must be acknowledged
    /// before the next attempt.
    pub async fn submit(
        &self,
        cart: &Cart,
        form: &CheckoutForm,
    ) -> Result<OrderReceipt, CheckoutError> {
        {
            let mut phase = self.write_phase();
            match *phase {
                CheckoutPhase::Idle | CheckoutPhase::Failed { .. } => {}
                _ => return Err(CheckoutError::AlreadyInProgress),
            }
            *phase = CheckoutPhase::Submitting;
        }

        if let Err(fields) = validate_form(form) {
            self.set_phase(CheckoutPhase::Idle);
            return Err(CheckoutError::Invalid(fields));
        }

        if cart.is_empty() {
            self.set_phase(CheckoutPhase::Idle);
            return Err(CheckoutError::EmptyCart);
        }

        let order = build_order(cart, form);
        self.set_phase(CheckoutPhase::OrderPending);

        match self.gateway.submit_order(&order).await {
            Ok(receipt) => {
                info!("Order {} accepted", receipt.order_id);
                self.event_sink.emit(DomainEvent::OrderPlaced {
                    order_id: receipt.order_id.clone(),
                });
                self.set_phase(CheckoutPhase::AwaitingConfirmation {
                    receipt: receipt.clone(),
                });
                Ok(receipt)
            }
            Err(err) => {
                error!("Order submission failed: {}", err);
                self.set_phase(CheckoutPhase::Failed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Runs the payment countdown for the order awaiting confirmation.
    ///
    /// The payment page opens when the delay elapses or the user proceeds
    /// early; cancelling skips the launch. A dropped sender leaves the
    /// countdown to the timer. Either way the flow returns to `Idle`.
    pub async fn await_confirmation(
        &self,
        decision: oneshot::Receiver<ConfirmationDecision>,
    ) -> Result<ConfirmationOutcome, CheckoutError> {
        let receipt = match self.phase() {
            CheckoutPhase::AwaitingConfirmation { receipt } => receipt,
            _ => return Err(CheckoutError::NotAwaitingConfirmation),
        };

        // A dropped sender must not cut the countdown short.
        let decision = async {
            match decision.await {
                Ok(decision) => decision,
                Err(_) => std::future::pending().await,
            }
        };

        let decided = tokio::select! {
            decision = decision => Some(decision),
            _ = tokio::time::sleep(self.redirect_delay) => None,
        };

        self.set_phase(CheckoutPhase::Idle);

        match decided {
            Some(ConfirmationDecision::Cancel) => {
                warn!("Payment redirect cancelled for order {}", receipt.order_id);
                Ok(ConfirmationOutcome::Cancelled)
            }
            Some(ConfirmationDecision::Proceed) | None => {
                self.launcher.open(&receipt.payment_link);
                Ok(ConfirmationOutcome::Launched {
                    payment_link: receipt.payment_link,
                })
            }
        }
    }

    /// Clears a `Failed` phase so the form can be resubmitted.
    pub fn acknowledge_failure(&self) {
        let mut phase = self.write_phase();
        if matches!(*phase, CheckoutPhase::Failed { .. }) {
            *phase = CheckoutPhase::Idle;
        }
    }

    fn set_phase(&self, next: CheckoutPhase) {
        *self.write_phase() = next;
    }

    fn read_phase(&self) -> std::sync::RwLockReadGuard<'_, CheckoutPhase> {
        self.phase.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_phase(&self) -> std::sync::RwLockWriteGuard<'_, CheckoutPhase> {
        self.phase.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn build_order(cart: &Cart, form: &CheckoutForm) -> NewOrder {
    let shipping_address = format!("{}, {} {}", form.address, form.city, form.postal_code);
    let referral_code = cart
        .items
        .iter()
        .find_map(|item| item.referral_code.clone());

    NewOrder {
        email: form.email.clone(),
        shipping_address,
        pay_on_delivery: form.payment_method.is_pay_on_delivery(),
        items: cart.items.iter().map(OrderItem::from_cart_item).collect(),
        referral_code,
    }
}
