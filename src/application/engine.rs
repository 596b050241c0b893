use crate::application::checkout::{self, CardFlow};
use crate::domain::account::{Account, CardInput};
use crate::domain::ledger::PlacedOrder;
use crate::domain::money::{Currency, ExchangeRate, Money};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::order::{Order, OrderReference};
use crate::domain::ports::NotifierBox;
use crate::error::{PaymentError, Result};
use crate::infrastructure::in_memory::SharedStorefront;
use chrono::Local;
use rust_decimal::Decimal;
use std::time::Duration;

pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(2);

/// The result of a payment operation that went through.
#[derive(Debug)]
pub struct PaymentOutcome {
    pub reference: OrderReference,
    /// Snapshot of the order as settled.
    pub order: Order,
    /// Amount taken off the card, in base currency. Zero for pay-on-delivery.
    pub charged: Money,
    /// Card balance right after settlement.
    pub balance: Money,
    /// Set when the payment committed but the notice could not be delivered.
    pub warning: Option<PaymentError>,
}

/// Runs the checkout flows against a shopper's storefront.
///
/// Every operation follows the same sequence: the pure checks from
/// [`checkout`] and the settlement run under the storefront lock; the lock is
/// released; the notifier is called (bounded by a timeout); finally the
/// caller's continuation runs. A failed check returns before anything is
/// mutated, and neither the notice nor the continuation happen.
pub struct PaymentOrchestrator {
    notifier: NotifierBox,
    rate: ExchangeRate,
    notify_timeout: Duration,
}

impl PaymentOrchestrator {
    /// Creates a new `PaymentOrchestrator`.
    ///
    /// # Arguments
    ///
    /// * `notifier` - Where order and payment notices are delivered.
    /// * `rate` - Fixed conversion rate between display and base currency.
    pub fn new(notifier: NotifierBox, rate: ExchangeRate) -> Self {
        Self {
            notifier,
            rate,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }

    pub fn rate(&self) -> ExchangeRate {
        self.rate
    }

    /// Charges the card for the cart and places a paid order.
    pub async fn pay_now<F: FnOnce()>(
        &self,
        store: &SharedStorefront,
        card: &CardInput,
        display_total: Decimal,
        currency: Currency,
        on_success: F,
    ) -> Result<PaymentOutcome> {
        self.pay_by_card(CardFlow::PayNow, store, card, display_total, currency, on_success)
            .await
    }

    /// Same contract as [`pay_now`](Self::pay_now), offered as paying ahead for delivery.
    pub async fn pay_for_delivery<F: FnOnce()>(
        &self,
        store: &SharedStorefront,
        card: &CardInput,
        display_total: Decimal,
        currency: Currency,
        on_success: F,
    ) -> Result<PaymentOutcome> {
        self.pay_by_card(
            CardFlow::PayForDelivery,
            store,
            card,
            display_total,
            currency,
            on_success,
        )
        .await
    }

    /// Places the cart as a pending order without touching the balance.
    ///
    /// `display_total` is only logged; the order total comes from the cart.
    pub async fn pay_on_delivery<F: FnOnce()>(
        &self,
        store: &SharedStorefront,
        display_total: Decimal,
        currency: Currency,
        on_success: F,
    ) -> Result<PaymentOutcome> {
        let (placed, recipient) = {
            let mut guard = store.lock().await;
            checkout::authorize_on_delivery(&guard).inspect_err(|e| {
                tracing::debug!(error = %e, "Pay on delivery rejected");
            })?;
            let placed = guard.settle_on_delivery(Local::now().date_naive())?;
            (placed, guard.account.clone())
        };

        tracing::info!(
            order = %placed.reference,
            total = %placed.order.total(),
            shown = %format!("{}{:.2}", currency.symbol(), display_total),
            "Order placed! Payment will be collected on delivery."
        );

        Ok(self
            .finish(
                NotificationKind::OrderConfirmation,
                placed,
                Money::ZERO,
                recipient,
                currency,
                on_success,
            )
            .await)
    }

    /// Settles a pending (pay-on-delivery) order from the card balance.
    ///
    /// `position` is the 0-based index into the ledger's orders.
    pub async fn complete_delivery_payment<F: FnOnce()>(
        &self,
        store: &SharedStorefront,
        position: usize,
        currency: Currency,
        on_success: F,
    ) -> Result<PaymentOutcome> {
        let (reference, order, charge, recipient) = {
            let mut guard = store.lock().await;
            let charge = checkout::authorize_delivery_payment(&guard, position).inspect_err(|e| {
                tracing::debug!(position, error = %e, "Delivery payment rejected");
            })?;
            let (reference, order) = guard.settle_delivery_payment(position)?;
            (reference, order, charge, guard.account.clone())
        };

        tracing::info!(
            order = %reference,
            charged = %charge,
            balance = %recipient.balance(),
            "Payment completed!"
        );

        Ok(self
            .finish(
                NotificationKind::PaymentCompletion,
                PlacedOrder { reference, order },
                charge,
                recipient,
                currency,
                on_success,
            )
            .await)
    }

    async fn pay_by_card<F: FnOnce()>(
        &self,
        flow: CardFlow,
        store: &SharedStorefront,
        card: &CardInput,
        display_total: Decimal,
        currency: Currency,
        on_success: F,
    ) -> Result<PaymentOutcome> {
        let (placed, charge, recipient) = {
            let mut guard = store.lock().await;
            let charge =
                checkout::authorize_card_payment(&guard, card, display_total, currency, &self.rate)
                    .inspect_err(|e| {
                        tracing::debug!(%flow, error = %e, "Card payment rejected");
                    })?;
            let placed = guard.settle_card_payment(charge, Local::now().date_naive())?;
            (placed, charge, guard.account.clone())
        };

        tracing::info!(
            %flow,
            order = %placed.reference,
            charged = %charge,
            balance = %recipient.balance(),
            "{}",
            flow.success_message()
        );

        Ok(self
            .finish(
                NotificationKind::OrderConfirmation,
                placed,
                charge,
                recipient,
                currency,
                on_success,
            )
            .await)
    }

    /// Post-commit steps: notify, then hand control back to the caller.
    async fn finish<F: FnOnce()>(
        &self,
        kind: NotificationKind,
        placed: PlacedOrder,
        charged: Money,
        recipient: Account,
        currency: Currency,
        on_success: F,
    ) -> PaymentOutcome {
        let balance = recipient.balance();
        let notification = Notification {
            kind,
            reference: placed.reference,
            order: placed.order,
            recipient,
            currency,
            rate: self.rate,
        };
        let warning = self.notify(&notification).await.err();
        on_success();

        PaymentOutcome {
            reference: notification.reference,
            order: notification.order,
            charged,
            balance,
            warning,
        }
    }

    async fn notify(&self, notification: &Notification) -> Result<()> {
        let result = match tokio::time::timeout(
            self.notify_timeout,
            self.notifier.send(notification),
        )
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PaymentError::NotificationFailure(e.to_string())),
            Err(_) => Err(PaymentError::NotificationFailure(format!(
                "timed out after {:?}",
                self.notify_timeout
            ))),
        };
        if let Err(e) = &result {
            tracing::warn!(
                order = %notification.reference,
                error = %e,
                "Payment committed, but the confirmation could not be sent"
            );
        }
        result
    }
}
