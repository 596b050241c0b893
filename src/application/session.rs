use crate::application::engine::{PaymentOrchestrator, PaymentOutcome};
use crate::domain::catalog::Catalog;
use crate::domain::money::Currency;
use crate::error::{PaymentError, Result};
use crate::infrastructure::in_memory::SharedStorefront;
use crate::interfaces::csv::session_reader::SessionAction;
use rust_decimal::Decimal;

/// Drives one shopper through a sequence of actions.
///
/// Holds what a storefront screen would: the catalog, the active display
/// currency and the shopper's cart, orders and card. Payment actions are
/// priced from the current cart, converted to the display currency.
pub struct Session {
    catalog: Catalog,
    orchestrator: PaymentOrchestrator,
    store: SharedStorefront,
    currency: Currency,
    refreshes: usize,
}

impl Session {
    pub fn new(
        catalog: Catalog,
        orchestrator: PaymentOrchestrator,
        store: SharedStorefront,
        currency: Currency,
    ) -> Self {
        Self {
            catalog,
            orchestrator,
            store,
            currency,
            refreshes: 0,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn store(&self) -> &SharedStorefront {
        &self.store
    }

    /// How many times a payment handed control back to the session.
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    /// Applies one action. Payment actions return their outcome.
    pub async fn apply(&mut self, action: SessionAction) -> Result<Option<PaymentOutcome>> {
        let mut refreshed = 0;
        let outcome = match action {
            SessionAction::Add { item, quantity } => {
                let item = self
                    .catalog
                    .find(&item)
                    .cloned()
                    .ok_or(PaymentError::UnknownItem(item))?;
                let id = item.id.clone();
                self.store.lock().await.ledger.add(item, quantity)?;
                tracing::debug!(item = %id, %quantity, "Added to cart");
                None
            }
            SessionAction::Remove { position } => {
                match self.store.lock().await.ledger.remove_at(position) {
                    Some(line) => tracing::debug!(item = %line.item.id, "Removed from cart"),
                    None => tracing::debug!(position, "Nothing to remove"),
                }
                None
            }
            SessionAction::Currency(currency) => {
                self.currency = currency.unwrap_or_else(|| self.currency.toggled());
                tracing::info!(currency = %self.currency, "Display currency changed");
                None
            }
            SessionAction::PayNow(card) => {
                let total = self.display_total().await;
                let outcome = self
                    .orchestrator
                    .pay_now(&self.store, &card, total, self.currency, || refreshed += 1)
                    .await?;
                Some(outcome)
            }
            SessionAction::PayForDelivery(card) => {
                let total = self.display_total().await;
                let outcome = self
                    .orchestrator
                    .pay_for_delivery(&self.store, &card, total, self.currency, || refreshed += 1)
                    .await?;
                Some(outcome)
            }
            SessionAction::PayOnDelivery => {
                let total = self.display_total().await;
                let outcome = self
                    .orchestrator
                    .pay_on_delivery(&self.store, total, self.currency, || refreshed += 1)
                    .await?;
                Some(outcome)
            }
            SessionAction::CompletePayment { position } => {
                let outcome = self
                    .orchestrator
                    .complete_delivery_payment(&self.store, position, self.currency, || {
                        refreshed += 1
                    })
                    .await?;
                Some(outcome)
            }
        };
        self.refreshes += refreshed;
        Ok(outcome)
    }

    async fn display_total(&self) -> Decimal {
        let total = self.store.lock().await.ledger.cart_total();
        self.orchestrator.rate().to_display(total, self.currency)
    }
}
