use super::account::Account;
use super::money::{Currency, ExchangeRate};
use super::order::{Order, OrderReference, PaymentStatus};
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NotificationKind {
    /// Sent when an order is placed, whatever its payment status.
    OrderConfirmation,
    /// Sent when a pay-on-delivery order is settled later.
    PaymentCompletion,
}

/// A fully formed notice about one order, ready for a [`Notifier`] to deliver.
///
/// Amounts stay in the base currency; `currency` and `rate` only decide how
/// they are rendered.
///
/// [`Notifier`]: crate::domain::ports::Notifier
#[derive(Debug, PartialEq, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub reference: OrderReference,
    pub order: Order,
    pub recipient: Account,
    pub currency: Currency,
    pub rate: ExchangeRate,
}

impl Notification {
    pub fn subject(&self) -> String {
        let number = self.reference.0;
        match self.kind {
            NotificationKind::OrderConfirmation => format!("Order Confirmation - Order #{number}"),
            NotificationKind::PaymentCompletion => format!("Payment Confirmation - Order #{number}"),
        }
    }

    /// The plain-text body of the notice.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (opening, status, closing) = match self.kind {
            NotificationKind::OrderConfirmation => (
                "Thank you for your order! Below are the details of your purchase:",
                self.order.payment_status(),
                "We will notify you once your order is shipped.",
            ),
            NotificationKind::PaymentCompletion => (
                "Thank you for completing the payment for your order! Below are the details:",
                PaymentStatus::Paid,
                "Your order is now fully paid and will be processed for delivery.",
            ),
        };

        writeln!(f, "Dear {},", self.recipient.name)?;
        writeln!(f)?;
        writeln!(f, "{opening}")?;
        writeln!(f)?;
        writeln!(f, "Order Number: {}", self.reference.0)?;
        writeln!(f, "Items:")?;
        for line in self.order.items() {
            writeln!(
                f,
                "{} x{} - {}",
                line.item.name,
                line.quantity,
                self.rate.format(line.subtotal(), self.currency)
            )?;
        }
        writeln!(
            f,
            "Total: {}",
            self.rate.format(self.order.total(), self.currency)
        )?;
        writeln!(f, "Payment Status: {status}")?;
        writeln!(f, "Delivery Address: {}", self.recipient.address)?;
        writeln!(
            f,
            "Estimated Delivery: {}",
            self.order.delivery_date().format("%Y-%m-%d")
        )?;
        writeln!(f)?;
        writeln!(f, "{closing}")?;
        writeln!(f)?;
        writeln!(f, "Best regards,")?;
        write!(f, "Super Market Team")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::OrderLedger;
    use crate::domain::catalog::CatalogItem;
    use crate::domain::money::Money;
    use crate::domain::order::Quantity;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn notification(kind: NotificationKind, currency: Currency) -> Notification {
        let mut ledger = OrderLedger::new();
        ledger
            .add(
                CatalogItem {
                    id: "apple".to_string(),
                    name: "Apple".to_string(),
                    description: "Shimla".to_string(),
                    price: Money::new(dec!(160)),
                    unit: "kg".to_string(),
                },
                Quantity::new(dec!(1.5)).unwrap(),
            )
            .unwrap();
        let placed = ledger
            .place_order_on(NaiveDate::from_ymd_opt(2026, 5, 10).unwrap())
            .unwrap();
        Notification {
            kind,
            reference: placed.reference,
            order: placed.order,
            recipient: Account::default(),
            currency,
            rate: ExchangeRate::new(dec!(80)).unwrap(),
        }
    }

    #[test]
    fn test_confirmation_in_base_currency() {
        let notice = notification(NotificationKind::OrderConfirmation, Currency::Inr);
        assert_eq!(notice.subject(), "Order Confirmation - Order #1");

        let body = notice.render();
        assert!(body.starts_with("Dear Demo Shopper,"));
        assert!(body.contains("Apple x1.5 - ₹240.00"));
        assert!(body.contains("Total: ₹240.00"));
        assert!(body.contains("Payment Status: Pending"));
        assert!(body.contains("Estimated Delivery: 2026-05-13"));
        assert!(body.contains("We will notify you once your order is shipped."));
        assert!(body.ends_with("Best regards,\nSuper Market Team"));
        assert_eq!(body, notice.to_string());
    }

    #[test]
    fn test_completion_in_display_currency() {
        let notice = notification(NotificationKind::PaymentCompletion, Currency::Usd);
        assert_eq!(notice.subject(), "Payment Confirmation - Order #1");

        let body = notice.render();
        assert!(body.contains("Total: $3.00"));
        assert!(body.contains("Payment Status: Paid"));
        assert!(body.contains("fully paid"));
        // rendering never touches the stored amount
        assert_eq!(notice.order.total(), Money::new(dec!(240)));
    }
}
