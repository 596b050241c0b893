use crate::domain::order::{Order, OrderReference, PaymentStatus};
use crate::error::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct OrderRow {
    order: usize,
    items: String,
    total: Decimal,
    payment_status: PaymentStatus,
    delivery_date: NaiveDate,
}

impl OrderRow {
    fn new(position: usize, order: &Order) -> Self {
        let items = order
            .items()
            .iter()
            .map(|line| format!("{} x{}", line.item.name, line.quantity))
            .collect::<Vec<_>>()
            .join("; ");
        let mut total = order.total().round_to_minor().value();
        total.rescale(2);
        Self {
            order: OrderReference::from_position(position).0,
            items,
            total,
            payment_status: order.payment_status(),
            delivery_date: order.delivery_date(),
        }
    }
}

/// Writes the order ledger as CSV, one row per order, amounts in base currency.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_orders(&mut self, orders: &[Order]) -> Result<()> {
        if orders.is_empty() {
            // serde-driven headers only appear with the first row
            self.writer
                .write_record(["order", "items", "total", "payment_status", "delivery_date"])?;
        }
        for (position, order) in orders.iter().enumerate() {
            self.writer.serialize(OrderRow::new(position, order))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
