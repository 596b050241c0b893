use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use storefront::application::engine::PaymentOrchestrator;
use storefront::domain::account::{Account, CardInput};
use storefront::domain::catalog::CatalogItem;
use storefront::domain::money::{Currency, ExchangeRate, Money};
use storefront::domain::notification::NotificationKind;
use storefront::domain::order::{PaymentStatus, Quantity};
use storefront::domain::storefront::Storefront;
use storefront::error::PaymentError;
use storefront::infrastructure::in_memory::{OutboxNotifier, SharedStorefront};

fn item(id: &str, price: rust_decimal::Decimal) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        price: Money::new(price),
        unit: "kg".to_string(),
    }
}

async fn add(store: &SharedStorefront, item: CatalogItem, quantity: rust_decimal::Decimal) {
    store
        .lock()
        .await
        .ledger
        .add(item, Quantity::new(quantity).unwrap())
        .unwrap();
}

fn card() -> CardInput {
    CardInput::new("1234567890123456", "12/27", "123")
}

#[tokio::test]
async fn test_full_shopping_run() {
    let outbox = OutboxNotifier::new();
    let engine = PaymentOrchestrator::new(Box::new(outbox.clone()), ExchangeRate::default());
    let store = SharedStorefront::new(Storefront::new(Account::default()));
    let refreshes = AtomicUsize::new(0);
    let refresh = || {
        refreshes.fetch_add(1, Ordering::SeqCst);
    };

    add(&store, item("apple", dec!(160)), dec!(2)).await;
    add(&store, item("milk", dec!(60)), dec!(1)).await;
    store.lock().await.ledger.remove_at(1);
    let first = engine
        .pay_now(&store, &card(), dec!(320), Currency::Inr, refresh)
        .await
        .unwrap();
    assert_eq!(first.order.total(), Money::new(dec!(320)));

    add(&store, item("rice", dec!(120)), dec!(0.5)).await;
    let second = engine
        .pay_on_delivery(&store, dec!(60), Currency::Inr, refresh)
        .await
        .unwrap();
    assert_eq!(second.order.payment_status(), PaymentStatus::Pending);

    let settled = engine
        .complete_delivery_payment(&store, 1, Currency::Usd, refresh)
        .await
        .unwrap();
    assert_eq!(settled.charged, Money::new(dec!(60)));

    let state = store.snapshot().await;
    assert_eq!(state.account.balance(), Money::new(dec!(99620)));
    assert!(state.ledger.orders().iter().all(|order| order.is_paid()));
    assert_eq!(refreshes.load(Ordering::SeqCst), 3);

    let kinds: Vec<NotificationKind> = outbox.sent().await.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        [
            NotificationKind::OrderConfirmation,
            NotificationKind::OrderConfirmation,
            NotificationKind::PaymentCompletion,
        ]
    );
}

#[tokio::test]
async fn test_negative_total_is_rejected() {
    let outbox = OutboxNotifier::new();
    let engine = PaymentOrchestrator::new(Box::new(outbox.clone()), ExchangeRate::default());
    let store = SharedStorefront::new(Storefront::new(Account::default()));
    add(&store, item("apple", dec!(160)), dec!(1)).await;

    let result = engine
        .pay_now(&store, &card(), dec!(-1), Currency::Inr, || {})
        .await;

    assert!(matches!(result, Err(PaymentError::InvalidAmount(_))));
    assert!(store.snapshot().await.ledger.orders().is_empty());
    assert!(outbox.is_empty().await);
}

#[tokio::test]
async fn test_shared_engine_across_tasks() {
    let outbox = OutboxNotifier::new();
    let engine = Arc::new(PaymentOrchestrator::new(
        Box::new(outbox.clone()),
        ExchangeRate::default(),
    ));
    let mut account = Account::default();
    account.card.balance = Money::new(dec!(500));
    let store = SharedStorefront::new(Storefront::new(account));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = engine.clone();
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            add(&store, item("milk", dec!(100)), dec!(1)).await;
            engine.pay_on_delivery(&store, dec!(100), Currency::Inr, || {}).await
        }));
    }
    for handle in handles {
        let _ = handle.await.unwrap();
    }

    let state = store.snapshot().await;
    let placed: usize = state.ledger.orders().iter().map(|o| o.items().len()).sum();
    assert_eq!(placed, 8);
    assert_eq!(state.account.balance(), Money::new(dec!(500)));
    assert_eq!(outbox.len().await, state.ledger.orders().len());
}
