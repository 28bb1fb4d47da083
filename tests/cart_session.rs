//! Cart sessions against the file-backed store and the bundled catalog.

use std::{path::Path, sync::Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use testresult::TestResult;

use storefront::{
    CartStore, ProductId,
    catalog::Catalog,
    checkout::{CheckoutError, CheckoutSubmitter, Identity, NewOrder, OrderId, place_order},
    persistence::{FileStore, SlotPersistence},
};

fn catalog() -> Result<Catalog, storefront::catalog::CatalogError> {
    Catalog::from_path(Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog.yaml"))
}

fn open(dir: &Path) -> CartStore<SlotPersistence<FileStore>> {
    CartStore::open(SlotPersistence::new(FileStore::new(dir)))
}

/// Records submitted orders in memory.
#[derive(Debug, Default)]
struct RecordingSubmitter {
    orders: Mutex<Vec<NewOrder>>,
}

#[async_trait]
impl CheckoutSubmitter for RecordingSubmitter {
    async fn submit_order(&self, order: &NewOrder) -> Result<OrderId, CheckoutError> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|error| CheckoutError::Rejected(error.to_string()))?;

        orders.push(order.clone());

        Ok(OrderId::new(orders.len() as u64))
    }
}

#[test]
fn cart_survives_restart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = catalog()?;
    let kurta = catalog.product(ProductId::new(1)).ok_or("missing kurta")?;
    let diya = catalog.product(ProductId::new(2)).ok_or("missing diya")?;

    {
        let mut store = open(dir.path());
        store.add_item(kurta, 1, "Indigo");
        store.add_item(diya, 4, "Gold");
        store.add_item(kurta, 1, "Indigo");
        store.update_quantity(diya.id, "Gold", 3);
    }

    let store = open(dir.path());

    assert_eq!(store.len(), 2);
    assert_eq!(store.get(kurta.id, "Indigo").map(|l| l.quantity), Some(2));
    assert_eq!(store.get(diya.id, "Gold").map(|l| l.quantity), Some(3));
    // 2 × 1299.00 + 3 × 349.50
    assert_eq!(store.total()?, Decimal::new(3_646_50, 2));

    Ok(())
}

#[test]
fn emptied_cart_reloads_empty() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = catalog()?;
    let rug = catalog.product(ProductId::new(3)).ok_or("missing rug")?;

    let mut store = open(dir.path());
    store.add_item(rug, 1, "Charcoal");
    store.empty_cart();
    drop(store);

    assert!(open(dir.path()).is_empty());

    Ok(())
}

#[test]
fn corrupt_save_file_starts_empty_and_recovers() -> TestResult {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("cart.json"), "[{\"product_id\": \"oops\"")?;
    let catalog = catalog()?;
    let card = catalog.product(ProductId::new(4)).ok_or("missing gift card")?;

    let mut store = open(dir.path());
    assert!(store.is_empty());

    store.add_item(card, 2, "Default");
    drop(store);

    let store = open(dir.path());
    assert_eq!(store.total()?, Decimal::new(2_000_00, 2));

    Ok(())
}

#[test]
fn unwritable_directory_keeps_cart_in_memory() -> TestResult {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "")?;
    let catalog = catalog()?;
    let diya = catalog.product(ProductId::new(2)).ok_or("missing diya")?;

    let mut store = open(&blocker);
    store.add_item(diya, 2, "Gold");

    assert_eq!(store.len(), 1);
    assert_eq!(store.total()?, Decimal::new(699_00, 2));

    Ok(())
}

#[tokio::test]
async fn checkout_submits_and_clears_saved_cart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = catalog()?;
    let kurta = catalog.product(ProductId::new(1)).ok_or("missing kurta")?;
    let rug = catalog.product(ProductId::new(3)).ok_or("missing rug")?;

    let mut store = open(dir.path());
    store.add_item(kurta, 1, "Madder Red");
    store.add_item(rug, 2, "Natural");

    let submitter = RecordingSubmitter::default();
    let identity = Identity::new("3f1c9a");

    let placed = place_order(&mut store, Some(&identity), &submitter).await?;

    assert_eq!(placed.id, OrderId::new(1));
    assert_eq!(placed.total, Decimal::new(6_199_00, 2));
    assert!(open(dir.path()).is_empty());

    let orders = submitter.orders.lock().map_err(|error| error.to_string())?;
    let order = orders.first().ok_or("no order recorded")?;
    assert_eq!(order.customer_id, "3f1c9a");
    assert_eq!(order.items.len(), 2);
    assert_eq!(
        order.items.first().map(|line| line.color.as_str()),
        Some("Madder Red")
    );

    Ok(())
}
