//! Cart manager behavior against real stores.

use std::sync::Arc;

use luxe_cache::{Cache, FileStore, KeyValueStore, MemoryStore};
use luxe_commerce::prelude::*;
use luxe_commerce::testkit::{FailingStore, RecordingPresenter, StubWidget};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CART_KEY: &str = "luxe-nails:cart";

fn usd(cents: i64) -> Money {
    Money::new(cents, Currency::USD)
}

fn widget() -> Option<Arc<dyn PaymentWidget>> {
    Some(Arc::new(StubWidget::new()))
}

fn load<S: KeyValueStore>(store: S) -> (CartManager<S, RecordingPresenter>, RecordingPresenter) {
    let presenter = RecordingPresenter::new();
    let manager = CartManager::load(StoreConfig::default(), store, presenter.clone(), widget());
    (manager, presenter)
}

fn assert_invariants(cart: &Cart) {
    let mut ids: Vec<&ProductId> = cart.items().iter().map(|i| &i.id).collect();
    let len = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), len, "duplicate ids in {:?}", cart);
    assert!(cart.items().iter().all(|i| i.quantity >= 1));
}

#[test]
fn add_then_add_again() {
    let (mut manager, _) = load(MemoryStore::new());

    manager.add("sku1", "Red Gel", usd(1200));
    assert_eq!(manager.count(), 1);
    let totals = manager.compute_totals();
    assert_eq!(totals.subtotal.display(), "$12.00");
    assert_eq!(totals.shipping.display(), "$5.99");
    assert_eq!(totals.total.display(), "$17.99");

    manager.add("sku1", "Red Gel", usd(1200));
    assert_eq!(manager.count(), 2);
    assert_eq!(manager.cart().len(), 1);
    assert_eq!(manager.compute_totals().subtotal.display(), "$24.00");
}

#[test]
fn subtotal_over_threshold_ships_free() {
    let (mut manager, _) = load(MemoryStore::new());
    manager.add("a", "Press-On Set", usd(3000));
    manager.add("a", "Press-On Set", usd(3000));

    let totals = manager.compute_totals();
    assert_eq!(totals.subtotal.amount_cents, 6000);
    assert!(totals.shipping.is_zero());
    assert_eq!(totals.total, totals.subtotal);
}

#[test]
fn compute_totals_is_pure() {
    let (mut manager, presenter) = load(MemoryStore::new());
    manager.add("a", "Gel Polish", usd(1250));
    let renders = presenter.log().lock().unwrap().renders.len();

    assert_eq!(manager.compute_totals(), manager.compute_totals());
    assert_eq!(presenter.log().lock().unwrap().renders.len(), renders);
}

#[test]
fn negative_delta_equal_to_quantity_removes() {
    let store = Arc::new(MemoryStore::new());
    let (mut manager, _) = load(Arc::clone(&store));
    manager.add("a", "Gel Polish", usd(1250));
    manager.add("a", "Gel Polish", usd(1250));

    let change = manager.update_quantity(&ProductId::new("a"), -2);
    assert_eq!(change, QuantityChange::Removed);
    assert!(manager.cart().is_empty());

    let persisted: Vec<StoredLine> = Cache::new(store).get(CART_KEY).unwrap().unwrap();
    assert!(persisted.is_empty());
}

#[test]
fn unknown_ids_still_render() {
    let (mut manager, presenter) = load(MemoryStore::new());
    manager.add("a", "Gel Polish", usd(1250));
    let before = presenter.log().lock().unwrap().renders.len();

    manager.remove(&ProductId::new("missing"));
    assert_eq!(
        manager.update_quantity(&ProductId::new("missing"), 1),
        QuantityChange::NotFound
    );

    assert_eq!(manager.count(), 1);
    assert_eq!(presenter.log().lock().unwrap().renders.len(), before + 2);
}

#[test]
fn random_sequences_keep_invariants() {
    let ids = ["a", "b", "c", "d"];
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (mut manager, _) = load(MemoryStore::new());

        for _ in 0..200 {
            let id = ids[rng.gen_range(0..ids.len())];
            match rng.gen_range(0..3) {
                0 => manager.add(id, id, usd(rng.gen_range(0..5000))),
                1 => manager.remove(&ProductId::new(id)),
                _ => {
                    manager.update_quantity(&ProductId::new(id), rng.gen_range(-3..=3));
                }
            }
            assert_invariants(manager.cart());
        }
    }
}

#[test]
fn persisted_shape_round_trips() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            CART_KEY,
            br#"[{"id":"a","name":"Gel Polish","price":12.5,"quantity":2}]"#,
        )
        .unwrap();

    let (manager, _) = load(Arc::clone(&store));
    let item = &manager.cart().items()[0];
    assert_eq!(item.name, "Gel Polish");
    assert_eq!(item.price_cents, 1250);
    assert_eq!(item.quantity, 2);

    let (reloaded, _) = load(store);
    assert_eq!(reloaded.cart(), manager.cart());
}

#[test]
fn zero_decimal_currency_prices_and_persists_in_yen() {
    let store = Arc::new(MemoryStore::new());
    let config = StoreConfig::from_toml_str(
        r#"
currency = "JPY"
free_shipping_threshold = 5000
flat_shipping_cost = 500
"#,
    )
    .unwrap();
    let mut manager = CartManager::load(
        config.clone(),
        Arc::clone(&store),
        RecordingPresenter::new(),
        widget(),
    );

    manager.add("a", "Gel Polish", Money::from_decimal(3000.0, Currency::JPY));
    let totals = manager.compute_totals();
    assert_eq!(totals.subtotal.display(), "\u{00a5}3000");
    assert_eq!(totals.shipping.display(), "\u{00a5}500");
    assert_eq!(totals.total.display(), "\u{00a5}3500");

    manager.add("a", "Gel Polish", Money::from_decimal(3000.0, Currency::JPY));
    let totals = manager.compute_totals();
    assert!(totals.shipping.is_zero());
    assert_eq!(totals.total.amount_cents, 6000);

    let raw = store.get(CART_KEY).unwrap().unwrap();
    assert_eq!(
        String::from_utf8(raw).unwrap(),
        r#"[{"id":"a","name":"Gel Polish","price":3000.0,"quantity":2}]"#
    );

    let reloaded = CartManager::load(config, store, RecordingPresenter::new(), widget());
    assert_eq!(reloaded.cart(), manager.cart());
}

#[test]
fn file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (mut manager, _) = load(FileStore::open(dir.path()).unwrap());
        manager.add("gel-red", "Crimson Gel", usd(1850));
        manager.add("oil", "Cuticle Oil", usd(1200));
        manager.update_quantity(&ProductId::new("oil"), 1);
    }

    let (manager, presenter) = load(FileStore::open(dir.path()).unwrap());
    assert_eq!(manager.count(), 3);
    assert_eq!(manager.cart().items()[0].id.as_str(), "gel-red");
    assert_eq!(presenter.log().lock().unwrap().last_badge(), Some(3));
}

#[test]
fn malformed_data_loads_empty() {
    let cases: [&[u8]; 5] = [
        b"not json",
        br#"{"id":"a"}"#,
        br#"[{"id":"a","name":"Gel","price":1,"quantity":0}]"#,
        br#"[{"id":"a","name":"Gel","price":1,"quantity":1},{"id":"a","name":"Gel","price":1,"quantity":1}]"#,
        br#"[{"id":"a","name":"x","price":-5,"quantity":1}]"#,
    ];
    for raw in cases {
        let store = MemoryStore::new();
        store.set(CART_KEY, raw).unwrap();
        let (manager, _) = load(store);
        assert!(manager.cart().is_empty());
    }
}

#[test]
fn failing_store_never_aborts_mutations() {
    let (mut manager, presenter) = load(FailingStore);

    manager.add("a", "Gel Polish", usd(1250));
    manager.add("b", "Top Coat", usd(900));
    manager.remove(&ProductId::new("b"));
    manager.update_quantity(&ProductId::new("a"), 4);

    assert_eq!(manager.count(), 5);
    assert_eq!(presenter.log().lock().unwrap().last_badge(), Some(5));
}

#[test]
fn checkout_control_follows_cart() {
    let (mut manager, presenter) = load(MemoryStore::new());
    manager.add("a", "Gel Polish", usd(1250));
    assert_eq!(
        presenter.log().lock().unwrap().last_control(),
        Some(&CheckoutControl::Button(ButtonStyle::default()))
    );

    manager.clear();
    assert_eq!(
        presenter.log().lock().unwrap().last_control(),
        Some(&CheckoutControl::Hidden)
    );
}

#[test]
fn custom_storage_key_is_used() {
    let store = Arc::new(MemoryStore::new());
    let config = StoreConfig {
        storage_key: "salon:paris:cart".to_string(),
        ..StoreConfig::default()
    };
    let mut manager = CartManager::load(
        config,
        Arc::clone(&store),
        RecordingPresenter::new(),
        widget(),
    );
    manager.add("a", "Gel Polish", usd(1250));

    assert!(store.exists("salon:paris:cart").unwrap());
    assert!(!store.exists(CART_KEY).unwrap());
}
