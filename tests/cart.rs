//! Cart scenarios against a file-backed store.
//!
//! Each test opens a fresh temporary data directory, drives the cart through
//! its public API and re-opens the directory to check what was persisted.

use std::{cell::RefCell, rc::Rc};

use rusty_money::{Money, iso::GBP};
use tempfile::TempDir;
use testresult::TestResult;

use grooso::prelude::*;

fn open_cart(dir: &TempDir) -> Result<(CartManager, Rc<ToastQueue>), StoreError> {
    let toasts = Rc::new(ToastQueue::new());
    let store = FileStore::open(dir.path())?;

    let cart = CartManager::load(
        Rc::new(store) as Rc<dyn KeyValueStore>,
        Rc::clone(&toasts) as Rc<dyn Notifier>,
        GBP,
    );

    Ok((cart, toasts))
}

#[test]
fn quantities_count_and_total_follow_updates() -> TestResult {
    let dir = TempDir::new()?;
    let (mut cart, _toasts) = open_cart(&dir)?;

    cart.add_to_cart(Product::new(1, "Milk", 100));
    cart.add_to_cart(Product::new(2, "Bread", 50));
    cart.update_quantity(&ProductId::from(1), 3);

    let lines: Vec<_> = cart
        .items()
        .iter()
        .map(|item| (item.product.id.clone(), item.quantity.get()))
        .collect();

    assert_eq!(
        lines,
        vec![(ProductId::from(1), 3), (ProductId::from(2), 1)],
        "lines keep insertion order"
    );
    assert_eq!(cart.items_count(), 4, "items count sums quantities");
    assert_eq!(cart.total()?, Money::from_minor(350, GBP));

    Ok(())
}

#[test]
fn cart_survives_reopen() -> TestResult {
    let dir = TempDir::new()?;

    {
        let (mut cart, _toasts) = open_cart(&dir)?;

        cart.add_to_cart(Product::new(1, "Milk", 120).with_original_price(150));
        cart.add_to_cart(Product::new(1, "Milk", 120).with_original_price(150));
        cart.add_to_cart(Product::new("coffee", "Coffee Beans", 850));
    }

    let (cart, toasts) = open_cart(&dir)?;

    assert_eq!(cart.len(), 2, "both lines restored");
    assert_eq!(cart.items_count(), 3, "quantities restored");
    assert_eq!(cart.savings()?, Money::from_minor(60, GBP));
    assert!(toasts.is_empty(), "loading raises no notifications");

    Ok(())
}

#[test]
fn clear_then_reopen_is_empty() -> TestResult {
    let dir = TempDir::new()?;

    {
        let (mut cart, _toasts) = open_cart(&dir)?;

        cart.add_to_cart(Product::new(1, "Milk", 120));
        cart.clear_cart();
    }

    let (cart, _toasts) = open_cart(&dir)?;

    assert!(cart.is_empty(), "cleared cart reloads empty");
    assert_eq!(cart.total()?, Money::from_minor(0, GBP));

    Ok(())
}

#[test]
fn quantity_zero_removes_line_and_notifies() -> TestResult {
    let dir = TempDir::new()?;
    let (mut cart, toasts) = open_cart(&dir)?;

    cart.add_to_cart(Product::new(1, "Milk", 120));
    toasts.drain();

    cart.update_quantity(&ProductId::from(1), 0);

    assert!(cart.is_empty(), "line removed");
    assert_eq!(
        toasts.drain(),
        vec![Toast {
            kind: NotificationKind::Success,
            message: "Milk removed from cart".to_string(),
        }]
    );

    Ok(())
}

#[test]
fn corrupt_stored_cart_loads_empty() -> TestResult {
    let dir = TempDir::new()?;

    FileStore::open(dir.path())?.set(CART_STORAGE_KEY, "{not json")?;

    let (mut cart, _toasts) = open_cart(&dir)?;

    assert!(cart.is_empty(), "corrupt data recovers to an empty cart");

    cart.add_to_cart(Product::new(1, "Milk", 120));

    let (reopened, _toasts) = open_cart(&dir)?;

    assert_eq!(reopened.len(), 1, "next write replaces the corrupt data");

    Ok(())
}

#[test]
fn subscribers_see_events_after_persisting() -> TestResult {
    let dir = TempDir::new()?;
    let (mut cart, _toasts) = open_cart(&dir)?;
    let store = FileStore::open(dir.path())?;
    let seen = Rc::new(RefCell::new(Vec::new()));

    let recorder = Rc::clone(&seen);
    cart.subscribe(move |event| {
        let persisted = store.get(CART_STORAGE_KEY).ok().flatten();

        recorder.borrow_mut().push((event.clone(), persisted.is_some()));
    });

    cart.add_to_cart(Product::new(1, "Milk", 120));
    cart.add_to_cart(Product::new(1, "Milk", 120));
    cart.remove_from_cart(&ProductId::from(1));

    assert_eq!(
        *seen.borrow(),
        vec![
            (CartEvent::ItemAdded { id: ProductId::from(1) }, true),
            (
                CartEvent::QuantityChanged {
                    id: ProductId::from(1),
                    quantity: 2,
                },
                true,
            ),
            (CartEvent::ItemRemoved { id: ProductId::from(1) }, true),
        ]
    );

    Ok(())
}
