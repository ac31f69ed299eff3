//! Wishlist scenarios against a file-backed store.

use std::rc::Rc;

use tempfile::TempDir;
use testresult::TestResult;

use grooso::prelude::*;

fn open_wishlist(dir: &TempDir) -> Result<(WishlistManager, Rc<ToastQueue>), StoreError> {
    let toasts = Rc::new(ToastQueue::new());
    let store = FileStore::open(dir.path())?;

    let wishlist = WishlistManager::load(
        Rc::new(store) as Rc<dyn KeyValueStore>,
        Rc::clone(&toasts) as Rc<dyn Notifier>,
    );

    Ok((wishlist, toasts))
}

#[test]
fn toggle_adds_then_removes() -> TestResult {
    let dir = TempDir::new()?;
    let (mut wishlist, toasts) = open_wishlist(&dir)?;
    let eggs = Product::new(3, "Eggs", 240);

    assert_eq!(wishlist.toggle_wishlist(eggs.clone()), Toggled::Added);
    assert!(wishlist.is_in_wishlist(&ProductId::from(3)), "saved after first toggle");

    assert_eq!(wishlist.toggle_wishlist(eggs), Toggled::Removed);
    assert!(!wishlist.is_in_wishlist(&ProductId::from(3)), "gone after second toggle");

    let messages: Vec<_> = toasts.drain().into_iter().map(|toast| toast.message).collect();

    assert_eq!(messages, vec!["Added to wishlist", "Removed from wishlist"]);

    Ok(())
}

#[test]
fn duplicate_add_is_rejected_with_error_toast() -> TestResult {
    let dir = TempDir::new()?;
    let (mut wishlist, toasts) = open_wishlist(&dir)?;

    assert!(wishlist.add_to_wishlist(Product::new(1, "Milk", 120)), "first add saves");
    assert!(!wishlist.add_to_wishlist(Product::new(1, "Milk", 120)), "second add is refused");
    assert_eq!(wishlist.wishlist_count(), 1);

    let last = toasts.drain().pop().ok_or("no toast raised")?;

    assert_eq!(last.kind, NotificationKind::Error);
    assert_eq!(last.message, "Item already in wishlist");

    Ok(())
}

#[test]
fn numeric_and_text_ids_are_distinct() -> TestResult {
    let dir = TempDir::new()?;
    let (mut wishlist, _toasts) = open_wishlist(&dir)?;

    wishlist.add_to_wishlist(Product::new(1, "Milk", 120));
    wishlist.add_to_wishlist(Product::new("1", "Milk (text id)", 120));

    assert_eq!(wishlist.wishlist_count(), 2, "1 and \"1\" are different products");

    Ok(())
}

#[test]
fn wishlist_survives_reopen_in_order() -> TestResult {
    let dir = TempDir::new()?;

    {
        let (mut wishlist, _toasts) = open_wishlist(&dir)?;

        wishlist.add_to_wishlist(Product::new(2, "Bread", 275));
        wishlist.add_to_wishlist(Product::new("coffee", "Coffee Beans", 850).out_of_stock());
        wishlist.add_to_wishlist(Product::new(1, "Milk", 120));
    }

    let (wishlist, _toasts) = open_wishlist(&dir)?;

    let ids: Vec<_> = wishlist.entries().iter().map(|entry| entry.id.clone()).collect();

    assert_eq!(
        ids,
        vec![ProductId::from(2), ProductId::from("coffee"), ProductId::from(1)]
    );
    assert!(
        !wishlist.get(&ProductId::from("coffee")).ok_or("coffee missing")?.in_stock,
        "stock flag restored"
    );

    Ok(())
}

#[test]
fn duplicate_ids_in_store_load_empty() -> TestResult {
    let dir = TempDir::new()?;
    let product = Product::new(1, "Milk", 120);
    let stored = serde_json::to_string(&[product.clone(), product])?;

    FileStore::open(dir.path())?.set(WISHLIST_STORAGE_KEY, &stored)?;

    let (wishlist, _toasts) = open_wishlist(&dir)?;

    assert!(wishlist.is_empty(), "duplicate ids are rejected on load");

    Ok(())
}
