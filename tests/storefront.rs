//! Storefront flows over the demo catalog.

use std::{path::Path, rc::Rc};

use anyhow::anyhow;
use rusty_money::iso::GBP;
use tempfile::TempDir;
use testresult::TestResult;

use grooso::prelude::*;

fn demo_catalog() -> Result<Catalog, CatalogError> {
    Catalog::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog/demo.yml"))
}

fn open_storefront(
    dir: &TempDir,
    catalog: &Catalog,
) -> Result<(Storefront, Rc<ToastQueue>), StoreError> {
    let toasts = Rc::new(ToastQueue::new());
    let store = FileStore::open(dir.path())?;

    let storefront = Storefront::open(
        Rc::new(store) as Rc<dyn KeyValueStore>,
        Rc::clone(&toasts) as Rc<dyn Notifier>,
        catalog.currency(),
    );

    Ok((storefront, toasts))
}

fn product(catalog: &Catalog, key: &str) -> anyhow::Result<Product> {
    catalog
        .get(key)
        .cloned()
        .ok_or(anyhow!("{key} missing from demo catalog"))
}

#[test]
fn demo_catalog_loads() -> TestResult {
    let catalog = demo_catalog()?;

    assert_eq!(catalog.currency(), GBP);
    assert_eq!(catalog.len(), 6);
    assert!(
        catalog.entries().iter().any(|entry| !entry.product.in_stock),
        "demo catalog includes an out-of-stock product"
    );
    assert_eq!(product(&catalog, "milk")?.discount_percentage(), 20);

    Ok(())
}

#[test]
fn move_all_available_persists_both_collections() -> TestResult {
    let catalog = demo_catalog()?;
    let dir = TempDir::new()?;

    {
        let (mut shop, _toasts) = open_storefront(&dir, &catalog)?;

        for key in ["milk", "eggs", "bread"] {
            shop.wishlist_mut().add_to_wishlist(product(&catalog, key)?);
        }

        assert_eq!(shop.move_all_available_to_cart(), 2);
    }

    let (shop, _toasts) = open_storefront(&dir, &catalog)?;

    let cart_ids: Vec<_> = shop
        .cart()
        .items()
        .iter()
        .map(|item| item.product.id.clone())
        .collect();
    let wishlist_ids: Vec<_> = shop
        .wishlist()
        .entries()
        .iter()
        .map(|entry| entry.id.clone())
        .collect();

    assert_eq!(cart_ids, vec![ProductId::from(1), ProductId::from(2)]);
    assert_eq!(wishlist_ids, vec![ProductId::from(3)], "out-of-stock eggs stay saved");

    Ok(())
}

#[test]
fn move_out_of_stock_changes_nothing() -> TestResult {
    let catalog = demo_catalog()?;
    let dir = TempDir::new()?;
    let (mut shop, toasts) = open_storefront(&dir, &catalog)?;
    let avocado = product(&catalog, "avocado")?;
    let id = avocado.id.clone();

    shop.wishlist_mut().add_to_wishlist(avocado);
    toasts.drain();

    assert_eq!(shop.move_to_cart(&id), MoveOutcome::OutOfStock);
    assert!(shop.cart().is_empty(), "cart untouched");
    assert!(shop.wishlist().is_in_wishlist(&id), "wishlist untouched");
    assert_eq!(
        toasts.drain(),
        vec![Toast {
            kind: NotificationKind::Error,
            message: "Ripe Avocados x2 is out of stock".to_string(),
        }]
    );

    Ok(())
}

#[test]
fn cart_summary_renders_demo_products() -> TestResult {
    let catalog = demo_catalog()?;
    let dir = TempDir::new()?;
    let (mut shop, _toasts) = open_storefront(&dir, &catalog)?;

    shop.cart_mut().add_to_cart(product(&catalog, "coffee")?);
    shop.cart_mut().add_to_cart(product(&catalog, "apples")?);

    let mut out = Vec::new();

    write_cart_to(&mut out, shop.cart())?;

    let rendered = String::from_utf8(out)?;

    assert!(rendered.contains("Colombian Coffee Beans 500g"), "missing coffee:\n{rendered}");
    assert!(rendered.contains("(-20%)"), "missing apples discount:\n{rendered}");
    assert!(rendered.contains("Items:   2"), "missing count:\n{rendered}");

    Ok(())
}
