//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::cart::LineItem;

/// Errors that can occur while calculating cart totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalPriceError {
    /// A line total or the running sum exceeded the representable range.
    #[error("cart total overflowed")]
    Overflow,
}

/// Price of one line: unit price times quantity, in minor units.
pub fn line_total(item: &LineItem) -> Option<i64> {
    item.product
        .price
        .checked_mul(i64::from(item.quantity.get()))
}

/// Amount saved on one line against the original price, in minor units.
pub fn line_savings(item: &LineItem) -> Option<i64> {
    item.product
        .original_price
        .checked_sub(item.product.price)
        .map(|saving| saving.max(0))
        .and_then(|saving| saving.checked_mul(i64::from(item.quantity.get())))
}

/// Calculates the total price of a list of line items.
///
/// An empty list totals zero in the given currency.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: the total does not fit in minor units.
pub fn total_price<'a>(
    items: &[LineItem],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    sum_minor(items, line_total).map(|minor| Money::from_minor(minor, currency))
}

/// Calculates the total saved against original prices.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: the total does not fit in minor units.
pub fn total_savings<'a>(
    items: &[LineItem],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    sum_minor(items, line_savings).map(|minor| Money::from_minor(minor, currency))
}

fn sum_minor(
    items: &[LineItem],
    per_line: impl Fn(&LineItem) -> Option<i64>,
) -> Result<i64, TotalPriceError> {
    items.iter().try_fold(0_i64, |acc, item| {
        per_line(item)
            .and_then(|line| acc.checked_add(line))
            .ok_or(TotalPriceError::Overflow)
    })
}

/// Whole-percent discount of `price` against `original_price`, rounded half up.
///
/// Returns 0 when there is no discount or the original price is not positive.
pub fn discount_percentage(original_price: i64, price: i64) -> u32 {
    if original_price <= 0 || price >= original_price {
        return 0;
    }

    let saved = Decimal::from(original_price) - Decimal::from(price);

    (saved * Decimal::ONE_HUNDRED)
        .checked_div(Decimal::from(original_price))
        .map(|percent| percent.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|percent| percent.to_u32())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn line(id: u64, price: i64, original_price: i64, quantity: u32) -> LineItem {
        LineItem {
            product: Product::new(id, format!("Product {id}"), price)
                .with_original_price(original_price),
            quantity: NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN),
        }
    }

    #[test]
    fn total_price_multiplies_by_quantity() -> TestResult {
        let items = [line(1, 100, 100, 3), line(2, 50, 50, 1)];

        assert_eq!(total_price(&items, GBP)?, Money::from_minor(350, GBP));

        Ok(())
    }

    #[test]
    fn total_price_of_nothing_is_zero() -> TestResult {
        assert_eq!(total_price(&[], GBP)?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn total_price_reports_overflow() {
        let items = [line(1, i64::MAX, i64::MAX, 2)];

        assert_eq!(total_price(&items, GBP), Err(TotalPriceError::Overflow));
    }

    #[test]
    fn total_savings_counts_quantity() -> TestResult {
        let items = [line(1, 80, 100, 2), line(2, 50, 50, 4)];

        assert_eq!(total_savings(&items, GBP)?, Money::from_minor(40, GBP));

        Ok(())
    }

    #[test]
    fn discount_percentage_without_discount_is_zero() {
        assert_eq!(discount_percentage(100, 100), 0);
        assert_eq!(discount_percentage(0, 0), 0);
        assert_eq!(discount_percentage(100, 120), 0);
    }

    #[test]
    fn discount_percentage_rounds_half_up() {
        assert_eq!(discount_percentage(200, 199), 1);
        assert_eq!(discount_percentage(8, 7), 13);
        assert_eq!(discount_percentage(120, 100), 17);
    }
}
