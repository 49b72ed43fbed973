//! Marketplace money math and input validation.

use crate::error::CoreError;

/// Marketplace fee retained by the platform, in percent of the sale price.
pub const TAX_RATE_PCT: i64 = 10;

/// Coins the seller receives for a sale at `price`, after tax.
///
/// Computed once when the listing is created and trusted at sale time, so
/// a tax-rate change cannot retroactively alter an open listing's payout.
pub fn net_seller(price: i64) -> i64 {
    price * (100 - TAX_RATE_PCT) / 100
}

/// Coins the platform retains for a sale at `price`.
pub fn platform_fee(price: i64) -> i64 {
    price - net_seller(price)
}

/// Listing prices must be strictly positive.
pub fn validate_price(price: i64) -> Result<(), CoreError> {
    if price <= 0 {
        return Err(CoreError::InvalidArgument(
            "price must be greater than zero".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_seller_floors_at_ten_percent_tax() {
        assert_eq!(net_seller(100), 90);
        assert_eq!(net_seller(99), 89);
        assert_eq!(net_seller(1), 0);
        assert_eq!(net_seller(10), 9);
    }

    #[test]
    fn tax_is_the_difference_between_price_and_net() {
        for price in [1, 10, 99, 100, 12_345] {
            assert_eq!(net_seller(price) + platform_fee(price), price);
        }
    }

    #[test]
    fn trade_conserves_coins_except_for_the_tax_burn() {
        // buyer -price, seller +net: the system loses exactly the fee.
        let price = 250;
        let buyer_delta = -price;
        let seller_delta = net_seller(price);
        assert_eq!(-(buyer_delta + seller_delta), platform_fee(price));
        assert_eq!(platform_fee(price), 25);
    }

    #[test]
    fn zero_and_negative_prices_are_rejected() {
        assert!(validate_price(0).is_err());
        assert!(validate_price(-5).is_err());
        assert!(validate_price(1).is_ok());
    }
}
