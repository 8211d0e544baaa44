use crate::models::budget::Currency;

pub struct CurrencyConverter;

impl CurrencyConverter {
    /// Convert an amount to INR. Unknown currency codes convert at 1.0.
    pub fn to_reference(amount: f64, currency_code: &str) -> f64 {
        let rate = Currency::from_code(currency_code)
            .map(|c| c.rate_to_reference())
            .unwrap_or(1.0);
        amount * rate
    }
}
