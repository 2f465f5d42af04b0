//! Common fixtures for pixkit-lib integration tests

use pixkit_lib::{Amount, PaymentData};
use rust_decimal::Decimal;

/// Recipient name used by the published vector
pub const ND: &str = "Manoel";
/// Pix key used by the published vector
pub const CD: &str = "11111111111";
/// City used by the published vector
pub const CR: &str = "Palmas";

/// Payload for `sample()` with the default transaction id
pub const PUBLISHED: &str = "00020126370014BR.GOV.BCB.PIX011111111111111020052040000530398654041.005802BR5906Manoel6006Palmas62070503***630477F1";

/// Payment data behind the published vector
#[allow(dead_code)]
pub fn sample() -> PaymentData {
    PaymentData::new(ND, CD, Amount::from_str_checked("1.0").unwrap(), CR).unwrap()
}

/// Payment data with the given amount and the sample text fields
#[allow(dead_code)]
pub fn with_amount(amount: Decimal) -> pixkit_lib::Result<PaymentData> {
    PaymentData::new(ND, CD, amount, CR)
}

/// Install a test subscriber so `tracing` output shows up with `--nocapture`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
