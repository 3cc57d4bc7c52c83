/// Fixed reference currency; every rate table expresses rates against it
/// with a rate of exactly 1.
pub const BASE_CURRENCY: &str = "XAF";

/// How long a fetched rate table stays fresh, in milliseconds.
pub const RATE_REFRESH_INTERVAL_MS: i64 = 3_600_000;

/// Seconds the checkout waits before opening the payment link.
pub const PAYMENT_REDIRECT_DELAY_SECS: u64 = 5;

/// Decimal precision for displayed prices.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
