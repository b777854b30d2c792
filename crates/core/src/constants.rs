use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Scale every money computation is rounded to
pub const DECIMAL_PRECISION: u32 = 10;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Days per year used to annualize money-weighted returns
pub const DAYS_PER_YEAR: i64 = 365;

/// Tolerated distance of the target weights sum from 1 before warning
pub const WEIGHT_SUM_TOLERANCE: Decimal = dec!(0.01);

/// Comment attached to generated purchase lots when none is configured
pub const DEFAULT_LOT_COMMENT: &str = "lse";

/// Standard deviation, in years, of the simulated end of the withdrawal phase
pub const END_AGE_STD_DEV: f64 = 4.0;
