//! Money formatting for response bodies.
//!
//! Amounts are sent as decimal strings with two fractional digits so clients never see binary
//! floating point rounding.

use rust_decimal::{Decimal, RoundingStrategy};

const MONEY_SCALE: u32 = 2;

/// Render `amount` rounded half away from zero to cents, e.g. `"12.50"`.
pub(crate) fn format_money(amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);

    rounded.rescale(MONEY_SCALE);

    rounded.to_string()
}
