//! Price parsing and formatting using decimal arithmetic.
//!
//! The commerce backend transmits every monetary amount as a decimal string
//! (`"19.90"`). Amounts are parsed into [`rust_decimal::Decimal`] for
//! arithmetic and rendered for display with the storefront's French EUR
//! formatting.

use core::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Narrow no-break space used as the French thousands separator.
const GROUP_SEPARATOR: char = '\u{202f}';

/// No-break space between the amount and the currency symbol.
const CURRENCY_SEPARATOR: char = '\u{a0}';

/// ISO 4217 currency codes accepted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
}

impl CurrencyCode {
    /// Currency symbol used for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD => "$",
            Self::GBP => "£",
        }
    }
}

/// A monetary amount with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a backend decimal string (e.g. `"19.90"`) into a price.
    ///
    /// Returns `None` for empty or unparseable input.
    #[must_use]
    pub fn parse(s: &str, currency_code: CurrencyCode) -> Option<Self> {
        let amount = s.trim().parse::<Decimal>().ok()?;
        Some(Self {
            amount,
            currency_code,
        })
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency_code {
            CurrencyCode::EUR => write!(f, "{}", format_eur(self.amount)),
            code => write!(f, "{}{:.2}", code.symbol(), self.amount),
        }
    }
}

/// Format an amount as a French-locale EUR string, e.g. `19,90 €`.
///
/// Comma decimal separator, narrow no-break space between thousands groups,
/// no-break space before the euro sign. Rounds to two decimal places with
/// ties away from zero.
#[must_use]
pub fn format_eur(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.abs().is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{},{frac_part}{CURRENCY_SEPARATOR}€",
        group_thousands(int_part)
    )
}

/// Insert the French thousands separator into an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(*c);
    }
    out
}

/// Percentage discount between a regular and a sale price, rounded to the
/// nearest whole percent (ties away from zero).
///
/// Returns 0 when either input is empty or unparseable, when the regular
/// price is non-positive, or when the sale price is not an actual reduction
/// (zero, negative, or at/above the regular price).
#[must_use]
pub fn discount_percent(regular: &str, sale: &str) -> u32 {
    let Ok(regular) = regular.trim().parse::<Decimal>() else {
        return 0;
    };
    let Ok(sale) = sale.trim().parse::<Decimal>() else {
        return 0;
    };
    if regular <= Decimal::ZERO || sale <= Decimal::ZERO || sale >= regular {
        return 0;
    }

    let pct = (regular - sale) / regular * Decimal::ONE_HUNDRED;
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}
