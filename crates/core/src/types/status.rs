//! Status enums mirroring the commerce backend's vocabulary.

use serde::{Deserialize, Serialize};

/// Product stock status.
///
/// Maps to the backend's `stock_status` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    OnBackorder,
}

impl StockStatus {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn is_purchasable(&self) -> bool {
        matches!(self, Self::InStock | Self::OnBackorder)
    }
}

/// Order status.
///
/// The set of statuses is controlled by the backend; values outside the
/// documented vocabulary decode as [`OrderStatus::Unknown`] instead of
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
    Draft,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Whether the order has reached a terminal state.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Cancelled | Self::Refunded | Self::Failed
        )
    }
}
