//! Domain types for the commerce REST API.
//!
//! Plain data-transfer shapes mirroring the backend's resources. They are
//! immutable snapshots of backend state: nothing here is mutated locally or
//! outlives the request/response cycle that produced it. Monetary amounts
//! stay decimal strings end-to-end, exactly as the backend transmits them;
//! parse with [`selectura_core::Price`] when arithmetic is needed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use selectura_core::{
    CategoryId, CustomerId, OrderId, OrderStatus, ProductId, ReviewId, ShippingZoneId, StockStatus,
    TagId,
};

// =============================================================================
// Product Types
// =============================================================================

/// Product or category image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// Backend image ID.
    #[serde(default)]
    pub id: Option<i64>,
    /// Image URL.
    pub src: String,
    /// Image name.
    #[serde(default)]
    pub name: String,
    /// Alt text for accessibility.
    #[serde(default)]
    pub alt: String,
}

/// Category reference embedded in a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// Tag reference embedded in a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRef {
    pub id: TagId,
    pub name: String,
    pub slug: String,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Public product page URL.
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub date_created: Option<NaiveDateTime>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    /// Effective price (sale price while a sale is active).
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub on_sale: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub stock_status: StockStatus,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub tags: Vec<TagRef>,
    #[serde(default)]
    pub images: Vec<Image>,
    /// Average rating as a decimal string (e.g. `"4.50"`).
    #[serde(default)]
    pub average_rating: String,
    #[serde(default)]
    pub rating_count: i64,
    #[serde(default)]
    pub total_sales: i64,
    #[serde(default)]
    pub related_ids: Vec<ProductId>,
}

impl Product {
    /// First image, if the product has any.
    #[must_use]
    pub fn main_image(&self) -> Option<&Image> {
        self.images.first()
    }
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    /// Parent category id; the backend sends 0 for top-level categories.
    #[serde(default)]
    pub parent: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<Image>,
    /// Number of products in the category.
    #[serde(default)]
    pub count: i64,
}

impl Category {
    /// Whether this category sits at the top of the hierarchy.
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.parent == 0
    }

    /// Parent category, if any.
    #[must_use]
    pub const fn parent_id(&self) -> Option<CategoryId> {
        if self.parent == 0 {
            None
        } else {
            Some(CategoryId::new(self.parent))
        }
    }
}

/// A customer review of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    #[serde(default)]
    pub date_created: Option<NaiveDateTime>,
    #[serde(default)]
    pub reviewer: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub rating: i64,
    #[serde(default)]
    pub verified: bool,
}

// =============================================================================
// Order Types
// =============================================================================

/// Billing or shipping address block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address_1: String,
    #[serde(default)]
    pub address_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A line item on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    /// Line subtotal before discounts, as a decimal string.
    #[serde(default)]
    pub subtotal: String,
    /// Line total, as a decimal string.
    #[serde(default)]
    pub total: String,
}

/// An order as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub date_created: Option<NaiveDateTime>,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub shipping_total: String,
    #[serde(default)]
    pub billing: Address,
    #[serde(default)]
    pub shipping: Address,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_method_title: String,
}

/// Line item for order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<i64>,
}

/// Payload for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub payment_method: String,
    pub payment_method_title: String,
    /// Whether the order is already paid (e.g. captured by the gateway).
    pub set_paid: bool,
    pub billing: Address,
    pub shipping: Address,
    pub line_items: Vec<LineItemRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
}

// =============================================================================
// Customer Types
// =============================================================================

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
}

/// Payload for creating a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// =============================================================================
// Shipping & Payment Types
// =============================================================================

/// A shipping zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingZone {
    pub id: ShippingZoneId,
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

/// A shipping method instance within a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Instance id within the zone.
    pub id: i64,
    /// Method slug (e.g. `flat_rate`, `free_shipping`).
    pub method_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub enabled: bool,
}

/// A configured payment gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentGateway {
    /// Gateway slug (e.g. `bacs`, `stripe`).
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
}

// =============================================================================
// Cart Types (session-scoped Store API)
// =============================================================================

/// Per-line prices of a cart item, as decimal strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartItemPrices {
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: String,
}

/// A line in the session cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Opaque per-line key assigned by the backend.
    pub key: String,
    /// Product the line refers to.
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub prices: CartItemPrices,
}

/// Cart totals, as decimal strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartTotals {
    #[serde(default)]
    pub total_items: String,
    #[serde(default)]
    pub total_price: String,
    #[serde(default)]
    pub currency_code: String,
}

/// The session-scoped cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub items_count: u32,
    #[serde(default)]
    pub totals: CartTotals,
}
