//! Catalog read accessors: products, categories, reviews, shipping, payment.
//!
//! Every accessor here is a read against the authenticated REST API with the
//! default five-minute staleness window. Duplicate calls inside that window
//! are served from the response cache without touching the network.

use tracing::instrument;

use selectura_core::{CategoryId, ProductId, ShippingZoneId};

use super::client::DEFAULT_CACHE_TTL;
use super::types::{Category, PaymentGateway, Product, Review, ShippingMethod, ShippingZone};
use super::{WooClient, WooError};

impl WooClient {
    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a page of products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, per_page: u32, page: u32) -> Result<Vec<Product>, WooError> {
        self.get_json(
            &format!("products?per_page={per_page}&page={page}&orderby=date&order=desc"),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    /// Get featured products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_featured_products(&self, limit: u32) -> Result<Vec<Product>, WooError> {
        self.get_json(
            &format!("products?featured=true&per_page={limit}"),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    /// Get products currently on sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_on_sale_products(&self, limit: u32) -> Result<Vec<Product>, WooError> {
        self.get_json(
            &format!("products?on_sale=true&per_page={limit}"),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    /// Get the products in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(category = %category_id))]
    pub async fn get_products_by_category(
        &self,
        category_id: CategoryId,
        per_page: u32,
    ) -> Result<Vec<Product>, WooError> {
        self.get_json(
            &format!("products?category={category_id}&per_page={per_page}"),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the API request
    /// fails.
    #[instrument(skip(self), fields(product = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, WooError> {
        self.get_json(&format!("products/{product_id}"), DEFAULT_CACHE_TTL)
            .await
    }

    /// Get a product by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::NotFound`] if no product has the slug, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Product, WooError> {
        let matches: Vec<Product> = self
            .get_json(
                &format!("products?slug={}", urlencoding::encode(slug)),
                DEFAULT_CACHE_TTL,
            )
            .await?;

        matches
            .into_iter()
            .next()
            .ok_or_else(|| WooError::NotFound(format!("product {slug}")))
    }

    /// Full-text product search.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(term = %term))]
    pub async fn search_products(&self, term: &str, limit: u32) -> Result<Vec<Product>, WooError> {
        self.get_json(
            &format!(
                "products?search={}&per_page={limit}",
                urlencoding::encode(term)
            ),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    /// Get specific products by id, preserving the backend's ordering.
    ///
    /// Used for "related products" sections driven by a product's
    /// `related_ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, ids))]
    pub async fn get_products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, WooError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let include = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.get_json(
            &format!("products?include={include}&per_page={}", ids.len()),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// Get all product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, WooError> {
        self.get_json(
            "products/categories?per_page=100&hide_empty=true",
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    /// Get top-level categories (no parent).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_top_level_categories(&self) -> Result<Vec<Category>, WooError> {
        self.get_json(
            "products/categories?parent=0&per_page=100&hide_empty=true",
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    /// Get the child categories of a parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(parent = %parent))]
    pub async fn get_subcategories(&self, parent: CategoryId) -> Result<Vec<Category>, WooError> {
        self.get_json(
            &format!("products/categories?parent={parent}&per_page=100"),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    /// Get a category by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::NotFound`] if no category has the slug, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_category_by_slug(&self, slug: &str) -> Result<Category, WooError> {
        let matches: Vec<Category> = self
            .get_json(
                &format!("products/categories?slug={}", urlencoding::encode(slug)),
                DEFAULT_CACHE_TTL,
            )
            .await?;

        matches
            .into_iter()
            .next()
            .ok_or_else(|| WooError::NotFound(format!("category {slug}")))
    }

    // =========================================================================
    // Review Methods
    // =========================================================================

    /// Get the reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product = %product_id))]
    pub async fn get_product_reviews(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, WooError> {
        self.get_json(
            &format!("products/reviews?product={product_id}"),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    // =========================================================================
    // Shipping & Payment Methods
    // =========================================================================

    /// Get all shipping zones.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_shipping_zones(&self) -> Result<Vec<ShippingZone>, WooError> {
        self.get_json("shipping/zones", DEFAULT_CACHE_TTL).await
    }

    /// Get the shipping methods configured for a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(zone = %zone_id))]
    pub async fn get_shipping_methods(
        &self,
        zone_id: ShippingZoneId,
    ) -> Result<Vec<ShippingMethod>, WooError> {
        self.get_json(
            &format!("shipping/zones/{zone_id}/methods"),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    /// Get the enabled payment gateways.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_payment_gateways(&self) -> Result<Vec<PaymentGateway>, WooError> {
        let gateways: Vec<PaymentGateway> =
            self.get_json("payment_gateways", DEFAULT_CACHE_TTL).await?;
        Ok(gateways.into_iter().filter(|g| g.enabled).collect())
    }
}
