//! Order and customer operations.
//!
//! Mutations post through the client with a zero cache window, so their
//! responses are never replayed. Failures are logged here with their
//! operation context before propagating, so the UI layer can show a
//! notification without losing the original error.

use tracing::instrument;

use selectura_core::{CustomerId, Email, OrderId};

use super::client::{DEFAULT_CACHE_TTL, NO_CACHE};
use super::types::{Customer, CustomerRequest, Order, OrderRequest};
use super::{WooClient, WooError};

/// Outcome of [`WooClient::create_customer`].
///
/// The backend rejects a second registration for a known email address;
/// in that case the existing account is looked up and returned instead of
/// surfacing the conflict.
#[derive(Debug, Clone)]
pub enum CreatedCustomer {
    /// A new account was registered.
    Created(Customer),
    /// The email was already registered; this is the existing account.
    Existing(Customer),
}

impl CreatedCustomer {
    /// The customer record, however it was obtained.
    #[must_use]
    pub fn into_inner(self) -> Customer {
        match self {
            Self::Created(customer) | Self::Existing(customer) => customer,
        }
    }
}

impl WooClient {
    // =========================================================================
    // Order Methods
    // =========================================================================

    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order or the request
    /// fails; the error is logged here before propagating.
    #[instrument(skip(self, order))]
    pub async fn create_order(&self, order: &OrderRequest) -> Result<Order, WooError> {
        let body = serde_json::to_value(order)?;
        self.post_json("orders", &body)
            .await
            .inspect_err(|error| tracing::error!(%error, "failed to create order"))
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the API request
    /// fails.
    #[instrument(skip(self), fields(order = %order_id))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, WooError> {
        self.get_json(&format!("orders/{order_id}"), DEFAULT_CACHE_TTL)
            .await
    }

    /// Get a customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(customer = %customer_id))]
    pub async fn get_customer_orders(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, WooError> {
        self.get_json(
            &format!("orders?customer={customer_id}&orderby=date&order=desc"),
            DEFAULT_CACHE_TTL,
        )
        .await
    }

    // =========================================================================
    // Customer Methods
    // =========================================================================

    /// Register a customer account.
    ///
    /// If the backend reports the email as already registered, the existing
    /// account is fetched by email and returned as
    /// [`CreatedCustomer::Existing`] instead of an error.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails for any other reason, or if
    /// the fallback lookup fails; errors are logged here before
    /// propagating.
    #[instrument(skip(self, customer), fields(email = %customer.email))]
    pub async fn create_customer(
        &self,
        customer: &CustomerRequest,
    ) -> Result<CreatedCustomer, WooError> {
        let body = serde_json::to_value(customer)?;
        match self.post_json::<Customer>("customers", &body).await {
            Ok(created) => Ok(CreatedCustomer::Created(created)),
            Err(error) if error.is_duplicate_email() => {
                tracing::warn!(
                    email = %customer.email,
                    "email already registered, falling back to lookup"
                );
                let Ok(email) = Email::parse(&customer.email) else {
                    return Err(error);
                };
                let existing = self.get_customer_by_email(&email).await?;
                Ok(CreatedCustomer::Existing(existing))
            }
            Err(error) => {
                tracing::error!(%error, "failed to create customer");
                Err(error)
            }
        }
    }

    /// Look up a customer by email address.
    ///
    /// Uncached: account state must be current when this is consulted.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::NotFound`] if no account matches, or an error if
    /// the API request fails.
    #[instrument(skip(self, email))]
    pub async fn get_customer_by_email(&self, email: &Email) -> Result<Customer, WooError> {
        let matches: Vec<Customer> = self
            .get_json(
                &format!("customers?email={}", urlencoding::encode(email.as_str())),
                NO_CACHE,
            )
            .await?;

        matches
            .into_iter()
            .next()
            .ok_or_else(|| WooError::NotFound(format!("customer {email}")))
    }
}
