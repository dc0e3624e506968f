//! Pure helpers over already-fetched product lists.
//!
//! Sorting and filtering happen client-side on in-memory arrays; nothing
//! here performs I/O. Prices arrive as backend decimal strings and are
//! parsed with decimal arithmetic - an unparseable price sorts and filters
//! as zero rather than poisoning the whole list.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use super::types::Product;

/// Client-side product orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortKey {
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Most recently created first.
    Newest,
    /// Best rated first (rating, then review count).
    Popularity,
}

/// Effective numeric price of a product; zero when missing or unparseable.
#[must_use]
pub fn product_price(product: &Product) -> Decimal {
    product
        .price
        .trim()
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
}

/// Sort a product list in place.
///
/// The sort is stable: products that compare equal keep their original
/// relative order.
pub fn sort_products(products: &mut [Product], key: ProductSortKey) {
    match key {
        ProductSortKey::PriceAsc => {
            products.sort_by(|a, b| product_price(a).cmp(&product_price(b)));
        }
        ProductSortKey::PriceDesc => {
            products.sort_by(|a, b| product_price(b).cmp(&product_price(a)));
        }
        ProductSortKey::Newest => {
            // Products without a creation date sink to the end
            products.sort_by(|a, b| match (a.date_created, b.date_created) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
        ProductSortKey::Popularity => {
            products.sort_by(|a, b| {
                average_rating(b)
                    .cmp(&average_rating(a))
                    .then_with(|| b.rating_count.cmp(&a.rating_count))
            });
        }
    }
}

/// Products priced within `[min, max]` inclusive, preserving the original
/// relative order.
#[must_use]
pub fn filter_products_by_price_range(
    products: &[Product],
    min: Decimal,
    max: Decimal,
) -> Vec<Product> {
    products
        .iter()
        .filter(|product| {
            let price = product_price(product);
            min <= price && price <= max
        })
        .cloned()
        .collect()
}

fn average_rating(product: &Product) -> Decimal {
    product
        .average_rating
        .trim()
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(id: i64, price: &str, date: &str, rating: &str, rating_count: i64) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Product {id}"),
            "slug": format!("product-{id}"),
            "price": price,
            "date_created": date,
            "average_rating": rating,
            "rating_count": rating_count,
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "19.90", "2026-03-01T10:00:00", "4.50", 12),
            product(2, "5.00", "2026-05-20T10:00:00", "4.50", 3),
            product(3, "49.90", "2026-01-15T10:00:00", "2.00", 40),
            product(4, "19.90", "2026-04-02T10:00:00", "5.00", 1),
        ]
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_sort_price_asc_is_non_decreasing() {
        let mut products = catalog();
        sort_products(&mut products, ProductSortKey::PriceAsc);
        let prices: Vec<Decimal> = products.iter().map(product_price).collect();
        assert!(prices.windows(2).all(|pair| pair[0] <= pair[1]));
        // Stable: 1 and 4 share a price and keep their original order
        assert_eq!(ids(&products), vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_sort_price_desc_is_non_increasing() {
        let mut products = catalog();
        sort_products(&mut products, ProductSortKey::PriceDesc);
        let prices: Vec<Decimal> = products.iter().map(product_price).collect();
        assert!(prices.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut products = catalog();
        sort_products(&mut products, ProductSortKey::Newest);
        assert_eq!(ids(&products), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_popularity_breaks_ties_on_count() {
        let mut products = catalog();
        sort_products(&mut products, ProductSortKey::Popularity);
        // 4 has the best rating; 1 and 2 tie on rating, 1 has more reviews
        assert_eq!(ids(&products), vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_filter_price_range_is_inclusive_and_order_preserving() {
        let products = catalog();
        let filtered = filter_products_by_price_range(
            &products,
            "5.00".parse().unwrap(),
            "19.90".parse().unwrap(),
        );
        assert_eq!(ids(&filtered), vec![1, 2, 4]);
    }

    #[test]
    fn test_filter_price_range_empty_band() {
        let products = catalog();
        let filtered = filter_products_by_price_range(
            &products,
            "100".parse().unwrap(),
            "200".parse().unwrap(),
        );
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_unparseable_price_counts_as_zero() {
        let mut products = vec![
            product(1, "oops", "2026-01-01T00:00:00", "0", 0),
            product(2, "1.00", "2026-01-01T00:00:00", "0", 0),
        ];
        sort_products(&mut products, ProductSortKey::PriceAsc);
        assert_eq!(ids(&products), vec![1, 2]);
    }
}
