//! Built-in and file-backed product catalogues

use crate::error::{HaggleError, Result};
use crate::types::{AttributeValue, Attributes, Product, QualityGrade};
use std::path::Path;

/// The two mango lots the batch suite runs by default
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            name: "Alphonso Mangoes".to_string(),
            category: "Mangoes".to_string(),
            quantity: 100,
            quality_grade: QualityGrade::A,
            origin: "Ratnagiri".to_string(),
            base_market_price: 180_000,
            attributes: Attributes::from([
                ("ripeness".to_string(), AttributeValue::from("optimal")),
                ("export_grade".to_string(), AttributeValue::from(true)),
            ]),
        },
        Product {
            name: "Kesar Mangoes".to_string(),
            category: "Mangoes".to_string(),
            quantity: 150,
            quality_grade: QualityGrade::B,
            origin: "Gujarat".to_string(),
            base_market_price: 150_000,
            attributes: Attributes::from([
                ("ripeness".to_string(), AttributeValue::from("semi-ripe")),
                ("export_grade".to_string(), AttributeValue::from(false)),
            ]),
        },
    ]
}

/// Read a JSON array of products and validate each one
pub fn load_catalogue(path: &Path) -> Result<Vec<Product>> {
    let raw = std::fs::read_to_string(path)?;
    let products: Vec<Product> = serde_json::from_str(&raw)?;

    if products.is_empty() {
        return Err(HaggleError::InvalidProduct(format!(
            "{} contains no products",
            path.display()
        )));
    }
    for product in &products {
        product.validate()?;
    }

    tracing::debug!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Find a product by case-insensitive name or name prefix
pub fn find_product<'a>(products: &'a [Product], query: &str) -> Result<&'a Product> {
    let query = query.trim().to_lowercase();
    products
        .iter()
        .find(|p| p.name.to_lowercase() == query)
        .or_else(|| products.iter().find(|p| p.name.to_lowercase().starts_with(&query)))
        .ok_or_else(|| HaggleError::UnknownProduct(query))
}
