//! Products

use rust_decimal::Decimal;
use rusty_money::{Findable, Money, iso, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::{ids::Id, pricing::PricingError};

/// Catalog product as returned by the product service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub id: Id,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: Option<String>,

    /// Base price in major units
    pub price: Decimal,

    /// ISO 4217 currency code, US dollars when absent
    #[serde(default)]
    pub currency: Option<String>,

    /// Catalog category
    #[serde(default)]
    pub category: Option<String>,

    /// Units in stock
    #[serde(default)]
    pub stock_quantity: Option<u32>,

    /// Product images
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// Image attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    /// Image id
    #[serde(deserialize_with = "crate::ids::deserialize")]
    pub id: Id,

    /// Public image URL
    pub url: String,

    /// Whether this is the image shown in listings
    #[serde(default, alias = "isPrimary")]
    pub primary: bool,
}

impl Product {
    /// Currency the product is priced in.
    ///
    /// # Errors
    ///
    /// - [`PricingError::UnknownCurrency`]: the currency code is not an ISO 4217 code.
    pub fn currency(&self) -> Result<&'static Currency, PricingError> {
        match self.currency.as_deref() {
            None => Ok(iso::USD),
            Some(code) => Currency::find(code.trim())
                .ok_or_else(|| PricingError::UnknownCurrency(code.to_string())),
        }
    }

    /// Base price of a single unit.
    ///
    /// # Errors
    ///
    /// - [`PricingError::UnknownCurrency`]: the currency code is not an ISO 4217 code.
    pub fn unit_price(&self) -> Result<Money<'static, Currency>, PricingError> {
        Ok(Money::from_decimal(self.price, self.currency()?))
    }

    /// The primary image, falling back to the first one.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|image| image.primary)
            .or_else(|| self.images.first())
    }

    /// Whether any units are in stock; unknown stock counts as available.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock_quantity.is_none_or(|quantity| quantity > 0)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, USD};
    use testresult::TestResult;

    use super::*;

    fn product(currency: Option<&str>) -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Trail Shoe".to_string(),
            description: None,
            price: Decimal::new(8_999, 2),
            currency: currency.map(str::to_string),
            category: Some("Footwear".to_string()),
            stock_quantity: Some(0),
            images: Vec::new(),
        }
    }

    #[test]
    fn missing_currency_defaults_to_usd() -> TestResult {
        assert_eq!(product(None).unit_price()?, Money::from_minor(8_999, USD));

        Ok(())
    }

    #[test]
    fn explicit_currency_is_used() -> TestResult {
        assert_eq!(product(Some("EUR")).unit_price()?, Money::from_minor(8_999, EUR));

        Ok(())
    }

    #[test]
    fn unknown_currency_is_an_error() {
        assert_eq!(
            product(Some("XYZ")).unit_price(),
            Err(PricingError::UnknownCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn primary_image_prefers_flagged_image() -> TestResult {
        let decoded: Product = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "Lamp",
                "price": 45.5,
                "images": [
                    {"id": 1, "url": "https://cdn.example.com/a.jpg"},
                    {"id": 2, "url": "https://cdn.example.com/b.jpg", "isPrimary": true}
                ]
            }"#,
        )?;

        assert_eq!(
            decoded.primary_image().map(|image| image.id.as_str()),
            Some("2")
        );
        assert!(decoded.in_stock());

        Ok(())
    }

    #[test]
    fn zero_stock_is_out_of_stock() {
        assert!(!product(None).in_stock());
    }
}
