use crate::{Error, Product, Result};
use std::path::PathBuf;

/// The values of the add form, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub image: Option<PathBuf>,
}

impl ProductForm {
    /// Checks every field and builds the product.
    ///
    /// All problems are reported at once in [`Error::InvalidInput`].
    ///
    /// # Examples
    /// ```
    /// use invoice::ProductForm;
    ///
    /// let form = ProductForm {
    ///     name: "Chair".to_owned(),
    ///     quantity: "2".to_owned(),
    ///     unit_price: "35.50".to_owned(),
    ///     image: None,
    /// };
    ///
    /// let product = form.validate().unwrap();
    /// assert_eq!(35.5, product.unit_price());
    /// ```
    pub fn validate(&self) -> Result<Product> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name must not be empty".to_owned());
        }

        let quantity = quantity_field(&self.quantity)
            .map_err(|problem| problems.push(problem))
            .ok();

        let unit_price = price_field(&self.unit_price)
            .map_err(|problem| problems.push(problem))
            .ok();

        match (quantity, unit_price) {
            (Some(quantity), Some(unit_price)) if problems.is_empty() => Ok(Product::new(
                self.name.as_str(),
                quantity,
                unit_price,
                self.image.clone(),
            )),
            _ => Err(Error::InvalidInput(problems)),
        }
    }

    /// Checks a quantity typed outside the form, such as a cell edit.
    pub fn parse_quantity(text: &str) -> Result<u32> {
        quantity_field(text).map_err(|problem| Error::InvalidInput(vec![problem]))
    }

    /// Checks a price typed outside the form, such as a cell edit.
    pub fn parse_price(text: &str) -> Result<f64> {
        price_field(text).map_err(|problem| Error::InvalidInput(vec![problem]))
    }
}

fn quantity_field(text: &str) -> std::result::Result<u32, String> {
    match text.trim() {
        "" => Err("quantity must not be empty".to_owned()),
        text => text
            .parse::<u32>()
            .map_err(|_| format!("quantity must be a whole number, got {:?}", text)),
    }
}

fn price_field(text: &str) -> std::result::Result<f64, String> {
    match text.trim() {
        "" => Err("price must not be empty".to_owned()),
        text => well_formed_price(text)
            .ok_or_else(|| format!("price must be a positive number, got {:?}", text)),
    }
}

// Digits with at most one `.`, like the input filter of the form.
fn well_formed_price(text: &str) -> Option<f64> {
    let well_formed = text.chars().all(|c| c.is_ascii_digit() || c == '.')
        && text.matches('.').count() <= 1
        && text.chars().any(|c| c.is_ascii_digit());

    if well_formed {
        text.parse::<f64>().ok().filter(|price| price.is_finite())
    } else {
        None
    }
}
