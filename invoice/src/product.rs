use std::fmt;
use std::path::{Path, PathBuf};

/// One line item of the list.
///
/// Setters do not validate; see [`ProductForm`](crate::ProductForm) for the checks
/// applied before a product is added.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Product {
    name: String,
    quantity: u32,
    unit_price: f64,
    file_path: Option<PathBuf>,
}

impl Product {
    /// Constructs a new product. An empty image path is stored as no path.
    pub fn new<S: Into<String>>(
        name: S,
        quantity: u32,
        unit_price: f64,
        file_path: Option<PathBuf>,
    ) -> Product {
        Product {
            name: name.into(),
            quantity,
            unit_price,
            file_path: non_empty(file_path),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn set_unit_price(&mut self, unit_price: f64) {
        self.unit_price = unit_price;
    }

    /// Path of the attached image, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_file_path(&mut self, file_path: Option<PathBuf>) {
        self.file_path = non_empty(file_path);
    }
}

fn non_empty(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Product [name={}, quantity={}, unitPrice={}, filePath=",
            self.name, self.quantity, self.unit_price
        )?;

        match &self.file_path {
            Some(path) => write!(f, "{}]", path.display()),
            None => write!(f, "none]"),
        }
    }
}
