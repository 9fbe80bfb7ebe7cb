use crate::Product;
use std::cell::RefCell;
use std::rc::Rc;

/// The list shared by the request handlers.
pub type SharedProductList = Rc<RefCell<ProductList>>;

/// Ordered in-memory list of products. A product is identified by its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductList {
    products: Vec<Product>,
}

impl ProductList {
    pub fn new() -> ProductList {
        ProductList::default()
    }

    /// Wraps the list so it can be handed to the request handlers.
    pub fn shared(self) -> SharedProductList {
        Rc::new(RefCell::new(self))
    }

    /// Appends a product and returns its position.
    pub fn push(&mut self, product: Product) -> usize {
        self.products.push(product);
        self.products.len() - 1
    }

    /// Removes the product at `index`, shifting the following ones down.
    pub fn remove(&mut self, index: usize) -> Option<Product> {
        if index < self.products.len() {
            Some(self.products.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Product> {
        self.products.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Replaces the whole content of the list.
    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn to_vec(&self) -> Vec<Product> {
        self.products.clone()
    }
}

impl From<Vec<Product>> for ProductList {
    fn from(products: Vec<Product>) -> Self {
        ProductList { products }
    }
}

impl<'a> IntoIterator for &'a ProductList {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_remove_by_position_test() {
        let mut list = ProductList::new();
        assert_eq!(0, list.push(Product::new("A", 1, 1.0, None)));
        assert_eq!(1, list.push(Product::new("B", 2, 2.0, None)));
        assert_eq!(2, list.push(Product::new("C", 3, 3.0, None)));

        let removed = list.remove(1).unwrap();
        assert_eq!("B", removed.name());
        assert_eq!("C", list.get(1).unwrap().name());
        assert_eq!(2, list.len());

        assert_eq!(None, list.remove(5));
    }

    #[test]
    fn edit_in_place_test() {
        let mut list = ProductList::from(vec![Product::new("A", 1, 1.0, None)]);
        list.get_mut(0).unwrap().set_quantity(7);
        assert_eq!(7, list.get(0).unwrap().quantity());
    }

    #[test]
    fn replace_all_test() {
        let mut list = ProductList::from(vec![Product::new("A", 1, 1.0, None)]);
        list.replace_all(vec![
            Product::new("X", 1, 1.0, None),
            Product::new("Y", 1, 1.0, None),
        ]);

        let names: Vec<&str> = list.iter().map(|p| p.name()).collect();
        assert_eq!(vec!["X", "Y"], names);
    }
}
