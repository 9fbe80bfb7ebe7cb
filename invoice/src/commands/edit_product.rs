use crate::events::ProductUpdatedEvent;
use crate::{DefaultMediator, Mediator, Product, Request, RequestHandler, SharedProductList};
use std::path::PathBuf;

/// A new value for one field of a product.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductEdit {
    Name(String),
    Quantity(u32),
    UnitPrice(f64),
    FilePath(Option<PathBuf>),
}

/// Changes one field of the product at `index` in place.
#[derive(Debug, Clone)]
pub struct EditProductCommand {
    pub index: usize,
    pub edit: ProductEdit,
}

impl Request<Option<Product>> for EditProductCommand {}

pub struct EditProductRequestHandler(pub SharedProductList, pub DefaultMediator);
impl RequestHandler<EditProductCommand, Option<Product>> for EditProductRequestHandler {
    fn handle(&mut self, command: EditProductCommand) -> Option<Product> {
        let updated = {
            let mut list = self.0.borrow_mut();
            let product = list.get_mut(command.index)?;

            match command.edit {
                ProductEdit::Name(name) => product.set_name(name),
                ProductEdit::Quantity(quantity) => product.set_quantity(quantity),
                ProductEdit::UnitPrice(unit_price) => product.set_unit_price(unit_price),
                ProductEdit::FilePath(file_path) => product.set_file_path(file_path),
            }

            product.clone()
        };

        self.1
            .publish(ProductUpdatedEvent(command.index, updated.clone()));

        Some(updated)
    }
}
