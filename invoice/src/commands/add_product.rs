use crate::events::ProductAddedEvent;
use crate::{DefaultMediator, Error, Mediator, Product, Request, RequestHandler, SharedProductList};

/// Appends a product to the list, responds with its position.
#[derive(Debug, Clone)]
pub struct AddProductCommand(pub Product);

impl Request<crate::Result<usize>> for AddProductCommand {}

pub struct AddProductRequestHandler(pub SharedProductList, pub DefaultMediator);
impl RequestHandler<AddProductCommand, crate::Result<usize>> for AddProductRequestHandler {
    fn handle(&mut self, command: AddProductCommand) -> crate::Result<usize> {
        let product = command.0;
        if product.name().trim().is_empty() {
            return Err(Error::InvalidInput(vec![
                "name must not be empty".to_owned()
            ]));
        }

        let index = self.0.borrow_mut().push(product.clone());
        self.1.publish(ProductAddedEvent(index, product));
        Ok(index)
    }
}
