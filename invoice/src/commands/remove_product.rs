use crate::events::ProductRemovedEvent;
use crate::{DefaultMediator, Mediator, Product, Request, RequestHandler, SharedProductList};

/// Removes the product at the given position.
#[derive(Debug, Clone, Copy)]
pub struct RemoveProductCommand(pub usize);

impl Request<Option<Product>> for RemoveProductCommand {}

pub struct RemoveProductRequestHandler(pub SharedProductList, pub DefaultMediator);
impl RequestHandler<RemoveProductCommand, Option<Product>> for RemoveProductRequestHandler {
    fn handle(&mut self, command: RemoveProductCommand) -> Option<Product> {
        let removed = self.0.borrow_mut().remove(command.0);

        if let Some(removed) = removed.clone() {
            self.1.publish(ProductRemovedEvent(command.0, removed));
        }

        removed
    }
}
