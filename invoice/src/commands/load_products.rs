use crate::events::ProductsLoadedEvent;
use crate::{codec, DefaultMediator, Mediator, Request, RequestHandler, SharedProductList};
use std::path::PathBuf;

/// Replaces the list with the content of the file at `path`.
///
/// The list is left untouched when the file cannot be read or parsed.
#[derive(Debug, Clone)]
pub struct LoadProductsCommand {
    pub path: PathBuf,
}

impl Request<crate::Result<usize>> for LoadProductsCommand {}

pub struct LoadProductsRequestHandler(pub SharedProductList, pub DefaultMediator);
impl RequestHandler<LoadProductsCommand, crate::Result<usize>> for LoadProductsRequestHandler {
    fn handle(&mut self, command: LoadProductsCommand) -> crate::Result<usize> {
        let products = codec::load_from_file(&command.path)?;
        let count = products.len();

        self.0.borrow_mut().replace_all(products);
        self.1.publish(ProductsLoadedEvent {
            path: command.path,
            count,
        });

        Ok(count)
    }
}
