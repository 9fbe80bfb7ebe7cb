use crate::{Product, Request, RequestHandler, SharedProductList};

/// The product at the given position, if any.
pub struct GetProductQuery(pub usize);
impl Request<Option<Product>> for GetProductQuery {}

pub struct GetProductRequestHandler(pub SharedProductList);
impl RequestHandler<GetProductQuery, Option<Product>> for GetProductRequestHandler {
    fn handle(&mut self, query: GetProductQuery) -> Option<Product> {
        self.0.borrow().get(query.0).cloned()
    }
}
