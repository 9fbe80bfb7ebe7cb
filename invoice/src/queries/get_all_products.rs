use crate::{Product, Request, RequestHandler, SharedProductList};

/// Snapshot of the list, in order.
pub struct GetAllProductsQuery;
impl Request<Vec<Product>> for GetAllProductsQuery {}

pub struct GetAllProductsRequestHandler(pub SharedProductList);
impl RequestHandler<GetAllProductsQuery, Vec<Product>> for GetAllProductsRequestHandler {
    fn handle(&mut self, _: GetAllProductsQuery) -> Vec<Product> {
        self.0.borrow().to_vec()
    }
}
