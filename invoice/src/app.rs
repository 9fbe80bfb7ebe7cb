use crate::commands::*;
use crate::queries::*;
use crate::relocation::DirectoryPicker;
use crate::viewer::ImageViewer;
use crate::{Builder, DefaultMediator, SharedProductList};

/// Registers every product request handler on a new mediator builder.
///
/// The caller adds its own event subscriptions before building.
///
/// # Examples
/// ```
/// use invoice::{app, Mediator, Product, ProductList};
/// use invoice::commands::AddProductCommand;
/// use invoice::events::ProductAddedEvent;
/// use invoice::queries::GetAllProductsQuery;
/// use std::path::PathBuf;
///
/// let list = ProductList::new().shared();
/// let mut mediator = app::builder(&list, || None::<PathBuf>, invoice::SystemViewer)
///     .subscribe_fn(|event: ProductAddedEvent| println!("Added: {}", event.1))
///     .build();
///
/// mediator
///     .send(AddProductCommand(Product::new("Chair", 2, 35.5, None)))
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(1, mediator.send(GetAllProductsQuery).unwrap().len());
/// ```
pub fn builder<P, V>(list: &SharedProductList, picker: P, viewer: V) -> Builder
where
    P: DirectoryPicker + 'static,
    V: ImageViewer + 'static,
{
    let list = list.clone();

    DefaultMediator::builder()
        // Queries
        .add_handler(GetProductRequestHandler(list.clone()))
        .add_handler(GetAllProductsRequestHandler(list.clone()))
        // Commands
        .add_handler_deferred(|m| AddProductRequestHandler(list.clone(), m))
        .add_handler_deferred(|m| RemoveProductRequestHandler(list.clone(), m))
        .add_handler_deferred(|m| EditProductRequestHandler(list.clone(), m))
        .add_handler_deferred(|m| SaveProductsRequestHandler(list.clone(), Box::new(picker), m))
        .add_handler_deferred(|m| LoadProductsRequestHandler(list.clone(), m))
        .add_handler(PreviewImageRequestHandler(list, Box::new(viewer)))
}
