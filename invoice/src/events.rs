use crate::{Event, Product};
use std::path::PathBuf;

/// A product was appended at the given position.
#[derive(Debug, Clone)]
pub struct ProductAddedEvent(pub usize, pub Product);
impl Event for ProductAddedEvent {}

/// One field of the product at the given position changed.
#[derive(Debug, Clone)]
pub struct ProductUpdatedEvent(pub usize, pub Product);
impl Event for ProductUpdatedEvent {}

/// The product that was at the given position is gone.
#[derive(Debug, Clone)]
pub struct ProductRemovedEvent(pub usize, pub Product);
impl Event for ProductRemovedEvent {}

/// The image of a product could not be copied; the save went on without it.
#[derive(Debug, Clone)]
pub struct ImageCopyFailedEvent {
    pub index: usize,
    pub path: PathBuf,
    pub message: String,
}
impl Event for ImageCopyFailedEvent {}

/// The list was written to `path`.
#[derive(Debug, Clone)]
pub struct ProductsSavedEvent {
    pub path: PathBuf,
    pub count: usize,
}
impl Event for ProductsSavedEvent {}

/// The list was replaced by the content of `path`.
#[derive(Debug, Clone)]
pub struct ProductsLoadedEvent {
    pub path: PathBuf,
    pub count: usize,
}
impl Event for ProductsLoadedEvent {}
