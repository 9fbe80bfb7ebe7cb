//! # invoice
//! The core of a small invoice list: a product record, the XML file the list is
//! saved to, and the picture directory the product images are gathered in.
//!
//! The UI layer talks to the list through a [`DefaultMediator`]: it sends the
//! requests in [`commands`] and [`queries`] and subscribes to the [`events`] it
//! wants to show to the user.
//!
//! ## Example
//! ```rust
//! use invoice::commands::{AddProductCommand, SaveProductsCommand, SaveOutcome};
//! use invoice::events::ProductsSavedEvent;
//! use invoice::{app, Mediator, Product, ProductList, SystemViewer};
//! use std::path::PathBuf;
//!
//! let dir = std::env::temp_dir().join("invoice-doc");
//! std::fs::create_dir_all(&dir).unwrap();
//!
//! let list = ProductList::new().shared();
//! let mut mediator = app::builder(&list, || None::<PathBuf>, SystemViewer)
//!     .subscribe_fn(|event: ProductsSavedEvent| {
//!         println!("Saved {} products to {}", event.count, event.path.display());
//!     })
//!     .build();
//!
//! mediator.send(AddProductCommand(Product::new("Microwave", 1, 89.9, None))).unwrap().unwrap();
//! mediator.send(AddProductCommand(Product::new("Toaster", 2, 24.5, None))).unwrap().unwrap();
//!
//! let outcome = mediator
//!     .send(SaveProductsCommand { path: dir.join("products.xml"), picture_dir: None })
//!     .unwrap()
//!     .unwrap();
//!
//! assert!(matches!(outcome, SaveOutcome::Saved { count: 2, .. }));
//! ```

/// A convenient result type.
pub type Result<T> = std::result::Result<T, error::Error>;

/// Module for the errors.
mod error;
pub use error::*;

/// Module for the mediator requests.
mod request;
pub use request::*;

/// Module for the mediator events.
mod event;
pub use event::*;

/// Module for the mediator.
mod mediator;
pub use crate::mediator::*;

mod product;
pub use product::*;

mod list;
pub use list::*;

mod form;
pub use form::*;

pub mod codec;

mod relocation;
pub use relocation::*;

mod viewer;
pub use viewer::*;

/// Requests that change the list.
pub mod commands;

/// Requests that read the list.
pub mod queries;

/// Events published by the command handlers.
pub mod events;

/// Wiring of the handlers.
pub mod app;
