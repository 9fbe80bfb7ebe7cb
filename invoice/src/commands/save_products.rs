use crate::events::{ImageCopyFailedEvent, ProductsSavedEvent};
use crate::relocation::{relocate_images, DirectoryPicker, Relocation};
use crate::{codec, DefaultMediator, Error, Mediator, Request, RequestHandler, SharedProductList};
use std::path::PathBuf;

/// Gathers the images into the picture directory and writes the list to `path`.
#[derive(Debug, Clone)]
pub struct SaveProductsCommand {
    pub path: PathBuf,
    /// Picture directory to use; the picker is asked when `None`.
    pub picture_dir: Option<PathBuf>,
}

/// What a save did.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The list was written. `image_errors` holds the images that could not be copied.
    Saved {
        path: PathBuf,
        count: usize,
        image_errors: Vec<Error>,
    },
    /// No picture directory was chosen, nothing was touched.
    Cancelled,
}

impl Request<crate::Result<SaveOutcome>> for SaveProductsCommand {}

pub struct SaveProductsRequestHandler(
    pub SharedProductList,
    pub Box<dyn DirectoryPicker>,
    pub DefaultMediator,
);

impl RequestHandler<SaveProductsCommand, crate::Result<SaveOutcome>> for SaveProductsRequestHandler {
    fn handle(&mut self, command: SaveProductsCommand) -> crate::Result<SaveOutcome> {
        let mut products = self.0.borrow().to_vec();
        if products.is_empty() {
            return Err(Error::EmptyList);
        }

        // Checked before any image is copied.
        codec::check_writable(&products)?;

        let picture_dir = command.picture_dir.as_deref();
        let image_errors = match relocate_images(&mut products, picture_dir, &mut *self.1) {
            Relocation::Completed(errors) => errors,
            Relocation::Cancelled => return Ok(SaveOutcome::Cancelled),
        };

        // The paths now point at the picture directory, even if the write below fails.
        self.0.borrow_mut().replace_all(products.clone());

        let written = codec::save_to_file(&products, &command.path);

        // Subscribers may change the list from here on.
        for error in &image_errors {
            if let Error::ImageCopy { index, path, source } = error {
                self.2.publish(ImageCopyFailedEvent {
                    index: *index,
                    path: path.clone(),
                    message: source.to_string(),
                });
            }
        }

        written?;

        self.2.publish(ProductsSavedEvent {
            path: command.path.clone(),
            count: products.len(),
        });

        Ok(SaveOutcome::Saved {
            path: command.path,
            count: products.len(),
            image_errors,
        })
    }
}
