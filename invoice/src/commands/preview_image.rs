use crate::viewer::ImageViewer;
use crate::{Error, Request, RequestHandler, SharedProductList};

/// Opens the image of the product at the given position.
#[derive(Debug, Clone, Copy)]
pub struct PreviewImageCommand(pub usize);

impl Request<crate::Result<()>> for PreviewImageCommand {}

pub struct PreviewImageRequestHandler(pub SharedProductList, pub Box<dyn ImageViewer>);
impl RequestHandler<PreviewImageCommand, crate::Result<()>> for PreviewImageRequestHandler {
    fn handle(&mut self, command: PreviewImageCommand) -> crate::Result<()> {
        let index = command.0;
        let path = {
            let list = self.0.borrow();
            let product = list.get(index).ok_or(Error::NoSuchProduct(index))?;
            product
                .file_path()
                .map(|path| path.to_path_buf())
                .ok_or(Error::NoImage(index))?
        };

        log::debug!("Opening {}", path.display());
        self.1
            .open(&path)
            .map_err(|source| Error::Preview { path, source })
    }
}
