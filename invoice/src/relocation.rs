use crate::{Error, Product};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Asks the user for the directory the images of a save are gathered in.
pub trait DirectoryPicker {
    /// Returns the chosen directory, or `None` when the user made no selection.
    fn pick_directory(&mut self) -> Option<PathBuf>;
}

impl<F> DirectoryPicker for F
where
    F: FnMut() -> Option<PathBuf>,
{
    fn pick_directory(&mut self) -> Option<PathBuf> {
        self()
    }
}

/// Result of gathering the images of a list.
#[derive(Debug)]
pub enum Relocation {
    /// Every image was handled; the errors are the products whose image could not be copied.
    Completed(Vec<Error>),
    /// No picture directory was chosen. Nothing was copied and no path changed.
    Cancelled,
}

/// Copies the image of every product into one picture directory and points the
/// product at the copy.
///
/// `picture_dir` is used when given; otherwise `picker` is asked once, the first
/// time a product with an image is met. An image already present in the
/// directory is kept as is. A product whose image cannot be copied keeps its
/// path and is reported in [`Relocation::Completed`].
pub fn relocate_images(
    products: &mut [Product],
    picture_dir: Option<&Path>,
    picker: &mut dyn DirectoryPicker,
) -> Relocation {
    if products.iter().all(|p| p.file_path().is_none()) {
        return Relocation::Completed(Vec::new());
    }

    let directory = match picture_dir {
        Some(dir) => dir.to_path_buf(),
        None => match picker.pick_directory() {
            Some(dir) => dir,
            None => {
                debug!("No picture directory chosen, skipping the save");
                return Relocation::Cancelled;
            }
        },
    };

    if let Err(e) = fs::create_dir_all(&directory) {
        warn!(
            "Could not create picture directory {}: {}",
            directory.display(),
            e
        );
    }

    let mut errors = Vec::new();
    for (index, product) in products.iter_mut().enumerate() {
        let source = match product.file_path() {
            Some(path) => path.to_path_buf(),
            None => continue,
        };

        match copy_into(&source, &directory) {
            Ok(destination) => {
                debug!("Image of product #{} is {}", index, destination.display());
                product.set_file_path(Some(destination));
            }
            Err(e) => {
                warn!("Could not copy image {}: {}", source.display(), e);
                errors.push(Error::ImageCopy {
                    index,
                    path: source,
                    source: e,
                });
            }
        }
    }

    Relocation::Completed(errors)
}

fn copy_into(source: &Path, directory: &Path) -> io::Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "image path has no file name")
    })?;

    let destination = directory.join(file_name);
    if destination.exists() {
        debug!("{} already exists, not copying", destination.display());
    } else {
        fs::copy(source, &destination)?;
    }

    Ok(fs::canonicalize(&destination).unwrap_or(destination))
}
