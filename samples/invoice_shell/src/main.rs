mod input;

use anyhow::Context;
use invoice::commands::*;
use invoice::queries::*;
use invoice::{app, DefaultMediator, Mediator, ProductForm, ProductList, SharedProductList, SystemViewer};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  add                      add a product
  list                     show the products
  remove <n>               remove product n
  edit <n> <field> <value> change name, quantity, price or image (`none` clears it)
  view <n>                 open the image of product n
  save <file>              gather the images and write the list
  load <file>              replace the list with the content of a file
  help                     show this message
  exit                     quit";

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let picture_dir = std::env::var("INVOICE_PICTURES_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from);

    let list = ProductList::new().shared();
    let mut mediator = create_mediator(&list);

    println!("{}", HELP);

    while let Some(line) = input::prompt("> ")? {
        let (command, rest) = input::split_word(&line);
        let mut words = rest.split_whitespace();
        if command.is_empty() {
            continue;
        }

        let result = match command {
            "add" => add(&mut mediator),
            "list" => show(&mut mediator),
            "remove" => input::position(words.next()).and_then(|index| remove(&mut mediator, index)),
            "edit" => {
                let (index, rest) = input::split_word(rest);
                let (field, value) = input::split_word(rest);
                let index = input::position(Some(index).filter(|index| !index.is_empty()));
                index.and_then(|index| edit(&mut mediator, index, field, value.to_owned()))
            }
            "view" => input::position(words.next()).and_then(|index| view(&mut mediator, index)),
            "save" => save(&mut mediator, words.next(), picture_dir.clone()),
            "load" => load(&mut mediator, words.next()),
            "help" => {
                println!("{}", HELP);
                Ok(())
            }
            "exit" | "quit" => break,
            other => Err(anyhow::anyhow!("unknown command `{}`, try `help`", other)),
        };

        if let Err(e) = result {
            log::error!("{:#}", e);
        }
    }

    Ok(())
}

fn create_mediator(list: &SharedProductList) -> DefaultMediator {
    use invoice::events::*;

    app::builder(list, input::pick_directory, SystemViewer)
        .subscribe_fn(|event: ProductAddedEvent| {
            log::info!("Added #{}: {}", event.0 + 1, event.1.name());
        })
        .subscribe_fn(|event: ProductUpdatedEvent| {
            log::info!("Updated #{}: {}", event.0 + 1, event.1);
        })
        .subscribe_fn(|event: ProductRemovedEvent| {
            log::info!("Removed #{}: {}", event.0 + 1, event.1.name());
        })
        .subscribe_fn(|event: ImageCopyFailedEvent| {
            log::warn!(
                "Image of #{} not copied ({}): {}",
                event.index + 1,
                event.path.display(),
                event.message
            );
        })
        .subscribe_fn(|event: ProductsSavedEvent| {
            log::info!("Saved {} products to {}", event.count, event.path.display());
        })
        .subscribe_fn(|event: ProductsLoadedEvent| {
            log::info!("Loaded {} products from {}", event.count, event.path.display());
        })
        .build()
}

fn add(mediator: &mut DefaultMediator) -> anyhow::Result<()> {
    let mut form = ProductForm::default();
    form.name = ask("Name: ")?;
    form.quantity = ask("Quantity: ")?;
    form.unit_price = ask("Unit price: ")?;

    let image = ask("Image (empty for none): ")?;
    if !image.is_empty() {
        form.image = Some(PathBuf::from(image));
    }

    let product = form.validate()?;
    mediator.send(AddProductCommand(product))??;
    Ok(())
}

fn ask(message: &str) -> anyhow::Result<String> {
    input::prompt(message)?.context("input closed")
}

fn show(mediator: &mut DefaultMediator) -> anyhow::Result<()> {
    let products = mediator.send(GetAllProductsQuery)?;
    if products.is_empty() {
        println!("(no products)");
    }

    for (index, product) in products.iter().enumerate() {
        let image = product
            .file_path()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "-".to_owned());

        println!(
            "{:>3}. {:<24} {:>6} x {:>10.2}  {}",
            index + 1,
            product.name(),
            product.quantity(),
            product.unit_price(),
            image
        );
    }

    Ok(())
}

fn remove(mediator: &mut DefaultMediator, index: usize) -> anyhow::Result<()> {
    mediator
        .send(RemoveProductCommand(index))?
        .with_context(|| format!("no product #{}", index + 1))?;
    Ok(())
}

fn edit(mediator: &mut DefaultMediator, index: usize, field: &str, value: String) -> anyhow::Result<()> {
    let edit = match field {
        "name" if !value.trim().is_empty() => ProductEdit::Name(value),
        "quantity" => ProductEdit::Quantity(ProductForm::parse_quantity(&value)?),
        "price" => ProductEdit::UnitPrice(ProductForm::parse_price(&value)?),
        "image" if value == "none" || value.is_empty() => ProductEdit::FilePath(None),
        "image" => ProductEdit::FilePath(Some(PathBuf::from(value))),
        _ => anyhow::bail!("usage: edit <n> name|quantity|price|image <value>"),
    };

    mediator
        .send(EditProductCommand { index, edit })?
        .with_context(|| format!("no product #{}", index + 1))?;
    Ok(())
}

fn view(mediator: &mut DefaultMediator, index: usize) -> anyhow::Result<()> {
    mediator.send(PreviewImageCommand(index))??;
    Ok(())
}

fn save(mediator: &mut DefaultMediator, file: Option<&str>, picture_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let path = PathBuf::from(file.context("usage: save <file>")?);

    match mediator.send(SaveProductsCommand { path, picture_dir })?? {
        SaveOutcome::Saved { image_errors, .. } if !image_errors.is_empty() => {
            println!("Saved, but {} image(s) could not be copied", image_errors.len());
        }
        SaveOutcome::Saved { .. } => {}
        SaveOutcome::Cancelled => println!("Save cancelled"),
    }

    Ok(())
}

fn load(mediator: &mut DefaultMediator, file: Option<&str>) -> anyhow::Result<()> {
    let path = PathBuf::from(file.context("usage: load <file>")?);
    mediator.send(LoadProductsCommand { path })??;
    Ok(())
}
