//! XML mapping of the product list.
//!
//! The document looks like this:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
//! <products>
//!   <product>
//!     <name>Chair</name>
//!     <quantity>2</quantity>
//!     <unitPrice>35.5</unitPrice>
//!     <filePath>/home/me/pictures/chair.png</filePath>
//!   </product>
//! </products>
//! ```
//!
//! A product without an image has no `filePath` element. An empty `filePath` element
//! is read back as no image too.
//!
//! The document is walked with the `quick_xml` event API rather than `quick_xml::de`:
//! an absent and an empty `filePath` must both map to no image, and a document that
//! is not well-formed has to be told apart from one with the wrong shape.

use crate::{Error, Product, Result};
use log::{debug, info};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::ffi::OsString;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const ROOT: &str = "products";
const ITEM: &str = "product";
const NAME: &str = "name";
const QUANTITY: &str = "quantity";
const UNIT_PRICE: &str = "unitPrice";
const FILE_PATH: &str = "filePath";

/// Writes the products as an indented XML document.
pub fn write<W: Write>(products: &[Product], sink: W) -> io::Result<()> {
    let mut writer = Writer::new_with_indent(sink, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT)))?;

    for product in products {
        writer.write_event(Event::Start(BytesStart::new(ITEM)))?;
        write_field(&mut writer, NAME, product.name())?;
        write_field(&mut writer, QUANTITY, &product.quantity().to_string())?;
        write_field(&mut writer, UNIT_PRICE, &product.unit_price().to_string())?;

        if let Some(path) = product.file_path() {
            write_field(&mut writer, FILE_PATH, &path.to_string_lossy())?;
        }

        writer.write_event(Event::End(BytesEnd::new(ITEM)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT)))?;
    writer.into_inner().flush()
}

fn write_field<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))
}

/// Serializes the products to an XML document.
pub fn serialize(products: &[Product]) -> String {
    let mut buffer = Vec::new();
    // Writing into a `Vec<u8>` does not fail.
    let _ = write(products, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Parses an XML document into the products it lists, in document order.
///
/// # Examples
/// ```
/// use invoice::{codec, ErrorKind, Product};
///
/// let products = vec![Product::new("Chair", 2, 35.5, None)];
/// let text = codec::serialize(&products);
/// assert_eq!(products, codec::deserialize(&text).unwrap());
///
/// let err = codec::deserialize("<items></items>").unwrap_err();
/// assert_eq!(ErrorKind::SchemaMismatch, err.kind());
/// ```
pub fn deserialize(text: &str) -> Result<Vec<Product>> {
    let root = read_tree(text)?;
    products_from(root)
}

/// Checks that every product can be read back once written.
///
/// A price that is not a finite number has no readable form in the document.
pub fn check_writable(products: &[Product]) -> Result<()> {
    let problems: Vec<String> = products
        .iter()
        .enumerate()
        .filter(|(_, product)| !product.unit_price().is_finite())
        .map(|(index, product)| {
            format!(
                "price of product #{} is not a finite number: {}",
                index,
                product.unit_price()
            )
        })
        .collect();

    if problems.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidInput(problems))
    }
}

/// Writes the products to `path`.
///
/// The document goes to a sibling temporary file first and is renamed over `path`
/// once complete, so a failed write never leaves a truncated list behind. Nothing
/// is written when [`check_writable`] rejects the products.
pub fn save_to_file(products: &[Product], path: &Path) -> Result<()> {
    check_writable(products)?;

    let temporary = temporary_sibling(path);

    let result = File::create(&temporary)
        .and_then(|file| {
            let mut sink = BufWriter::new(file);
            write(products, &mut sink)?;
            sink.into_inner().map_err(|e| e.into_error())?.sync_all()
        })
        .and_then(|()| fs::rename(&temporary, path));

    if let Err(source) = result {
        let _ = fs::remove_file(&temporary);
        return Err(Error::WriteFailure {
            path: path.to_path_buf(),
            source,
        });
    }

    info!("Saved {} products to {}", products.len(), path.display());
    Ok(())
}

/// Reads and parses the product list stored at `path`.
pub fn load_from_file(path: &Path) -> Result<Vec<Product>> {
    let text = fs::read_to_string(path).map_err(|source| Error::ReadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    let products = deserialize(&text)?;
    info!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from(ROOT));
    name.push(".tmp");
    path.with_file_name(name)
}

///////////////////// Parsing /////////////////////

// The document is read into a small tree first so that well-formedness is fully
// checked before the shape of the document is looked at.
#[derive(Debug)]
struct Element {
    name: String,
    children: Vec<Node>,
}

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    fn new(start: &BytesStart) -> Element {
        Element {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            children: Vec::new(),
        }
    }
}

fn malformed(position: impl Display, message: impl Display) -> Error {
    Error::MalformedDocument(format!("{} (at byte {})", message, position))
}

fn read_tree(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed(reader.buffer_position(), e))?;

        match event {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(malformed(
                        reader.buffer_position(),
                        "content after the root element",
                    ));
                }
                open.push(Element::new(&start));
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(malformed(
                        reader.buffer_position(),
                        "content after the root element",
                    ));
                }
                attach(&mut open, &mut root, Element::new(&start));
            }
            Event::End(_) => {
                // The reader already checked that the end tag matches.
                let element = open.pop().ok_or_else(|| {
                    malformed(reader.buffer_position(), "unexpected end tag")
                })?;
                attach(&mut open, &mut root, element);
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| malformed(reader.buffer_position(), e))?;
                push_text(&mut open, text.into_owned(), reader.buffer_position())?;
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                push_text(&mut open, text, reader.buffer_position())?;
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions and doctype carry no data.
            _ => {}
        }
    }

    if let Some(element) = open.last() {
        return Err(malformed(
            reader.buffer_position(),
            format!("element <{}> is never closed", element.name),
        ));
    }

    root.ok_or_else(|| malformed(reader.buffer_position(), "document has no root element"))
}

fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn push_text(open: &mut [Element], text: String, position: impl Display) -> Result<()> {
    match open.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Text(text));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(malformed(position, "text outside the root element")),
    }
}

fn schema(message: impl Into<String>) -> Error {
    Error::SchemaMismatch(message.into())
}

fn products_from(root: Element) -> Result<Vec<Product>> {
    if root.name != ROOT {
        return Err(schema(format!(
            "expected root element <{}>, found <{}>",
            ROOT, root.name
        )));
    }

    let mut products = Vec::new();
    for node in root.children {
        match node {
            Node::Element(element) if element.name == ITEM => {
                products.push(product_from(element, products.len())?);
            }
            Node::Element(element) => {
                return Err(schema(format!(
                    "expected <{}> inside <{}>, found <{}>",
                    ITEM, ROOT, element.name
                )));
            }
            Node::Text(text) if text.trim().is_empty() => {}
            Node::Text(text) => {
                return Err(schema(format!("unexpected text {:?} inside <{}>", text, ROOT)));
            }
        }
    }

    debug!("Parsed {} products", products.len());
    Ok(products)
}

fn product_from(element: Element, index: usize) -> Result<Product> {
    let mut name = None;
    let mut quantity = None;
    let mut unit_price = None;
    let mut file_path = None;

    for node in element.children {
        let field = match node {
            Node::Element(field) => field,
            Node::Text(text) if text.trim().is_empty() => continue,
            Node::Text(text) => {
                return Err(schema(format!(
                    "unexpected text {:?} in product #{}",
                    text, index
                )));
            }
        };

        let slot = match field.name.as_str() {
            NAME => &mut name,
            QUANTITY => &mut quantity,
            UNIT_PRICE => &mut unit_price,
            FILE_PATH => &mut file_path,
            other => {
                debug!("Skipping unknown element <{}> in product #{}", other, index);
                continue;
            }
        };

        if slot.is_some() {
            return Err(schema(format!(
                "<{}> appears twice in product #{}",
                field.name, index
            )));
        }

        *slot = Some(field_text(field, index)?);
    }

    let name = name.ok_or_else(|| missing(NAME, index))?;
    let quantity = quantity.ok_or_else(|| missing(QUANTITY, index))?;
    let unit_price = unit_price.ok_or_else(|| missing(UNIT_PRICE, index))?;

    let quantity = quantity.trim().parse::<u32>().map_err(|_| {
        schema(format!(
            "<{}> of product #{} is not a whole number: {:?}",
            QUANTITY, index, quantity
        ))
    })?;

    let unit_price = unit_price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| {
            schema(format!(
                "<{}> of product #{} is not a number: {:?}",
                UNIT_PRICE, index, unit_price
            ))
        })?;

    Ok(Product::new(
        name,
        quantity,
        unit_price,
        file_path.map(PathBuf::from),
    ))
}

fn missing(tag: &str, index: usize) -> Error {
    schema(format!("product #{} has no <{}>", index, tag))
}

fn field_text(field: Element, index: usize) -> Result<String> {
    let mut text = String::new();
    for node in field.children {
        match node {
            Node::Text(part) => text.push_str(&part),
            Node::Element(nested) => {
                return Err(schema(format!(
                    "<{}> of product #{} contains element <{}>",
                    field.name, index, nested.name
                )));
            }
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn sample() -> Vec<Product> {
        vec![
            Product::new("Chair", 2, 35.5, Some(PathBuf::from("/pictures/chair.png"))),
            Product::new("Table", 1, 120.0, None),
            Product::new("Lamp", 10, 9.99, Some(PathBuf::from("/pictures/lamp.jpg"))),
        ]
    }

    #[test]
    fn serialize_layout_test() {
        let text = serialize(&[Product::new("Chair", 2, 35.5, None)]);

        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(text.contains("<name>Chair</name>"));
        assert!(text.contains("<quantity>2</quantity>"));
        assert!(text.contains("<unitPrice>35.5</unitPrice>"));
        assert!(text.lines().count() > 1);
    }

    #[test]
    fn round_trip_preserves_order_test() {
        let products = sample();
        let parsed = deserialize(&serialize(&products)).unwrap();

        let names: Vec<&str> = parsed.iter().map(|p| p.name()).collect();
        assert_eq!(vec!["Chair", "Table", "Lamp"], names);
        assert_eq!(products, parsed);
    }

    #[test]
    fn absent_path_round_trips_as_absent_test() {
        let text = serialize(&[Product::new("Table", 1, 120.0, None)]);
        assert!(!text.contains(FILE_PATH));

        let parsed = deserialize(&text).unwrap();
        assert_eq!(None, parsed[0].file_path());
    }

    #[test]
    fn empty_file_path_is_absent_test() {
        let text = "<products><product><name>A</name><quantity>1</quantity>\
                    <unitPrice>2</unitPrice><filePath/></product></products>";
        let parsed = deserialize(text).unwrap();
        assert_eq!(None, parsed[0].file_path());

        let text = "<products><product><name>A</name><quantity>1</quantity>\
                    <unitPrice>2</unitPrice><filePath></filePath></product></products>";
        let parsed = deserialize(text).unwrap();
        assert_eq!(None, parsed[0].file_path());
    }

    #[test]
    fn empty_list_round_trip_test() {
        assert_eq!(Vec::<Product>::new(), deserialize(&serialize(&[])).unwrap());
        assert_eq!(Vec::<Product>::new(), deserialize("<products/>").unwrap());
    }

    #[test]
    fn escapes_markup_in_text_test() {
        let products = vec![Product::new("Salt & <Pepper>", 1, 0.5, None)];
        let text = serialize(&products);

        assert!(text.contains("Salt &amp; &lt;Pepper&gt;"));
        assert_eq!(products, deserialize(&text).unwrap());
    }

    #[test]
    fn unclosed_root_is_malformed_test() {
        let err = deserialize("<products><product><name>X</name></product>").unwrap_err();
        assert_eq!(ErrorKind::MalformedDocument, err.kind());
    }

    #[test]
    fn mismatched_tags_are_malformed_test() {
        let err = deserialize("<products><product></products></product>").unwrap_err();
        assert_eq!(ErrorKind::MalformedDocument, err.kind());

        let err = deserialize("").unwrap_err();
        assert_eq!(ErrorKind::MalformedDocument, err.kind());

        let err = deserialize("<products/><products/>").unwrap_err();
        assert_eq!(ErrorKind::MalformedDocument, err.kind());
    }

    #[test]
    fn malformed_wins_over_wrong_root_test() {
        let err = deserialize("<items><item></items>").unwrap_err();
        assert_eq!(ErrorKind::MalformedDocument, err.kind());
    }

    #[test]
    fn wrong_root_is_schema_mismatch_test() {
        let err = deserialize("<items></items>").unwrap_err();
        assert_eq!(ErrorKind::SchemaMismatch, err.kind());
    }

    #[test]
    fn wrong_child_is_schema_mismatch_test() {
        let err = deserialize("<products><item/></products>").unwrap_err();
        assert_eq!(ErrorKind::SchemaMismatch, err.kind());
    }

    #[test]
    fn non_numeric_fields_are_schema_mismatch_test() {
        let text = "<products><product><name>A</name><quantity>two</quantity>\
                    <unitPrice>2</unitPrice></product></products>";
        assert_eq!(ErrorKind::SchemaMismatch, deserialize(text).unwrap_err().kind());

        let text = "<products><product><name>A</name><quantity>-1</quantity>\
                    <unitPrice>2</unitPrice></product></products>";
        assert_eq!(ErrorKind::SchemaMismatch, deserialize(text).unwrap_err().kind());

        let text = "<products><product><name>A</name><quantity>1</quantity>\
                    <unitPrice>1,5</unitPrice></product></products>";
        assert_eq!(ErrorKind::SchemaMismatch, deserialize(text).unwrap_err().kind());

        let text = "<products><product><name>A</name><quantity>1</quantity>\
                    <unitPrice>NaN</unitPrice></product></products>";
        assert_eq!(ErrorKind::SchemaMismatch, deserialize(text).unwrap_err().kind());
    }

    #[test]
    fn missing_and_repeated_fields_are_schema_mismatch_test() {
        let text = "<products><product><name>A</name><quantity>1</quantity></product></products>";
        assert_eq!(ErrorKind::SchemaMismatch, deserialize(text).unwrap_err().kind());

        let text = "<products><product><name>A</name><name>B</name><quantity>1</quantity>\
                    <unitPrice>2</unitPrice></product></products>";
        assert_eq!(ErrorKind::SchemaMismatch, deserialize(text).unwrap_err().kind());
    }

    #[test]
    fn skips_unknown_fields_test() {
        let text = r#"<?xml version="1.0"?>
            <!-- written by hand -->
            <products>
              <product>
                <name>A</name>
                <quantity> 3 </quantity>
                <unitPrice>1.25</unitPrice>
                <sku>A-001</sku>
              </product>
            </products>"#;

        let parsed = deserialize(text).unwrap();
        assert_eq!(vec![Product::new("A", 3, 1.25, None)], parsed);
    }

    #[test]
    fn save_and_load_file_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.xml");

        save_to_file(&sample(), &path).unwrap();
        assert!(!temporary_sibling(&path).exists());
        assert_eq!(sample(), load_from_file(&path).unwrap());
    }

    #[test]
    fn save_into_missing_directory_fails_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("products.xml");

        let err = save_to_file(&sample(), &path).unwrap_err();
        assert_eq!(ErrorKind::WriteFailure, err.kind());
        assert!(!path.exists());
    }

    #[test]
    fn save_rejects_non_finite_price_test() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.xml");

        for price in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut products = sample();
            products[1].set_unit_price(price);

            let err = save_to_file(&products, &path).unwrap_err();
            assert_eq!(ErrorKind::InvalidInput, err.kind());
            assert!(!path.exists());
            assert!(!temporary_sibling(&path).exists());
        }

        assert!(check_writable(&sample()).is_ok());
    }

    #[test]
    fn failed_rename_removes_temporary_file_test() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory in the way of the rename.
        let path = dir.path().join("products.xml");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"keep").unwrap();

        let err = save_to_file(&sample(), &path).unwrap_err();
        assert_eq!(ErrorKind::WriteFailure, err.kind());
        assert!(!temporary_sibling(&path).exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn nested_element_in_field_is_schema_mismatch_test() {
        let text = "<products><product><name><b>A</b></name><quantity>1</quantity>\
                    <unitPrice>2</unitPrice></product></products>";
        assert_eq!(ErrorKind::SchemaMismatch, deserialize(text).unwrap_err().kind());
    }

    #[test]
    fn stray_text_in_list_or_product_is_schema_mismatch_test() {
        let text = "<products>loose<product><name>A</name><quantity>1</quantity>\
                    <unitPrice>2</unitPrice></product></products>";
        assert_eq!(ErrorKind::SchemaMismatch, deserialize(text).unwrap_err().kind());

        let text = "<products><product>loose<name>A</name><quantity>1</quantity>\
                    <unitPrice>2</unitPrice></product></products>";
        assert_eq!(ErrorKind::SchemaMismatch, deserialize(text).unwrap_err().kind());

        // Whitespace between elements is not content.
        let text = "<products>\n  <product> <name>A</name> <quantity>1</quantity>\
                    <unitPrice>2</unitPrice>\n</product>\n</products>";
        assert_eq!(1, deserialize(text).unwrap().len());
    }

    #[test]
    fn text_outside_root_is_malformed_test() {
        let err = deserialize("<products/>trailing").unwrap_err();
        assert_eq!(ErrorKind::MalformedDocument, err.kind());

        let err = deserialize("leading<products/>").unwrap_err();
        assert_eq!(ErrorKind::MalformedDocument, err.kind());
    }

    #[test]
    fn load_missing_file_fails_test() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_file(&dir.path().join("nothing.xml")).unwrap_err();
        assert_eq!(ErrorKind::ReadFailure, err.kind());
    }

    fn product_strategy() -> impl Strategy<Value = Product> {
        (
            "[a-zA-Z0-9 &<>'\"]{1,24}",
            any::<u32>(),
            0.0f64..1.0e9,
            proptest::option::of("/[a-z]{1,8}/[a-z]{1,8}\\.(png|jpg)"),
        )
            .prop_map(|(name, quantity, unit_price, path)| {
                Product::new(name, quantity, unit_price, path.map(PathBuf::from))
            })
    }

    proptest! {
        #[test]
        fn round_trip_law(products in proptest::collection::vec(product_strategy(), 0..8)) {
            let parsed = deserialize(&serialize(&products)).unwrap();
            prop_assert_eq!(products, parsed);
        }
    }
}
