mod add_product;
pub use add_product::*;

mod edit_product;
pub use edit_product::*;

mod load_products;
pub use load_products::*;

mod preview_image;
pub use preview_image::*;

mod remove_product;
pub use remove_product::*;

mod save_products;
pub use save_products::*;
