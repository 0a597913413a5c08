pub mod paged;
pub mod product;

pub use paged::{PagedResult, ALL_ITEMS_PAGE_SIZE};
pub use product::{ProductView, UpdateProductDescriptionRequest};
