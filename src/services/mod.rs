// Catalog read and write services
pub mod products;

pub use products::{ProductCommandService, ProductCommands, ProductQueries, ProductQueryService};
