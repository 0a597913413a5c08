pub mod update_product_description_command;

pub use update_product_description_command::UpdateProductDescriptionCommand;
