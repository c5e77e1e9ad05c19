pub mod product;

pub use product::ProductDetails;
