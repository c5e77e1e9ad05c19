pub mod product;

pub use product::{ProductDetailsResponse, SaveProductRequest};
