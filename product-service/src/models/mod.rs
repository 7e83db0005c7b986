mod product;

pub use product::{NewProduct, Product, ProductUpdate, ValidationError};
