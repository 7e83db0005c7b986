mod products;

pub use products::{
    CreateProductBody, DeleteEnvelope, ProductEnvelope, ProductResponse, ProductsEnvelope,
    UpdateProductBody,
};
