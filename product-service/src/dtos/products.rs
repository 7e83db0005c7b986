//! Wire types for the product endpoints.
//!
//! Request bodies accept any subset of the product fields so that the
//! required-field rules live in validation, not in deserialization. Unknown
//! fields are ignored.

use crate::models::Product;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProductBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// A product as serialized on the wire: `_id` as its 24-char hex string.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    pub success: bool,
    pub product: ProductResponse,
}

#[derive(Debug, Serialize)]
pub struct ProductsEnvelope {
    pub success: bool,
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Serialize)]
pub struct DeleteEnvelope {
    pub success: bool,
    pub message: String,
}
