use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted product. `_id` is assigned on insert and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Name, description, and price are required")]
    MissingRequiredFields,

    #[error("name must be a non-empty string")]
    EmptyName,

    #[error("description must be a non-empty string")]
    EmptyDescription,
}

/// A validated field set for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl NewProduct {
    /// Validate the create field set.
    ///
    /// Create treats missing, empty-string, and zero values as absent, so a
    /// zero price is rejected here even though the schema only requires
    /// "numeric". Any violation maps to the single required-fields message.
    pub fn parse(
        name: Option<String>,
        description: Option<String>,
        price: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let name = name.filter(|n| !n.is_empty());
        let description = description.filter(|d| !d.is_empty());
        let price = price.filter(|p| *p != 0.0);

        match (name, description, price) {
            (Some(name), Some(description), Some(price)) => Ok(Self {
                name,
                description,
                price,
            }),
            _ => Err(ValidationError::MissingRequiredFields),
        }
    }
}

/// A validated merge-update: only fields present here are written, the rest
/// of the document is left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl ProductUpdate {
    /// Validate the provided fields only. A provided `name` or `description`
    /// must be non-empty; a provided `price` may be any number, zero included
    /// (the falsy check applies to create, not update).
    pub fn parse(
        name: Option<String>,
        description: Option<String>,
        price: Option<f64>,
    ) -> Result<Self, ValidationError> {
        if matches!(&name, Some(n) if n.is_empty()) {
            return Err(ValidationError::EmptyName);
        }
        if matches!(&description, Some(d) if d.is_empty()) {
            return Err(ValidationError::EmptyDescription);
        }

        Ok(Self {
            name,
            description,
            price,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }
}
