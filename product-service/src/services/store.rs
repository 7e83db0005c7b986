use crate::models::{NewProduct, Product, ProductUpdate};
use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection, Database,
};
use std::sync::{Arc, Mutex};

/// Persistence seam for the product collection.
///
/// Implementations hold all persisted state; the service keeps no
/// authoritative in-memory copy between requests.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Liveness check against the backing store.
    async fn ping(&self) -> Result<()>;

    /// Insert a new product and return it with its assigned id.
    async fn insert(&self, product: NewProduct) -> Result<Product>;

    /// Every product in the collection, natural order.
    async fn list(&self) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>>;

    /// Merge-update: `$set` only the provided fields and return the
    /// post-update document, or `None` if the id does not exist.
    async fn update_by_id(&self, id: &str, update: ProductUpdate) -> Result<Option<Product>>;

    /// Delete by identifier. Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct MongoProductStore {
    db: Database,
    products: Collection<Product>,
}

impl MongoProductStore {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            products: db.collection("products"),
        }
    }

    fn parse_id(id: &str) -> Result<ObjectId> {
        ObjectId::parse_str(id).with_context(|| format!("Invalid product id: {}", id))
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product> {
        let product = Product {
            id: ObjectId::new(),
            name: product.name,
            description: product.description,
            price: product.price,
        };
        self.products.insert_one(&product, None).await?;
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let cursor = self.products.find(doc! {}, None).await?;
        let products = cursor.try_collect().await?;
        Ok(products)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let oid = Self::parse_id(id)?;
        let product = self.products.find_one(doc! { "_id": oid }, None).await?;
        Ok(product)
    }

    async fn update_by_id(&self, id: &str, update: ProductUpdate) -> Result<Option<Product>> {
        let oid = Self::parse_id(id)?;

        let mut set = Document::new();
        if let Some(name) = update.name {
            set.insert("name", name);
        }
        if let Some(description) = update.description {
            set.insert("description", description);
        }
        if let Some(price) = update.price {
            set.insert("price", price);
        }

        // A merge of nothing leaves the document as-is.
        if set.is_empty() {
            let product = self.products.find_one(doc! { "_id": oid }, None).await?;
            return Ok(product);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let product = self
            .products
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set }, options)
            .await?;
        Ok(product)
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let oid = Self::parse_id(id)?;
        self.products.delete_one(doc! { "_id": oid }, None).await?;
        Ok(())
    }
}

/// In-memory store for isolated handler tests. Mirrors the Mongo store's
/// observable behavior, including the id-parse failure on malformed ids.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<Mutex<Vec<Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Product>> {
        self.products.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product> {
        let product = Product {
            id: ObjectId::new(),
            name: product.name,
            description: product.description,
            price: product.price,
        };
        self.lock().push(product.clone());
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.lock().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let oid = MongoProductStore::parse_id(id)?;
        Ok(self.lock().iter().find(|p| p.id == oid).cloned())
    }

    async fn update_by_id(&self, id: &str, update: ProductUpdate) -> Result<Option<Product>> {
        let oid = MongoProductStore::parse_id(id)?;
        let mut products = self.lock();
        let Some(product) = products.iter_mut().find(|p| p.id == oid) else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        Ok(Some(product.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        let oid = MongoProductStore::parse_id(id)?;
        self.lock().retain(|p| p.id != oid);
        Ok(())
    }
}
