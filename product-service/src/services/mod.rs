mod metrics;
mod store;

pub use metrics::{get_metrics, init_metrics};
pub use store::{InMemoryProductStore, MongoProductStore, ProductStore};
