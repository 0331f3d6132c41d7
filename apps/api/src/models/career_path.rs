use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog entry for a career path. Only `id` and `name` are read by the
/// recommender; the rest of the row belongs to the catalog owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CareerPathRecord {
    pub id: String,
    pub name: String,
}
