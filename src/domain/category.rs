use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

/// Lookup tag classifying campaigns and influencer niches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: Option<String>,
}
