//! In-memory filtering of already loaded influencer profiles.

use crate::domain::profile::{Profile, ProfileKind};
use crate::domain::types::CategoryId;

/// Search term plus optional category for the influencer directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfluencerFilter {
    search: Option<String>,
    category_id: Option<CategoryId>,
}

impl InfluencerFilter {
    pub fn new(search: Option<&str>, category_id: Option<CategoryId>) -> Self {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self {
            search,
            category_id,
        }
    }

    /// Case-insensitive substring match on name or bio, and category
    /// membership when a category is selected. Companies never match.
    pub fn matches(&self, profile: &Profile) -> bool {
        let ProfileKind::Influencer(details) = &profile.kind else {
            return false;
        };

        let matches_search = match &self.search {
            None => true,
            Some(term) => {
                profile.full_name.to_lowercase().contains(term)
                    || profile
                        .bio
                        .as_deref()
                        .is_some_and(|bio| bio.to_lowercase().contains(term))
            }
        };

        let matches_category = self
            .category_id
            .is_none_or(|id| details.category_ids.contains(&id));

        matches_search && matches_category
    }

    pub fn apply(&self, profiles: Vec<Profile>) -> Vec<Profile> {
        profiles.into_iter().filter(|p| self.matches(p)).collect()
    }
}
