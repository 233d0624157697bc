use serde::Serialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::filter::InfluencerFilter;
use crate::domain::types::Role;
use crate::dto::categories::CategoryDto;
use crate::dto::profiles::InfluencerCardDto;
use crate::forms::campaigns::BrowseQuery;
use crate::repository::{CategoryReader, ProfileListQuery, ProfileReader};

use super::{ServiceResult, load_actor, or_empty};

#[derive(Debug, Serialize)]
pub struct InfluencerBrowsePage {
    pub influencers: Vec<InfluencerCardDto>,
    pub categories: Vec<CategoryDto>,
    pub search: String,
    pub category_id: Option<i32>,
    pub viewer_role: Role,
}

/// Influencer directory. All influencers are loaded once and narrowed in
/// memory by name/bio search and category.
pub fn browse_influencers<R>(
    user: &AuthenticatedUser,
    query: &BrowseQuery,
    repo: &R,
) -> ServiceResult<InfluencerBrowsePage>
where
    R: ProfileReader + CategoryReader,
{
    let actor = load_actor(user, repo)?;

    let category_id = query.category_id();
    let filter = InfluencerFilter::new(query.search(), category_id);

    let profiles = or_empty(
        repo.list_profiles(ProfileListQuery::default().role(Role::Influencer)),
        "influencers",
    );
    let categories = or_empty(repo.list_categories(), "categories");

    let influencers = filter
        .apply(profiles)
        .iter()
        .filter_map(|profile| InfluencerCardDto::new(profile, &categories))
        .collect();

    Ok(InfluencerBrowsePage {
        influencers,
        categories: categories.into_iter().map(CategoryDto::from).collect(),
        search: query.search().unwrap_or_default().to_string(),
        category_id: category_id.map(|id| id.get()),
        viewer_role: actor.role(),
    })
}
