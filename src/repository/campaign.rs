use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::campaign::{Campaign, CampaignListing, NewCampaign};
use crate::domain::category::Category;
use crate::domain::types::{CampaignId, CampaignStatus};
use crate::models::campaign::{Campaign as DbCampaign, NewCampaign as DbNewCampaign};
use crate::models::category::Category as DbCategory;
use crate::repository::{
    CampaignListQuery, CampaignReader, CampaignWriter, DieselRepository, RepositoryResult,
};

const LIKE_ESCAPE: char = '\\';

/// `%term%`, with LIKE wildcards inside `term` matched literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Attach company display names and categories to loaded campaign rows.
fn with_relations(
    conn: &mut SqliteConnection,
    rows: Vec<DbCampaign>,
) -> RepositoryResult<Vec<CampaignListing>> {
    use crate::schema::{categories, profiles};

    let company_ids: Vec<i32> = rows.iter().map(|c| c.company_id).collect();
    let category_ids: Vec<i32> = rows.iter().filter_map(|c| c.category_id).collect();

    let companies: HashMap<i32, String> = profiles::table
        .filter(profiles::id.eq_any(&company_ids))
        .select((profiles::id, profiles::full_name, profiles::company_name))
        .load::<(i32, String, Option<String>)>(conn)?
        .into_iter()
        .map(|(id, full_name, company_name)| (id, company_name.unwrap_or(full_name)))
        .collect();

    let mut categories: HashMap<i32, Category> = HashMap::new();
    for row in categories::table
        .filter(categories::id.eq_any(&category_ids))
        .load::<DbCategory>(conn)?
    {
        categories.insert(row.id, row.try_into()?);
    }

    rows.into_iter()
        .map(|row| {
            let company_name = companies.get(&row.company_id).cloned();
            let category = row.category_id.and_then(|id| categories.get(&id).cloned());
            Ok(CampaignListing {
                campaign: Campaign::try_from(row)?,
                company_name,
                category,
            })
        })
        .collect()
}

impl CampaignReader for DieselRepository {
    fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<Vec<CampaignListing>> {
        use crate::schema::campaigns;

        let mut conn = self.conn()?;

        let mut items = campaigns::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status) = query.status {
            items = items.filter(campaigns::status.eq(status.as_str()));
        }
        if let Some(company_id) = query.company_id {
            items = items.filter(campaigns::company_id.eq(company_id.get()));
        }
        if let Some(category_id) = query.category_id {
            items = items.filter(campaigns::category_id.eq(category_id.get()));
        }
        if let Some(search) = &query.search {
            // SQLite LIKE is case-insensitive for ASCII.
            let pattern = contains_pattern(search);
            items = items.filter(
                campaigns::title
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE)
                    .or(campaigns::description.like(pattern).escape(LIKE_ESCAPE)),
            );
        }

        let rows = items
            .order((campaigns::created_at.desc(), campaigns::id.desc()))
            .load::<DbCampaign>(&mut conn)?;

        with_relations(&mut conn, rows)
    }

    fn get_campaign_by_id(&self, id: CampaignId) -> RepositoryResult<Option<CampaignListing>> {
        use crate::schema::campaigns;

        let mut conn = self.conn()?;

        let Some(row) = campaigns::table
            .filter(campaigns::id.eq(id.get()))
            .first::<DbCampaign>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        Ok(with_relations(&mut conn, vec![row])?.pop())
    }
}

impl CampaignWriter for DieselRepository {
    fn create_campaign(&self, campaign: &NewCampaign) -> RepositoryResult<CampaignId> {
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let db_campaign: DbNewCampaign = campaign.clone().into();

        let id: i32 = diesel::insert_into(campaigns::table)
            .values(db_campaign)
            .returning(campaigns::id)
            .get_result(&mut conn)?;

        Ok(CampaignId::new(id)?)
    }

    fn update_campaign_status(
        &self,
        id: CampaignId,
        from: CampaignStatus,
        to: CampaignStatus,
    ) -> RepositoryResult<usize> {
        use crate::schema::campaigns;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            campaigns::table
                .filter(campaigns::id.eq(id.get()))
                .filter(campaigns::status.eq(from.as_str())),
        )
        .set((
            campaigns::status.eq(to.as_str()),
            campaigns::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
