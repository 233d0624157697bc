use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::profile::{Profile, ProfileUpdate};
use crate::domain::types::{CategoryId, ProfileId};
use crate::models::category::ProfileCategory;
use crate::models::profile::{CompanyChangeset, InfluencerChangeset, Profile as DbProfile};
use crate::repository::{
    DieselRepository, ProfileListQuery, ProfileReader, ProfileWriter, RepositoryError,
    RepositoryResult,
};

fn load_category_ids(
    conn: &mut SqliteConnection,
    profile_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<CategoryId>>> {
    use crate::schema::profile_categories;

    let rows = profile_categories::table
        .filter(profile_categories::profile_id.eq_any(profile_ids))
        .order(profile_categories::category_id.asc())
        .load::<ProfileCategory>(conn)?;

    let mut grouped: HashMap<i32, Vec<CategoryId>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.profile_id)
            .or_default()
            .push(CategoryId::new(row.category_id)?);
    }
    Ok(grouped)
}

impl ProfileReader for DieselRepository {
    fn get_profile_by_id(&self, id: ProfileId) -> RepositoryResult<Option<Profile>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;

        let Some(row) = profiles::table
            .filter(profiles::id.eq(id.get()))
            .first::<DbProfile>(&mut conn)
            .optional()?
        else {
            return Ok(None);
        };

        let category_ids = load_category_ids(&mut conn, &[row.id])?
            .remove(&row.id)
            .unwrap_or_default();

        Ok(Some(row.into_domain(category_ids)?))
    }

    fn list_profiles(&self, query: ProfileListQuery) -> RepositoryResult<Vec<Profile>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;

        let mut items = profiles::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(role) = query.role {
            items = items.filter(profiles::role.eq(role.as_str()));
        }
        if query.with_followers {
            items = items.filter(profiles::followers_count.is_not_null());
        }
        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let rows = items
            .order((
                profiles::followers_count.is_null().asc(),
                profiles::followers_count.desc(),
                profiles::id.asc(),
            ))
            .load::<DbProfile>(&mut conn)?;

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut categories = load_category_ids(&mut conn, &ids)?;

        let profiles = rows
            .into_iter()
            .map(|row| {
                let category_ids = categories.remove(&row.id).unwrap_or_default();
                row.into_domain(category_ids)
            })
            .collect::<Result<Vec<Profile>, _>>()?;

        Ok(profiles)
    }
}

impl ProfileWriter for DieselRepository {
    fn update_profile(&self, id: ProfileId, update: &ProfileUpdate) -> RepositoryResult<usize> {
        use crate::schema::{profile_categories, profiles};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            let target = profiles::table
                .filter(profiles::id.eq(id.get()))
                .filter(profiles::role.eq(update.role().as_str()));

            match update {
                ProfileUpdate::Influencer(fields) => {
                    let affected = diesel::update(target)
                        .set(InfluencerChangeset::new(fields, now))
                        .execute(conn)?;
                    if affected == 0 {
                        return Ok(0);
                    }

                    diesel::delete(
                        profile_categories::table
                            .filter(profile_categories::profile_id.eq(id.get())),
                    )
                    .execute(conn)?;

                    let rows: Vec<ProfileCategory> = fields
                        .category_ids
                        .iter()
                        .map(|category_id| ProfileCategory {
                            profile_id: id.get(),
                            category_id: category_id.get(),
                        })
                        .collect();
                    if !rows.is_empty() {
                        diesel::insert_into(profile_categories::table)
                            .values(&rows)
                            .execute(conn)?;
                    }

                    Ok(affected)
                }
                ProfileUpdate::Company(fields) => Ok(diesel::update(target)
                    .set(CompanyChangeset::new(fields, now))
                    .execute(conn)?),
            }
        })?;

        Ok(affected)
    }
}
