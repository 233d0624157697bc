use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::application::{Application, ApplicationListing, NewApplication};
use crate::domain::types::{ApplicationId, ApplicationStatus};
use crate::models::application::{
    Application as DbApplication, NewApplication as DbNewApplication,
};
use crate::repository::{
    ApplicationListQuery, ApplicationReader, ApplicationWriter, DieselRepository,
    RepositoryResult,
};

impl ApplicationReader for DieselRepository {
    fn list_applications(
        &self,
        query: ApplicationListQuery,
    ) -> RepositoryResult<Vec<ApplicationListing>> {
        use crate::schema::{applications, campaigns, profiles};

        let mut conn = self.conn()?;

        let mut items = applications::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(campaign_id) = query.campaign_id {
            items = items.filter(applications::campaign_id.eq(campaign_id.get()));
        }
        if let Some(influencer_id) = query.influencer_id {
            items = items.filter(applications::influencer_id.eq(influencer_id.get()));
        }
        if let Some(company_id) = query.company_id {
            let owned = campaigns::table
                .filter(campaigns::company_id.eq(company_id.get()))
                .select(campaigns::id);
            items = items.filter(applications::campaign_id.eq_any(owned));
        }

        let rows = items
            .order((applications::created_at.desc(), applications::id.desc()))
            .load::<DbApplication>(&mut conn)?;

        let campaign_ids: Vec<i32> = rows.iter().map(|a| a.campaign_id).collect();
        let influencer_ids: Vec<i32> = rows.iter().map(|a| a.influencer_id).collect();

        let titles: HashMap<i32, String> = campaigns::table
            .filter(campaigns::id.eq_any(&campaign_ids))
            .select((campaigns::id, campaigns::title))
            .load::<(i32, String)>(&mut conn)?
            .into_iter()
            .collect();

        let names: HashMap<i32, String> = profiles::table
            .filter(profiles::id.eq_any(&influencer_ids))
            .select((profiles::id, profiles::full_name))
            .load::<(i32, String)>(&mut conn)?
            .into_iter()
            .collect();

        rows.into_iter()
            .map(|row| {
                let campaign_title = titles.get(&row.campaign_id).cloned();
                let influencer_name = names.get(&row.influencer_id).cloned();
                Ok(ApplicationListing {
                    application: Application::try_from(row)?,
                    campaign_title,
                    influencer_name,
                })
            })
            .collect()
    }

    fn get_application_by_id(&self, id: ApplicationId) -> RepositoryResult<Option<Application>> {
        use crate::schema::applications;

        let mut conn = self.conn()?;

        let row = applications::table
            .filter(applications::id.eq(id.get()))
            .first::<DbApplication>(&mut conn)
            .optional()?;

        Ok(row.map(Application::try_from).transpose()?)
    }
}

impl ApplicationWriter for DieselRepository {
    fn create_application(&self, application: &NewApplication) -> RepositoryResult<ApplicationId> {
        use crate::schema::applications;

        let mut conn = self.conn()?;
        let db_application: DbNewApplication = application.clone().into();

        let id: i32 = diesel::insert_into(applications::table)
            .values(db_application)
            .returning(applications::id)
            .get_result(&mut conn)?;

        Ok(ApplicationId::new(id)?)
    }

    fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> RepositoryResult<usize> {
        use crate::schema::applications;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            applications::table
                .filter(applications::id.eq(id.get()))
                .filter(applications::status.eq(ApplicationStatus::Pending.as_str())),
        )
        .set((
            applications::status.eq(status.as_str()),
            applications::updated_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
