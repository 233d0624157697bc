use chrono::Utc;
use diesel::prelude::*;

use crate::domain::auth::{NewUser, User};
use crate::domain::profile::NewProfile;
use crate::domain::types::{Email, ProfileId};
use crate::models::profile::NewProfile as DbNewProfile;
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::{DieselRepository, RepositoryError, RepositoryResult, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        let user = user.map(TryInto::try_into).transpose()?;
        Ok(user)
    }
}

impl UserWriter for DieselRepository {
    fn create_user_with_profile(
        &self,
        user: &NewUser,
        profile: &NewProfile,
    ) -> RepositoryResult<ProfileId> {
        use crate::schema::{profiles, users};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let id = conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_user: DbNewUser = user.clone().into();
            let id: i32 = diesel::insert_into(users::table)
                .values(db_user)
                .returning(users::id)
                .get_result(conn)?;
            let id = ProfileId::new(id)?;

            diesel::insert_into(profiles::table)
                .values(DbNewProfile::from_domain(id, profile.clone(), now))
                .execute(conn)?;

            Ok(id)
        })?;

        Ok(id)
    }
}
