use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;

use crate::domain::auth::{AuthenticatedUser, NewUser};
use crate::domain::types::Role;
use crate::forms::auth::{LoginFormPayload, SignupFormPayload};
use crate::repository::{ProfileReader, UserReader, UserWriter};

use super::{ServiceError, ServiceResult, UserMessage, load_actor};

fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Failed to hash password: {e}");
            ServiceError::Internal
        })
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::error!("Stored password hash is malformed: {e}");
            false
        }
    }
}

/// Creates the account and its profile in one step and signs the user in.
pub fn sign_up<R>(payload: SignupFormPayload, repo: &R) -> ServiceResult<(AuthenticatedUser, Role)>
where
    R: UserReader + UserWriter,
{
    let email = payload.profile.email.clone();
    let role = payload.profile.role();

    match repo.get_user_by_email(&email) {
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict(UserMessage::new(
                "errors.email_taken",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to look up user by email: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let user = NewUser {
        email,
        password_hash: hash_password(&payload.password)?,
        created_at: Utc::now().naive_utc(),
    };

    match repo.create_user_with_profile(&user, &payload.profile) {
        Ok(id) => {
            log::info!("New {role} account {id} created");
            Ok((AuthenticatedUser { id }, role))
        }
        Err(e) if e.is_constraint_violation() => Err(ServiceError::Conflict(UserMessage::new(
            "errors.email_taken",
        ))),
        Err(e) => {
            log::error!("Failed to create account: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Checks credentials. Unknown email and wrong password are indistinguishable
/// to the caller.
pub fn sign_in<R>(payload: LoginFormPayload, repo: &R) -> ServiceResult<(AuthenticatedUser, Role)>
where
    R: UserReader + ProfileReader,
{
    let user = match repo.get_user_by_email(&payload.email) {
        Ok(Some(user)) => user,
        Ok(None) => return Err(ServiceError::Unauthorized),
        Err(e) => {
            log::error!("Failed to look up user by email: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ServiceError::Unauthorized);
    }

    let actor = AuthenticatedUser { id: user.id };
    let profile = load_actor(&actor, repo)?;
    Ok((actor, profile.role()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{NewProfile, NewProfileKind};
    use crate::domain::types::{CompanyName, Email, FullName};
    use crate::repository::test::TestRepository;

    fn signup(email: &str, kind: NewProfileKind) -> SignupFormPayload {
        SignupFormPayload {
            password: "secret123".into(),
            profile: NewProfile {
                email: Email::new(email).unwrap(),
                full_name: FullName::new("Michael Brown").unwrap(),
                kind,
            },
        }
    }

    fn login(email: &str, password: &str) -> LoginFormPayload {
        LoginFormPayload {
            email: Email::new(email).unwrap(),
            password: password.into(),
        }
    }

    #[test]
    fn sign_up_creates_profile_with_chosen_role() {
        let repo = TestRepository::default();
        let (user, role) = sign_up(
            signup(
                "brand@example.com",
                NewProfileKind::Company {
                    company_name: CompanyName::new("Acme").unwrap(),
                },
            ),
            &repo,
        )
        .unwrap();

        assert_eq!(role, Role::Company);
        let profile = repo.profile(user.id).unwrap();
        assert_eq!(profile.display_name(), "Acme");
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let repo = TestRepository::default();
        sign_up(signup("dup@example.com", NewProfileKind::Influencer), &repo).unwrap();

        let err = sign_up(signup("dup@example.com", NewProfileKind::Influencer), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn sign_in_checks_password() {
        let repo = TestRepository::default();
        let (created, _) =
            sign_up(signup("me@example.com", NewProfileKind::Influencer), &repo).unwrap();

        let (user, role) = sign_in(login("me@example.com", "secret123"), &repo).unwrap();
        assert_eq!(user, created);
        assert_eq!(role, Role::Influencer);

        assert_eq!(
            sign_in(login("me@example.com", "wrong"), &repo).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(
            sign_in(login("nobody@example.com", "secret123"), &repo).unwrap_err(),
            ServiceError::Unauthorized
        );
    }
}
