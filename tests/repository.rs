use chrono::Utc;
use diesel::prelude::*;
use komponi::domain::application::NewApplication;
use komponi::domain::auth::NewUser;
use komponi::domain::campaign::{BudgetRange, NewCampaign};
use komponi::domain::profile::{
    CompanyProfileUpdate, InfluencerProfileUpdate, NewProfile, NewProfileKind, ProfileUpdate,
};
use komponi::domain::types::{
    ApplicationStatus, BudgetAmount, CampaignDescription, CampaignId, CampaignRequirements,
    CampaignStatus, CampaignTitle, CategoryId, CompanyName, Email, FullName, Pitch, ProfileId,
};
use komponi::repository::{
    ApplicationListQuery, ApplicationReader, ApplicationWriter, CampaignListQuery, CampaignReader,
    CampaignWriter, CategoryReader, DieselRepository, ProfileReader, ProfileWriter,
    RepositoryError, UserReader, UserWriter,
};
use komponi::schema::{applications, profiles, users};

mod common;

fn sign_up(repo: &DieselRepository, email: &str, name: &str, company: Option<&str>) -> ProfileId {
    let now = Utc::now().naive_utc();
    let email = Email::new(email).expect("valid email");
    let user = NewUser {
        email: email.clone(),
        password_hash: "hash".to_string(),
        created_at: now,
    };
    let kind = match company {
        Some(name) => NewProfileKind::Company {
            company_name: CompanyName::new(name).expect("valid company name"),
        },
        None => NewProfileKind::Influencer,
    };
    let profile = NewProfile {
        email,
        full_name: FullName::new(name).expect("valid name"),
        kind,
    };
    repo.create_user_with_profile(&user, &profile)
        .expect("should create user and profile")
}

fn publish(repo: &DieselRepository, company_id: ProfileId, title: &str) -> CampaignId {
    let now = Utc::now().naive_utc();
    let campaign = NewCampaign {
        company_id,
        category_id: Some(CategoryId::new(1).expect("valid category id")),
        title: CampaignTitle::new(title).expect("valid title"),
        description: CampaignDescription::new("Summer launch").expect("valid description"),
        requirements: CampaignRequirements::new("10K followers").expect("valid requirements"),
        budget: BudgetRange::new(
            BudgetAmount::new(100).expect("valid amount"),
            BudgetAmount::new(500).expect("valid amount"),
        )
        .expect("valid range"),
        created_at: now,
        updated_at: now,
    };
    repo.create_campaign(&campaign)
        .expect("should create campaign")
}

fn application(campaign_id: CampaignId, influencer_id: ProfileId) -> NewApplication {
    let now = Utc::now().naive_utc();
    NewApplication {
        campaign_id,
        influencer_id,
        pitch: Pitch::new("I cook every day").expect("valid pitch"),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn signup_creates_user_and_profile_with_shared_id() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let id = sign_up(&repo, "Anna@Example.com", "Anna", None);

    let user = repo
        .get_user_by_email(&Email::new("anna@example.com").unwrap())
        .expect("should query user")
        .expect("user should exist");
    assert_eq!(user.id, id);

    let profile = repo
        .get_profile_by_id(id)
        .expect("should query profile")
        .expect("profile should exist");
    assert_eq!(profile.full_name.as_str(), "Anna");
    assert!(profile.as_influencer().is_some());
}

#[test]
fn duplicate_email_leaves_no_partial_rows() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    sign_up(&repo, "anna@example.com", "Anna", None);

    let now = Utc::now().naive_utc();
    let email = Email::new("anna@example.com").unwrap();
    let result = repo.create_user_with_profile(
        &NewUser {
            email: email.clone(),
            password_hash: "hash".to_string(),
            created_at: now,
        },
        &NewProfile {
            email,
            full_name: FullName::new("Other Anna").unwrap(),
            kind: NewProfileKind::Influencer,
        },
    );
    assert!(matches!(result, Err(RepositoryError::ConstraintError(_))));

    let mut conn = test_db.pool().get().expect("should acquire DB connection");
    let user_count: i64 = users::table.count().get_result(&mut conn).unwrap();
    let profile_count: i64 = profiles::table.count().get_result(&mut conn).unwrap();
    assert_eq!(user_count, 1);
    assert_eq!(profile_count, 1);
}

#[test]
fn browse_returns_only_active_campaigns() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let company = sign_up(&repo, "brand@example.com", "Bo", Some("Nordic Brand"));
    let active = publish(&repo, company, "Active campaign");
    let paused = publish(&repo, company, "Paused campaign");
    assert_eq!(
        repo.update_campaign_status(paused, CampaignStatus::Active, CampaignStatus::Paused)
            .unwrap(),
        1
    );

    let listed = repo
        .list_campaigns(CampaignListQuery::default().status(CampaignStatus::Active))
        .expect("should list campaigns");

    let ids: Vec<CampaignId> = listed.iter().map(|l| l.campaign.id).collect();
    assert_eq!(ids, vec![active]);
    assert_eq!(listed[0].company_name.as_deref(), Some("Nordic Brand"));
    assert!(listed[0].category.is_some());
}

#[test]
fn campaign_search_matches_title_or_description() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let company = sign_up(&repo, "brand@example.com", "Bo", Some("Nordic Brand"));
    publish(&repo, company, "Recipe videos");
    publish(&repo, company, "Running shoes");

    let listed = repo
        .list_campaigns(CampaignListQuery::default().search("RECIPE"))
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].campaign.title.as_str(), "Recipe videos");

    let listed = repo
        .list_campaigns(CampaignListQuery::default().search("summer"))
        .unwrap();
    assert_eq!(listed.len(), 2);
}

#[test]
fn campaign_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let company = sign_up(&repo, "brand@example.com", "Bo", Some("Nordic Brand"));
    publish(&repo, company, "Recipe videos");
    publish(&repo, company, "50% off running shoes");

    let listed = repo
        .list_campaigns(CampaignListQuery::default().search("%"))
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].campaign.title.as_str(), "50% off running shoes");

    // Every description reads "Summer launch".
    let listed = repo
        .list_campaigns(CampaignListQuery::default().search("S_mmer"))
        .unwrap();
    assert!(listed.is_empty());

    let listed = repo
        .list_campaigns(CampaignListQuery::default().search("\\"))
        .unwrap();
    assert!(listed.is_empty());
}

#[test]
fn second_application_for_same_campaign_is_rejected_by_unique_index() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let company = sign_up(&repo, "brand@example.com", "Bo", Some("Nordic Brand"));
    let influencer = sign_up(&repo, "anna@example.com", "Anna", None);
    let campaign = publish(&repo, company, "Recipe videos");

    repo.create_application(&application(campaign, influencer))
        .expect("first application should succeed");
    let second = repo.create_application(&application(campaign, influencer));
    assert!(matches!(second, Err(RepositoryError::ConstraintError(_))));

    let mut conn = test_db.pool().get().expect("should acquire DB connection");
    let rows: Vec<String> = applications::table
        .filter(applications::campaign_id.eq(campaign.get()))
        .filter(applications::influencer_id.eq(influencer.get()))
        .select(applications::status)
        .load(&mut conn)
        .unwrap();
    assert_eq!(rows, vec!["pending".to_string()]);
}

#[test]
fn decided_application_cannot_be_decided_again() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let company = sign_up(&repo, "brand@example.com", "Bo", Some("Nordic Brand"));
    let influencer = sign_up(&repo, "anna@example.com", "Anna", None);
    let campaign = publish(&repo, company, "Recipe videos");
    let id = repo
        .create_application(&application(campaign, influencer))
        .unwrap();

    assert_eq!(
        repo.update_application_status(id, ApplicationStatus::Accepted)
            .unwrap(),
        1
    );
    assert_eq!(
        repo.update_application_status(id, ApplicationStatus::Rejected)
            .unwrap(),
        0
    );

    let stored = repo.get_application_by_id(id).unwrap().unwrap();
    assert_eq!(stored.status, ApplicationStatus::Accepted);
}

#[test]
fn campaign_status_update_requires_expected_current_status() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let company = sign_up(&repo, "brand@example.com", "Bo", Some("Nordic Brand"));
    let campaign = publish(&repo, company, "Recipe videos");

    assert_eq!(
        repo.update_campaign_status(campaign, CampaignStatus::Paused, CampaignStatus::Active)
            .unwrap(),
        0
    );
    assert_eq!(
        repo.update_campaign_status(campaign, CampaignStatus::Active, CampaignStatus::Completed)
            .unwrap(),
        1
    );
}

#[test]
fn applications_can_be_listed_per_company() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let first = sign_up(&repo, "first@example.com", "Bo", Some("First Brand"));
    let second = sign_up(&repo, "second@example.com", "Eva", Some("Second Brand"));
    let influencer = sign_up(&repo, "anna@example.com", "Anna", None);
    let first_campaign = publish(&repo, first, "First campaign");
    let second_campaign = publish(&repo, second, "Second campaign");
    repo.create_application(&application(first_campaign, influencer))
        .unwrap();
    repo.create_application(&application(second_campaign, influencer))
        .unwrap();

    let listed = repo
        .list_applications(ApplicationListQuery::default().company(first))
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].campaign_title.as_deref(), Some("First campaign"));
    assert_eq!(listed[0].influencer_name.as_deref(), Some("Anna"));

    let listed = repo
        .list_applications(ApplicationListQuery::default().influencer(influencer))
        .unwrap();
    assert_eq!(listed.len(), 2);
}

#[test]
fn profile_update_only_touches_own_role() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let influencer = sign_up(&repo, "anna@example.com", "Anna", None);
    let categories = repo.list_categories().unwrap();
    assert!(categories.len() >= 2);

    let update = ProfileUpdate::Influencer(InfluencerProfileUpdate {
        full_name: FullName::new("Anna Chef").unwrap(),
        niche: Some("Food".to_string()),
        bio: Some("chef sharing recipes".to_string()),
        website: None,
        location: Some("Aarhus".to_string()),
        avatar_url: None,
        instagram_url: None,
        youtube_url: None,
        tiktok_url: None,
        followers_count: None,
        engagement_rate: None,
        category_ids: vec![categories[1].id, categories[0].id],
    });
    assert_eq!(repo.update_profile(influencer, &update).unwrap(), 1);

    let stored = repo.get_profile_by_id(influencer).unwrap().unwrap();
    assert_eq!(stored.full_name.as_str(), "Anna Chef");
    let details = stored.as_influencer().expect("still an influencer");
    assert_eq!(details.category_ids.len(), 2);

    // A company update aimed at an influencer profile changes nothing.
    let company_update = ProfileUpdate::Company(CompanyProfileUpdate {
        company_name: CompanyName::new("Not a company").unwrap(),
        description: None,
        website: None,
        trustpilot_url: None,
        industry: None,
        company_size: None,
        location: None,
    });
    assert_eq!(repo.update_profile(influencer, &company_update).unwrap(), 0);

    let mut conn = test_db.pool().get().expect("should acquire DB connection");
    let company_name: Option<String> = profiles::table
        .filter(profiles::id.eq(influencer.get()))
        .select(profiles::company_name)
        .first(&mut conn)
        .unwrap();
    assert_eq!(company_name, None);
}
