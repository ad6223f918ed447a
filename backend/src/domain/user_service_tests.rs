//! Tests for the account services.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockTokenService, MockUserRepository};
use crate::domain::{
    Email, ErrorCode, Password, PasswordHash, PersonName, SessionToken, StoredUser, Username,
};

type Service = UserService<MockUserRepository, MockPasswordHasher, MockTokenService>;

fn user(raw_id: i64, username: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(raw_id).expect("valid id"),
        name: "Ada Lovelace".to_owned(),
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        created_at: now,
        updated_at: now,
    }
}

#[fixture]
fn registration() -> Registration {
    Registration {
        name: PersonName::new("Ada Lovelace").expect("name"),
        email: Email::new("ada@example.com").expect("email"),
        username: Username::new("ada").expect("username"),
        password: Password::new("analytical").expect("password"),
    }
}

fn plain_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|password| Ok(PasswordHash::new(format!("hashed:{}", password.expose()))));
    hasher
        .expect_verify()
        .returning(|password, hash| Ok(hash.as_str() == format!("hashed:{}", password.expose())));
    hasher
}

fn service(
    repo: MockUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenService,
) -> Service {
    UserService::new(Arc::new(repo), Arc::new(hasher), Arc::new(tokens))
}

#[rstest]
#[tokio::test]
async fn register_hashes_password_before_insert(registration: Registration) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email_or_username()
        .withf(|email, username| email == "ada@example.com" && username == "ada")
        .times(1)
        .return_once(|_, _| Ok(None));
    repo.expect_insert()
        .withf(|new_user: &NewUser| new_user.password_hash.as_str() == "hashed:analytical")
        .times(1)
        .return_once(|_| Ok(user(1, "ada")));

    let created = service(repo, plain_hasher(), MockTokenService::new())
        .register(registration)
        .await
        .expect("registration succeeds");

    assert_eq!(created.username, "ada");
}

#[rstest]
#[tokio::test]
async fn register_rejects_taken_identity_without_inserting(registration: Registration) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email_or_username()
        .return_once(|_, _| Ok(Some(user(9, "ada"))));
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let error = service(repo, hasher, MockTokenService::new())
        .register(registration)
        .await
        .expect_err("duplicate identity");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "email or username already in use");
}

#[rstest]
#[tokio::test]
async fn register_maps_racing_unique_violation_to_conflict(registration: Registration) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email_or_username()
        .return_once(|_, _| Ok(None));
    repo.expect_insert()
        .return_once(|_| Err(RepositoryError::duplicate("users_username_key")));

    let error = service(repo, plain_hasher(), MockTokenService::new())
        .register(registration)
        .await
        .expect_err("unique violation");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn hashing_failure_states_its_cause_once(registration: Registration) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email_or_username()
        .return_once(|_, _| Ok(None));
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHashError::hashing("invalid cost")));

    let error = service(repo, hasher, MockTokenService::new())
        .register(registration)
        .await
        .expect_err("hasher failed");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "password hashing failed");
    assert_eq!(error.detail(), Some("invalid cost"));
}

#[rstest]
#[case(None, ErrorCode::Unauthorized)]
#[case(Some("hashed:other"), ErrorCode::InvalidCredentials)]
#[tokio::test]
async fn login_failures_are_distinguishable(
    #[case] stored_hash: Option<&'static str>,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials().return_once(move |_| {
        Ok(stored_hash.map(|hash| StoredUser {
            user: user(1, "ada"),
            password_hash: PasswordHash::new(hash),
        }))
    });
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().times(0);

    let credentials = LoginCredentials::try_from_parts("ada", "analytical").expect("credentials");
    let error = service(repo, plain_hasher(), tokens)
        .login(credentials)
        .await
        .expect_err("login fails");

    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn login_issues_token_for_matching_password() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials()
        .withf(|identifier| identifier == "ada@example.com")
        .return_once(|_| {
            Ok(Some(StoredUser {
                user: user(1, "ada"),
                password_hash: PasswordHash::new("hashed:analytical"),
            }))
        });
    let mut tokens = MockTokenService::new();
    tokens
        .expect_issue()
        .withf(|id| id.get() == 1)
        .return_once(|_| Ok(SessionToken::new("signed")));

    let credentials =
        LoginCredentials::try_from_parts("ada@example.com", "analytical").expect("credentials");
    let outcome = service(repo, plain_hasher(), tokens)
        .login(credentials)
        .await
        .expect("login succeeds");

    assert_eq!(outcome.token.as_str(), "signed");
    assert_eq!(outcome.user.id.get(), 1);
}

#[rstest]
#[tokio::test]
async fn empty_update_fails_before_touching_storage() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().times(0);
    repo.expect_find_by_id().times(0);

    let error = service(repo, MockPasswordHasher::new(), MockTokenService::new())
        .update(UserId::new(404).expect("id"), UserUpdate::default())
        .await
        .expect_err("no fields");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "no field supplied for update");
}

#[rstest]
#[tokio::test]
async fn update_rehashes_supplied_password() {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .withf(|_, changes: &UserChanges| {
            changes.password_hash.as_ref().map(PasswordHash::as_str) == Some("hashed:new-secret")
                && changes.name.is_none()
        })
        .return_once(|_, _| Ok(Some(user(1, "ada"))));

    let update = UserUpdate {
        password: Some(Password::new("new-secret").expect("password")),
        ..UserUpdate::default()
    };
    service(repo, plain_hasher(), MockTokenService::new())
        .update(UserId::new(1).expect("id"), update)
        .await
        .expect("update succeeds");
}

#[rstest]
#[tokio::test]
async fn update_of_missing_user_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().return_once(|_, _| Ok(None));

    let update = UserUpdate {
        name: Some(PersonName::new("Bea").expect("name")),
        ..UserUpdate::default()
    };
    let error = service(repo, plain_hasher(), MockTokenService::new())
        .update(UserId::new(5).expect("id"), update)
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_user_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().return_once(|_| Ok(None));

    let error = service(repo, MockPasswordHasher::new(), MockTokenService::new())
        .delete(UserId::new(5).expect("id"))
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(false)]
#[case(true)]
#[tokio::test]
async fn list_uses_the_requested_projection(#[case] include_relations: bool) {
    let mut repo = MockUserRepository::new();
    if include_relations {
        repo.expect_list().times(0);
        repo.expect_list_with_relations().times(1).return_once(|| {
            Ok(vec![UserProfile {
                user: user(1, "ada"),
                relations: Some(crate::domain::UserRelations::default()),
            }])
        });
    } else {
        repo.expect_list_with_relations().times(0);
        repo.expect_list()
            .times(1)
            .return_once(|| Ok(vec![user(1, "ada")]));
    }

    let profiles = service(repo, MockPasswordHasher::new(), MockTokenService::new())
        .list(include_relations)
        .await
        .expect("list succeeds");

    assert_eq!(profiles.len(), 1);
    assert_eq!(
        profiles.first().map(|profile| profile.relations.is_some()),
        Some(include_relations)
    );
}

#[rstest]
#[tokio::test]
async fn connection_failures_surface_as_internal_errors() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(RepositoryError::connection("pool timed out")));

    let error = service(repo, MockPasswordHasher::new(), MockTokenService::new())
        .get(UserId::new(1).expect("id"))
        .await
        .expect_err("connection failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.detail(), Some("pool timed out"));
}
