//! User service behavior against the in-memory adapters: registration with
//! identity lookup, dedup by passport number, pagination clamping, partial
//! updates and deletion.

use std::sync::Arc;

use async_trait::async_trait;

use tracking::domain::error::DomainError;
use tracking::domain::model::{PersonInfo, UserFilter, UserPatch};
use tracking::domain::ports::{PeopleDirectory, UserRepository};
use tracking::domain::{UserService, UserServiceConfig};
use tracking::infra::people::FixedPeopleDirectory;
use tracking::infra::storage::memory::InMemoryUserRepository;

fn person(name: &str, surname: &str) -> PersonInfo {
    PersonInfo {
        surname: surname.to_string(),
        name: name.to_string(),
        patronymic: String::new(),
        address: "Main Street 1".to_string(),
    }
}

fn service_with(repo: Arc<InMemoryUserRepository>, info: PersonInfo) -> UserService {
    UserService::new(
        repo,
        Arc::new(FixedPeopleDirectory::new(info)),
        UserServiceConfig::default(),
    )
}

/// People directory that always fails, standing in for a dead collaborator.
struct UnreachablePeopleDirectory;

#[async_trait]
impl PeopleDirectory for UnreachablePeopleDirectory {
    async fn lookup(&self, _serie: &str, _number: &str) -> Result<PersonInfo, DomainError> {
        Err(DomainError::lookup("connection refused"))
    }
}

#[tokio::test]
async fn create_user_persists_looked_up_identity() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let svc = service_with(repo.clone(), person("Ann", "Smith"));

    let id = svc.create_user("4111 111111").await.unwrap();
    assert!(id > 0);

    let user = svc.get_user(id).await.unwrap();
    assert_eq!(user.name, "Ann");
    assert_eq!(user.surname, "Smith");
    assert_eq!(user.passport_number, "4111 111111");
    assert_eq!(user.address, "Main Street 1");
    assert!(user.updated_at.is_none());
}

#[tokio::test]
async fn create_user_rejects_duplicate_passport() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let svc = service_with(repo, person("Ann", "Smith"));

    svc.create_user("4111 111111").await.unwrap();

    let err = svc.create_user("4111 111111").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::PassportAlreadyRegistered { .. }
    ));
}

#[tokio::test]
async fn create_user_lookup_failure_persists_nothing() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let svc = UserService::new(
        repo.clone(),
        Arc::new(UnreachablePeopleDirectory),
        UserServiceConfig::default(),
    );

    let err = svc.create_user("4111 111111").await.unwrap_err();
    assert!(matches!(err, DomainError::Lookup { .. }));

    // No partial user was written.
    assert!(repo.find_by_passport("4111 111111").await.unwrap().is_none());
}

#[tokio::test]
async fn create_user_guards_against_malformed_passport() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let svc = service_with(repo, person("Ann", "Smith"));

    let err = svc.create_user("4111111111").await.unwrap_err();
    assert!(matches!(err, DomainError::MalformedPassport { .. }));
}

#[tokio::test]
async fn get_user_missing_is_not_found() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let svc = service_with(repo, person("Ann", "Smith"));

    let err = svc.get_user(42).await.unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { id: 42 }));
}

#[tokio::test]
async fn list_users_clamps_limit_and_passes_offset() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let svc = service_with(repo, person("Ann", "Smith"));

    for i in 0..15 {
        svc.create_user(&format!("1234 {:06}", i)).await.unwrap();
    }

    // Unset limit resolves to the default page size.
    let page = svc
        .list_users(UserFilter::default(), None, None)
        .await
        .unwrap();
    assert_eq!(page.len(), 10);

    // Zero resolves to the default as well.
    let page = svc
        .list_users(UserFilter::default(), Some(0), None)
        .await
        .unwrap();
    assert_eq!(page.len(), 10);

    // Oversized limits clamp to the maximum.
    let page = svc
        .list_users(UserFilter::default(), Some(25), None)
        .await
        .unwrap();
    assert_eq!(page.len(), 10);

    // Offset passes through unmodified.
    let page = svc
        .list_users(UserFilter::default(), Some(25), Some(12))
        .await
        .unwrap();
    assert_eq!(page.len(), 3);
}

#[tokio::test]
async fn list_users_filters_are_case_insensitive_substrings() {
    let repo = Arc::new(InMemoryUserRepository::new());

    let ann = service_with(repo.clone(), person("Ann", "Smith"));
    ann.create_user("1111 111111").await.unwrap();

    let bob = service_with(repo.clone(), person("Bob", "Smithson"));
    bob.create_user("2222 222222").await.unwrap();

    let carol = service_with(repo.clone(), person("Carol", "Jones"));
    carol.create_user("3333 333333").await.unwrap();

    let svc = service_with(repo, person("Unused", "Unused"));

    // Substring, case-insensitive.
    let smiths = svc
        .list_users(
            UserFilter {
                surname: Some("smith".to_string()),
                ..Default::default()
            },
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(smiths.len(), 2);

    // AND-combination narrows the result.
    let bob_only = svc
        .list_users(
            UserFilter {
                surname: Some("smith".to_string()),
                name: Some("BOB".to_string()),
                ..Default::default()
            },
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(bob_only.len(), 1);
    assert_eq!(bob_only[0].name, "Bob");
}

#[tokio::test]
async fn update_user_changes_only_supplied_fields() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let svc = service_with(repo, person("Ann", "Smith"));

    let id = svc.create_user("4111 111111").await.unwrap();

    svc.update_user(
        id,
        UserPatch {
            surname: Some("Jones".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let user = svc.get_user(id).await.unwrap();
    assert_eq!(user.surname, "Jones");
    assert_eq!(user.name, "Ann");
    assert_eq!(user.address, "Main Street 1");
    assert!(user.updated_at.is_some());
}

#[tokio::test]
async fn update_user_missing_is_not_found() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let svc = service_with(repo, person("Ann", "Smith"));

    let err = svc
        .update_user(
            7,
            UserPatch {
                name: Some("Ann".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { id: 7 }));
}

#[tokio::test]
async fn delete_user_removes_row_and_reports_missing() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let svc = service_with(repo, person("Ann", "Smith"));

    let id = svc.create_user("4111 111111").await.unwrap();
    svc.delete_user(id).await.unwrap();

    assert!(matches!(
        svc.get_user(id).await.unwrap_err(),
        DomainError::UserNotFound { .. }
    ));

    // Deleting the same id again reports not-found rather than silently
    // succeeding.
    assert!(matches!(
        svc.delete_user(id).await.unwrap_err(),
        DomainError::UserNotFound { .. }
    ));
}
