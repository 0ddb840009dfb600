use chrono::{DateTime, Utc};

/// Identity record keyed by a unique passport number.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub passport_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Work-session record owned by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    /// Whole minutes, written only by the completion transition.
    pub duration: i64,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fully-formed user row to persist.
///
/// The service computes timestamps and looked-up identity fields; the
/// repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub passport_number: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// New work session; duration starts at zero and completed at false.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update: set a field if present, leave it otherwise.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub passport_number: Option<String>,
    pub address: Option<String>,
}

/// Case-insensitive substring filters, AND-combined when more than one is
/// present. `None` (or empty) imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub passport_number: Option<String>,
    pub address: Option<String>,
}

/// Identity fields returned by the people-directory collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonInfo {
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub address: String,
}
