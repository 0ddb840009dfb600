use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("user {id} not found")]
    UserNotFound { id: i64 },

    #[error("task {id} not found")]
    TaskNotFound { id: i64 },

    #[error("user with passport number '{passport}' already exists")]
    PassportAlreadyRegistered { passport: String },

    #[error("task {id} is already completed")]
    TaskAlreadyCompleted { id: i64 },

    #[error("malformed passport number '{value}'")]
    MalformedPassport { value: String },

    #[error("people directory lookup failed: {message}")]
    Lookup { message: String },

    #[error("database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }

    pub fn task_not_found(id: i64) -> Self {
        Self::TaskNotFound { id }
    }

    pub fn passport_already_registered(passport: impl Into<String>) -> Self {
        Self::PassportAlreadyRegistered {
            passport: passport.into(),
        }
    }

    pub fn task_already_completed(id: i64) -> Self {
        Self::TaskAlreadyCompleted { id }
    }

    pub fn malformed_passport(value: impl Into<String>) -> Self {
        Self::MalformedPassport {
            value: value.into(),
        }
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
