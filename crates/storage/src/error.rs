use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";

impl StorageError {
    fn database_code(&self) -> Option<String> {
        match self {
            StorageError::Database(sqlx::Error::Database(e)) => e.code().map(|c| c.into_owned()),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.database_code().as_deref() == Some(UNIQUE_VIOLATION)
    }

    pub fn is_check_violation(&self) -> bool {
        self.database_code().as_deref() == Some(CHECK_VIOLATION)
    }

    /// Turns constraint failures reported by Postgres into `ConstraintViolation`
    /// so the API can answer 409 instead of 500.
    pub fn classify(self, context: &str) -> Self {
        if self.is_unique_violation() || self.is_check_violation() {
            StorageError::ConstraintViolation(format!("{}: {}", context, self))
        } else {
            self
        }
    }
}
