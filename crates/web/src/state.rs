use axum::extract::FromRef;
use importer::ImportPolicy;
use storage::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub import_policy: ImportPolicy,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
