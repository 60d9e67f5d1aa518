use std::sync::Arc;

use crate::db::UserStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub users: Arc<dyn UserStore>,
}
