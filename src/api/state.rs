use std::sync::Arc;

use crate::fetch::GamesProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn GamesProvider>,
}
