use crate::services::search::SearchService;

pub struct AppState {
    pub search: SearchService,
}
