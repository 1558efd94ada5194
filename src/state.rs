use crate::dataset::Dataset;
use crate::ui::render_index;
use std::sync::Arc;

/// Shared, read-only handler state. The page is rendered once here.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub index_html: Arc<str>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let index_html = render_index(&dataset);
        Self {
            dataset: Arc::new(dataset),
            index_html: Arc::from(index_html),
        }
    }
}
