use crate::samples::dataset::Dataset;

/// Shared state for the HTTP service.
///
/// The dataset is loaded once at startup and injected here; handlers only
/// ever read from it, so concurrent requests need no locking.
pub struct AppState {
    dataset: Dataset,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}
