use tokio::sync::Semaphore;

use studynotes_notes::NoteService;

pub struct AppState {
    pub notes: NoteService,
    /// Bounds how many generations hit the model service at once.
    pub generation_slots: Semaphore,
}

impl AppState {
    pub fn new(notes: NoteService, max_concurrent: usize) -> Self {
        Self {
            notes,
            generation_slots: Semaphore::new(max_concurrent.max(1)),
        }
    }
}
