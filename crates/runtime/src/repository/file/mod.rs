mod save;

pub use save::{FileSaveRepository, SaveFormat};
