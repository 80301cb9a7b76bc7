mod save;

pub use save::InMemorySaveRepository;
