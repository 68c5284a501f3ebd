mod temp_store;

pub use temp_store::{spawn_sweeper, TempStore};
