mod mock_user_data_repository;
mod pg_pool;
mod pg_user_data_repository;

pub use mock_user_data_repository::MockUserDataRepository;
pub use pg_pool::create_pg_pool;
pub use pg_user_data_repository::PgUserDataRepository;
