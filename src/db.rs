use std::num::NonZeroU32;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Connection pool holding at most `max_size` Postgres connections.
pub fn create_pool(database_url: &str, max_size: NonZeroU32) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size.get()).build(manager)
}
