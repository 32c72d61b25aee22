/// PostgreSQL plumbing for the gradebook
///
/// # Modules
///
/// - `pool`: Connection pool creation and health checks
/// - `migrations`: Embedded schema migrations
///
/// The tables themselves are accessed through [`crate::store::postgres::PgStore`].

pub mod migrations;
pub mod pool;
