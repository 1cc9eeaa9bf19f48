//! Postgres repository implementation using Diesel.
//!
//! Tables (see `migrations/`):
//! - `queues`: the twelve queue names, seeded by the initial migration
//! - `schedules`: reconciled intervals keyed by queue and date
//! - `daily_messages`: one operational message per date
//! - `metadata`: key/value pairs such as `last_updated`
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::upsert::excluded;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tokio::task;

use crate::db::repository::{
    ErrorContext, MetadataRepository, RepositoryError, RepositoryResult, ScheduleRepository,
    LAST_UPDATED_KEY,
};
use crate::models::{clean_message, Interval, IntervalKind, ParsedSchedule, QueueId, TimeOfDay};
use crate::services::clock::now_timestamp;

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables (see module docs).
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Backoff schedule for transient failures.
#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    max_retries: u32,
    initial_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based), doubling each time.
    fn delay(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Run `f` on a pooled connection, retrying pool checkouts and retryable
/// errors. Blocks the calling thread.
fn run_with_retry<T, F>(pool: &PgPool, policy: RetryPolicy, f: F) -> RepositoryResult<T>
where
    F: Fn(&mut PgConnection) -> RepositoryResult<T>,
{
    let mut attempt = 0;
    loop {
        let result = pool
            .get()
            .map_err(|e| {
                RepositoryError::connection(e.to_string()).with_context(
                    ErrorContext::operation("get_connection")
                        .details(format!("attempt={}", attempt + 1)),
                )
            })
            .and_then(|mut conn| f(&mut conn));

        match result {
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                attempt += 1;
                log::debug!("Retrying after transient error (attempt {}): {}", attempt, e);
                std::thread::sleep(policy.delay(attempt));
            }
            other => return other,
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    retry: RetryPolicy,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection(e.to_string()).with_context(
                    ErrorContext::operation("create_pool")
                        .details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection(e.to_string())
                    .with_context(ErrorContext::operation("run_migrations"))
            })?;
            Self::run_migrations(&mut conn)?;
        }
        log::debug!(
            "Postgres pool ready (max_size={}, min_idle={})",
            config.max_pool_size,
            config.min_pool_size
        );

        Ok(Self {
            pool,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                initial_delay: Duration::from_millis(config.retry_delay_ms),
            },
        })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal(format!("Migration failed: {}", e))
                .with_context(ErrorContext::operation("run_migrations"))
        })?;
        log::debug!("Applied {} pending migration(s)", applied.len());

        Ok(())
    }

    /// Run a blocking database operation on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: Fn(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let retry = self.retry;

        task::spawn_blocking(move || run_with_retry(&pool, retry, f))
            .await
            .map_err(|e| {
                RepositoryError::internal(format!("Task join error: {}", e))
                    .with_context(ErrorContext::operation("spawn_blocking"))
            })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

/// Queue name to row id, as seeded by the migration.
fn load_queue_ids(conn: &mut PgConnection) -> RepositoryResult<HashMap<QueueId, i32>> {
    let rows: Vec<QueueRow> = queues::table
        .select(QueueRow::as_select())
        .load(conn)
        .map_err(map_diesel_error)?;
    Ok(rows
        .into_iter()
        .filter_map(|row| Some((row.name.parse().ok()?, row.id)))
        .collect())
}

/// Convert a stored row, skipping rows that no longer parse.
fn row_to_interval(row: IntervalRow) -> Option<(QueueId, Interval)> {
    let queue: Option<QueueId> = row.queue.parse().ok();
    let start: Option<TimeOfDay> = row.start_time.parse().ok();
    let end: Option<TimeOfDay> = row.end_time.parse().ok();
    let kind: Option<IntervalKind> = row.interval_type.parse().ok();

    match (queue, start, end, kind) {
        (Some(queue), Some(start), Some(end), Some(kind)) => {
            Some((queue, Interval::new(start, end, kind)))
        }
        _ => {
            log::warn!("Skipping malformed stored interval: {:?}", row);
            None
        }
    }
}

fn upsert_metadata(conn: &mut PgConnection, key: &str, value: &str) -> RepositoryResult<()> {
    diesel::insert_into(metadata::table)
        .values(&MetadataRow {
            key: key.to_string(),
            value: Some(value.to_string()),
        })
        .on_conflict(metadata::key)
        .do_update()
        .set(metadata::value.eq(excluded(metadata::value)))
        .execute(conn)
        .map(|_| ())
        .map_err(map_diesel_error)
}

#[async_trait]
impl ScheduleRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn save_schedule(&self, schedule: &ParsedSchedule) -> RepositoryResult<usize> {
        let schedule = schedule.clone();
        let stamp = now_timestamp();

        self.with_conn(move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let queue_ids = load_queue_ids(tx)?;
                let rows = schedule
                    .queues
                    .iter()
                    .flat_map(|(queue, intervals)| intervals.iter().map(move |i| (*queue, i)))
                    .map(|(queue, interval)| {
                        let queue_id = queue_ids.get(&queue).copied().ok_or_else(|| {
                            RepositoryError::validation("Queue missing from queues table")
                                .with_context(
                                    ErrorContext::operation("save_schedule")
                                        .for_date(schedule.date)
                                        .for_queue(queue),
                                )
                        })?;
                        Ok::<_, RepositoryError>(NewIntervalRow {
                            queue_id,
                            day_date: schedule.date,
                            start_time: interval.start.to_string(),
                            end_time: interval.end.to_string(),
                            interval_type: interval.kind.as_str().to_string(),
                        })
                    })
                    .collect::<RepositoryResult<Vec<_>>>()?;

                diesel::delete(schedules::table.filter(schedules::day_date.eq(schedule.date)))
                    .execute(tx)
                    .map_err(map_diesel_error)?;
                diesel::delete(
                    daily_messages::table.filter(daily_messages::day_date.eq(schedule.date)),
                )
                .execute(tx)
                .map_err(map_diesel_error)?;

                let inserted = if rows.is_empty() {
                    0
                } else {
                    diesel::insert_into(schedules::table)
                        .values(&rows)
                        .execute(tx)
                        .map_err(map_diesel_error)?
                };

                if let Some(message) = schedule.message.as_deref().and_then(clean_message) {
                    diesel::insert_into(daily_messages::table)
                        .values(&NewDailyMessageRow {
                            day_date: schedule.date,
                            message,
                        })
                        .execute(tx)
                        .map_err(map_diesel_error)?;
                }

                upsert_metadata(tx, LAST_UPDATED_KEY, &stamp)?;
                Ok(inserted)
            })
        })
        .await
    }

    async fn get_schedule(
        &self,
        queue: QueueId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Interval>> {
        let queue_name = queue.to_string();
        self.with_conn(move |conn| {
            let rows: Vec<IntervalRow> = schedules::table
                .inner_join(queues::table)
                .filter(queues::name.eq(&queue_name))
                .filter(schedules::day_date.eq(date))
                .select((
                    queues::name,
                    schedules::start_time,
                    schedules::end_time,
                    schedules::interval_type,
                ))
                .order(schedules::start_time.asc())
                .load(conn)
                .map_err(map_diesel_error)?;

            Ok(rows
                .into_iter()
                .filter_map(row_to_interval)
                .map(|(_, interval)| interval)
                .collect())
        })
        .await
    }

    async fn get_all_schedules(
        &self,
        date: NaiveDate,
    ) -> RepositoryResult<BTreeMap<QueueId, Vec<Interval>>> {
        self.with_conn(move |conn| {
            let rows: Vec<IntervalRow> = schedules::table
                .inner_join(queues::table)
                .filter(schedules::day_date.eq(date))
                .select((
                    queues::name,
                    schedules::start_time,
                    schedules::end_time,
                    schedules::interval_type,
                ))
                .order((queues::name.asc(), schedules::start_time.asc()))
                .load(conn)
                .map_err(map_diesel_error)?;

            let mut result: BTreeMap<QueueId, Vec<Interval>> = BTreeMap::new();
            for (queue, interval) in rows.into_iter().filter_map(row_to_interval) {
                result.entry(queue).or_default().push(interval);
            }
            Ok(result)
        })
        .await
    }

    async fn get_message(&self, date: NaiveDate) -> RepositoryResult<Option<String>> {
        self.with_conn(move |conn| {
            daily_messages::table
                .filter(daily_messages::day_date.eq(date))
                .select(daily_messages::message)
                .first::<String>(conn)
                .optional()
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_dates(&self) -> RepositoryResult<Vec<NaiveDate>> {
        self.with_conn(|conn| {
            schedules::table
                .select(schedules::day_date)
                .distinct()
                .order(schedules::day_date.desc())
                .load::<NaiveDate>(conn)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[async_trait]
impl MetadataRepository for PostgresRepository {
    async fn get_metadata(&self, key: &str) -> RepositoryResult<Option<String>> {
        let key = key.to_string();
        self.with_conn(move |conn| {
            metadata::table
                .filter(metadata::key.eq(&key))
                .select(metadata::value)
                .first::<Option<String>>(conn)
                .optional()
                .map(Option::flatten)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn set_metadata(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let (key, value) = (key.to_string(), value.to_string());
        self.with_conn(move |conn| upsert_metadata(conn, &key, &value))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(queue: &str, start: &str, end: &str, kind: &str) -> IntervalRow {
        IntervalRow {
            queue: queue.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            interval_type: kind.to_string(),
        }
    }

    #[test]
    fn test_row_to_interval() {
        let (queue, interval) = row_to_interval(row("3.1", "04:00", "09:00", "base")).unwrap();
        assert_eq!(queue.to_string(), "3.1");
        assert_eq!(interval.kind, IntervalKind::Base);
        assert_eq!(interval.duration_minutes(), 300);

        let (_, interval) = row_to_interval(row("1.1", "20:00", "24:00", "base")).unwrap();
        assert_eq!(interval.end.to_string(), "24:00");
        assert_eq!(interval.duration_minutes(), 240);
    }

    #[test]
    fn test_row_to_interval_skips_malformed() {
        assert!(row_to_interval(row("7.1", "04:00", "09:00", "base")).is_none());
        assert!(row_to_interval(row("3.1", "4h", "09:00", "base")).is_none());
        assert!(row_to_interval(row("3.1", "04:00", "09:00", "planned")).is_none());
    }

    #[test]
    fn test_retry_delay_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.delay(1), Duration::from_millis(100));
        assert_eq!(policy.delay(3), Duration::from_millis(400));
    }

    #[test]
    fn test_config_defaults() {
        let config = PostgresConfig::with_url("postgres://localhost/outages");
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 100);
    }
}
