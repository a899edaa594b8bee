//! Postgres repository implementation using Diesel.
//!
//! This module implements the record store traits against a Postgres
//! database. All queries are read-only; rows arrive through the operational
//! write side, never through this crate.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
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

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, sql, sum};
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sql_types::{Bool, Integer, Text, Timestamptz};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task;

use crate::api::{OrderId, ShipmentEventId, ShipmentId, StockItemId};
use crate::db::models::{DailyVolumeRow, StatusCountRow, StockStatusCounts};
use crate::db::repository::{
    ErrorContext, InventoryRepository, OrderFilter, OrderRepository, OrderSortField, RecordStore,
    RepositoryError, RepositoryResult, ShipmentFilter, ShipmentRepository, ShipmentSort,
    SortDirection,
};
use crate::models::{Order, Priority, Shipment, ShipmentEvent, ShipmentStatus, StockRecord};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
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

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
    /// - `PG_POOL_MAX`: Maximum pool size (default: 10)
    /// - `PG_POOL_MIN`: Minimum pool size (default: 1)
    /// - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    /// - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
    /// - `PG_MAX_RETRIES`: Maximum retry attempts (default: 3)
    /// - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        let max_retries = std::env::var("PG_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let retry_delay_ms = std::env::var("PG_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(100);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed record store for Postgres.
///
/// This repository implementation provides:
/// - Connection pooling with configurable limits
/// - Automatic retry for transient failures
/// - Health monitoring and statistics
/// - Automatic schema migrations
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    // Metrics counters
    total_queries: std::sync::Arc<AtomicU64>,
    failed_queries: std::sync::Arc<AtomicU64>,
    retried_operations: std::sync::Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    ///
    /// # Arguments
    /// * `config` - Database configuration
    ///
    /// # Returns
    /// * `Ok(PostgresRepository)` on success
    /// * `Err(RepositoryError)` if connection or migration fails
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: std::sync::Arc::new(AtomicU64::new(0)),
            failed_queries: std::sync::Arc::new(AtomicU64::new(0)),
            retried_operations: std::sync::Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal(format!("Migration failed: {}", e))
                .with_operation("run_migrations")
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// This method will retry the operation up to `max_retries` times if a
    /// retryable error occurs (connection errors, timeouts, serialization failures).
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                // Get connection
                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                // Execute the operation
                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal(format!("Task join error: {}", e))
                .with_operation("spawn_blocking")
        })?
    }

    /// Get pool health statistics.
    ///
    /// Returns current pool state and query statistics for monitoring.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

/// Build an ILIKE pattern for a substring match, escaping LIKE wildcards in
/// the search text so `%` and `_` are matched literally.
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn row_to_shipment(row: ShipmentRow) -> RepositoryResult<Shipment> {
    let status = row
        .status
        .parse::<ShipmentStatus>()
        .map_err(RepositoryError::internal)?;
    let priority = row
        .priority
        .parse::<Priority>()
        .map_err(RepositoryError::internal)?;

    Ok(Shipment {
        id: ShipmentId::new(row.id),
        tracking_id: row.tracking_id,
        origin: row.origin,
        destination: row.destination,
        eta: row.eta,
        status,
        priority,
        carrier: row.carrier,
        contents: row.contents,
        driver_contact: row.driver_contact,
        departure_time: row.departure_time,
        last_updated: row.last_updated,
    })
}

fn row_to_event(row: ShipmentEventRow) -> ShipmentEvent {
    ShipmentEvent {
        id: ShipmentEventId::new(row.id),
        shipment_id: ShipmentId::new(row.shipment_id),
        timestamp: row.timestamp,
        description: row.description,
        location: row.location,
        icon: row.icon,
    }
}

fn row_to_order(row: OrderRow) -> RepositoryResult<Order> {
    let status = row
        .status
        .parse()
        .map_err(RepositoryError::internal)?;

    Ok(Order {
        id: OrderId::new(row.id),
        customer_name: row.customer_name,
        order_date: row.order_date,
        total_amount: row.total_amount,
        status,
    })
}

fn row_to_stock_record(row: StockRecordRow) -> StockRecord {
    StockRecord {
        id: StockItemId::new(row.id),
        product_name: row.product_name,
        sku: row.sku,
        reorder_point: row.reorder_point,
        warehouse_name: row.warehouse_name,
        quantity: row.quantity,
    }
}

/// Translate a [`ShipmentFilter`] into a boxed shipments query.
fn shipment_query<'a>(filter: &ShipmentFilter) -> shipments::BoxedQuery<'a, Pg> {
    let mut query = shipments::table.into_boxed();

    if let Some(statuses) = &filter.statuses {
        let values: Vec<&'static str> = statuses.iter().map(|s| s.as_str()).collect();
        query = query.filter(shipments::status.eq_any(values));
    }
    if let Some(excluded) = filter.exclude_status {
        query = query.filter(shipments::status.ne(excluded.as_str()));
    }
    if let Some(priority) = filter.priority {
        query = query.filter(shipments::priority.eq(priority.as_str()));
    }
    if let Some(text) = &filter.text {
        let pattern = like_pattern(text);
        query = query.filter(
            shipments::tracking_id
                .ilike(pattern.clone())
                .or(shipments::origin.ilike(pattern.clone()))
                .or(shipments::destination.ilike(pattern.clone()))
                .or(shipments::carrier.ilike(pattern.clone()))
                .or(shipments::contents.ilike(pattern)),
        );
    }
    if let Some(from) = filter.updated_from {
        query = query.filter(shipments::last_updated.ge(from));
    }
    if let Some(before) = filter.updated_before {
        query = query.filter(shipments::last_updated.lt(before));
    }

    query
}

/// SQL rank for the priority sort: high before medium before low.
fn priority_rank_sql() -> diesel::expression::SqlLiteral<Integer> {
    sql::<Integer>("CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END")
}

fn apply_shipment_order(
    query: shipments::BoxedQuery<'_, Pg>,
    sort: ShipmentSort,
) -> shipments::BoxedQuery<'_, Pg> {
    match sort {
        ShipmentSort::EtaAsc => query.order((
            shipments::eta.asc().nulls_last(),
            shipments::tracking_id.asc(),
        )),
        ShipmentSort::EtaDesc => query.order((
            shipments::eta.desc().nulls_last(),
            shipments::tracking_id.asc(),
        )),
        ShipmentSort::RecentlyUpdated => query.order((
            shipments::last_updated.desc(),
            shipments::tracking_id.asc(),
        )),
        ShipmentSort::PriorityRank => query.order((
            priority_rank_sql().asc(),
            shipments::eta.asc().nulls_last(),
            shipments::tracking_id.asc(),
        )),
    }
}

/// Translate an [`OrderFilter`] into a boxed orders query.
fn order_query<'a>(filter: &OrderFilter) -> orders::BoxedQuery<'a, Pg> {
    let mut query = orders::table.into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(orders::status.eq(status.as_str()));
    }
    if let Some(text) = &filter.text {
        let pattern = like_pattern(text);
        query = query.filter(
            orders::customer_name
                .ilike(pattern.clone())
                .or(sql::<Bool>("CAST(id AS TEXT) LIKE ").bind::<Text, _>(pattern)),
        );
    }
    if let Some(from) = filter.date_from {
        query = query.filter(orders::order_date.ge(from));
    }
    if let Some(before) = filter.date_before {
        query = query.filter(orders::order_date.lt(before));
    }

    query
}

fn apply_order_sort(
    query: orders::BoxedQuery<'_, Pg>,
    sort: OrderSortField,
    direction: SortDirection,
) -> orders::BoxedQuery<'_, Pg> {
    use SortDirection::{Asc, Desc};

    // Ties always break by id in the sort direction so listings stay stable.
    match (sort, direction) {
        (OrderSortField::Id, Asc) => query.order(orders::id.asc()),
        (OrderSortField::Id, Desc) => query.order(orders::id.desc()),
        (OrderSortField::CustomerName, Asc) => {
            query.order((orders::customer_name.asc(), orders::id.asc()))
        }
        (OrderSortField::CustomerName, Desc) => {
            query.order((orders::customer_name.desc(), orders::id.desc()))
        }
        (OrderSortField::OrderDate, Asc) => {
            query.order((orders::order_date.asc(), orders::id.asc()))
        }
        (OrderSortField::OrderDate, Desc) => {
            query.order((orders::order_date.desc(), orders::id.desc()))
        }
        (OrderSortField::TotalAmount, Asc) => {
            query.order((orders::total_amount.asc(), orders::id.asc()))
        }
        (OrderSortField::TotalAmount, Desc) => {
            query.order((orders::total_amount.desc(), orders::id.desc()))
        }
        (OrderSortField::Status, Asc) => query.order((orders::status.asc(), orders::id.asc())),
        (OrderSortField::Status, Desc) => query.order((orders::status.desc(), orders::id.desc())),
    }
}

#[async_trait]
impl ShipmentRepository for PostgresRepository {
    async fn count_shipments(&self, filter: &ShipmentFilter) -> RepositoryResult<i64> {
        let filter = filter.clone();
        self.with_conn(move |conn| {
            shipment_query(&filter)
                .count()
                .get_result::<i64>(conn)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_shipments(
        &self,
        filter: &ShipmentFilter,
        sort: ShipmentSort,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<Shipment>> {
        let filter = filter.clone();
        self.with_conn(move |conn| {
            let mut query = apply_shipment_order(shipment_query(&filter), sort);
            if let Some(limit) = limit {
                query = query.limit(limit as i64);
            }
            let rows = query.load::<ShipmentRow>(conn).map_err(map_diesel_error)?;
            rows.into_iter().map(row_to_shipment).collect()
        })
        .await
    }

    async fn get_shipment(&self, id: ShipmentId) -> RepositoryResult<Shipment> {
        self.with_conn(move |conn| {
            let row = shipments::table
                .filter(shipments::id.eq(id.value()))
                .select(ShipmentRow::as_select())
                .first::<ShipmentRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;

            row.map(row_to_shipment).transpose()?.ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Shipment not found",
                    ErrorContext::new("get_shipment")
                        .with_entity("shipment")
                        .with_entity_id(id),
                )
            })
        })
        .await
    }

    async fn events_for_shipment(
        &self,
        id: ShipmentId,
    ) -> RepositoryResult<Vec<ShipmentEvent>> {
        self.with_conn(move |conn| {
            let rows = shipment_events::table
                .filter(shipment_events::shipment_id.eq(id.value()))
                .select(ShipmentEventRow::as_select())
                .order((
                    shipment_events::timestamp.desc(),
                    shipment_events::id.asc(),
                ))
                .load::<ShipmentEventRow>(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(row_to_event).collect())
        })
        .await
    }

    async fn shipment_volume_by_day(
        &self,
        from: DateTime<Utc>,
    ) -> RepositoryResult<Vec<DailyVolumeRow>> {
        self.with_conn(move |conn| {
            // Bucket on the UTC calendar day regardless of the session timezone.
            let rows: Vec<DailyVolumeSqlRow> = sql_query(
                "SELECT (last_updated AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS count \
                 FROM shipments WHERE last_updated >= $1 \
                 GROUP BY day ORDER BY day",
            )
            .bind::<Timestamptz, _>(from)
            .load(conn)
            .map_err(map_diesel_error)?;

            Ok(rows
                .into_iter()
                .map(|r| DailyVolumeRow::new(r.day, r.count))
                .collect())
        })
        .await
    }

    async fn status_breakdown(&self) -> RepositoryResult<Vec<StatusCountRow>> {
        self.with_conn(|conn| {
            let rows: Vec<(String, i64)> = shipments::table
                .group_by(shipments::status)
                .select((shipments::status, count_star()))
                .load(conn)
                .map_err(map_diesel_error)?;

            let mut out = Vec::with_capacity(rows.len());
            for (status, count) in rows {
                let status = status
                    .parse::<ShipmentStatus>()
                    .map_err(RepositoryError::internal)?;
                out.push(StatusCountRow { status, count });
            }
            out.sort_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.status.as_str().cmp(b.status.as_str()))
            });
            Ok(out)
        })
        .await
    }

    async fn search_shipments(
        &self,
        query: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<Shipment>> {
        let pattern = like_pattern(query);
        self.with_conn(move |conn| {
            let rows = shipments::table
                .filter(
                    shipments::tracking_id
                        .ilike(pattern.clone())
                        .or(shipments::origin.ilike(pattern.clone()))
                        .or(shipments::destination.ilike(pattern.clone()))
                        .or(shipments::carrier.ilike(pattern.clone()))
                        .or(shipments::contents.ilike(pattern.clone())),
                )
                .select(ShipmentRow::as_select())
                .order((shipments::last_updated.desc(), shipments::tracking_id.asc()))
                .limit(limit as i64)
                .load::<ShipmentRow>(conn)
                .map_err(map_diesel_error)?;

            rows.into_iter().map(row_to_shipment).collect()
        })
        .await
    }
}

#[async_trait]
impl OrderRepository for PostgresRepository {
    async fn count_orders(&self, filter: &OrderFilter) -> RepositoryResult<i64> {
        let filter = filter.clone();
        self.with_conn(move |conn| {
            order_query(&filter)
                .count()
                .get_result::<i64>(conn)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_orders(
        &self,
        filter: &OrderFilter,
        sort: OrderSortField,
        direction: SortDirection,
        limit: Option<usize>,
    ) -> RepositoryResult<Vec<Order>> {
        let filter = filter.clone();
        self.with_conn(move |conn| {
            let mut query = apply_order_sort(order_query(&filter), sort, direction);
            if let Some(limit) = limit {
                query = query.limit(limit as i64);
            }
            let rows = query.load::<OrderRow>(conn).map_err(map_diesel_error)?;
            rows.into_iter().map(row_to_order).collect()
        })
        .await
    }

    async fn search_orders(&self, query: &str, limit: usize) -> RepositoryResult<Vec<Order>> {
        let pattern = like_pattern(query);
        let exact_id: Option<i64> = if !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit())
        {
            query.parse().ok()
        } else {
            None
        };

        self.with_conn(move |conn| {
            let mut q = orders::table.into_boxed();
            let text_match = orders::customer_name
                .ilike(pattern.clone())
                .or(orders::status.ilike(pattern.clone()));
            q = match exact_id {
                Some(id) => q.filter(text_match.or(orders::id.eq(id))),
                None => q.filter(text_match),
            };

            let rows = q
                .order((orders::order_date.desc(), orders::id.desc()))
                .limit(limit as i64)
                .load::<OrderRow>(conn)
                .map_err(map_diesel_error)?;

            rows.into_iter().map(row_to_order).collect()
        })
        .await
    }
}

#[async_trait]
impl InventoryRepository for PostgresRepository {
    async fn sum_stock_units(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| {
            let total: Option<i64> = stock_items::table
                .select(sum(stock_items::quantity))
                .first(conn)
                .map_err(map_diesel_error)?;
            Ok(total.unwrap_or(0))
        })
        .await
    }

    async fn stock_status_counts(&self) -> RepositoryResult<StockStatusCounts> {
        self.with_conn(|conn| {
            let row: StockStatusCountsSqlRow = sql_query(
                "SELECT \
                     COUNT(*) FILTER (WHERE s.quantity > p.reorder_point) AS in_stock, \
                     COUNT(*) FILTER (WHERE s.quantity > 0 AND s.quantity <= p.reorder_point) AS low_stock, \
                     COUNT(*) FILTER (WHERE s.quantity <= 0) AS out_of_stock \
                 FROM stock_items s \
                 INNER JOIN products p ON p.id = s.product_id",
            )
            .get_result(conn)
            .map_err(map_diesel_error)?;

            Ok(StockStatusCounts {
                in_stock: row.in_stock,
                low_stock: row.low_stock,
                out_of_stock: row.out_of_stock,
            })
        })
        .await
    }

    async fn low_stock_records(&self, limit: usize) -> RepositoryResult<Vec<StockRecord>> {
        self.with_conn(move |conn| {
            let rows: Vec<StockRecordRow> = stock_items::table
                .inner_join(products::table)
                .inner_join(warehouses::table)
                .filter(stock_items::quantity.gt(0))
                .filter(stock_items::quantity.le(products::reorder_point))
                .select((
                    stock_items::id,
                    products::name,
                    products::sku,
                    products::reorder_point,
                    warehouses::name,
                    stock_items::quantity,
                ))
                .order((stock_items::quantity.asc(), products::name.asc()))
                .limit(limit as i64)
                .load(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(row_to_stock_record).collect())
        })
        .await
    }

    async fn count_stock_items(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| {
            stock_items::table
                .select(count_star())
                .first::<i64>(conn)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn count_below_reorder(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| {
            stock_items::table
                .inner_join(products::table)
                .filter(stock_items::quantity.le(products::reorder_point))
                .select(count_star())
                .first::<i64>(conn)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_stock_records(
        &self,
        text: Option<&str>,
    ) -> RepositoryResult<Vec<StockRecord>> {
        let text = text.map(str::to_string);
        self.with_conn(move |conn| {
            let mut query = stock_items::table
                .inner_join(products::table)
                .inner_join(warehouses::table)
                .select((
                    stock_items::id,
                    products::name,
                    products::sku,
                    products::reorder_point,
                    warehouses::name,
                    stock_items::quantity,
                ))
                .into_boxed();

            if let Some(text) = &text {
                let pattern = like_pattern(text);
                query = query.filter(
                    products::name
                        .ilike(pattern.clone())
                        .or(products::sku.ilike(pattern)),
                );
            }

            let rows: Vec<StockRecordRow> = query
                .order((products::name.asc(), warehouses::name.asc()))
                .load(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(row_to_stock_record).collect())
        })
        .await
    }

    async fn search_stock_records(
        &self,
        query: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<StockRecord>> {
        let pattern = like_pattern(query);
        self.with_conn(move |conn| {
            let rows: Vec<StockRecordRow> = stock_items::table
                .inner_join(products::table)
                .inner_join(warehouses::table)
                .filter(
                    products::name
                        .ilike(pattern.clone())
                        .or(products::sku.ilike(pattern.clone()))
                        .or(warehouses::name.ilike(pattern.clone())),
                )
                .select((
                    stock_items::id,
                    products::name,
                    products::sku,
                    products::reorder_point,
                    warehouses::name,
                    stock_items::quantity,
                ))
                .order((products::name.asc(), warehouses::name.asc()))
                .limit(limit as i64)
                .load(conn)
                .map_err(map_diesel_error)?;

            Ok(rows.into_iter().map(row_to_stock_record).collect())
        })
        .await
    }
}

#[async_trait]
impl RecordStore for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_in_wildcards() {
        assert_eq!(like_pattern("oslo"), "%oslo%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_config_with_url_uses_defaults() {
        let config = PostgresConfig::with_url("postgres://localhost/freight");
        assert_eq!(config.database_url, "postgres://localhost/freight");
        assert_eq!(config.max_pool_size, 10);
        assert_eq!(config.min_pool_size, 1);
        assert_eq!(config.max_retries, 3);
    }
}
