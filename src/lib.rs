//! # Freightboard Backend
//!
//! Back-office service for a freight logistics operation.
//!
//! This crate provides a Rust backend for a logistics dashboard: shipments in
//! transit, customer orders, and warehouse inventory are read from a record
//! store, aggregated into operational metrics and alerts, and exposed as a
//! REST API via Axum for the web frontend.
//!
//! ## Features
//!
//! - **Dashboard Composition**: Headline stat cards with period-over-period deltas
//! - **Alert Aggregation**: Troubled shipments, low stock, and overdue orders
//! - **Shipment Board**: Tabbed active/completed views with filters and sorting
//! - **Order Desk**: Order listings with synthesized fulfilment history
//! - **Inventory Browser**: Stock levels with low-stock and out-of-stock rollups
//! - **Global Search**: Cross-entity lookup over shipments, orders, and stock
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`db`]: Record store traits, repository implementations, and persistence
//! - [`services`]: High-level business logic (metrics, alerts, composition)
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types and route path constants
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
