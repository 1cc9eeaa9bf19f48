//! # Outage Schedule Backend
//!
//! Parses the Ukrainian-language hourly power outage announcements of a
//! regional distribution utility into per-queue outage intervals, stores
//! them per date and serves them over a REST API.
//!
//! ## Features
//!
//! - **Base extraction**: read the announced table (`підчерга 1.1 – з 10:00 до 15:00`)
//! - **Change classification**: recognize earlier starts, longer outages,
//!   full changes and additional outages in the free-form notice
//! - **Reconciliation**: merge both into ordered, non-overlapping intervals
//! - **Storage**: in-memory or PostgreSQL repositories
//! - **HTTP API**: axum endpoints for client apps
//!
//! ## Architecture
//!
//! - [`models`]: Times of day, queue ids, intervals and date blocks
//! - [`parsing`]: Text recognition for the base table and change notices
//! - [`algorithms`]: Interval algebra used to reconcile a queue's schedule
//! - [`services`]: Ingestion, validation, outage-hours figures
//! - [`db`]: Repository pattern and persistence layer
//! - [`http`]: Axum-based HTTP server and request handlers

// RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod db;
pub mod models;
pub mod parsing;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
