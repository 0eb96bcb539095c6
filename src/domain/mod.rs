//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, repository interfaces, and the search and filter engine,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`search`] - Fuzzy search index, filter predicates and sort strategies
//! - [`comparison`] - Durable comparison selection
//! - [`presentation`] - Display helpers for prices, links and logos
//! - [`pricing`] - Listing plans offered to vendors
//! - [`roi`] - Equipment return-on-investment calculator
//! - [`telemetry`] - View and affiliate click events
//! - [`telemetry_worker`] - Asynchronous event processing worker
//!
//! # Telemetry Flow
//!
//! 1. HTTP handler renders a tool page or follows an outbound link
//! 2. [`telemetry::TelemetryEvent`] is emitted through a [`telemetry::TelemetrySink`]
//! 3. [`telemetry_worker::run_telemetry_worker`] processes events with retry logic
//! 4. Counters and the event log are persisted via [`repositories`]

pub mod comparison;
pub mod entities;
pub mod presentation;
pub mod pricing;
pub mod repositories;
pub mod roi;
pub mod search;
pub mod telemetry;
pub mod telemetry_worker;
