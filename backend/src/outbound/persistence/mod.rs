//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides the concrete implementation of the evaluation
//! repository port, backed by a single SQLite file via Diesel with async
//! support through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types, keeping SQLite's own message.
//!
//! # Example
//!
//! ```ignore
//! use evaluations::outbound::persistence::{DbPool, DieselEvaluationRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("evaluations.db")).await?;
//! let repo = DieselEvaluationRepository::new(pool);
//! repo.initialize().await?;
//! ```

mod diesel_basic_error_mapping;
mod diesel_evaluation_repository;
mod models;
mod pool;
mod schema;

pub use diesel_evaluation_repository::DieselEvaluationRepository;
pub use pool::{AsyncSqliteConnection, DbPool, PoolConfig, PoolError};
