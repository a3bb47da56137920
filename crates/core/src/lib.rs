//! `mockgen-core` — shared building blocks for the mock catalog generator.
//!
//! This crate holds the pieces every other crate agrees on: the domain error
//! type, strongly-typed identifiers and the aggregate/event traits used by the
//! draft state container. It performs no IO.

pub mod aggregate;
pub mod error;
pub mod event;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{OfferId, ProductId};
