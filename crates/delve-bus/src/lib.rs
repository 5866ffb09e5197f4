//! In-process event distribution for the Delve simulation.
//!
//! The engine publishes every world-state change as a
//! [`delve_types::DungeonEvent`]; any number of independent consumers
//! (stats projector, gateway subscriptions, the engine's own intent
//! handler) attach through this crate.
//!
//! # Modules
//!
//! - [`bus`] -- [`EventBus`], [`Subscription`], and [`TopicSubscription`]
//! - [`error`] -- [`RecvError`] for subscription receive failures

pub mod bus;
pub mod error;

pub use bus::{BUS_CAPACITY, EventBus, Subscription, TopicSubscription};
pub use error::RecvError;
