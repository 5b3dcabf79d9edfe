//! # Event Bus Module
//!
//! Publish/subscribe channel between the designer state and whatever front
//! end is driving it.
//!
//! - Publishers emit typed [`DesignEvent`]s without knowing subscribers
//! - Subscribers filter by [`EventCategory`] and receive events of interest
//! - Both sync handlers and async `broadcast` receivers are supported
//!
//! ## Usage
//!
//! ```rust,ignore
//! use garmentkit_core::event_bus::{DesignEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::History]),
//!     |event| println!("{}", event.description()),
//! );
//!
//! bus.publish(DesignEvent::SaveStarted).ok();
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
