//! # GarmentKit Core
//!
//! Core types and utilities shared by the GarmentKit crates: the error
//! hierarchy, the garment side identifier, print units and the design
//! event bus.

pub mod data;
pub mod error;
pub mod event_bus;
pub mod units;

pub use data::Side;

pub use error::{CollaboratorError, Error, Result, UnitError};

// Re-export event bus for convenience
pub use event_bus::{
    DesignEvent, EventBus, EventBusConfig, EventBusError, EventCategory, EventFilter, LoggedEvent,
    NotificationLevel, SubscriptionId,
};

pub use units::{convert_length, format_measure, parse_measure, PrintUnit, CM_PER_INCH};
