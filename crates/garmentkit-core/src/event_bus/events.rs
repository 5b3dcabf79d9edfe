//! Event type definitions for the event bus.
//!
//! Events are organized by category and are cloneable and serializable so
//! they can be logged or replayed.

use serde::{Deserialize, Serialize};

use crate::data::Side;

/// Root event enum for all design events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DesignEvent {
    /// A side's element list changed
    ElementsChanged {
        /// The side whose elements changed.
        side: Side,
    },
    /// The selection changed
    SelectionChanged {
        /// The side the selection belongs to.
        side: Side,
        /// Number of selected elements.
        count: usize,
    },
    /// A side's history stack moved
    HistoryChanged {
        /// The side whose history changed.
        side: Side,
        /// Whether an undo step is available.
        can_undo: bool,
        /// Whether a redo step is available.
        can_redo: bool,
    },
    /// The active side switched
    SideChanged {
        /// The newly active side.
        side: Side,
    },
    /// A new garment template was chosen and the document reset
    TemplateChanged {
        /// Identifier of the template.
        template_id: String,
    },
    /// A pointer gesture started
    GestureStarted {
        /// Gesture kind (`drag`, `resize` or `rotate`).
        kind: String,
    },
    /// A pointer gesture ended and its state was committed
    GestureEnded {
        /// Gesture kind (`drag`, `resize` or `rotate`).
        kind: String,
    },
    /// A saved document replaced the in-memory one
    DocumentLoaded {
        /// Design name of the loaded document.
        name: String,
    },
    /// A save request was handed to the persistence collaborator
    SaveStarted,
    /// The persistence collaborator accepted the save
    SaveCompleted,
    /// The save failed; the document is kept unchanged
    SaveFailed {
        /// Reason reported by the collaborator.
        reason: String,
    },
    /// User-visible notification
    Notification {
        /// Severity of the notification.
        level: NotificationLevel,
        /// Message to show.
        message: String,
    },
}

impl DesignEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            DesignEvent::ElementsChanged { .. }
            | DesignEvent::SideChanged { .. }
            | DesignEvent::TemplateChanged { .. }
            | DesignEvent::DocumentLoaded { .. } => EventCategory::Document,
            DesignEvent::SelectionChanged { .. } => EventCategory::Selection,
            DesignEvent::HistoryChanged { .. } => EventCategory::History,
            DesignEvent::GestureStarted { .. } | DesignEvent::GestureEnded { .. } => {
                EventCategory::Gesture
            }
            DesignEvent::SaveStarted
            | DesignEvent::SaveCompleted
            | DesignEvent::SaveFailed { .. } => EventCategory::Persistence,
            DesignEvent::Notification { .. } => EventCategory::Notification,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            DesignEvent::ElementsChanged { side } => format!("Elements changed on {}", side),
            DesignEvent::SelectionChanged { side, count } => {
                format!("{} element(s) selected on {}", count, side)
            }
            DesignEvent::HistoryChanged {
                side,
                can_undo,
                can_redo,
            } => format!(
                "History on {}: undo={} redo={}",
                side, can_undo, can_redo
            ),
            DesignEvent::SideChanged { side } => format!("Switched to {}", side),
            DesignEvent::TemplateChanged { template_id } => {
                format!("Template changed to {}", template_id)
            }
            DesignEvent::GestureStarted { kind } => format!("{} started", kind),
            DesignEvent::GestureEnded { kind } => format!("{} ended", kind),
            DesignEvent::DocumentLoaded { name } => format!("Loaded '{}'", name),
            DesignEvent::SaveStarted => "Save started".to_string(),
            DesignEvent::SaveCompleted => "Save completed".to_string(),
            DesignEvent::SaveFailed { reason } => format!("Save failed: {}", reason),
            DesignEvent::Notification { level, message } => format!("[{}] {}", level, message),
        }
    }

    /// Shorthand for an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        DesignEvent::Notification {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Shorthand for an informational notification.
    pub fn info(message: impl Into<String>) -> Self {
        DesignEvent::Notification {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Element list, side and template events.
    Document,
    /// Selection events.
    Selection,
    /// Undo/redo history events.
    History,
    /// Pointer gesture events.
    Gesture,
    /// Save/load events.
    Persistence,
    /// User-visible notifications.
    Notification,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Document => write!(f, "Document"),
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::History => write!(f, "History"),
            EventCategory::Gesture => write!(f, "Gesture"),
            EventCategory::Persistence => write!(f, "Persistence"),
            EventCategory::Notification => write!(f, "Notification"),
        }
    }
}

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Informational message.
    Info,
    /// Something was skipped or degraded.
    Warning,
    /// An operation failed.
    Error,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Info => write!(f, "info"),
            NotificationLevel::Warning => write!(f, "warning"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}
