pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;

pub use errors::{AdvisorError, ConfigError};
pub use events::{ChatSignal, EventBus};
pub use id::{new_correlation_id, LocalId, SessionId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
