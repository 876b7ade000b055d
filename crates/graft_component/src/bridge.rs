//! Default event bridge.
//!
//! The init gate registers the instance itself ([`Listener::Bridge`]) for each
//! hook type instead of one closure per hook. When such a listener fires, the
//! bridge looks the event type up in the class's routing table and calls the
//! hook registered for it, i.e. the hook known as `on<type>`.
//!
//! [`Listener::Bridge`]: graft_element::Listener::Bridge

use graft_element::{Event, event};

use crate::error::ComponentError;
use crate::instance::Instance;

/// Routes `event` to the hook registered for its type.
pub(crate) fn route<T: Send + Sync + 'static>(
    instance: &Instance<T>,
    event: &Event,
) -> Result<(), ComponentError> {
    let event_type = event.event_type();
    match instance.class().route(event_type) {
        Some(hook) => {
            tracing::trace!(event_type, "routing event to hook");
            hook(instance, event)
        }
        None => Err(ComponentError::MissingHandler {
            method: event::hook_name(event_type),
        }),
    }
}
