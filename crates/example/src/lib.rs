//! Example counter component built with graft.
//!
//! The counter shows how shorthand hooks map onto the host lifecycle:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Host runtime                                                │
//! │                                                              │
//! │  connected_callback ──▶ init gate ──▶ oninit (read "start")  │
//! │          │                                                   │
//! │          ├──▶ "connected" event ──▶ onconnected              │
//! │          └──▶ render() ──▶ html() ──▶ template cache         │
//! │                                                              │
//! │  attribute_changed_callback ──▶ onattributechanged           │
//! │  "increment" event ──▶ onincrement ──▶ render()              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicI64, Ordering};

use graft_component::{ComponentClass, ComponentError, Descriptor, Instance};
use graft_element::Event;
use graft_template::{TemplateConfig, Value, template};

/// Custom event that increments the counter.
pub const INCREMENT: &str = "increment";

/// Attribute holding the initial count.
pub const START_ATTRIBUTE: &str = "start";

/// Counter state.
#[derive(Debug, Default)]
pub struct Counter {
    count: AtomicI64,
}

impl Counter {
    /// Current count.
    #[must_use]
    pub fn count(&self) -> i64 {
        self.count.load(Ordering::SeqCst)
    }

    fn set_from(&self, value: Option<&str>) -> Result<(), ComponentError> {
        let count = match value {
            Some(text) => text.trim().parse::<i64>().map_err(ComponentError::hook)?,
            None => 0,
        };
        self.count.store(count, Ordering::SeqCst);
        Ok(())
    }
}

/// Default template configuration: `<Label>` renders as `<x-label>`.
#[must_use]
pub fn default_template_config() -> TemplateConfig {
    TemplateConfig::new().with_include("Label", "x-label")
}

/// Augments the counter component with `config` for its templates.
#[must_use]
pub fn counter_class(config: TemplateConfig) -> std::sync::Arc<ComponentClass<Counter>> {
    Descriptor::<Counter>::new()
        .template_config(config)
        .oninit(|this, _| {
            let start = this.element().get_attribute(START_ATTRIBUTE);
            this.set_from(start.as_deref())?;
            tracing::info!(count = this.count(), "counter initialized");
            Ok(())
        })
        .onattributechanged(|this, event| {
            if event.attribute_name() != Some(START_ATTRIBUTE) {
                return Ok(());
            }
            this.set_from(event.new_value())?;
            this.render()
        })
        .onconnected(|this, _| {
            tracing::info!(is = ?this.is(), "counter connected");
            Ok(())
        })
        .ondisconnected(|_, _| {
            tracing::info!("counter disconnected");
            Ok(())
        })
        .on(INCREMENT, |this, _| {
            this.count.fetch_add(1, Ordering::SeqCst);
            this.render()
        })
        .render(render_counter)
        .augment()
}

fn render_counter(this: &Instance<Counter>) -> Result<(), ComponentError> {
    this.html().call(
        template!("<Label>count: ", "</Label><button>+</button>"),
        vec![Value::Text(this.count().to_string())],
    )
}

/// Dispatches an increment to `counter`, as a click handler would.
///
/// # Errors
///
/// Propagates the hook or render error.
pub fn increment(counter: &Instance<Counter>) -> Result<(), ComponentError> {
    counter.dispatch_event(&Event::new(INCREMENT))
}
