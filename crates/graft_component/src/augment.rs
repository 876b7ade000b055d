//! Augmentation: composing standard callbacks from a descriptor.
//!
//! Augmentation turns a [`Descriptor`] into a [`ComponentClass`] in three
//! steps:
//!
//! 1. Collect the hook-type-name list and the routing table.
//! 2. Build an ordered list of [`Layer`]s. Init-gate layers come first, then
//!    the hook-dispatch layers, each targeting one [`Slot`].
//! 3. Fold the layers over the slots, seeded with the descriptor's own
//!    callbacks.
//!
//! A dispatch layer is only added when the descriptor does not define the
//! standard callback itself, so a component that implements
//! `connected_callback` keeps full control of connect.

use std::sync::Arc;

use graft_element::Event;
use graft_element::event::{ATTRIBUTE_CHANGED, CONNECTED, DISCONNECTED, INIT};
use graft_template::TemplateCache;
use hashbrown::HashMap;

use crate::class::{ComponentClass, Invocation, LayerKind, Slot, SlotFn};
use crate::descriptor::{AttributeChangedFn, Descriptor, HookFn, MethodFn};
use crate::instance::Instance;

// ─────────────────────────────────────────────────────────────────────────────
// Layers
// ─────────────────────────────────────────────────────────────────────────────

/// A decorator applied to one slot: takes the current body, returns the new one.
#[derive(Debug, Clone, Copy)]
enum Layer {
    /// Runs the init gate, then the body.
    InitGate(Slot),
    /// Runs the body, then dispatches the slot's event of the given type.
    DispatchEvent(Slot, &'static str),
    /// Runs the connected body, then `render()`.
    CallRender,
}

impl Layer {
    fn slot(self) -> Slot {
        match self {
            Layer::InitGate(slot) | Layer::DispatchEvent(slot, _) => slot,
            Layer::CallRender => Slot::Connected,
        }
    }

    fn kind(self) -> LayerKind {
        match self {
            Layer::InitGate(_) => LayerKind::InitGate,
            Layer::DispatchEvent(..) => LayerKind::DispatchEvent,
            Layer::CallRender => LayerKind::CallRender,
        }
    }

    fn decorate<T: Send + Sync + 'static>(self, previous: Option<SlotFn<T>>) -> SlotFn<T> {
        match self {
            Layer::InitGate(_) => {
                Arc::new(move |instance: &Instance<T>, invocation: &Invocation<'_>| {
                    instance.run_init_gate()?;
                    match &previous {
                        Some(body) => body(instance, invocation),
                        None => Ok(()),
                    }
                })
            }
            Layer::DispatchEvent(_, event_type) => {
                Arc::new(move |instance: &Instance<T>, invocation: &Invocation<'_>| {
                    if let Some(body) = &previous {
                        body(instance, invocation)?;
                    }
                    let event = match *invocation {
                        Invocation::AttributeChanged {
                            name,
                            old_value,
                            new_value,
                        } => Event::attribute_changed(name, old_value, new_value),
                        _ => Event::new(event_type),
                    };
                    instance.dispatch_event(&event)
                })
            }
            Layer::CallRender => {
                Arc::new(move |instance: &Instance<T>, invocation: &Invocation<'_>| {
                    if let Some(body) = &previous {
                        body(instance, invocation)?;
                    }
                    instance.render()
                })
            }
        }
    }
}

fn own_method<T: Send + Sync + 'static>(method: MethodFn<T>) -> SlotFn<T> {
    Arc::new(move |instance: &Instance<T>, _: &Invocation<'_>| method(instance))
}

fn own_attribute_changed<T: Send + Sync + 'static>(callback: AttributeChangedFn<T>) -> SlotFn<T> {
    Arc::new(
        move |instance: &Instance<T>, invocation: &Invocation<'_>| match *invocation {
            Invocation::AttributeChanged {
                name,
                old_value,
                new_value,
            } => callback(instance, name, old_value, new_value),
            _ => Ok(()),
        },
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// augment
// ─────────────────────────────────────────────────────────────────────────────

/// Augments a component described by `descriptor`.
///
/// The resulting class:
///
/// - runs the init gate first in every standard callback, and in `render()`
///   when an `oninit` hook exists,
/// - dispatches `attributechanged` / `connected` / `disconnected` events to
///   the matching shorthand hooks when the standard callback is not defined
///   by the descriptor,
/// - calls `render()` after connect when a render method exists and the
///   descriptor does not define `connected_callback`,
/// - routes events through the default bridge unless `handle_event` is set,
/// - reads the `is` attribute unless an `is` accessor is set.
///
/// Augmentation never fails.
pub fn augment<T: Send + Sync + 'static>(descriptor: Descriptor<T>) -> Arc<ComponentClass<T>> {
    let capabilities = descriptor.capabilities();
    let Descriptor {
        attribute_changed_callback,
        connected_callback,
        disconnected_callback,
        handle_event,
        is,
        oninit,
        onattributechanged,
        onconnected,
        ondisconnected,
        render,
        hooks,
        engine,
        replace,
        template_config,
    } = descriptor;

    let mut hook_types: Vec<String> = Vec::new();
    let mut routes: HashMap<String, HookFn<T>> = HashMap::new();
    let mut layers: Vec<Layer> = Vec::new();

    if let Some(hook) = oninit {
        hook_types.push(INIT.to_owned());
        routes.insert(INIT.to_owned(), hook);
        layers.push(Layer::InitGate(Slot::Render));
    }

    for slot in [Slot::AttributeChanged, Slot::Connected, Slot::Disconnected] {
        layers.push(Layer::InitGate(slot));
    }

    let pairs = [
        (
            Slot::AttributeChanged,
            capabilities.attribute_changed_callback,
            ATTRIBUTE_CHANGED,
            onattributechanged,
        ),
        (
            Slot::Connected,
            capabilities.connected_callback,
            CONNECTED,
            onconnected,
        ),
        (
            Slot::Disconnected,
            capabilities.disconnected_callback,
            DISCONNECTED,
            ondisconnected,
        ),
    ];
    for (slot, own_callback, event_type, hook) in pairs {
        let Some(hook) = hook else { continue };
        routes.insert(event_type.to_owned(), hook);
        if !own_callback {
            hook_types.push(event_type.to_owned());
            layers.push(Layer::DispatchEvent(slot, event_type));
        }
    }

    if capabilities.render && !capabilities.connected_callback {
        layers.push(Layer::CallRender);
    }

    for (event_type, hook) in hooks {
        if !hook_types.contains(&event_type) {
            hook_types.push(event_type.clone());
        }
        routes.insert(event_type, hook);
    }

    let mut slots: [Option<SlotFn<T>>; 4] = [
        attribute_changed_callback.map(own_attribute_changed),
        connected_callback.map(own_method),
        disconnected_callback.map(own_method),
        render.map(own_method),
    ];
    for layer in &layers {
        let index = layer.slot().index();
        slots[index] = Some(layer.decorate(slots[index].take()));
    }

    let name = core::any::type_name::<T>();
    tracing::debug!(
        component = name,
        hook_types = ?hook_types,
        layers = layers.len(),
        custom_handle_event = capabilities.handle_event,
        "augmented component"
    );

    Arc::new(ComponentClass {
        name,
        capabilities,
        slots,
        layers: layers.iter().map(|layer| (layer.slot(), layer.kind())).collect(),
        routes,
        hook_types: hook_types.into(),
        handle_event,
        is,
        engine,
        replace,
        template_config,
        template_cache: TemplateCache::new(),
    })
}
