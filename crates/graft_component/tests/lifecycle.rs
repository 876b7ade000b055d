//! Integration tests for augmentation, the init gate and the event bridge.
//!
//! Components here record every hook and callback they see into a shared
//! journal, so the tests can assert on exact call order as well as counts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Barrier, Mutex};
use std::time::Duration;

use graft_component::{ComponentError, Descriptor, Instance, LayerKind, Slot};
use graft_element::{AttributeChange, Event, HostElement, Listener};

#[derive(Default)]
struct Journal {
    entries: Mutex<Vec<String>>,
}

impl Journal {
    fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    fn count(&self, entry: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| *e == entry)
            .count()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Verifies that a component defining nothing still gets working callbacks,
/// event routing and an `is` accessor.
#[test]
fn bare_component_gets_all_defaults() {
    let class = Descriptor::<Journal>::new().augment();
    let element = HostElement::with_attributes([("is", "fancy-button")]);
    let instance = Instance::with_element(&class, Journal::default(), element);

    instance
        .attribute_changed_callback("title", None, Some("a"))
        .unwrap();
    instance.connected_callback().unwrap();
    instance.disconnected_callback().unwrap();

    assert!(instance.is_initialized());
    assert_eq!(instance.is().as_deref(), Some("fancy-button"));

    // The default bridge reports the hook it could not find.
    let error = instance.handle_event(&Event::new("click")).unwrap_err();
    assert!(matches!(
        error,
        ComponentError::MissingHandler { ref method } if method == "onclick"
    ));
}

/// Verifies that `is` reads nothing when the attribute is absent, and that a
/// custom accessor replaces the default.
#[test]
fn is_accessor_defaults_and_overrides() {
    let plain = Descriptor::<Journal>::new().augment();
    assert_eq!(Instance::new(&plain, Journal::default()).is(), None);

    let custom = Descriptor::<Journal>::new()
        .is(|_| Some("x-custom".to_owned()))
        .augment();
    let element = HostElement::with_attributes([("is", "ignored")]);
    let instance = Instance::with_element(&custom, Journal::default(), element);
    assert_eq!(instance.is().as_deref(), Some("x-custom"));
}

/// Verifies that calling `render()` on a component without render or init
/// hooks reports the missing method.
#[test]
fn render_without_method_is_missing() {
    let class = Descriptor::<Journal>::new().augment();
    let instance = Instance::new(&class, Journal::default());

    assert!(matches!(
        instance.render().unwrap_err(),
        ComponentError::MissingMethod { method: "render" }
    ));
}

// ═══════════════════════════════════════════════════════════════════════════════
// INIT GATE
// ═══════════════════════════════════════════════════════════════════════════════

fn journaled() -> Descriptor<Journal> {
    Descriptor::<Journal>::new()
        .oninit(|this, _| {
            this.push("init");
            Ok(())
        })
        .onattributechanged(|this, _| {
            this.push("attributechanged");
            Ok(())
        })
        .onconnected(|this, _| {
            this.push("connected");
            Ok(())
        })
        .ondisconnected(|this, _| {
            this.push("disconnected");
            Ok(())
        })
}

/// Verifies that the first callback fires exactly one init and registers one
/// listener per hook type, whichever callback comes first.
#[test]
fn first_callback_initializes_once() {
    let first_calls: [fn(&Instance<Journal>) -> Result<(), ComponentError>; 3] = [
        |i| i.attribute_changed_callback("a", None, None),
        |i| i.connected_callback(),
        |i| i.disconnected_callback(),
    ];

    for first in first_calls {
        let class = journaled().augment();
        let instance = Instance::new(&class, Journal::default());

        first(&instance).unwrap();
        assert_eq!(instance.count("init"), 1);
        let listeners = instance.element().listeners();
        for event_type in ["init", "attributechanged", "connected", "disconnected"] {
            assert_eq!(listeners.count(event_type), 1, "{event_type}");
        }

        instance.connected_callback().unwrap();
        instance.disconnected_callback().unwrap();
        instance
            .attribute_changed_callback("b", Some("1"), Some("2"))
            .unwrap();

        assert_eq!(instance.count("init"), 1);
        assert_eq!(instance.element().listeners().total(), 4);
    }
}

/// Verifies that the init hook runs before the hook of the callback that
/// triggered it.
#[test]
fn init_precedes_first_dispatch() {
    let class = journaled().augment();
    let instance = Instance::new(&class, Journal::default());

    instance.connected_callback().unwrap();
    instance.disconnected_callback().unwrap();

    assert_eq!(instance.entries(), ["init", "connected", "disconnected"]);
}

/// Verifies that instances of one class initialize independently.
#[test]
fn instances_initialize_independently() {
    let class = journaled().augment();
    let a = Instance::new(&class, Journal::default());
    let b = Instance::new(&class, Journal::default());

    a.connected_callback().unwrap();

    assert!(a.is_initialized());
    assert!(!b.is_initialized());
    assert_eq!(b.element().listeners().total(), 0);
    assert!(core::ptr::eq(a.hook_types(), b.hook_types()));
}

/// Verifies that an init hook calling back into the lifecycle does not
/// initialize twice.
#[test]
fn reentrant_init_runs_once() {
    let class = Descriptor::<Journal>::new()
        .oninit(|this, _| {
            this.push("init");
            this.disconnected_callback()
        })
        .ondisconnected(|this, _| {
            this.push("disconnected");
            Ok(())
        })
        .augment();
    let instance = Instance::new(&class, Journal::default());

    instance.connected_callback().unwrap();

    assert_eq!(instance.entries(), ["init", "disconnected"]);
}

/// Verifies that a failing init hook surfaces the error and leaves the
/// instance initialized.
#[test]
fn failing_init_propagates() {
    let class = Descriptor::<Journal>::new()
        .oninit(|_, _| Err(ComponentError::hook("boom")))
        .augment();
    let instance = Instance::new(&class, Journal::default());

    let error = instance.connected_callback().unwrap_err();

    assert!(matches!(error, ComponentError::Hook(_)));
    assert_eq!(error.to_string(), "hook failed: boom");
    assert!(instance.is_initialized());
    instance.connected_callback().unwrap();
}

/// Verifies that callbacks racing the first one on other threads wait for
/// initialization, so none of their events is dispatched before the listeners
/// are registered.
#[test]
fn concurrent_first_callbacks_wait_for_init() {
    let class = Descriptor::<Journal>::new()
        .oninit(|this, _| {
            std::thread::sleep(Duration::from_millis(50));
            this.push("init");
            Ok(())
        })
        .onconnected(|this, _| {
            this.push("connected");
            Ok(())
        })
        .augment();
    let instance = Instance::new(&class, Journal::default());
    let start = Barrier::new(4);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                start.wait();
                instance.connected_callback().unwrap();
            });
        }
    });

    let entries = instance.entries();
    assert_eq!(entries.first().map(String::as_str), Some("init"));
    assert_eq!(instance.count("init"), 1);
    assert_eq!(instance.count("connected"), 4);
}

// ═══════════════════════════════════════════════════════════════════════════════
// OWN CALLBACKS
// ═══════════════════════════════════════════════════════════════════════════════

/// Verifies that a component's own attribute callback keeps its behavior and
/// runs after init.
#[test]
fn own_attribute_callback_preserved() {
    let class = Descriptor::<Journal>::new()
        .oninit(|this, _| {
            this.push("init");
            Ok(())
        })
        .attribute_changed_callback(|this, name, old, new| {
            this.push(format!("{name}:{old:?}->{new:?}"));
            Ok(())
        })
        .onattributechanged(|this, _| {
            this.push("hook");
            Ok(())
        })
        .augment();
    let instance = Instance::new(&class, Journal::default());

    instance
        .attribute_changed_callback("size", None, Some("3"))
        .unwrap();
    instance
        .attribute_changed_callback("size", Some("3"), None)
        .unwrap();

    assert_eq!(
        instance.entries(),
        [
            "init",
            "size:None->Some(\"3\")",
            "size:Some(\"3\")->None"
        ]
    );
    assert_eq!(class.layers(Slot::AttributeChanged), [LayerKind::InitGate]);
    assert!(!class.hook_types().contains(&"attributechanged".to_owned()));
}

/// Verifies that an own connect callback suppresses both the connect hook and
/// the automatic render.
#[test]
fn own_connect_callback_suppresses_render() {
    let class = Descriptor::<Journal>::new()
        .connected_callback(|this| {
            this.push("own");
            Ok(())
        })
        .onconnected(|this, _| {
            this.push("hook");
            Ok(())
        })
        .render(|this| {
            this.push("render");
            Ok(())
        })
        .augment();
    let instance = Instance::new(&class, Journal::default());

    instance.connected_callback().unwrap();

    assert_eq!(instance.entries(), ["own"]);
}

// ═══════════════════════════════════════════════════════════════════════════════
// HOOK DISPATCH
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Widget {
    x: AtomicUsize,
    y: AtomicUsize,
    y_sets: AtomicUsize,
    counter: AtomicUsize,
}

/// Verifies the init / connect / render sequence across two connects.
#[test]
fn init_connect_render_sequence() {
    let class = Descriptor::<Widget>::new()
        .oninit(|this, _| {
            this.x.store(1, Ordering::SeqCst);
            Ok(())
        })
        .onconnected(|this, _| {
            this.y.store(2, Ordering::SeqCst);
            this.y_sets.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .render(|this| {
            this.counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .augment();
    let widget = Instance::new(&class, Widget::default());

    widget.connected_callback().unwrap();
    assert_eq!(widget.x.load(Ordering::SeqCst), 1);
    assert_eq!(widget.y.load(Ordering::SeqCst), 2);
    assert_eq!(widget.counter.load(Ordering::SeqCst), 1);

    widget.x.store(7, Ordering::SeqCst);
    widget.connected_callback().unwrap();
    assert_eq!(widget.x.load(Ordering::SeqCst), 7);
    assert_eq!(widget.y_sets.load(Ordering::SeqCst), 2);
    assert_eq!(widget.counter.load(Ordering::SeqCst), 2);
}

/// Verifies that the attribute hook sees exactly the callback's arguments.
#[test]
fn attribute_hook_receives_exact_arguments() {
    #[derive(Default)]
    struct Seen {
        changes: Mutex<Vec<AttributeChange>>,
    }

    let class = Descriptor::<Seen>::new()
        .onattributechanged(|this, event| {
            assert_eq!(event.event_type(), "attributechanged");
            let change = event.attribute().cloned().ok_or_else(|| {
                ComponentError::hook("attributechanged event without payload")
            })?;
            this.changes.lock().unwrap().push(change);
            Ok(())
        })
        .augment();
    let instance = Instance::new(&class, Seen::default());

    let calls = [
        ("value", None, Some("1")),
        ("value", Some("1"), Some("2")),
        ("hidden", Some(""), None),
    ];
    for (name, old, new) in calls {
        instance.attribute_changed_callback(name, old, new).unwrap();
    }

    let changes = instance.changes.lock().unwrap();
    assert_eq!(changes.len(), calls.len());
    for (change, (name, old, new)) in changes.iter().zip(calls) {
        assert_eq!(change.attribute_name, name);
        assert_eq!(change.old_value.as_deref(), old);
        assert_eq!(change.new_value.as_deref(), new);
    }
}

/// Verifies that a hook named `attributechanged` runs once per callback even
/// though it is both wired to the callback and registered as a listener.
#[test]
fn attribute_hook_runs_once_per_callback() {
    let class = journaled().augment();
    let instance = Instance::new(&class, Journal::default());

    instance
        .attribute_changed_callback("a", None, Some("1"))
        .unwrap();
    // Registering the bridge again is a no-op.
    assert!(!instance.add_event_listener("attributechanged"));
    instance
        .attribute_changed_callback("a", Some("1"), Some("2"))
        .unwrap();

    assert_eq!(instance.count("attributechanged"), 2);
    assert_eq!(
        instance.element().listeners().count("attributechanged"),
        1
    );
}

/// Verifies that generic hooks are registered at init and reached by events
/// dispatched on the instance.
#[test]
fn generic_hooks_receive_dispatched_events() {
    let class = Descriptor::<Journal>::new()
        .on("refresh", |this, event| {
            this.push(event.event_type());
            Ok(())
        })
        .augment();
    let instance = Instance::new(&class, Journal::default());

    // Not yet initialized: no listener, nothing happens.
    instance.dispatch_event(&Event::new("refresh")).unwrap();
    assert!(instance.entries().is_empty());

    instance.connected_callback().unwrap();
    instance.dispatch_event(&Event::new("refresh")).unwrap();
    instance.dispatch_event(&Event::new("refresh")).unwrap();

    assert_eq!(instance.entries(), ["refresh", "refresh"]);
}

/// Verifies that a custom `handle_event` receives bridge-routed events in
/// place of the default routing.
#[test]
fn custom_handle_event_replaces_bridge() {
    let class = Descriptor::<Journal>::new()
        .handle_event(|this, event| {
            this.push(format!("handled:{}", event.event_type()));
            Ok(())
        })
        .onconnected(|this, _| {
            this.push("hook");
            Ok(())
        })
        .augment();
    let instance = Instance::new(&class, Journal::default());

    instance.connected_callback().unwrap();

    assert_eq!(instance.entries(), ["handled:connected"]);
}

/// Verifies that callback listeners registered by user code run alongside
/// the bridge.
#[test]
fn external_listeners_run_alongside_hooks() {
    let class = journaled().augment();
    let instance = Instance::new(&class, Journal::default());
    let seen = std::sync::Arc::new(AtomicUsize::new(0));
    let counter = std::sync::Arc::clone(&seen);
    instance.element().add_event_listener(
        "connected",
        Listener::callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    instance.connected_callback().unwrap();

    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(instance.count("connected"), 1);
}

/// Verifies that a hook error stops the callback and reaches the caller.
#[test]
fn hook_error_propagates() {
    let class = Descriptor::<Journal>::new()
        .onconnected(|_, _| Err(ComponentError::hook("not now")))
        .render(|this| {
            this.push("render");
            Ok(())
        })
        .augment();
    let instance = Instance::new(&class, Journal::default());

    assert!(instance.connected_callback().is_err());
    assert!(instance.entries().is_empty());
}

/// Verifies that an `oninit` hook makes `render()` initialize on its own.
#[test]
fn render_runs_init_gate_with_oninit() {
    let class = Descriptor::<Journal>::new()
        .oninit(|this, _| {
            this.push("init");
            Ok(())
        })
        .render(|this| {
            this.push("render");
            Ok(())
        })
        .augment();
    let instance = Instance::new(&class, Journal::default());

    instance.render().unwrap();
    instance.render().unwrap();

    assert_eq!(instance.entries(), ["init", "render", "render"]);
}
