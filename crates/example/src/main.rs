//! Example counter CLI.
//!
//! Plays the host runtime for one counter component: creates it, connects it,
//! clicks it a few times, changes its `start` attribute and disconnects it,
//! printing the committed markup after each step.
//!
//! # Usage
//!
//! ```bash
//! counter [config.json]
//! ```
//!
//! The optional config file may set the `tracing` section and a template
//! configuration named `counter`.

use std::process::ExitCode;

use example::{Counter, START_ATTRIBUTE, counter_class, default_template_config, increment};
use graft_component::{ComponentError, Instance};
use graft_core::GraftConfig;
use graft_element::HostElement;

fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => match GraftConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => GraftConfig::default(),
    };

    if let Err(e) = config.tracing_setup().and_then(|setup| setup.init()) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let templates = config
        .template("counter")
        .cloned()
        .unwrap_or_else(default_template_config);

    if let Err(e) = run(templates) {
        tracing::error!(error = %e, "counter failed");
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(templates: graft_template::TemplateConfig) -> Result<(), ComponentError> {
    let class = counter_class(templates);
    let element = HostElement::with_attributes([(START_ATTRIBUTE, "3"), ("is", "x-counter")]);
    let counter = Instance::with_element(&class, Counter::default(), element);

    counter.connected_callback()?;
    println!("{}", counter.element().content());

    for _ in 0..2 {
        increment(&counter)?;
        println!("{}", counter.element().content());
    }

    let old = counter.element().set_attribute(START_ATTRIBUTE, "100");
    counter.attribute_changed_callback(START_ATTRIBUTE, old.as_deref(), Some("100"))?;
    println!("{}", counter.element().content());

    counter.disconnected_callback()?;
    Ok(())
}
