//! Per-instance render functions.
//!
//! [`Instance::html`] and [`Instance::svg`] hand out a [`RenderFn`] bound to
//! the instance and one tag family. Calling it resolves the call site through
//! the class's [`TemplateCache`](graft_template::TemplateCache) and renders
//! into the instance's host element through the class's engine.
//!
//! ```
//! use graft_component::{Descriptor, Instance};
//! use graft_template::{Value, template};
//!
//! struct Greeting;
//!
//! let class = Descriptor::<Greeting>::new().augment();
//! let instance = Instance::new(&class, Greeting);
//!
//! instance
//!     .html()
//!     .call(template!("<p>Hi ", "</p>"), vec![Value::from("there")])
//!     .unwrap();
//!
//! assert_eq!(instance.element().content(), "<p>Hi there</p>");
//! ```

use core::fmt;
use std::sync::{Arc, Weak};

use graft_template::{TagFamily, TemplateError, TemplateStrings, Value};

use crate::error::ComponentError;
use crate::instance::Instance;

type RenderBody =
    dyn Fn(&'static TemplateStrings, Vec<Value>) -> Result<(), ComponentError> + Send + Sync;

/// A render function bound to one (instance, tag family) pair.
///
/// Clones share the same body; [`ptr_eq`](Self::ptr_eq) compares identity.
#[derive(Clone)]
pub struct RenderFn {
    family: TagFamily,
    body: Arc<RenderBody>,
}

impl RenderFn {
    pub(crate) fn new<T: Send + Sync + 'static>(
        family: TagFamily,
        target: Weak<Instance<T>>,
    ) -> Self {
        let body = move |strings: &'static TemplateStrings,
                         values: Vec<Value>|
              -> Result<(), ComponentError> {
            let instance = target.upgrade().ok_or(TemplateError::DanglingTarget)?;
            let class = instance.class();
            let fragments =
                class
                    .template_cache()
                    .parsed(strings, class.template_config(), class.replace())?;
            class.engine().render(instance.element(), &|| {
                family.hole(fragments.clone(), values.clone())
            })?;
            Ok(())
        };
        Self {
            family,
            body: Arc::new(body),
        }
    }

    /// Renders the call site `strings` with `values` into the bound instance.
    ///
    /// # Errors
    ///
    /// [`TemplateError::DanglingTarget`] if the instance was dropped, or any
    /// error from the template cache or the engine.
    pub fn call(
        &self,
        strings: &'static TemplateStrings,
        values: Vec<Value>,
    ) -> Result<(), ComponentError> {
        (self.body)(strings, values)
    }

    /// The bound tag family.
    #[must_use]
    pub fn family(&self) -> TagFamily {
        self.family
    }

    /// Whether both handles share the same body.
    #[must_use]
    pub fn ptr_eq(&self, other: &RenderFn) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for RenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderFn")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use graft_template::template;

    use super::*;
    use crate::Descriptor;

    struct Card;

    #[test]
    fn accessors_are_stable_per_family() {
        let class = Descriptor::<Card>::new().augment();
        let instance = Instance::new(&class, Card);

        assert!(core::ptr::eq(instance.html(), instance.html()));
        assert!(instance.html().ptr_eq(&instance.html().clone()));
        assert!(!instance.html().ptr_eq(instance.svg()));
        assert_eq!(instance.svg().family(), TagFamily::Svg);
    }

    #[test]
    fn dropped_instance_is_reported() {
        let class = Descriptor::<Card>::new().augment();
        let instance = Instance::new(&class, Card);
        let html = instance.html().clone();
        drop(instance);

        let error = html.call(template!("<p></p>"), Vec::new()).unwrap_err();

        assert!(matches!(
            error,
            ComponentError::Template(TemplateError::DanglingTarget)
        ));
    }

    #[test]
    fn renders_svg_into_element() {
        let class = Descriptor::<Card>::new().augment();
        let instance = Instance::new(&class, Card);

        instance
            .svg()
            .call(template!("<rect width=\"", "\"/>"), vec![Value::from(10)])
            .unwrap();

        assert_eq!(instance.element().content(), "<rect width=\"10\"/>");
    }
}
