//! Stand-in for sections whose component is not registered

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ComponentNotFoundProps {
    /// The component name that failed to resolve
    pub component: String,
}

#[component]
pub fn ComponentNotFound(props: ComponentNotFoundProps) -> Element {
    let component = &props.component;

    rsx! {
        div { class: "component-not-found", role: "alert",
            "Component not found: {component}"
        }
    }
}
