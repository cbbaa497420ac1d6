//! Race-day countdown
//!
//! The markup carries the target date in `data-target`; the ticking itself
//! happens in the browser. Nothing here reads the clock, so the same
//! payload always renders the same HTML.

use dioxus::prelude::*;
use homestretch_sections::data::CountdownData;

#[derive(Props, Clone, PartialEq)]
pub struct CountdownTimerProps {
    pub data: CountdownData,
}

#[component]
pub fn CountdownTimer(props: CountdownTimerProps) -> Element {
    let data = &props.data;
    let target = data.effective_event_date();
    let title = data.title.as_deref().unwrap_or("Countdown");

    rsx! {
        div { class: "countdown", "data-target": "{target}",
            h2 { class: "countdown__title", "{title}" }
            div { class: "countdown__clock",
                for unit in ["days", "hours", "minutes", "seconds"] {
                    div { class: "countdown__unit", "data-unit": "{unit}",
                        span { class: "countdown__value", "--" }
                        span { class: "countdown__label", "{unit}" }
                    }
                }
            }
            p { class: "countdown__date", "{target}" }
            if let Some(location) = &data.location {
                p { class: "countdown__location", "{location}" }
            }
        }
    }
}
