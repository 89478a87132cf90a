use dioxus::prelude::*;

use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let version = version_label();

    rsx! {
        div { class: "shell",
            header {
                h1 { "{APP_NAME}" }
                span { class: "version", "{version}" }
            }
            main {
                {children}
            }
        }
    }
}
