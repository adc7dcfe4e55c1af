//! Web front end
//!
//! A single page driving one [`CitationController`], shared through Dioxus
//! context as a signal. Timers are plain timeouts that call
//! [`CitationController::tick`] when they fire.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use citegen_domain::{ConfigurationKey, FormField};

use crate::application::controller::{COPY_INDICATOR_DURATION, RESET_CONFIRM_WINDOW};
use crate::application::{changelog, CitationController, ResetOutcome};
use crate::state::Platform;

pub const PAGE_TITLE: &str = "Citation generator";

const MDW_PLACEHOLDER: &str = "Bryan Barker (#1130)\nJaywalking\nWiggling\nPossession of a Stolen Beer Truck\nWarrant for Arrest\nReductions\nFinal\n50 months (+10 months parole) / $20,425.00 fine / 1 point(s)";

type Controller = Signal<CitationController>;

fn use_controller() -> Controller {
    use_context::<Controller>()
}

/// Calls `tick` once `millis` have passed
fn schedule_tick(mut controller: Controller, millis: i64) {
    let millis = u32::try_from(millis).unwrap_or(u32::MAX);
    spawn(async move {
        TimeoutFuture::new(millis).await;
        controller.write().tick();
    });
}

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Provided by the composition root (see `main.rs`).
    let platform = use_context::<Platform>();
    let platform_for_title = platform.clone();
    use_context_provider(move || Signal::new(CitationController::new(platform)));

    use_effect(move || platform_for_title.set_page_title(PAGE_TITLE));

    rsx! {
        div { class: "content",
            PageHeader {}
            form {
                div { class: "form-row",
                    ReportInput {}
                    CitationOutput {}
                }
                ManualInput {}
                ConfigurationPanel {}
            }
            Changelog {}
        }
    }
}

#[component]
fn PageHeader() -> Element {
    let mut controller = use_controller();

    rsx! {
        div { class: "row",
            h2 { class: "content-title", "{PAGE_TITLE}" }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| controller.write().reset_to_defaults(),
                "Reset"
            }
        }
    }
}

#[component]
fn ReportInput() -> Element {
    let mut controller = use_controller();
    let text = controller.read().report_text().to_string();
    let error = controller.read().report_error().map(|e| e.to_string());
    let group_class = if error.is_some() {
        "form-group is-invalid"
    } else {
        "form-group"
    };

    rsx! {
        div { class: "{group_class}",
            label { r#for: "mdw",
                "MDW output "
                span {
                    class: "hint",
                    title: "Select and copy the \"Criminal scum\" section of the report in the MDW and paste it below",
                    "?"
                }
            }
            textarea {
                id: "mdw",
                class: "form-control",
                placeholder: MDW_PLACEHOLDER,
                value: "{text}",
                oninput: move |evt| controller.write().set_report_text(&evt.value()),
            }
            if let Some(error) = error {
                div { class: "invalid-feedback", "{error}" }
            }
        }
    }
}

#[component]
fn CitationOutput() -> Element {
    let mut controller = use_controller();
    let output = controller.read().output().to_string();
    let copied = controller.read().is_copy_indicator_shown();
    let mut copy_error = use_signal(|| Option::<String>::None);

    let handle_copy = move |_| {
        let result = controller.write().copy_output();
        match result {
            Ok(()) => {
                copy_error.set(None);
                schedule_tick(controller, COPY_INDICATOR_DURATION.num_milliseconds());
            }
            Err(e) => copy_error.set(Some(e.to_string())),
        }
    };

    rsx! {
        div { class: "form-group",
            label { r#for: "result", "Citation output" }
            textarea {
                id: "result",
                class: "form-control",
                placeholder: "Template",
                readonly: true,
                value: "{output}",
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: copied,
                onclick: handle_copy,
                if copied { "Copied!" } else { "Copy" }
            }
            if let Some(error) = copy_error() {
                div { class: "invalid-feedback", "{error}" }
            }
        }
    }
}

#[component]
fn ManualInput() -> Element {
    let mut controller = use_controller();
    let full_name = controller.read().form().full_name.clone();
    let fine = controller.read().form().fine_amount;
    let points = controller.read().form().point_count;

    // Raw text is kept while typing so "12." survives a re-render; a parsed
    // report overwrites it.
    let mut fine_text = use_signal(String::new);
    let mut points_text = use_signal(String::new);
    let mut field_error = use_signal(|| Option::<String>::None);

    let fine_shown = shown_number(&fine_text.read(), fine);
    let points_shown = shown_number(&points_text.read(), points);

    let mut update = move |field: FormField, raw: String| {
        let result = controller.write().update_field(field, &raw);
        match result {
            Ok(()) => field_error.set(None),
            Err(e) => field_error.set(Some(e.to_string())),
        }
    };

    rsx! {
        h2 { class: "content-title", "Manual input" }
        div { class: "form-row",
            div { class: "col-sm",
                label { r#for: "full-name", "Criminal scum name" }
                input {
                    r#type: "text",
                    class: "form-control",
                    id: "full-name",
                    placeholder: "Bryan Barker",
                    autofocus: true,
                    value: "{full_name}",
                    oninput: move |evt| update(FormField::FullName, evt.value()),
                }
            }
            div { class: "col-sm",
                label { r#for: "fine", "Fine" }
                div { class: "input-group",
                    span { class: "input-group-text", "$" }
                    input {
                        r#type: "number",
                        class: "form-control",
                        id: "fine",
                        placeholder: "0",
                        min: "0",
                        value: "{fine_shown}",
                        oninput: move |evt| {
                            fine_text.set(evt.value());
                            update(FormField::Fine, evt.value());
                        },
                    }
                }
                SuggestedFine {}
            }
            div { class: "col-sm",
                label { r#for: "points", "Points" }
                input {
                    r#type: "number",
                    class: "form-control",
                    id: "points",
                    placeholder: "0",
                    min: "0",
                    value: "{points_shown}",
                    oninput: move |evt| {
                        points_text.set(evt.value());
                        update(FormField::Points, evt.value());
                    },
                }
            }
        }
        if let Some(error) = field_error() {
            div { class: "invalid-feedback", "{error}" }
        }
        ChargePicker {}
    }
}

/// The typed text while it still means `current`, otherwise `current` itself
fn shown_number<T>(raw: &str, current: Option<T>) -> String
where
    T: PartialEq + ToString + std::str::FromStr,
{
    let typed = raw.trim().replace(',', "").parse::<T>().ok();
    if typed == current {
        raw.to_string()
    } else {
        current.map(|value| value.to_string()).unwrap_or_default()
    }
}

#[component]
fn SuggestedFine() -> Element {
    let mut controller = use_controller();
    let suggested = controller.read().suggested_fine();
    if suggested == 0 {
        return rsx! {};
    }

    rsx! {
        button {
            class: "btn btn-sm btn-link",
            r#type: "button",
            onclick: move |_| {
                let result = controller.write().update_field(FormField::Fine, &suggested.to_string());
                if let Err(e) = result {
                    tracing::warn!("Failed to apply catalog fine {}: {}", suggested, e);
                }
            },
            "Catalog total: ${suggested}"
        }
    }
}

#[component]
fn ChargePicker() -> Element {
    let mut controller = use_controller();
    let mut query = use_signal(String::new);

    let selected = controller.read().form().selected_charges.clone();
    let options = controller.read().selectable_options(&query.read());

    rsx! {
        div { class: "form-row",
            label { r#for: "charges", "Charges" }
            div { class: "selected-charges",
                for charge in selected {
                    span { key: "{charge.id}", class: "badge",
                        "{charge.label}"
                        button {
                            class: "close",
                            r#type: "button",
                            onclick: {
                                let id = charge.id.to_string();
                                move |_| controller.write().remove_charge(&id)
                            },
                            "\u{00d7}"
                        }
                    }
                }
            }
            input {
                r#type: "text",
                class: "form-control",
                id: "charges",
                placeholder: "Charge names",
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }
            if options.is_empty() {
                div { class: "text-muted", "No charge found" }
            } else {
                ul { class: "charge-options",
                    for option in options {
                        li { key: "{option.id}",
                            button {
                                r#type: "button",
                                class: "btn btn-sm",
                                onclick: {
                                    let id = option.id.to_string();
                                    move |_| {
                                        let result = controller.write().add_charge(&id);
                                        if let Err(e) = result {
                                            tracing::warn!("Failed to add charge {}: {}", id, e);
                                        }
                                        query.set(String::new());
                                    }
                                },
                                "{option.label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ConfigurationPanel() -> Element {
    let mut controller = use_controller();
    let mut field_error = use_signal(|| Option::<String>::None);
    let template_error = controller.read().template_error().map(|e| e.to_string());
    let is_default = controller.read().is_configuration_default();
    let is_unsaved = controller.read().is_configuration_unsaved();
    let reset_armed = controller.read().is_reset_armed();
    let template = controller
        .read()
        .configuration()
        .get(ConfigurationKey::Template)
        .to_string();

    let handle_reset = move |_| {
        let outcome = controller.write().reset_configuration_to_built_in_defaults();
        if outcome == ResetOutcome::Armed {
            schedule_tick(controller, RESET_CONFIRM_WINDOW.num_milliseconds());
        }
    };

    let template_label = ConfigurationKey::Template.display_name();
    let template_class = if template_error.is_some() {
        "form-row is-invalid"
    } else {
        "form-row"
    };

    rsx! {
        details { class: "collapse-panel",
            summary { class: "collapse-header", "Configuration" }
            div { class: "collapse-content",
                div { class: "form-row",
                    ConfigurationInput { field: ConfigurationKey::OfficerName, placeholder: "Kayn Larp" }
                    ConfigurationInput { field: ConfigurationKey::Department, placeholder: "BCSO > LSPD" }
                    ConfigurationInput { field: ConfigurationKey::Rank, placeholder: "Under the Undersheriff" }
                    ConfigurationInput { field: ConfigurationKey::Callsign, placeholder: "220" }
                }
                div { class: "{template_class}",
                    label { r#for: "template", "{template_label}" }
                    textarea {
                        id: "template",
                        class: "form-control",
                        placeholder: "Template",
                        style: "min-height: 25rem",
                        value: "{template}",
                        oninput: move |evt| {
                            let result = controller
                                .write()
                                .update_field(FormField::Configuration(ConfigurationKey::Template), &evt.value());
                            match result {
                                Ok(()) => field_error.set(None),
                                Err(e) => field_error.set(Some(e.to_string())),
                            }
                        },
                    }
                    if let Some(error) = template_error {
                        div { class: "invalid-feedback", "{error}" }
                    }
                    if let Some(error) = field_error() {
                        div { class: "invalid-feedback", "{error}" }
                    }
                }
                div {
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        disabled: is_default,
                        onclick: handle_reset,
                        if reset_armed { "All changes will be lost!" } else { "Reset configuration" }
                    }
                    button {
                        class: "btn btn-success",
                        r#type: "button",
                        disabled: !is_unsaved,
                        onclick: move |_| controller.write().save_configuration(),
                        "Save configuration"
                    }
                }
            }
        }
    }
}

#[component]
fn ConfigurationInput(field: ConfigurationKey, placeholder: &'static str) -> Element {
    let mut controller = use_controller();
    let mut field_error = use_signal(|| Option::<String>::None);
    let value = controller.read().configuration().get(field).to_string();
    let id = field.storage_key();
    let label = field.display_name();

    rsx! {
        div { class: "col-sm",
            label { r#for: "{id}", "{label}" }
            input {
                r#type: "text",
                class: "form-control",
                id: "{id}",
                placeholder,
                value: "{value}",
                oninput: move |evt| {
                    let result = controller
                        .write()
                        .update_field(FormField::Configuration(field), &evt.value());
                    match result {
                        Ok(()) => field_error.set(None),
                        Err(e) => field_error.set(Some(e.to_string())),
                    }
                },
            }
            if let Some(error) = field_error() {
                div { class: "invalid-feedback", "{error}" }
            }
        }
    }
}

#[component]
fn Changelog() -> Element {
    let version = changelog::latest_version();

    rsx! {
        details { class: "collapse-panel",
            summary { class: "collapse-header", "Changelog ({version})" }
            div { class: "collapse-content",
                for release in changelog::RELEASES.iter() {
                    div { key: "{release.version}",
                        h3 { class: "content-title text-monospace", "{release.version}" }
                        ul {
                            for change in release.changes.iter() {
                                li { "{change}" }
                            }
                        }
                    }
                }
                h3 { class: "content-title", "Known issues" }
                ul {
                    for issue in changelog::KNOWN_ISSUES.iter() {
                        li { "{issue}" }
                    }
                }
            }
        }
    }
}
