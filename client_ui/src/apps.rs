use common_lib::app::TrackedApp;
use sycamore::{futures::spawn_local_scoped, prelude::*};
use sycamore::rt::Event;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;

use crate::{
    api::{ApiClient, ApiError},
    storage::{AppsStorage, BrowserStorage, StorageBackend},
};

const ADD_APP_ERROR: &str = "Failed to add app. Please check the app ID and try again.";

/// Loads the persisted apps into `apps` and selects the first one, but only
/// if no selection was made yet.
pub fn init<B: StorageBackend>(
    storage: &AppsStorage<B>,
    apps: &Signal<Vec<TrackedApp>>,
    selected_app_id: &Signal<String>,
) {
    let loaded = storage.load();
    apps.set(loaded.clone());
    if selected_app_id.get().is_empty() {
        if let Some(first) = loaded.first() {
            selected_app_id.set(first.id.clone());
        }
    }
}

/// Reloads the apps from storage and returns the fresh list, so callers can
/// make follow-up decisions without waiting for a re-render.
pub fn refresh<B: StorageBackend>(
    storage: &AppsStorage<B>,
    apps: &Signal<Vec<TrackedApp>>,
) -> Vec<TrackedApp> {
    let loaded = storage.load();
    apps.set(loaded.clone());
    loaded
}

/// Removes `id` from storage and, if it was the selected app, re-selects
/// the first remaining one (or clears the selection).
pub fn remove_app<B: StorageBackend>(
    storage: &AppsStorage<B>,
    apps: &Signal<Vec<TrackedApp>>,
    selected_app_id: &Signal<String>,
    id: &str,
) {
    storage.remove(id);
    let remaining = refresh(storage, apps);
    let current = (*selected_app_id.get()).clone();
    let next = selection_after_remove(&remaining, id, &current);
    if next != current {
        selected_app_id.set(next);
    }
}

fn selection_after_remove(remaining: &[TrackedApp], removed_id: &str, current: &str) -> String {
    if current != removed_id {
        return current.to_owned();
    }
    remaining
        .first()
        .map(|app| app.id.clone())
        .unwrap_or_default()
}

/// Registers `id` with the backend, persists it and selects the newest
/// list entry. Re-adding the already selected app leaves the selection
/// signal untouched, so effects keyed on it don't re-run.
pub(crate) async fn submit_app<B: StorageBackend>(
    api: &dyn ApiClient,
    storage: &AppsStorage<B>,
    apps: &Signal<Vec<TrackedApp>>,
    selected_app_id: &Signal<String>,
    id: &str,
) -> Result<(), ApiError> {
    api.register_app(id).await?;
    storage.add(id);
    let updated = refresh(storage, apps);
    if let Some(newest) = updated.last() {
        if *selected_app_id.get() != newest.id {
            selected_app_id.set(newest.id.clone());
        }
    }
    Ok(())
}

#[component(inline_props)]
pub fn AddAppForm<'a, G: Html>(
    cx: Scope<'a>,
    api: &'a dyn ApiClient,
    storage: &'a AppsStorage<BrowserStorage>,
    apps: &'a Signal<Vec<TrackedApp>>,
    selected_app_id: &'a Signal<String>,
) -> View<G> {
    let app_id = create_signal(cx, String::new());
    let is_loading = create_signal(cx, false);
    let error = create_signal(cx, String::new());

    let submit = move |_| {
        spawn_local_scoped(cx, async move {
            is_loading.set(true);
            error.set(String::new());

            let id = (*app_id.get()).clone();
            match submit_app(api, storage, apps, selected_app_id, &id).await {
                Ok(()) => app_id.set(String::new()),
                Err(e) => {
                    log::error!("can't register app {id}: {e}");
                    error.set(ADD_APP_ERROR.to_owned());
                }
            }
            is_loading.set(false);
        })
    };

    view! { cx,
        div(class="add_app_form") {
            h3 { "Add New App to Track" }
            form(on:submit=submit, action="javascript:void(0);") {
                div(class="form_group") {
                    label(for="app_id") { "App ID:" }
                    input(type="text", id="app_id", name="app_id",
                        placeholder="e.g., 595068606", required=true, bind:value=app_id)
                    small {
                        "Find the App ID in the App Store URL: https://apps.apple.com/us/app/appname/id[APP_ID]"
                    }
                }

                (if !error.get().is_empty() {
                    let message = (*error.get()).clone();
                    view! { cx,
                        div(class="error_message") { (message) }
                    }
                } else {
                    view! { cx, }
                })

                button(type="submit", disabled=*is_loading.get()) {
                    (if *is_loading.get() { "Adding..." } else { "Add App" })
                }
            }
        }
    }
}

#[component(inline_props)]
pub fn AppPicker<'a, G: Html>(
    cx: Scope<'a>,
    apps: &'a ReadSignal<Vec<TrackedApp>>,
    selected_app_id: &'a Signal<String>,
) -> View<G> {
    let change = move |event: Event| {
        let event_target = event.target().unwrap();
        let select: &HtmlSelectElement = event_target.dyn_ref().unwrap();
        selected_app_id.set(select.value());
    };

    view! { cx,
        div(class="controls") {
            div(class="control_group") {
                label(for="app_select") { "Select App:" }
                select(id="app_select", on:change=change) {
                    option(value="") { "Choose an app..." }
                    Keyed(
                        iterable=apps,
                        key=|app| app.id.clone(),
                        view=move |cx, app| {
                            let label = app.display_name();
                            let id = app.id;
                            let value = id.clone();
                            let is_selected =
                                create_memo(cx, move || *selected_app_id.get() == id);
                            view! { cx,
                                option(value=value, selected=*is_selected.get()) { (label) }
                            }
                        },
                    )
                }
            }
        }
    }
}

#[component(inline_props)]
pub fn SelectedAppHeader<'a, G: Html>(
    cx: Scope<'a>,
    storage: &'a AppsStorage<BrowserStorage>,
    apps: &'a Signal<Vec<TrackedApp>>,
    selected_app_id: &'a Signal<String>,
) -> View<G> {
    let title = create_memo(cx, move || {
        let selected = selected_app_id.get();
        apps.get()
            .iter()
            .find(|app| app.id == *selected)
            .map(|app| app.display_name())
            .unwrap_or_else(|| format!("App {}", selected))
    });

    let remove = move |_| {
        let id = (*selected_app_id.get()).clone();
        remove_app(storage, apps, selected_app_id, &id);
    };

    view! { cx,
        div(class="reviews_header") {
            h2 { "Reviews for " (title.get()) }
            button(class="remove_app_btn", type="button", title="Remove this app",
                on:click=remove) { "×" }
        }
    }
}
