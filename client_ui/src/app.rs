use sycamore::prelude::*;

use crate::{
    api::{ApiClient, HttpApi},
    apps::{self, AddAppForm, AppPicker, SelectedAppHeader},
    reviews::ReviewsList,
    storage::{AppsStorage, BrowserStorage},
};

#[component]
pub fn App<G: Html>(cx: Scope) -> View<G> {
    let api: &dyn ApiClient = create_ref(cx, HttpApi::new());
    let storage = create_ref(cx, AppsStorage::new(BrowserStorage));
    let apps = create_signal(cx, Vec::new());
    let selected_app_id = create_signal(cx, String::new());
    apps::init(storage, apps, selected_app_id);

    view! { cx,
        header(class="app_header") {
            h1 { "App Store Reviews Viewer" }
        }

        main(class="app_main") {
            AddAppForm(api=api, storage=storage, apps=apps, selected_app_id=selected_app_id)

            (if !apps.get().is_empty() {
                view! { cx,
                    AppPicker(apps=apps, selected_app_id=selected_app_id)
                }
            } else {
                view! { cx, }
            })

            (if !selected_app_id.get().is_empty() {
                view! { cx,
                    div(class="reviews_section") {
                        SelectedAppHeader(storage=storage, apps=apps,
                            selected_app_id=selected_app_id)
                        ReviewsList(api=api, selected_app_id=selected_app_id)
                    }
                }
            } else {
                view! { cx, }
            })

            (if apps.get().is_empty() {
                view! { cx,
                    div(class="no_apps_message") {
                        p { "No apps added yet. Add your first app above to get started!" }
                    }
                }
            } else {
                view! { cx, }
            })
        }
    }
}
