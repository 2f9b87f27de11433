use super::*;
use crate::apps;

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    view! {
        <nav class="taskbar" data-ui-kind="taskbar" aria-label="Applications">
            <div class="taskbar-icons">
                {apps::app_registry()
                    .iter()
                    .map(|descriptor| {
                        let app_id = descriptor.application_id();
                        let indicator_app_id = app_id.clone();
                        let is_open = move || state.with(|s| s.is_app_open(&indicator_app_id));
                        view! {
                            <div class="taskbar-item-container">
                                <button
                                    type="button"
                                    class="taskbar-item"
                                    title=descriptor.display_name
                                    aria-label=descriptor.display_name
                                    on:click=move |_| {
                                        runtime.dispatch_action(DesktopAction::ActivateTaskbarApp {
                                            app_id: app_id.clone(),
                                        });
                                    }
                                >
                                    <span class="taskbar-app-icon" aria-hidden="true">
                                        {descriptor.icon}
                                    </span>
                                </button>
                                <Show when=is_open fallback=|| ()>
                                    <div class="open-indicator"></div>
                                </Show>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </nav>
    }
}
