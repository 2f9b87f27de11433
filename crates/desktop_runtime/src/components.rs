//! Desktop shell UI composition and interaction surfaces.

mod settings_modal;
mod taskbar;
mod window;

use leptos::*;

use self::{settings_modal::DesktopSettingsModal, taskbar::Taskbar, window::DesktopWindow};
use crate::{model::PointerPosition, reducer::DesktopAction};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the wallpaper surface, every tracked window, the taskbar and the settings overlay.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let wallpaper_style = move || {
        format!(
            "background-image:url('{}');",
            css_url_escape(&state.get().wallpaper_url)
        )
    };

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove { pointer });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    view! {
        <div
            id="desktop-shell-root"
            class="desktop"
            data-ui-kind="desktop-root"
            style=wallpaper_style
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <div class="desktop-window-layer" data-ui-kind="window-layer">
                // Minimized instances stay mounted (hidden) so app state such as a running
                // countdown survives until the instance is closed.
                <For
                    each=move || state.get().instances
                    key=|instance| instance.key
                    let:instance
                >
                    <DesktopWindow instance_key=instance.key app_id=instance.app_id />
                </For>
            </div>

            <Taskbar />

            <button
                type="button"
                class="desktop-settings-button"
                aria-label="Desktop settings"
                on:click=move |_| runtime.dispatch_action(DesktopAction::OpenSettings)
            >
                "\u{2699}"
            </button>

            <DesktopSettingsModal />
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove);
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}

/// Escapes characters that would terminate a single-quoted CSS `url()`.
fn css_url_escape(url: &str) -> String {
    url.replace('\\', "\\\\").replace('\'', "\\'")
}
