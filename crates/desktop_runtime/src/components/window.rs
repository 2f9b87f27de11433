use super::*;
use desktop_app_contract::{AppMountContext, AppServices, ApplicationId};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::{apps, model::AppInstanceKey};

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

/// Window chrome around one app instance.
///
/// The frame reacts to z/rect/flag changes through derived attributes only; the app body is mounted
/// once per instance so its own state is never rebuilt by shell updates.
#[component]
pub(super) fn DesktopWindow(instance_key: AppInstanceKey, app_id: ApplicationId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let Some(descriptor) = apps::app_descriptor(&app_id) else {
        logging::warn!("no app registered for `{app_id}`; instance {instance_key} is not rendered");
        return ().into_view();
    };

    let instance = create_memo(move |_| runtime.state.get().instance(instance_key).cloned());
    let maximized = move || instance.get().is_some_and(|i| i.maximized);

    let class_name = move || {
        let Some(instance) = instance.get() else {
            return "desktop-window".to_string();
        };
        let mut class = String::from("desktop-window");
        if runtime.state.with(|s| s.frontmost_key()) == Some(instance_key) {
            class.push_str(" focused");
        }
        if instance.minimized {
            class.push_str(" minimized");
        }
        if instance.maximized {
            class.push_str(" maximized");
        }
        class
    };
    let style = move || {
        instance
            .get()
            .map(|i| {
                format!(
                    "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                    i.rect.x, i.rect.y, i.rect.w, i.rect.h, i.z_index
                )
            })
            .unwrap_or_default()
    };

    let focus = move |_: web_sys::PointerEvent| {
        runtime.dispatch_action(DesktopAction::FocusApp { instance_key });
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginMove {
            instance_key,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let begin_resize = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            instance_key,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let toggle_maximize = move || runtime.dispatch_action(DesktopAction::ToggleMaximize { instance_key });

    view! {
        <section
            class=class_name
            style=style
            hidden=move || instance.get().is_some_and(|i| i.minimized)
            role="dialog"
            aria-label=descriptor.display_name
            data-instance-key=instance_key.0.to_string()
            on:pointerdown=focus
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=move |ev: web_sys::MouseEvent| {
                    stop_mouse_event(&ev);
                    toggle_maximize();
                }
            >
                <div class="titlebar-title">
                    <span class="titlebar-app-icon" aria-hidden="true">{descriptor.icon}</span>
                    <span>{descriptor.display_name}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        type="button"
                        aria-label=move || if maximized() { "Restore window" } else { "Maximize window" }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    >
                        {move || if maximized() { "\u{2750}" } else { "\u{25A1}" }}
                    </button>
                    <button
                        type="button"
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::MinimizeApp { instance_key });
                        }
                    >
                        "\u{2212}"
                    </button>
                    <button
                        type="button"
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::CloseApp { instance_key });
                        }
                    >
                        "\u{00D7}"
                    </button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody instance_key=instance_key app_id=app_id.clone() />
            </div>
            <Show when=move || !maximized() fallback=|| ()>
                <div
                    class="window-resize-handle edge-se"
                    aria-hidden="true"
                    on:pointerdown=begin_resize
                />
            </Show>
        </section>
    }
    .into_view()
}

#[component]
fn WindowBody(instance_key: AppInstanceKey, app_id: ApplicationId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let Some(descriptor) = apps::app_descriptor(&app_id) else {
        return ().into_view();
    };

    let command_sender = Callback::new(move |command| {
        runtime.dispatch_action(DesktopAction::HandleAppCommand {
            instance_key,
            command,
        });
    });
    let restored_state = runtime
        .state
        .with_untracked(|s| s.instance(instance_key).map(|i| i.app_state.clone()))
        .unwrap_or_default();
    let services = AppServices::new(command_sender, runtime.host.get_value().prefs_store());

    let contents = descriptor.module.mount(AppMountContext {
        app_id,
        instance_key: instance_key.0,
        restored_state,
        services,
    });

    view! { <div class="window-body-content">{contents}</div> }.into_view()
}
