use super::*;

const EMPTY_WALLPAPER_MESSAGE: &str = "Wallpaper URL cannot be empty.";

/// Wallpaper settings overlay. Clicking the backdrop or the close button dismisses it.
#[component]
pub(super) fn DesktopSettingsModal() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let is_open = create_memo(move |_| state.get().settings_open);
    let draft = create_rw_signal(String::new());
    let error = create_rw_signal(None::<&'static str>);

    // Reset the form to the applied wallpaper whenever the overlay opens.
    create_effect(move |_| {
        if is_open.get() {
            draft.set(state.get_untracked().wallpaper_url);
            error.set(None);
        }
    });

    let close = move || runtime.dispatch_action(DesktopAction::CloseSettings);
    let save = move || {
        let url = draft.get_untracked();
        if url.trim().is_empty() {
            error.set(Some(EMPTY_WALLPAPER_MESSAGE));
            return;
        }
        runtime.dispatch_action(DesktopAction::SetWallpaper { url });
    };

    view! {
        <Show when=move || is_open.get() fallback=|| ()>
            <div class="modal-overlay" on:click=move |_| close()>
                <div
                    class="modal-content"
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby="desktop-settings-title"
                    on:click=|ev| ev.stop_propagation()
                >
                    <div class="modal-header">
                        <h2 id="desktop-settings-title">"Settings"</h2>
                        <button
                            type="button"
                            class="close-button"
                            aria-label="Close settings"
                            on:click=move |_| close()
                        >
                            "\u{00D7}"
                        </button>
                    </div>
                    <div class="modal-body">
                        <div class="setting-item">
                            <label for="wallpaper">"Wallpaper URL"</label>
                            <input
                                type="text"
                                id="wallpaper"
                                name="wallpaper"
                                prop:value=move || draft.get()
                                on:input=move |ev| {
                                    draft.set(event_target_value(&ev));
                                    error.set(None);
                                }
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        save();
                                    }
                                }
                            />
                            <Show when=move || error.get().is_some() fallback=|| ()>
                                <p class="setting-error" role="alert">
                                    {move || error.get().unwrap_or_default()}
                                </p>
                            </Show>
                        </div>
                    </div>
                    <div class="modal-footer">
                        <button type="button" class="save-button" on:click=move |_| save()>
                            "Save"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
