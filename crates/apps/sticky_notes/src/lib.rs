//! Sticky notes desktop app: a board of colored, draggable text notes persisted as one list.

#![warn(rustdoc::broken_intra_doc_links)]

pub mod notes;

use desktop_app_contract::AppMountContext;
use leptos::{ev::PointerEvent, *};

use crate::notes::{NoteBoard, NoteId, NotePosition};

#[derive(Debug, Clone, Copy, PartialEq)]
struct NoteDrag {
    id: NoteId,
    pointer_start: (f64, f64),
    origin: NotePosition,
    current: NotePosition,
}

impl NoteDrag {
    fn follow(&mut self, pointer: (f64, f64)) {
        self.current = NotePosition {
            x: self.origin.x + pointer.0 - self.pointer_start.0,
            y: self.origin.y + pointer.1 - self.pointer_start.1,
        }
        .clamped();
    }
}

fn pointer_of(ev: &PointerEvent) -> (f64, f64) {
    (f64::from(ev.client_x()), f64::from(ev.client_y()))
}

#[component]
/// Sticky notes window contents. Every mutation rewrites the stored note list.
pub fn StickyNotesApp(
    /// Runtime mount context for this instance.
    context: AppMountContext,
) -> impl IntoView {
    let board = create_rw_signal(NoteBoard::load(context.services.prefs.as_ref()));
    let prefs = store_value(context.services.prefs);
    let drag = create_rw_signal(None::<NoteDrag>);

    let mutate = move |change: &dyn Fn(&mut NoteBoard) -> bool| {
        let changed = board.try_update(|b| change(b)).unwrap_or(false);
        if !changed {
            return;
        }
        board.with_untracked(|b| {
            prefs.with_value(|prefs| {
                if let Err(err) = b.save(prefs.as_ref()) {
                    logging::warn!("persist sticky notes failed: {err}");
                }
            })
        });
    };

    let finish_drag = move || {
        if let Some(done) = drag.get_untracked() {
            drag.set(None);
            if done.current != done.origin {
                mutate(&|b| b.move_note(done.id, done.current));
            }
        }
    };

    let note_ids = move || {
        board.with(|b| b.notes().iter().map(|note| note.id).collect::<Vec<_>>())
    };

    view! {
        <div class="sticky-notes-app">
            <div class="sticky-notes-header">
                <h2>"Sticky Notes"</h2>
                <button
                    type="button"
                    class="add-note-button"
                    on:click=move |_| {
                        mutate(&|b| {
                            b.add_now();
                            true
                        })
                    }
                >
                    "+ Add Note"
                </button>
            </div>
            <div
                class="notes-canvas"
                on:pointermove=move |ev| {
                    if drag.with_untracked(Option::is_some) {
                        let pointer = pointer_of(&ev);
                        drag.update(|d| {
                            if let Some(d) = d.as_mut() {
                                d.follow(pointer);
                            }
                        });
                    }
                }
                on:pointerup=move |_| finish_drag()
                on:pointerleave=move |_| finish_drag()
            >
                <For each=note_ids key=|id| *id let:id>
                    {
                        let note = create_memo(move |_| board.with(|b| b.note(id).cloned()));
                        let position = move || {
                            drag.get()
                                .filter(|d| d.id == id)
                                .map(|d| d.current)
                                .or_else(|| note.with(|n| n.as_ref().map(|n| n.position)))
                                .unwrap_or(NotePosition { x: 0.0, y: 0.0 })
                        };
                        let style = move || {
                            let p = position();
                            let color = note
                                .with(|n| n.as_ref().map(|n| n.color.clone()))
                                .unwrap_or_default();
                            format!(
                                "transform:translate({}px,{}px);background-color:{color};",
                                p.x, p.y
                            )
                        };
                        view! {
                            <div
                                class="sticky-note"
                                class:dragging=move || drag.with(|d| d.is_some_and(|d| d.id == id))
                                style=style
                            >
                                <div
                                    class="note-header"
                                    on:pointerdown=move |ev| {
                                        if ev.button() != 0 {
                                            return;
                                        }
                                        let origin = position();
                                        drag.set(Some(NoteDrag {
                                            id,
                                            pointer_start: pointer_of(&ev),
                                            origin,
                                            current: origin,
                                        }));
                                    }
                                >
                                    <button
                                        type="button"
                                        class="delete-note-button"
                                        aria-label="Delete note"
                                        on:pointerdown=|ev| ev.stop_propagation()
                                        on:click=move |_| mutate(&|b| b.delete(id))
                                    >
                                        "\u{1F5D1}"
                                    </button>
                                </div>
                                <textarea
                                    class="note-textarea"
                                    spellcheck="false"
                                    prop:value=move || {
                                        note.with(|n| n.as_ref().map(|n| n.text.clone()))
                                            .unwrap_or_default()
                                    }
                                    on:input=move |ev| {
                                        let text = event_target_value(&ev);
                                        mutate(&|b| b.update_text(id, text.clone()));
                                    }
                                ></textarea>
                            </div>
                        }
                    }
                </For>
            </div>
        </div>
    }
}
