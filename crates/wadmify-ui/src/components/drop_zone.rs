//! Drop zone with a hidden file picker.
//!
//! # Design
//! - Emits raw file lists; first-file selection and empty-payload handling live in the
//!   pipeline.
//! - Clicking the zone opens the picker so both input modes share one target.

use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, HtmlInputElement, Node};
use yew::prelude::*;

use crate::core::display::{DROP_PROMPT, drag_left_zone};
use crate::services::browser_file::{BrowserFile, collect_files};

#[derive(Properties, PartialEq)]
pub(crate) struct DropZoneProps {
    pub(crate) highlighted: bool,
    pub(crate) on_drag_over: Callback<()>,
    pub(crate) on_drag_leave: Callback<()>,
    pub(crate) on_drop: Callback<Vec<BrowserFile>>,
    pub(crate) on_pick: Callback<Vec<BrowserFile>>,
}

#[function_component(DropZone)]
pub(crate) fn drop_zone(props: &DropZoneProps) -> Html {
    let file_input = use_node_ref();
    let zone = use_node_ref();

    let on_drop = {
        let on_drop = props.on_drop.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            on_drop.emit(collect_files(
                event.data_transfer().and_then(|transfer| transfer.files()),
            ));
        })
    };

    let on_drag_over = {
        let on_drag_over = props.on_drag_over.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            event.stop_propagation();
            if let Some(transfer) = event.data_transfer() {
                transfer.set_drop_effect("copy");
            }
            on_drag_over.emit(());
        })
    };

    let on_drag_leave = {
        let on_drag_leave = props.on_drag_leave.clone();
        let zone = zone.clone();
        Callback::from(move |event: DragEvent| {
            let entered = event
                .related_target()
                .and_then(|target| target.dyn_into::<Node>().ok());
            let entered_inside = entered.map(|node| {
                zone.cast::<Node>()
                    .is_some_and(|zone| zone.contains(Some(&node)))
            });
            if drag_left_zone(entered_inside) {
                on_drag_leave.emit(());
            }
        })
    };

    let on_open_picker = {
        let file_input = file_input.clone();
        Callback::from(move |_| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_file_change = {
        let on_pick = props.on_pick.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event
                .target()
                .and_then(|node| node.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let files = collect_files(input.files());
            // Reset so picking the same file again still fires `change`.
            input.set_value("");
            on_pick.emit(files);
        })
    };

    html! {
        <>
            <input
                ref={file_input}
                class="file-input-hidden"
                type="file"
                accept=".wasm"
                onchange={on_file_change}
            />
            <div
                ref={zone}
                id="drop-area"
                class={classes!("drop-zone", props.highlighted.then_some("highlight"))}
                role="button"
                aria-label={DROP_PROMPT}
                ondrop={on_drop}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                onclick={on_open_picker}
            >
                <p><strong>{DROP_PROMPT}</strong></p>
            </div>
        </>
    }
}
