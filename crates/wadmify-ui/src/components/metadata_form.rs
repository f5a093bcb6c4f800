//! Optional application metadata inputs.

use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::core::store::{AppStore, Field};

#[function_component(MetadataForm)]
pub(crate) fn metadata_form() -> Html {
    let fields = use_selector(|store: &AppStore| store.fields.clone());
    let dispatch = Dispatch::<AppStore>::new();

    html! {
        <form class="metadata" onsubmit={Callback::from(|event: SubmitEvent| event.prevent_default())}>
            {for Field::all().into_iter().map(|field| {
                let dispatch = dispatch.clone();
                let oninput = Callback::from(move |event: InputEvent| {
                    if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                        let value = input.value();
                        dispatch.reduce_mut(move |store| field.set(&mut store.fields, value));
                    }
                });
                html! {
                    <label for={field.id()}>
                        <span>{field.label()}</span>
                        <input
                            id={field.id()}
                            type="text"
                            value={field.value(&fields).to_string()}
                            oninput={oninput}
                        />
                    </label>
                }
            })}
        </form>
    }
}
