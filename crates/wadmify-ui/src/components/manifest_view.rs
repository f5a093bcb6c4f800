//! Rendered manifest with copy and reconvert controls.

use yew::prelude::*;

use crate::core::display::{CONVERT_AGAIN_LABEL, COPY_LABEL};
use crate::services::highlight::highlight_all;

#[derive(Properties, PartialEq)]
pub(crate) struct ManifestViewProps {
    /// Escaped `<pre><code>` markup.
    pub(crate) markup: AttrValue,
    pub(crate) can_reconvert: bool,
    pub(crate) on_copy: Callback<()>,
    pub(crate) on_reconvert: Callback<()>,
}

#[function_component(ManifestView)]
pub(crate) fn manifest_view(props: &ManifestViewProps) -> Html {
    use_effect_with_deps(
        |_| {
            highlight_all();
            || ()
        },
        props.markup.clone(),
    );

    let on_copy = {
        let on_copy = props.on_copy.clone();
        Callback::from(move |_| on_copy.emit(()))
    };
    let on_reconvert = {
        let on_reconvert = props.on_reconvert.clone();
        Callback::from(move |_| on_reconvert.emit(()))
    };

    html! {
        <div class="manifest">
            {Html::from_html_unchecked(props.markup.clone())}
            <div class="actions">
                <button id="copy-button" type="button" onclick={on_copy}>{COPY_LABEL}</button>
                <button
                    class="ghost"
                    type="button"
                    disabled={!props.can_reconvert}
                    onclick={on_reconvert}
                >
                    {CONVERT_AGAIN_LABEL}
                </button>
            </div>
        </div>
    }
}
