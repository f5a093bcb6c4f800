use wadmify_pipeline::Region;
use yew::prelude::*;

use crate::components::manifest_view::ManifestView;
use crate::core::display::{CONVERT_AGAIN_LABEL, processing_line, shows_reconvert, size_line};

#[derive(Properties, PartialEq)]
pub(crate) struct RegionProps {
    pub(crate) region: Region,
    pub(crate) can_reconvert: bool,
    pub(crate) on_copy: Callback<()>,
    pub(crate) on_reconvert: Callback<()>,
}

#[function_component(RegionView)]
pub(crate) fn region_view(props: &RegionProps) -> Html {
    let body = match &props.region {
        Region::Empty => html! {},
        Region::FileInfo(file) => html! {
            <>
                <div class="file-detail"><span class="file-name">{file.name.clone()}</span></div>
                <div class="file-detail">{size_line(file)}</div>
            </>
        },
        Region::Processing(file) => html! {
            <p class="muted" aria-busy="true">{processing_line(file)}</p>
        },
        Region::Manifest(rendered) => html! {
            <ManifestView
                markup={AttrValue::from(rendered.markup().to_string())}
                can_reconvert={props.can_reconvert}
                on_copy={props.on_copy.clone()}
                on_reconvert={props.on_reconvert.clone()}
            />
        },
        Region::Failed { message } => {
            let on_reconvert = {
                let on_reconvert = props.on_reconvert.clone();
                Callback::from(move |_| on_reconvert.emit(()))
            };
            html! {
                <>
                    <p class="error-text" role="alert">{message.clone()}</p>
                    if shows_reconvert(&props.region, props.can_reconvert) {
                        <div class="actions">
                            <button class="ghost" type="button" onclick={on_reconvert}>
                                {CONVERT_AGAIN_LABEL}
                            </button>
                        </div>
                    }
                </>
            }
        }
    };

    html! {
        <section id="file-info" class={classes!("region", props.region.label())}>
            {body}
        </section>
    }
}
