//! Application root: wires browser events into the pipeline session.
//!
//! # Design
//! - The session is created once per mount and shared through `Rc`; every event handler
//!   calls one session transition and then mirrors the session into the store.
//! - A new selection aborts the previous in-flight read; the session's tickets discard
//!   anything that still slips through.

use std::cell::RefCell;
use std::rc::Rc;

use futures_util::future::{AbortHandle, Abortable};
use tracing::{debug, info, warn};
use wadmify_convert::ComponentEngine;
use wadmify_pipeline::{PendingRead, PipelineConfig, Session, Variant};
use wadmify_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging, log_format_from_str,
};
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

use crate::components::drop_zone::DropZone;
use crate::components::metadata_form::MetadataForm;
use crate::components::region::RegionView;
use crate::components::toast::ToastHost;
use crate::core::display::{LOG_FORMAT_ATTRIBUTE, VARIANT_ATTRIBUTE};
use crate::core::store::{AppStore, PipelineView};
use crate::services::browser_file::BrowserFile;
use crate::services::clipboard::BrowserClipboard;
use crate::services::notifier::BrowserNotifier;
use crate::services::timer::BrowserTimer;

type AppSession = Session<ComponentEngine, BrowserTimer>;
type InFlight = Rc<RefCell<Option<AbortHandle>>>;

#[derive(Properties, PartialEq)]
pub(crate) struct AppProps {
    pub(crate) config: PipelineConfig,
}

#[function_component(WadmifyApp)]
pub(crate) fn wadmify_app(props: &AppProps) -> Html {
    let dispatch = Dispatch::<AppStore>::new();
    let session = use_memo(
        |config: &PipelineConfig| Session::new(config.clone(), ComponentEngine, BrowserTimer),
        props.config.clone(),
    );
    let in_flight: InFlight = use_mut_ref(|| None);
    let view = use_selector(|store: &AppStore| store.view.clone());
    let toasts = use_selector(|store: &AppStore| store.toasts.clone());
    let variant = props.config.variant();

    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |variant: &Variant| {
                let variant = *variant;
                dispatch.reduce_mut(move |store| store.variant = variant);
                || ()
            },
            variant,
        );
    }

    let on_drag_over = {
        let session = session.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            session.drag_over();
            sync(&dispatch, &session);
        })
    };

    let on_drag_leave = {
        let session = session.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            session.drag_leave();
            sync(&dispatch, &session);
        })
    };

    let on_drop = {
        let session = session.clone();
        let dispatch = dispatch.clone();
        let in_flight = in_flight.clone();
        Callback::from(move |files: Vec<BrowserFile>| {
            let pending = session.drop_files(files);
            start(&session, &dispatch, &in_flight, pending);
        })
    };

    let on_pick = {
        let session = session.clone();
        let dispatch = dispatch.clone();
        let in_flight = in_flight.clone();
        Callback::from(move |files: Vec<BrowserFile>| {
            let pending = session.pick_files(files);
            start(&session, &dispatch, &in_flight, pending);
        })
    };

    let on_reconvert = {
        let session = session.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            let fields = dispatch.get().fields.clone();
            match session.reconvert(&fields) {
                Ok(completion) => debug!(outcome = completion.label(), "reconverted"),
                Err(err) => debug!(error = %err, "reconvert ignored"),
            }
            sync(&dispatch, &session);
        })
    };

    let on_copy = {
        let session = session.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            let session = session.clone();
            let dispatch = dispatch.clone();
            yew::platform::spawn_local(async move {
                let notifier = BrowserNotifier::new(dispatch);
                if let Err(err) = session.copy_manifest(&BrowserClipboard, &notifier).await {
                    warn!(error = %err, "copy failed");
                }
            });
        })
    };

    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: u64| {
            dispatch.reduce_mut(move |store| store.dismiss_toast(id));
        })
    };

    html! {
        <main class={classes!("wadmify", variant.as_str())}>
            <DropZone
                highlighted={view.highlighted}
                on_drag_over={on_drag_over}
                on_drag_leave={on_drag_leave}
                on_drop={on_drop}
                on_pick={on_pick}
            />
            {if variant == Variant::Interactive {
                html! { <MetadataForm /> }
            } else {
                html! {}
            }}
            <RegionView
                region={view.region.clone()}
                can_reconvert={view.can_reconvert}
                on_copy={on_copy}
                on_reconvert={on_reconvert}
            />
            <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
        </main>
    }
}

fn sync(dispatch: &Dispatch<AppStore>, session: &AppSession) {
    let view = PipelineView {
        region: session.region(),
        highlighted: session.is_highlighted(),
        selected: session.selected(),
        can_reconvert: session.can_reconvert(),
    };
    dispatch.reduce_mut(move |store| store.view = view);
}

fn start(
    session: &Rc<AppSession>,
    dispatch: &Dispatch<AppStore>,
    in_flight: &InFlight,
    pending: Option<PendingRead<BrowserFile>>,
) {
    sync(dispatch, session);
    let Some(pending) = pending else {
        return;
    };
    let (handle, registration) = AbortHandle::new_pair();
    if let Some(previous) = in_flight.borrow_mut().replace(handle) {
        previous.abort();
    }

    let session = Rc::clone(session);
    let dispatch = dispatch.clone();
    yew::platform::spawn_local(async move {
        let collect = {
            let dispatch = dispatch.clone();
            move || dispatch.get().fields.clone()
        };
        let ticket = pending.ticket;
        match Abortable::new(session.complete(pending, collect), registration).await {
            Ok(completion) => debug!(%ticket, outcome = completion.label(), "selection finished"),
            Err(_) => debug!(%ticket, "read aborted by newer selection"),
        }
        sync(&dispatch, &session);
    });
}

fn mount_attribute(root: Option<&web_sys::Element>, name: &str) -> Option<String> {
    root.and_then(|element| element.get_attribute(name))
}

fn pipeline_config(root: Option<&web_sys::Element>) -> PipelineConfig {
    let variant = mount_attribute(root, VARIANT_ATTRIBUTE).map_or_else(Variant::default, |value| {
        value.parse().unwrap_or_else(|err| {
            warn!(error = %err, "unknown variant; using default");
            Variant::default()
        })
    });
    PipelineConfig::for_variant(variant)
}

fn install_logging(root: Option<&web_sys::Element>) {
    let format = log_format_from_str(mount_attribute(root, LOG_FORMAT_ATTRIBUTE).as_deref())
        .unwrap_or(LogFormat::Pretty);
    let config = LoggingConfig {
        level: DEFAULT_LOG_LEVEL,
        format,
        build_sha: env!("CARGO_PKG_VERSION"),
    };
    if let Err(err) = init_logging(&config) {
        gloo::console::error!(err.to_string());
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let root = gloo::utils::document().get_element_by_id("root");
    install_logging(root.as_ref());
    let props = AppProps {
        config: pipeline_config(root.as_ref()),
    };
    info!(
        build = build_sha(),
        variant = props.config.variant().as_str(),
        "mounting wadmify"
    );
    if let Some(root) = root {
        yew::Renderer::<WadmifyApp>::with_root_and_props(root, props).render();
    } else {
        yew::Renderer::<WadmifyApp>::with_props(props).render();
    }
}
