use gloo::dialogs::alert;
use tracing::info;
use wadmify_pipeline::Notifier;
use yewdux::prelude::Dispatch;

use crate::core::store::{AppStore, ToastKind};

/// Success toasts and blocking alerts.
pub(crate) struct BrowserNotifier {
    dispatch: Dispatch<AppStore>,
}

impl BrowserNotifier {
    pub(crate) const fn new(dispatch: Dispatch<AppStore>) -> Self {
        Self { dispatch }
    }
}

impl Notifier for BrowserNotifier {
    fn success(&self, message: &str) {
        info!(notice = message, "user notified");
        let message = message.to_string();
        self.dispatch.reduce_mut(move |store| {
            store.push_toast(message, ToastKind::Success);
        });
    }

    fn alert(&self, message: &str) {
        alert(message);
    }
}
