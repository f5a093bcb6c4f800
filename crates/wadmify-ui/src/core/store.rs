//! App-wide yewdux store.
//!
//! # Design
//! - The pipeline session owns the authoritative state; the store mirrors a snapshot so
//!   components re-render through selectors.
//! - Metadata fields live here so they can be read at read-completion time rather than
//!   at selection time.

use wadmify_pipeline::{MetadataFields, Region, SelectedFile, Variant};
use yewdux::store::Store;

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Error,
}

/// Transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message for the toast.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
}

/// Pipeline state visible to components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineView {
    /// Display region contents.
    pub region: Region,
    /// Drop-zone highlight.
    pub highlighted: bool,
    /// Current selection.
    pub selected: Option<SelectedFile>,
    /// Whether "Convert again" is available.
    pub can_reconvert: bool,
}

/// Global application store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct AppStore {
    /// Deployed variant.
    pub variant: Variant,
    /// Mirror of the session state.
    pub view: PipelineView,
    /// Metadata form values.
    pub fields: MetadataFields,
    /// Active toasts, oldest first.
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl AppStore {
    /// Queue a toast and return its identifier.
    pub fn push_toast(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Remove the toast with `id`, if present.
    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

/// Which metadata field an input edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Application name.
    Name,
    /// Application description.
    Description,
    /// Application version.
    Version,
    /// Component image reference.
    Image,
}

impl Field {
    /// All fields in form order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Name, Self::Description, Self::Version, Self::Image]
    }

    /// Stable identifier used for element ids.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Name => "app-name",
            Self::Description => "app-description",
            Self::Version => "app-version",
            Self::Image => "app-image",
        }
    }

    /// Visible label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Version => "Version",
            Self::Image => "Image",
        }
    }

    /// Current value in `fields`.
    #[must_use]
    pub fn value(self, fields: &MetadataFields) -> &str {
        match self {
            Self::Name => &fields.name,
            Self::Description => &fields.description,
            Self::Version => &fields.version,
            Self::Image => &fields.image,
        }
    }

    /// Replace the value in `fields`.
    pub fn set(self, fields: &mut MetadataFields, value: String) {
        match self {
            Self::Name => fields.name = value,
            Self::Description => fields.description = value,
            Self::Version => fields.version = value,
            Self::Image => fields.image = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_get_unique_ids_and_dismiss() {
        let mut store = AppStore::default();
        let first = store.push_toast("copied", ToastKind::Success);
        let second = store.push_toast("failed", ToastKind::Error);
        assert_ne!(first, second);
        store.dismiss_toast(first);
        assert_eq!(store.toasts.len(), 1);
        assert_eq!(store.toasts[0].id, second);
        store.dismiss_toast(99);
        assert_eq!(store.toasts.len(), 1);
    }

    #[test]
    fn fields_round_trip_through_setters() {
        let mut fields = MetadataFields::default();
        for (index, field) in Field::all().into_iter().enumerate() {
            field.set(&mut fields, format!("value-{index}"));
        }
        assert_eq!(Field::Name.value(&fields), "value-0");
        assert_eq!(Field::Image.value(&fields), "value-3");
        assert_eq!(fields.version, "value-2");
    }

    #[test]
    fn store_defaults_to_interactive_and_empty_region() {
        let store = AppStore::default();
        assert_eq!(store.variant, Variant::Interactive);
        assert_eq!(store.view.region, Region::Empty);
        assert!(!store.view.can_reconvert);
    }
}
