pub(crate) mod drop_zone;
pub(crate) mod manifest_view;
pub(crate) mod metadata_form;
pub(crate) mod region;
pub(crate) mod toast;
