//! File reads through the browser `FileReader`.

use async_trait::async_trait;
use gloo::file::File;
use wadmify_pipeline::{FileSource, HostError};
use web_sys::FileList;

/// A file chosen through drag-and-drop or the picker.
pub(crate) struct BrowserFile {
    file: File,
}

impl From<web_sys::File> for BrowserFile {
    fn from(file: web_sys::File) -> Self {
        Self {
            file: File::from(file),
        }
    }
}

#[async_trait(?Send)]
impl FileSource for BrowserFile {
    fn name(&self) -> String {
        self.file.name()
    }

    fn size(&self) -> u64 {
        self.file.size()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, HostError> {
        gloo::file::futures::read_as_bytes(&self.file)
            .await
            .map_err(|err| HostError::new(err.to_string()))
    }
}

/// Every file in a transfer or input list, in order.
pub(crate) fn collect_files(list: Option<FileList>) -> Vec<BrowserFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(BrowserFile::from)
        .collect()
}
