//! Reading browser `File` objects into [`Attachment`]s.

use wasm_bindgen_futures::JsFuture;

use crate::net::types::{Attachment, FileReadError};

/// Snapshot a `FileList` before its input is reset.
pub fn collect(list: &web_sys::FileList) -> Vec<web_sys::File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Read every file into memory, in input order. Unreadable files come back
/// as errors so the caller can report them.
pub async fn read_files(files: Vec<web_sys::File>) -> Vec<Result<Attachment, FileReadError>> {
    let mut out = Vec::with_capacity(files.len());
    for file in files {
        out.push(read_file(&file).await);
    }
    out
}

async fn read_file(file: &web_sys::File) -> Result<Attachment, FileReadError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| FileReadError::new(file.name(), format!("{e:?}")))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(Attachment::new(file.name(), bytes).with_mime(file.type_()))
}
