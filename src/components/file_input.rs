//! File Input Helpers
//!
//! Reads the file picked in an `<input type="file">` into an [`Upload`].

use board_core::Upload;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Selected file's bytes, or `None` when nothing is picked
pub async fn read_selected_file(input: NodeRef<html::Input>) -> Result<Option<Upload>, String> {
    let Some(element) = input.get_untracked() else {
        return Ok(None);
    };
    let Some(file) = element.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("cannot read {}: {:?}", file.name(), e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    Ok(Some(Upload {
        file_name: file.name(),
        bytes,
    }))
}

/// Name of the picked file, for the "selected: ..." label
pub fn selected_file_name(input: NodeRef<html::Input>) -> Option<String> {
    input
        .get_untracked()
        .and_then(|element| element.files())
        .and_then(|files| files.get(0))
        .map(|file| file.name())
}
