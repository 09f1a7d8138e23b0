//! Circlecrop WASM - WebAssembly bindings for the avatar cropper
//!
//! This crate exposes the circlecrop-core engine to JavaScript/TypeScript.
//! The UI keeps a [`JsCropSession`] per open cropper dialog, feeds it raw
//! pointer/wheel events and the chosen file's bytes, and reads back the
//! viewport transform to position the `<img>` element; `crop()` returns the
//! JPEG bytes to upload.
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@famorg/circlecrop';
//!
//! await init();
//!
//! const session = new JsCropSession(undefined); // default config
//! session.load_image(new Uint8Array(await file.arrayBuffer()));
//! session.drag_start(e.clientX, e.clientY);
//! session.drag_move(e.clientX, e.clientY);
//! session.drag_end();
//! const jpeg = session.crop(); // Uint8Array, 300x300
//! ```

use wasm_bindgen::prelude::*;

mod image_io;
mod session;
mod types;

// Re-export public types
pub use image_io::{decode_image, encode_jpeg, render_crop};
pub use session::JsCropSession;
pub use types::JsSourceImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
