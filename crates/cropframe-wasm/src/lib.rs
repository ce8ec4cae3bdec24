//! Cropframe WASM - WebAssembly bindings for the Cropframe crop engine
//!
//! This crate exposes cropframe-core to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `editor` - Interactive crop editor (pointer, zoom, preview, extraction)
//! - `style` - CSS projection of saved positions
//! - `decode` - Upload checks
//! - `types` - WASM-compatible wrapper types for crop results
//! - `logger` - Console backend for the `log` facade
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor, check_upload } from '@cropframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! check_upload(file.type, file.size);
//! const editor = new JsCropEditor('avatar');
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod logger;
mod style;
mod types;

// Re-export public types
pub use decode::{check_upload, max_upload_bytes};
pub use editor::JsCropEditor;
pub use style::{project_style, style_to_css};
pub use types::JsCropOutput;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    logger::install(level);
}

/// Change the console log level (`"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::level_from_name(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    log::set_max_level(filter);
    Ok(())
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

    #[test]
    fn test_init_installs_logger() {
        init();
        assert!(log::max_level() >= log::LevelFilter::Warn);
        // Second call is harmless
        init();
    }
}
