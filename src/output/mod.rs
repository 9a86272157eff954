// Sat Oct 17 2026 - Alex

pub mod json;

pub use json::{decode_document, JsonRenderer, RenderError, BANNER_END, BANNER_START};
