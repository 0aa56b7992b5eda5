//! Receipt printing
//!
//! Pure rendering of persisted bills into printable ticket documents.

pub mod renderer;

pub use renderer::ReceiptRenderer;
