//! Receipt ticket building primitives.
//!
//! Provides [`TicketBuilder`], a fluent builder that renders receipt
//! documents as ESC/POS byte sequences for thermal printers. The server
//! treats the output as an opaque printable blob.

mod escpos;

pub use escpos::{TicketBuilder, text_width};
