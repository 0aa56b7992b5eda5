//! Receipt renderer
//!
//! Renders a resolved bill into ticket bytes. Pure: the output depends
//! only on the bill and the `rendered_at` timestamp passed by the caller
//! (the render call time on the existing-bill retrieval path).

use tally_printer::TicketBuilder;

use crate::db::models::BillResolved;
use crate::utils::time::format_millis;

/// Default paper width in characters (58mm paper)
pub const DEFAULT_WIDTH: usize = 32;

/// Receipt renderer
pub struct ReceiptRenderer {
    width: usize,
}

impl ReceiptRenderer {
    /// Create a renderer with the specified paper width
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Render a bill to ticket bytes
    pub fn render(&self, bill: &BillResolved, rendered_at_millis: i64) -> Vec<u8> {
        let mut b = TicketBuilder::new(self.width);

        self.render_header(&mut b, bill);
        self.render_items(&mut b, bill);
        self.render_footer(&mut b, bill, rendered_at_millis);

        b.build()
    }

    /// Header: title, bill identity and sale metadata
    fn render_header(&self, b: &mut TicketBuilder, bill: &BillResolved) {
        b.center();
        b.double_size();
        b.bold();
        b.line("Bill Receipt");
        b.bold_off();
        b.reset_size();
        b.left();
        b.sep_double();

        b.line(&format!("Bill No: {}", bill.bill_number));
        if let Some(id) = &bill.id {
            b.line(&format!("Bill ID: {}", id));
        }
        b.line(&format!("Date: {}", format_millis(bill.created_at)));
        b.line(&format!("Payment Method: {}", bill.payment_method));
        b.sep_single();
    }

    /// One block per line item: name, then quantity and cost
    fn render_items(&self, b: &mut TicketBuilder, bill: &BillResolved) {
        b.bold();
        b.line("Items:");
        b.bold_off();

        for item in &bill.items {
            b.line(&item.product.name);
            b.line_lr(&format!("  x{}", item.quantity), &format!("{:.2}", item.cost));
        }

        b.sep_single();
    }

    /// Total and the render timestamp
    fn render_footer(&self, b: &mut TicketBuilder, bill: &BillResolved, rendered_at_millis: i64) {
        b.bold();
        b.line_lr("Total Cost", &format!("{:.2}", bill.total_cost));
        b.bold_off();
        b.newline();
        b.line(&format!("Printed: {}", format_millis(rendered_at_millis)));
        b.cut_feed(3);
    }
}

impl Default for ReceiptRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}
