//! Application layer: use-case orchestration over the ports.

mod payments;

pub use payments::{
    CreateInvoiceInput, CreateInvoiceResult, PaymentService, WebhookOutcome, HISTORY_PAGE_SIZE,
};
