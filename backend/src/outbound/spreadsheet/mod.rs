//! Spreadsheet webhook outbound adapter.

mod webhook_sink;

pub use webhook_sink::SpreadsheetWebhookSink;
