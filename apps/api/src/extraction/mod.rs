// Text Extractor: PDF upload in, plain text out.

pub mod handlers;
pub mod pdf;
