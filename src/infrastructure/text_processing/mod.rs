mod composite_extractor;
mod mock_extractor;
mod pdf_adapter;
mod plain_text_adapter;
mod text_sanitizer;
mod word_adapter;

pub use composite_extractor::CompositeExtractor;
pub use mock_extractor::MockExtractor;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use text_sanitizer::sanitize_extracted_text;
pub use word_adapter::WordAdapter;
