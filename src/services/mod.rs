pub mod document_assembler;
pub mod output_writer;
pub mod score_discovery;
pub mod score_document;
pub mod settle;

pub use document_assembler::{AssembledDocument, DocumentAssembler};
pub use output_writer::OutputWriter;
pub use score_discovery::ScoreDiscovery;
pub use score_document::ScoreDocument;
pub use settle::SettlePolicy;
