mod document;
mod embedding;
mod message;
mod question;
mod template;

pub use document::{split_into_documents, RetrievedDocument, StoredDocument};
pub use embedding::Embedding;
pub use message::{MessageRole, PromptMessage};
pub use question::{Answer, Question};
pub use template::{PromptTemplate, Prompts};
