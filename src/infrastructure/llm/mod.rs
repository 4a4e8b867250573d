mod openai;

pub use openai::OpenAiChatModel;
pub(crate) use openai::{build_client, make_snippet, validated_base};
