mod gemini_client;
mod mock_llm_client;

pub use gemini_client::{create_gemini_client, GeminiClient};
pub use mock_llm_client::MockLlmClient;
