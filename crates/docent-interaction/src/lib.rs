pub mod gemini_api_agent;

pub use gemini_api_agent::{GeminiChatGateway, GeminiGatewayFactory};
