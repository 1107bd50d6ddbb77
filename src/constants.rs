// Backend
pub const DEFAULT_BACKEND_URL: &str =
    "https://huggingface.co/spaces/Vishalchand0808/car-ai-backend/process-command";
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting to my brain right now.";

// Conversation
pub const DEFAULT_GREETING: &str = "Hello! I'm your in-car assistant. How can I help you?";

// UI
pub const APP_TITLE: &str = "🚗 Car AI Assistant";
pub const APP_SUBTITLE: &str = "Your smart driving companion";
pub const INPUT_PLACEHOLDER: &str = "Ask me to play music, get weather...";
pub const HEADER_HEIGHT: u16 = 3;
pub const INPUT_HEIGHT: u16 = 3;
pub const TICK_RATE_MS: u64 = 250;

// Environment
pub const ENV_BACKEND_URL: &str = "CAR_ASSISTANT_BACKEND_URL";
pub const ENV_LOG_LEVEL: &str = "CAR_ASSISTANT_LOG";
pub const LOG_BASENAME: &str = "car-assistant";
