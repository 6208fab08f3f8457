// Conversation text
pub const GREETING: &str = "👋 Hello! How can I help you today?";
pub const FALLBACK_REPLY: &str = "🤖 Sorry, I didn’t get that.";
pub const SERVER_ERROR_REPLY: &str = "⚠️ Server error.";
pub const TYPING_LABEL: &str = "Thinking ...";
pub const INPUT_PLACEHOLDER: &str = "Type a message...";

// Widget chrome
pub const LAUNCHER_ICON: &str = "💬";
pub const CLOSE_ICON: &str = "✖";
pub const SEND_ICON: &str = "➤";
pub const AVATAR_ICON: &str = "🤖";
pub const BROKEN_IMAGE_ICON: &str = "▢";
pub const MORE_ICON: &str = "…";
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

// Layout
pub const PANEL_MAX_WIDTH: u16 = 64;
pub const LAUNCHER_WIDTH: u16 = 6;
pub const LAUNCHER_HEIGHT: u16 = 3;
/// Bubbles take at most 85% of the message body width.
pub const BUBBLE_WIDTH_PERCENT: u16 = 85;
pub const MAX_QUICK_REPLIES: usize = 12;

// Timing
pub const TICK_RATE_MS: u64 = 80;
pub const INPUT_POLL_MS: u64 = 50;

// Environment / files
pub const WEBHOOK_URL_ENV: &str = "HOOKCHAT_WEBHOOK_URL";
pub const CONFIG_DIR_NAME: &str = "hookchat";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_LOG_FILE: &str = "hookchat.log";
pub const DEFAULT_CODE_THEME: &str = "base16-ocean.dark";
