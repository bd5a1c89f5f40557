pub const APP_IDENTIFIER: &str = "ai-review-pr";
pub const CONFIG_DIR_NAME: &str = APP_IDENTIFIER;
pub const KEYRING_SERVICE_NAME: &str = APP_IDENTIFIER;
pub const KEYRING_ACCOUNT: &str = "raygun";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCAL_CONFIG_FILE_NAME: &str = ".ai-review-pr.toml";
pub const DEFAULT_API_URL: &str = "https://api.raygun.com/v3";

// Assistant
pub const DEFAULT_ASSISTANT_BINARY: &str = "claude";
pub const DEFAULT_REVIEW_MODEL: &str = "Sonnet";
pub const DEFAULT_ERRORS_MODEL: &str = "Haiku";
pub const DEFAULT_TARGET_BRANCH: &str = "main";
pub const DEFAULT_APPLICATION_COUNT: u32 = 20;

// Output files, written by the assistant into the repository root
pub const REVIEW_FILE_NAME: &str = "Review.md";
pub const ERROR_FILE_NAME: &str = "RaygunError.md";

// Display constants
pub const MAX_MESSAGE_WIDTH: usize = 80;
pub const ACTIVE_STATUS: &str = "active";
