/// Password assigned to newly created users.
pub const DEFAULT_PASSWORD: &str = "welcome1234";

/// Token type returned on login.
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Configuration key holding the password hashing cost.
pub const AUTH_ITERATIONS_KEY: &str = "WW_AUTH_ITERATIONS";

/// Configuration key holding the generative endpoint URL.
pub const GENAI_BASE_URL_KEY: &str = "WW_GENAI_BASE_URL";
