/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Remote API defaults
pub const DEFAULT_API_BASE_URL: &str = "https://api.arasaac.org/v1";
pub const DEFAULT_LANGUAGE: &str = "es";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// Search defaults
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;
pub const DEFAULT_MAX_RESULTS: usize = 8;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

// Selection defaults
pub const DEFAULT_SELECTION_CAPACITY: usize = 5;

// Image defaults
pub const DEFAULT_IMAGE_SIZE: u32 = 500;
