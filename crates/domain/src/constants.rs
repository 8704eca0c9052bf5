//! Application constants
//!
//! Centralized location for bot commands, user-facing copy and the fixed
//! values the Google APIs expect.

// Bot commands
pub const CMD_LOGIN: &str = "login";

// Bot copy
pub const LOGIN_PROMPT_TEXT: &str = "To see your calendar summary, please sign in!";
pub const SUGGESTIONS_FALLBACK_TEXT: &str = "Your device does not support suggestions";
pub const ECHO_PREFIX: &str = "Hey! Here's the message you sent:\n\n";
pub const BUSY_DAY_WARNING_TEXT: &str = "Looks like you have a lot of meetings today!";
pub const SUMMARY_HEADER_TEXT: &str = "Here's the list of items or your calendar...";
pub const REPLAY_SUGGESTION_TEXT: &str = "Let's do it again!";

/// More retained events than this triggers the busy-day warning.
pub const BUSY_DAY_THRESHOLD: usize = 4;

// OAuth scopes requested from the user during sign-in
pub const SCOPE_PROFILE: &str = "profile";
pub const SCOPE_CALENDAR_READONLY: &str = "https://www.googleapis.com/auth/calendar.readonly";

/// Scope of the service account that talks to Business Messages.
pub const SCOPE_BUSINESS_MESSAGES: &str = "https://www.googleapis.com/auth/businessmessages";

// Representative identity shown next to every bot message
pub const REPRESENTATIVE_TYPE_BOT: &str = "BOT";
pub const REPRESENTATIVE_DISPLAY_NAME: &str = "BM gCal Assistant";
pub const REPRESENTATIVE_AVATAR_URL: &str = "https://lh3.googleusercontent.com/9PMLInqtfgnRnV-9QUgYj8W-ZAutv-49KsYmHthZayM9YnCsd01P0eNhbqtu9QoIF31tKzgwo-x1oCkVIQas5Q";

// Calendar query window
pub const CALENDAR_ID_PRIMARY: &str = "primary";
pub const DAY_WINDOW_START: &str = "06:00:00";
pub const DAY_WINDOW_END: &str = "23:59:59";
pub const DEFAULT_UTC_OFFSET: &str = "-07:00";

/// Format of the first 19 characters of an event's `start.dateTime`.
pub const EVENT_START_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// Webhook acknowledgements
pub const WEBHOOK_ACK: &str = "Response.";
pub const WEBHOOK_WRONG_METHOD: &str = "This webhook expects a POST request.";

// Google endpoints
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
pub const DEFAULT_MESSAGING_API_BASE: &str = "https://businessmessages.googleapis.com/v1";
pub const DEFAULT_SERVICE_ACCOUNT_PATH: &str =
    "resources/bm-agent-service-account-credentials.json";
