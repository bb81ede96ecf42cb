pub mod format_utils;
pub mod log_utils;
pub mod time_utils;

pub use format_utils::{format_amount, format_currency, format_percent};
pub use log_utils::{build_log_config, init_logging};
pub use time_utils::{de_opt_timestamp, de_timestamp, parse_timestamp};
