pub mod date_utils;
pub mod format_utils;
pub mod path_utils;
