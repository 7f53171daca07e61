//! Presentation of reports and records (console text, spreadsheet)

pub mod currency;
pub mod spreadsheet;
pub mod text;

pub use currency::format_currency;

/// Day-first date used in headings, e.g. `04/03/2024`
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
/// Date and time used in tables, e.g. `04/03/2024 10:30`
pub const DISPLAY_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";
