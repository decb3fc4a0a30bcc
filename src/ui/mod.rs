pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{amount, error, header, info, section, success, summary_row};
pub use table::{invoice_table, search_table, TableBuilder};
pub use theme::{theme, Theme};
