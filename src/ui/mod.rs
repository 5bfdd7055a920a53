pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, header, info, is_quiet, section, success, summary_row, warn};
pub use table::{leagues_table, pairs_table, stats_table, teams_table};
pub use theme::{theme, Theme};
