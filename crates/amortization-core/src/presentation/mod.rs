pub mod chart;
pub mod table;
pub mod view;

pub use chart::ChartSeries;
pub use table::{format_currency, schedule_rows, ScheduleRow, TABLE_HEADERS};
pub use view::{RenderTarget, ScheduleSnapshot, ScheduleView};
