pub mod metric;
pub mod record;
pub mod series;
