pub mod charts;
pub mod panels;
pub mod report;
