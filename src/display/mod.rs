pub mod select;
pub mod ui;
