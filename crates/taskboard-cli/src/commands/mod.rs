pub mod add;
pub mod day;
pub mod delete;
pub mod r#do;
pub mod edit;
pub mod end;
pub mod export;
pub mod labels;
pub mod list;
pub mod preview;
