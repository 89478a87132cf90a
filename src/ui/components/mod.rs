pub mod toast;
pub mod value_table;
