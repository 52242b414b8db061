pub mod dom_view;
pub mod file_input;
