pub mod column_picker;
pub mod input_buffer;
