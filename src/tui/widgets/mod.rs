pub mod number_input;
