pub mod constants;
pub mod layout;
pub mod markup;
pub mod render;
