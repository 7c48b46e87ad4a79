pub mod confusion;
pub mod layout;
pub mod shape;
