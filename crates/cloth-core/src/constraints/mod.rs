pub mod contact;
pub mod stretch;
