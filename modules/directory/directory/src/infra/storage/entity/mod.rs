pub mod contact;
pub mod membership;
pub mod permission;
