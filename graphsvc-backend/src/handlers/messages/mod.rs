pub mod add;
pub mod dto;
