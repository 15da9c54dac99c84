pub mod admin;
pub mod article;
pub mod image;
pub mod instructor;
pub mod relay;
