pub mod admin;
pub mod article;
pub mod instructor;
pub mod relay;
