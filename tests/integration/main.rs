mod common;

mod article;
mod image;
mod instructor;
mod sweep;
