pub mod admin;
pub mod article;
pub mod career_history;
pub mod game;
pub mod instructor;
pub mod instructor_game;
