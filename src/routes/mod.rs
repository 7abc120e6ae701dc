pub mod health;
pub mod race;
pub mod track;
