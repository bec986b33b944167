mod helpers;
mod minesweeper;
mod todo;
mod user_system;
