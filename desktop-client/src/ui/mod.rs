mod snake_ui;

pub use snake_ui::SnakeApp;
