pub mod animation;
pub mod widget;
