pub(crate) mod batch;
pub(crate) mod dispatch;
pub mod tick;
