pub mod add;
pub mod list;
pub mod rm;
pub mod stats;
