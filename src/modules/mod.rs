pub mod cleaner;
pub mod common;
pub mod platform;
pub mod remover;
pub mod scanner;
pub mod system;
pub mod uninstaller;
