/// Image listing command handlers
pub mod images;
