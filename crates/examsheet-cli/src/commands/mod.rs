pub mod convert;
pub mod grade;
pub mod init;
pub mod render;
pub mod validate;
