pub mod init;
pub mod issues;
