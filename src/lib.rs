//! Finds which hosts of an IPv4 block have any of a set of TCP ports open.

#[cfg(not(target_os = "linux"))]
std::compile_error!("linux is the only target os that was tested");

pub mod config;
pub mod error;
pub mod limits;
pub mod logger;
pub mod report;
pub mod scan;
pub mod subnet;
