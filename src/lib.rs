//! propreg
//!
//! 钱包认证的不动产登记客户端：进程启动、配置、日志与交互式命令行。

pub mod bootstrap;
pub mod cli;
pub mod render;
pub mod shell;
