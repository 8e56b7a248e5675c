use std::fmt;

/// 核心操作的统一错误。
/// 核心自己从不打印，向用户的呈现交给外层调用者。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    NotFound,
    AlreadyExists,
    /// 请求的文件大小超过当前剩余容量
    InsufficientSpace,
    /// 簇表扫描不到任何空闲簇
    OutOfSpace,
    InvalidArgument,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::NotFound => "no such file or directory",
            Error::AlreadyExists => "name already exists",
            Error::InsufficientSpace => "not enough free storage",
            Error::OutOfSpace => "no free cluster left",
            Error::InvalidArgument => "invalid argument",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}
