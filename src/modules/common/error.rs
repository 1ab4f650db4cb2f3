use thiserror::Error;

#[derive(Error, Debug)]
#[allow(dead_code)]
pub enum UninstallerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("文件系统错误: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("权限不足: {0}")]
    PermissionDenied(String),

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("超时: {0}")]
    Timeout(String),

    #[error("命令执行失败: {0}")]
    Execution(String),

    #[error("其他错误: {0}")]
    Other(String),
}
