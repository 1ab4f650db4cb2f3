use serde::{Deserialize, Serialize};

/// 系统级卸载命令
///
/// 优先使用结构化的程序加参数形式；仅当语法无法拆分为固定参数
/// 向量时（如 WMI 查询），退化为整行 shell 命令。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UninstallCommand {
    /// 结构化调用
    Exec { program: String, args: Vec<String> },
    /// 不可拆分的整行命令
    Shell(String),
}

impl UninstallCommand {
    pub fn exec(program: &str, args: &[&str]) -> Self {
        Self::Exec {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// 供日志与确认提示展示的单行形式
    pub fn display_line(&self) -> String {
        match self {
            UninstallCommand::Exec { program, args } => {
                let mut parts = vec![program.clone()];
                parts.extend(args.iter().map(|a| quote_arg(a)));
                parts.join(" ")
            }
            UninstallCommand::Shell(line) => line.clone(),
        }
    }
}

impl std::fmt::Display for UninstallCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_line())
    }
}

/// 含空白的参数加引号，保证展示行可读
fn quote_arg(arg: &str) -> String {
    if arg.contains(char::is_whitespace) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}
