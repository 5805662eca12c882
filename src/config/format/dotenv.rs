//! .env 格式解析器 (简单原则：透明的文本解析)

use crate::error::{LaunchError, Result};

/// .env 格式解析器
#[derive(Default)]
pub struct DotenvParser;

impl DotenvParser {
    /// 解析 .env 文件内容
    ///
    /// 规则：
    /// - 忽略空行和以 # 开头的注释行
    /// - 格式：KEY=VALUE，允许 `export KEY=VALUE`
    /// - VALUE 可以包含空格，无需引号；成对的单/双引号会被去掉
    /// - 支持多行值（以 \ 结尾）
    ///
    /// # Errors
    ///
    /// Returns parsing errors for invalid format.
    pub fn parse(content: &str) -> Result<Vec<(String, String)>> {
        let mut vars = Vec::new();

        let lines: Vec<&str> = content.lines().collect();
        let mut line_num = 0;

        while line_num < lines.len() {
            let line = lines[line_num].trim();

            if line.is_empty() || line.starts_with('#') {
                line_num += 1;
                continue;
            }

            let mut value_end = line_num;
            let mut complete_line = line.to_string();

            while complete_line.ends_with('\\') && value_end + 1 < lines.len() {
                complete_line.pop();
                value_end += 1;
                complete_line.push_str(lines[value_end].trim());
            }

            line_num = value_end + 1;

            let entry = complete_line
                .strip_prefix("export ")
                .unwrap_or(&complete_line);

            // 不是 KEY=VALUE 格式的行直接跳过，保持兼容性
            if let Some((key, value)) = entry.split_once('=') {
                let key = key.trim();

                if key.is_empty() {
                    return Err(LaunchError::Parse(format!("空的键名在行 '{complete_line}'")));
                }

                vars.push((key.to_string(), unquote(value.trim()).to_string()));
            }
        }

        Ok(vars)
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let content = r"
# 注释会被忽略
SUPABASE_URL=example.supabase.co
SUPABASE_KEY=anon
        ";

        let result = DotenvParser::parse(content).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0, "SUPABASE_URL");
        assert_eq!(result[0].1, "example.supabase.co");
    }

    #[test]
    fn test_parse_empty_value() {
        let content = "KEY=\nKEY2=value";
        let result = DotenvParser::parse(content).unwrap();
        assert_eq!(result[0].1, "");
    }

    #[test]
    fn test_parse_export_and_quotes() {
        let content = "export A=\"quoted value\"\nB='single'\nC=\"";
        let result = DotenvParser::parse(content).unwrap();
        assert_eq!(result[0], ("A".to_string(), "quoted value".to_string()));
        assert_eq!(result[1].1, "single");
        assert_eq!(result[2].1, "\"");
    }

    #[test]
    fn test_parse_continuation() {
        let content = "LONG=abc\\\ndef";
        let result = DotenvParser::parse(content).unwrap();
        assert_eq!(result[0].1, "abcdef");
    }

    #[test]
    fn test_parse_empty_key_is_error() {
        assert!(DotenvParser::parse("=value").is_err());
    }
}
