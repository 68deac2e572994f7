//! 输入处理
//!
//! 终端中的一行输入对应一次用户操作：
//! `e2` / `click e2` 点击格子，`promote queen` 选择升变，
//! `refresh` 重新同步，`help` 显示帮助，`quit` 退出。

use protocol::{PromotionPiece, Square};
use thiserror::Error;

/// 帮助文本
pub const HELP: &str = "commands: <square> | click <square> | promote <queen|bishop|knight|rook> | refresh | help | quit";

/// 用户操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput {
    Click(Square),
    Promote(PromotionPiece),
    Refresh,
    Help,
    Quit,
}

/// 输入错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("empty input")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid promotion piece: {0}")]
    InvalidPromotion(String),
}

impl UserInput {
    /// 解析一行输入
    pub fn parse(line: &str) -> Result<UserInput, InputError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(InputError::Empty);
        };
        let head = head.to_ascii_lowercase();

        match head.as_str() {
            "click" => {
                let arg = words.next().ok_or(InputError::MissingArgument("click"))?;
                Self::parse_square(arg)
            }
            "promote" => {
                let arg = words.next().ok_or(InputError::MissingArgument("promote"))?;
                arg.to_ascii_lowercase()
                    .parse()
                    .map(UserInput::Promote)
                    .map_err(|_| InputError::InvalidPromotion(arg.to_string()))
            }
            "refresh" => Ok(UserInput::Refresh),
            "help" | "?" => Ok(UserInput::Help),
            "quit" | "exit" => Ok(UserInput::Quit),
            _ if head.len() == 2 => Self::parse_square(&head),
            _ => Err(InputError::UnknownCommand(head)),
        }
    }

    fn parse_square(arg: &str) -> Result<UserInput, InputError> {
        Square::from_notation(&arg.to_ascii_lowercase())
            .map(UserInput::Click)
            .map_err(|_| InputError::InvalidSquare(arg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_notation(s).unwrap()
    }

    #[test]
    fn test_parse_click() {
        assert_eq!(UserInput::parse("e2"), Ok(UserInput::Click(sq("e2"))));
        assert_eq!(UserInput::parse("  click E4 "), Ok(UserInput::Click(sq("e4"))));
        assert_eq!(
            UserInput::parse("z9"),
            Err(InputError::InvalidSquare("z9".to_string()))
        );
        assert_eq!(
            UserInput::parse("click"),
            Err(InputError::MissingArgument("click"))
        );
    }

    #[test]
    fn test_parse_promote() {
        assert_eq!(
            UserInput::parse("promote queen"),
            Ok(UserInput::Promote(PromotionPiece::Queen))
        );
        assert_eq!(
            UserInput::parse("promote king"),
            Err(InputError::InvalidPromotion("king".to_string()))
        );
    }

    #[test]
    fn test_parse_other() {
        assert_eq!(UserInput::parse("refresh"), Ok(UserInput::Refresh));
        assert_eq!(UserInput::parse("quit"), Ok(UserInput::Quit));
        assert_eq!(UserInput::parse("help"), Ok(UserInput::Help));
        assert_eq!(UserInput::parse(""), Err(InputError::Empty));
        assert_eq!(
            UserInput::parse("resign"),
            Err(InputError::UnknownCommand("resign".to_string()))
        );
    }
}
