//! 棋子与格子定义

use std::fmt;
use std::str::FromStr;

use crate::constants::{BOARD_SIZE, FILES};
use crate::error::ProtocolError;

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// 协议中使用的小写名称
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// 白方（先手）
    White,
    /// 黑方
    Black,
}

impl Color {
    /// 协议中使用的小写名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// 该阵营兵的升变行（白方第 8 横线，黑方第 1 横线）
    pub fn promotion_row(&self) -> u8 {
        match self {
            Color::White => (BOARD_SIZE - 1) as u8,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Color::White),
            "black" => Ok(Color::Black),
            _ => Err(()),
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

/// 棋子字符表：服务端传输的 Unicode 象棋符号与 (类型, 阵营) 一一对应
const GLYPHS: [(&str, Piece); 12] = [
    ("♙", Piece::new(PieceKind::Pawn, Color::White)),
    ("♖", Piece::new(PieceKind::Rook, Color::White)),
    ("♘", Piece::new(PieceKind::Knight, Color::White)),
    ("♗", Piece::new(PieceKind::Bishop, Color::White)),
    ("♕", Piece::new(PieceKind::Queen, Color::White)),
    ("♔", Piece::new(PieceKind::King, Color::White)),
    ("♟", Piece::new(PieceKind::Pawn, Color::Black)),
    ("♜", Piece::new(PieceKind::Rook, Color::Black)),
    ("♞", Piece::new(PieceKind::Knight, Color::Black)),
    ("♝", Piece::new(PieceKind::Bishop, Color::Black)),
    ("♛", Piece::new(PieceKind::Queen, Color::Black)),
    ("♚", Piece::new(PieceKind::King, Color::Black)),
];

impl Piece {
    /// 创建新棋子
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// 从服务端字符解析，未知字符视为空格子
    pub fn from_glyph(glyph: &str) -> Option<Piece> {
        GLYPHS
            .iter()
            .find(|(g, _)| *g == glyph)
            .map(|(_, piece)| *piece)
    }

    /// 获取服务端字符
    pub fn glyph(&self) -> &'static str {
        GLYPHS
            .iter()
            .find(|(_, piece)| piece == self)
            .map(|(g, _)| *g)
            .unwrap_or(crate::constants::EMPTY_GLYPH)
    }

    /// 是否为指定阵营的指定棋子
    pub fn is(&self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// 兵升变可选棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Queen,
    Bishop,
    Knight,
    Rook,
}

impl PromotionPiece {
    /// 所有选项（按界面展示顺序）
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
        PromotionPiece::Rook,
    ];

    pub fn as_str(&self) -> &'static str {
        self.kind().name()
    }

    pub fn kind(&self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Rook => PieceKind::Rook,
        }
    }
}

impl fmt::Display for PromotionPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionPiece {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromotionPiece::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ProtocolError::InvalidPromotion(s.to_string()))
    }
}

/// 棋盘格子
///
/// `row` 为横线减一（第 1 横线为 0），`col` 为列字母索引（a 为 0）。
/// 每个坐标恰好对应一个记号，如 `(0, 0)` 对应 `a1`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// 创建新格子
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新格子（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 从记号解析，如 `e4`
    pub fn from_notation(s: &str) -> Result<Self, ProtocolError> {
        let invalid = || ProtocolError::InvalidSquare(s.to_string());
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let col = FILES.iter().position(|&f| f == file).ok_or_else(invalid)?;
        let rank = rank.to_digit(10).filter(|&r| r >= 1).ok_or_else(invalid)?;
        Self::new(rank as u8 - 1, col as u8).ok_or_else(invalid)
    }

    /// 转换为记号
    pub fn notation(&self) -> String {
        self.to_string()
    }

    /// 列字母
    pub fn file(&self) -> char {
        FILES[self.col as usize]
    }

    /// 横线数字（1-8）
    pub fn rank(&self) -> u8 {
        self.row + 1
    }

    /// 遍历全部 64 个格子
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square::new_unchecked(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_notation(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_table_round_trip() {
        for (glyph, piece) in GLYPHS {
            assert_eq!(Piece::from_glyph(glyph), Some(piece));
            assert_eq!(piece.glyph(), glyph);
        }
    }

    #[test]
    fn test_unknown_glyph_is_empty() {
        assert_eq!(Piece::from_glyph("⬛"), None);
        assert_eq!(Piece::from_glyph(""), None);
        assert_eq!(Piece::from_glyph("K"), None);
    }

    #[test]
    fn test_glyph_colors() {
        assert_eq!(
            Piece::from_glyph("♔"),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            Piece::from_glyph("♟"),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
    }

    #[test]
    fn test_square_notation_bijection() {
        for sq in Square::all() {
            let notation = sq.notation();
            let parsed = Square::from_notation(&notation).unwrap();
            assert_eq!(parsed, sq);
            assert_eq!(parsed.notation(), notation);
        }
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_square_corners() {
        assert_eq!(Square::new_unchecked(0, 0).notation(), "a1");
        assert_eq!(Square::new_unchecked(7, 7).notation(), "h8");
        assert_eq!(Square::new_unchecked(3, 4).notation(), "e4");
        assert_eq!("e2".parse::<Square>().unwrap(), Square::new_unchecked(1, 4));
    }

    #[test]
    fn test_square_invalid() {
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert!(Square::from_notation("i1").is_err());
        assert!(Square::from_notation("a0").is_err());
        assert!(Square::from_notation("a9").is_err());
        assert!(Square::from_notation("a10").is_err());
        assert!(Square::from_notation("").is_err());
        assert!(Square::from_notation("E2").is_err());
    }

    #[test]
    fn test_promotion_piece_parse() {
        assert_eq!("queen".parse::<PromotionPiece>().unwrap(), PromotionPiece::Queen);
        assert_eq!("rook".parse::<PromotionPiece>().unwrap(), PromotionPiece::Rook);
        assert!("king".parse::<PromotionPiece>().is_err());
        assert!("pawn".parse::<PromotionPiece>().is_err());
    }

    #[test]
    fn test_color() {
        assert_eq!("black".parse::<Color>(), Ok(Color::Black));
        assert!("red".parse::<Color>().is_err());
        assert_eq!(Color::White.promotion_row(), 7);
        assert_eq!(Color::Black.promotion_row(), 0);
    }
}
