use crate::attacks;
use crate::bitboard::BitBoard;
use crate::evaluation::params;
use crate::evaluation::score::Score;
use crate::moves::{GenMode, Move, MoveKind, MoveList};
use crate::search::zobrist;
use std::fmt;
use thiserror::Error;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A square index, `rank * 8 + file`, A1 = 0 and H8 = 63.
/// `Square::NONE` (64) is the "no square" sentinel used for en passant.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

#[rustfmt::skip]
impl Square {
    pub const A1: Square = Square(0);  pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);  pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);  pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);  pub const H1: Square = Square(7);
    pub const A2: Square = Square(8);  pub const B2: Square = Square(9);
    pub const E2: Square = Square(12); pub const C3: Square = Square(18);
    pub const E3: Square = Square(20); pub const F3: Square = Square(21);
    pub const D4: Square = Square(27); pub const E4: Square = Square(28);
    pub const D5: Square = Square(35); pub const E5: Square = Square(36);
    pub const E7: Square = Square(52); pub const G7: Square = Square(54);
    pub const A8: Square = Square(56); pub const B8: Square = Square(57);
    pub const C8: Square = Square(58); pub const D8: Square = Square(59);
    pub const E8: Square = Square(60); pub const F8: Square = Square(61);
    pub const G8: Square = Square(62); pub const H8: Square = Square(63);

    pub const NONE: Square = Square(64);
    pub const COUNT: usize = 64;
}

impl Square {
    #[inline(always)]
    pub const fn from_index(index: u8) -> Square {
        debug_assert!(index <= 64);
        Square(index)
    }

    #[inline(always)]
    pub const fn make(file: File, rank: Rank) -> Square {
        Square((rank.index() * 8 + file.index()) as u8)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn file(self) -> File {
        File(self.0 & 7)
    }

    #[inline(always)]
    pub const fn rank(self) -> Rank {
        Rank(self.0 >> 3)
    }

    #[inline(always)]
    pub const fn is_none(self) -> bool {
        self.0 == 64
    }

    /// The same square seen from the other side of the board.
    #[inline(always)]
    pub const fn flip_rank(self) -> Square {
        Square(self.0 ^ 56)
    }

    #[inline(always)]
    pub const fn mirror_file(self) -> Square {
        Square(self.0 ^ 7)
    }

    /// Moves the square one step in `dir` without bounds checking; callers
    /// must know the step stays on the board.
    #[inline(always)]
    pub const fn shifted(self, dir: Direction) -> Square {
        Square(self.0.wrapping_add(dir.offset() as u8))
    }

    /// Chebyshev (king-move) distance.
    #[inline]
    pub fn distance(a: Square, b: Square) -> u8 {
        let df = (a.file().index() as i8 - b.file().index() as i8).unsigned_abs();
        let dr = (a.rank().index() as i8 - b.rank().index() as i8).unsigned_abs();
        df.max(dr)
    }

    /// `7 - manhattan distance`; bigger means closer.
    #[inline]
    pub fn manhattan_closeness(a: Square, b: Square) -> i32 {
        let df = (a.file().index() as i32 - b.file().index() as i32).abs();
        let dr = (a.rank().index() as i32 - b.rank().index() as i32).abs();
        7 - (df + dr)
    }

    pub fn iter() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "-")
        } else {
            write!(
                f,
                "{}{}",
                (b'a' + self.0 % 8) as char,
                (b'1' + self.0 / 8) as char
            )
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct File(u8);

impl File {
    pub const A: File = File(0);
    pub const H: File = File(7);

    #[inline(always)]
    pub const fn from_index(index: u8) -> File {
        debug_assert!(index < 8);
        File(index)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Rank(u8);

impl Rank {
    pub const R1: Rank = Rank(0);
    pub const R2: Rank = Rank(1);
    pub const R3: Rank = Rank(2);
    pub const R4: Rank = Rank(3);
    pub const R5: Rank = Rank(4);
    pub const R6: Rank = Rank(5);
    pub const R7: Rank = Rank(6);
    pub const R8: Rank = Rank(7);

    #[inline(always)]
    pub const fn from_index(index: u8) -> Rank {
        debug_assert!(index < 8);
        Rank(index)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank `r` as seen by `side`: white ranks are absolute, black ranks
    /// count from the other end.
    #[inline(always)]
    pub const fn relative(side: Color, r: Rank) -> Rank {
        match side {
            Color::White => r,
            Color::Black => Rank(7 - r.0),
        }
    }
}

/// The eight compass directions as square-index offsets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline(always)]
    pub const fn offset(self) -> i8 {
        match self {
            Direction::North => 8,
            Direction::South => -8,
            Direction::East => 1,
            Direction::West => -1,
            Direction::NorthEast => 9,
            Direction::NorthWest => 7,
            Direction::SouthEast => -7,
            Direction::SouthWest => -9,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::NorthEast => 4,
            Direction::NorthWest => 5,
            Direction::SouthEast => 6,
            Direction::SouthWest => 7,
        }
    }

    #[inline(always)]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    #[inline(always)]
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The pawn-push direction for this side.
    #[inline(always)]
    pub const fn up(self) -> Direction {
        match self {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }

    #[inline(always)]
    pub const fn down(self) -> Direction {
        self.up().opposite()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum PieceType {
    None = 0,
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceType {
    pub const COUNT: usize = 7;

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn from_index(index: u8) -> PieceType {
        match index {
            1 => PieceType::Pawn,
            2 => PieceType::Knight,
            3 => PieceType::Bishop,
            4 => PieceType::Rook,
            5 => PieceType::Queen,
            6 => PieceType::King,
            _ => PieceType::None,
        }
    }
}

/// A colored piece, packed as `(color << 3) | piece_type`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece(u8);

impl Piece {
    pub const NONE: Piece = Piece(0);
    pub const COUNT: usize = 15;

    #[inline(always)]
    pub const fn new(color: Color, pt: PieceType) -> Piece {
        Piece(((color as u8) << 3) | pt as u8)
    }

    #[inline(always)]
    pub const fn color(self) -> Color {
        if self.0 & 8 != 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    #[inline(always)]
    pub const fn piece_type(self) -> PieceType {
        PieceType::from_index(self.0 & 7)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn is_none(self) -> bool {
        self.0 & 7 == 0
    }

    pub fn to_char(self) -> char {
        let ch = match self.piece_type() {
            PieceType::None => return '.',
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        if self.color() == Color::White {
            ch.to_ascii_uppercase()
        } else {
            ch
        }
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let pt = match ch.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece::new(color, pt))
    }
}

/// Castling permissions, one bit per side and wing.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const WHITE_KING: u8 = 1;
    pub const WHITE_QUEEN: u8 = 2;
    pub const BLACK_KING: u8 = 4;
    pub const BLACK_QUEEN: u8 = 8;
    pub const ALL: CastleRights = CastleRights(15);

    #[inline(always)]
    pub const fn has(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    #[inline(always)]
    pub const fn king_side(side: Color) -> u8 {
        match side {
            Color::White => Self::WHITE_KING,
            Color::Black => Self::BLACK_KING,
        }
    }

    #[inline(always)]
    pub const fn queen_side(side: Color) -> u8 {
        match side {
            Color::White => Self::WHITE_QUEEN,
            Color::Black => Self::BLACK_QUEEN,
        }
    }

    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn add(&mut self, mask: u8) {
        self.0 |= mask;
    }

    #[inline(always)]
    pub fn restrict(&mut self, keep: u8) {
        self.0 &= keep;
    }
}

/// Rights kept when a piece moves from, or is captured on, a square.
const CASTLE_KEEP_MASK: [u8; 64] = {
    let mut masks = [15u8; 64];
    masks[Square::A1.index()] = 15 - CastleRights::WHITE_QUEEN;
    masks[Square::E1.index()] = 15 - CastleRights::WHITE_QUEEN - CastleRights::WHITE_KING;
    masks[Square::H1.index()] = 15 - CastleRights::WHITE_KING;
    masks[Square::A8.index()] = 15 - CastleRights::BLACK_QUEEN;
    masks[Square::E8.index()] = 15 - CastleRights::BLACK_QUEEN - CastleRights::BLACK_KING;
    masks[Square::H8.index()] = 15 - CastleRights::BLACK_KING;
    masks
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameResult {
    None,
    WhiteWon,
    BlackWon,
    Draw,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN must have at least four fields, got {0}")]
    MissingFields(usize),
    #[error("bad piece placement: {0}")]
    BadPlacement(String),
    #[error("bad side to move: {0}")]
    BadSide(String),
    #[error("bad castling rights: {0}")]
    BadCastling(String),
    #[error("bad en passant square: {0}")]
    BadEnPassant(String),
    #[error("bad clock field: {0}")]
    BadClock(String),
    #[error("illegal position: {0}")]
    IllegalPosition(&'static str),
}

/// Per-ply undo record; the top of the stack is the live state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StateInfo {
    pub check_blockers: [BitBoard; 2],
    pub pinners: [BitBoard; 2],
    pub check_givers: BitBoard,
    /// Piece-square accumulation only; side/ep/castle terms are added by
    /// `compute_hash` at query time so the incremental xor stays trivial.
    pub hash: u64,
    /// Plies since the previous occurrence of this position, 0 if none.
    pub last_repetition: u16,
    pub moves_from_null: u32,
    pub ep: Square,
    pub captured: Piece,
    pub fifty_rule: u8,
    pub castle_rights: CastleRights,
}

impl Default for StateInfo {
    fn default() -> Self {
        StateInfo {
            check_blockers: [BitBoard::EMPTY; 2],
            pinners: [BitBoard::EMPTY; 2],
            check_givers: BitBoard::EMPTY,
            hash: 0,
            last_repetition: 0,
            moves_from_null: 0,
            ep: Square::NONE,
            captured: Piece::NONE,
            fifty_rule: 0,
            castle_rights: CastleRights::NONE,
        }
    }
}

/// The chessboard and everything needed to play moves forward and back:
/// piece placement, bitboards per piece and color, the incrementally
/// maintained positional score and material phase, and the `StateInfo`
/// undo stack.
#[derive(Clone)]
pub struct Board {
    board: [Piece; 64],
    by_piece: [BitBoard; Piece::COUNT],
    by_color: [BitBoard; 2],
    states: Vec<StateInfo>,
    material: [i32; 2],
    score: [Score; 2],
    move_count: u32,
    side: Color,
}

impl Board {
    pub fn start_position() -> Board {
        Board::from_fen(START_FEN).expect("the standard start position parses")
    }

    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::MissingFields(fields.len()));
        }

        let mut board = Board {
            board: [Piece::NONE; 64],
            by_piece: [BitBoard::EMPTY; Piece::COUNT],
            by_color: [BitBoard::EMPTY; 2],
            states: vec![StateInfo::default()],
            material: [0; 2],
            score: [Score::ZERO; 2],
            move_count: 0,
            side: Color::White,
        };

        // Piece placement, ranks 8 down to 1.
        let mut rank = 7i8;
        let mut file = 0i8;
        for ch in fields[0].chars() {
            match ch {
                '/' => {
                    if file != 8 {
                        return Err(FenError::BadPlacement(fields[0].to_string()));
                    }
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => file += ch as i8 - '0' as i8,
                _ => {
                    let piece = Piece::from_char(ch)
                        .ok_or_else(|| FenError::BadPlacement(fields[0].to_string()))?;
                    if rank < 0 || file > 7 {
                        return Err(FenError::BadPlacement(fields[0].to_string()));
                    }
                    let sq =
                        Square::make(File::from_index(file as u8), Rank::from_index(rank as u8));
                    board.put_piece(piece, sq);
                    board.states[0].hash ^= zobrist::piece_key(piece, sq);
                    file += 1;
                }
            }
        }
        if rank != 0 || file != 8 {
            return Err(FenError::BadPlacement(fields[0].to_string()));
        }

        board.side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSide(other.to_string())),
        };

        let mut rights = CastleRights::NONE;
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                match ch {
                    'K' => rights.add(CastleRights::WHITE_KING),
                    'Q' => rights.add(CastleRights::WHITE_QUEEN),
                    'k' => rights.add(CastleRights::BLACK_KING),
                    'q' => rights.add(CastleRights::BLACK_QUEEN),
                    _ => return Err(FenError::BadCastling(fields[2].to_string())),
                }
            }
        }
        // Rights only survive with king and rook on their home squares.
        let mut keep = 0u8;
        if board.piece_on(Square::E1) == Piece::new(Color::White, PieceType::King) {
            if board.piece_on(Square::H1) == Piece::new(Color::White, PieceType::Rook) {
                keep |= CastleRights::WHITE_KING;
            }
            if board.piece_on(Square::A1) == Piece::new(Color::White, PieceType::Rook) {
                keep |= CastleRights::WHITE_QUEEN;
            }
        }
        if board.piece_on(Square::E8) == Piece::new(Color::Black, PieceType::King) {
            if board.piece_on(Square::H8) == Piece::new(Color::Black, PieceType::Rook) {
                keep |= CastleRights::BLACK_KING;
            }
            if board.piece_on(Square::A8) == Piece::new(Color::Black, PieceType::Rook) {
                keep |= CastleRights::BLACK_QUEEN;
            }
        }
        rights.restrict(keep);
        board.states[0].castle_rights = rights;

        if fields[3] != "-" {
            let sq = parse_square(fields[3])
                .ok_or_else(|| FenError::BadEnPassant(fields[3].to_string()))?;
            if sq.rank() != Rank::relative(board.side, Rank::R6) {
                return Err(FenError::BadEnPassant(fields[3].to_string()));
            }
            board.states[0].ep = sq;
        }

        if let Some(half) = fields.get(4) {
            board.states[0].fifty_rule = half
                .parse::<u8>()
                .map_err(|_| FenError::BadClock(half.to_string()))?;
        }
        let full: u32 = match fields.get(5) {
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::BadClock(s.to_string()))?
                .max(1),
            None => 1,
        };
        board.move_count = (full - 1) * 2 + board.side.index() as u32;

        board.validate()?;
        board.update_internal_state();
        Ok(board)
    }

    fn validate(&self) -> Result<(), FenError> {
        for color in [Color::White, Color::Black] {
            if self.by_piece(Piece::new(color, PieceType::King)).popcount() != 1 {
                return Err(FenError::IllegalPosition("each side needs exactly one king"));
            }
        }
        if (self.by_piece_type(PieceType::Pawn) & (BitBoard::RANK_1 | BitBoard::RANK_8)).any() {
            return Err(FenError::IllegalPosition("pawn on a back rank"));
        }
        // The side that just moved must not have left its king in check.
        let them = self.side.opposite();
        if self
            .attackers_of(self.side, self.king_sq(them), self.all_pieces())
            .any()
        {
            return Err(FenError::IllegalPosition("side not to move is in check"));
        }
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::make(File::from_index(file), Rank::from_index(rank));
                let piece = self.board[sq.index()];
                if piece.is_none() {
                    empty += 1;
                } else {
                    if empty > 0 {
                        fen.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    fen.push(piece.to_char());
                }
            }
            if empty > 0 {
                fen.push((b'0' + empty) as char);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side == Color::White { 'w' } else { 'b' });

        fen.push(' ');
        let rights = self.castle_rights();
        if rights == CastleRights::NONE {
            fen.push('-');
        } else {
            if rights.has(CastleRights::WHITE_KING) {
                fen.push('K');
            }
            if rights.has(CastleRights::WHITE_QUEEN) {
                fen.push('Q');
            }
            if rights.has(CastleRights::BLACK_KING) {
                fen.push('k');
            }
            if rights.has(CastleRights::BLACK_QUEEN) {
                fen.push('q');
            }
        }

        fen.push(' ');
        fen.push_str(&self.ep().to_string());
        fen.push(' ');
        fen.push_str(&self.fifty_rule().to_string());
        fen.push(' ');
        fen.push_str(&(self.move_count / 2 + 1).to_string());
        fen
    }

    ///  ACCESSORS  ///

    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    #[inline(always)]
    pub fn by_piece(&self, piece: Piece) -> BitBoard {
        self.by_piece[piece.index()]
    }

    #[inline(always)]
    pub fn by_color(&self, color: Color) -> BitBoard {
        self.by_color[color.index()]
    }

    #[inline(always)]
    pub fn all_pieces(&self) -> BitBoard {
        self.by_color[0] | self.by_color[1]
    }

    #[inline(always)]
    pub fn by_piece_type(&self, pt: PieceType) -> BitBoard {
        self.by_piece(Piece::new(Color::White, pt)) | self.by_piece(Piece::new(Color::Black, pt))
    }

    #[inline(always)]
    pub fn pawns(&self, color: Color) -> BitBoard {
        self.by_piece(Piece::new(color, PieceType::Pawn))
    }

    #[inline(always)]
    pub fn knights(&self, color: Color) -> BitBoard {
        self.by_piece(Piece::new(color, PieceType::Knight))
    }

    #[inline(always)]
    pub fn bishops(&self, color: Color) -> BitBoard {
        self.by_piece(Piece::new(color, PieceType::Bishop))
    }

    #[inline(always)]
    pub fn rooks(&self, color: Color) -> BitBoard {
        self.by_piece(Piece::new(color, PieceType::Rook))
    }

    #[inline(always)]
    pub fn queens(&self, color: Color) -> BitBoard {
        self.by_piece(Piece::new(color, PieceType::Queen))
    }

    #[inline(always)]
    pub fn rooks_and_queens(&self, color: Color) -> BitBoard {
        self.rooks(color) | self.queens(color)
    }

    #[inline(always)]
    pub fn bishops_and_queens(&self, color: Color) -> BitBoard {
        self.bishops(color) | self.queens(color)
    }

    #[inline(always)]
    pub fn king_sq(&self, color: Color) -> Square {
        self.by_piece(Piece::new(color, PieceType::King)).lsb()
    }

    #[inline(always)]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline(always)]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Non-pawn material in phase units (minor 3, rook 5, queen 9).
    #[inline(always)]
    pub fn material(&self, color: Color) -> i32 {
        self.material[color.index()]
    }

    #[inline(always)]
    pub fn score(&self, color: Color) -> Score {
        self.score[color.index()]
    }

    /// True when the side owns anything beyond king and pawns.
    #[inline(always)]
    pub fn has_non_pawns(&self, color: Color) -> bool {
        self.material[color.index()] != 0
    }

    /// All of one side's bishops stand on same-colored squares.
    pub fn has_only_same_colored_bishops(&self, color: Color) -> bool {
        let bishops = self.bishops(color);
        (bishops & BitBoard::LIGHT_SQUARES) == bishops
            || (bishops & BitBoard::DARK_SQUARES) == bishops
    }

    /// The side has bishops on both square colors.
    pub fn has_different_colored_bishops(&self, color: Color) -> bool {
        let bishops = self.bishops(color);
        (bishops & BitBoard::LIGHT_SQUARES).any() && (bishops & BitBoard::DARK_SQUARES).any()
    }

    #[inline(always)]
    pub fn state(&self) -> &StateInfo {
        self.states.last().expect("the state stack is never empty")
    }

    #[inline(always)]
    fn state_mut(&mut self) -> &mut StateInfo {
        self.states.last_mut().expect("the state stack is never empty")
    }

    #[inline(always)]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    #[inline(always)]
    pub fn ep(&self) -> Square {
        self.state().ep
    }

    #[inline(always)]
    pub fn castle_rights(&self) -> CastleRights {
        self.state().castle_rights
    }

    #[inline(always)]
    pub fn fifty_rule(&self) -> u8 {
        self.state().fifty_rule
    }

    #[inline(always)]
    pub fn check_givers(&self) -> BitBoard {
        self.state().check_givers
    }

    #[inline(always)]
    pub fn check_blockers(&self, color: Color) -> BitBoard {
        self.state().check_blockers[color.index()]
    }

    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.state().check_givers.any()
    }

    /// The stored piece hash plus the side/ep/castle terms.
    pub fn compute_hash(&self) -> u64 {
        let st = self.state();
        let mut hash = st.hash;
        if self.side == Color::Black {
            hash ^= zobrist::SIDE_KEY;
        }
        if !st.ep.is_none() {
            hash ^= zobrist::EP_KEYS[st.ep.file().index()];
        }
        hash ^ zobrist::CASTLE_KEYS[st.castle_rights.bits() as usize]
    }

    /// Recomputes the full hash from the piece placement; used to validate
    /// the incremental xor.
    pub fn hash_from_scratch(&self) -> u64 {
        let mut hash = 0u64;
        for sq in Square::iter() {
            let piece = self.board[sq.index()];
            if !piece.is_none() {
                hash ^= zobrist::piece_key(piece, sq);
            }
        }
        if self.side == Color::Black {
            hash ^= zobrist::SIDE_KEY;
        }
        let st = self.state();
        if !st.ep.is_none() {
            hash ^= zobrist::EP_KEYS[st.ep.file().index()];
        }
        hash ^ zobrist::CASTLE_KEYS[st.castle_rights.bits() as usize]
    }

    ///  ATTACK QUERIES  ///

    /// Pieces of `side` attacking `sq` under the given occupancy.
    pub fn attackers_of(&self, side: Color, sq: Square, occ: BitBoard) -> BitBoard {
        let t = attacks::tables();
        (t.pawn_attacks(side.opposite(), sq) & self.pawns(side))
            | (t.pseudo(PieceType::Knight, sq) & self.knights(side))
            | (t.pseudo(PieceType::King, sq) & self.by_piece(Piece::new(side, PieceType::King)))
            | (t.bishop_attacks(sq, occ) & self.bishops_and_queens(side))
            | (t.rook_attacks(sq, occ) & self.rooks_and_queens(side))
    }

    /// Attackers of both colors.
    pub fn all_attackers_of(&self, sq: Square, occ: BitBoard) -> BitBoard {
        self.attackers_of(Color::White, sq, occ) | self.attackers_of(Color::Black, sq, occ)
    }

    ///  MOVE MAKING  ///

    fn put_piece(&mut self, piece: Piece, sq: Square) {
        debug_assert!(self.board[sq.index()].is_none());
        self.board[sq.index()] = piece;
        self.by_piece[piece.index()].set(sq);
        self.by_color[piece.color().index()].set(sq);
        self.score[piece.color().index()] += params::pst(piece, sq);
        self.material[piece.color().index()] += params::phase_units(piece.piece_type());
    }

    fn remove_piece(&mut self, sq: Square) -> Piece {
        let piece = self.board[sq.index()];
        debug_assert!(!piece.is_none());
        self.board[sq.index()] = Piece::NONE;
        self.by_piece[piece.index()].clear(sq);
        self.by_color[piece.color().index()].clear(sq);
        self.score[piece.color().index()] -= params::pst(piece, sq);
        self.material[piece.color().index()] -= params::phase_units(piece.piece_type());
        piece
    }

    fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.board[from.index()];
        debug_assert!(!piece.is_none() && self.board[to.index()].is_none());
        self.board[from.index()] = Piece::NONE;
        self.board[to.index()] = piece;
        self.by_piece[piece.index()].move_bit(from, to);
        self.by_color[piece.color().index()].move_bit(from, to);
        self.score[piece.color().index()] += params::pst(piece, to) - params::pst(piece, from);
    }

    fn push_next_state(&mut self) {
        let prev = *self.state();
        self.states.push(StateInfo {
            castle_rights: prev.castle_rights,
            fifty_rule: prev.fifty_rule.saturating_add(1),
            moves_from_null: prev.moves_from_null + 1,
            hash: prev.hash,
            ..StateInfo::default()
        });
    }

    /// Plays a pseudo-legal move that passed `is_legal`.
    pub fn make_move(&mut self, m: Move) {
        debug_assert!(!m.is_null());
        let side = self.side;
        let them = side.opposite();
        let from = m.from();
        let to = m.to();
        let up = side.up();

        self.push_next_state();
        let moving = self.board[from.index()];

        match m.kind() {
            MoveKind::Normal => {
                let captured = self.board[to.index()];
                if !captured.is_none() {
                    self.remove_piece(to);
                    let st = self.state_mut();
                    st.captured = captured;
                    st.hash ^= zobrist::piece_key(captured, to);
                    st.fifty_rule = 0;
                }
                self.move_piece(from, to);
                self.state_mut().hash ^=
                    zobrist::piece_key(moving, from) ^ zobrist::piece_key(moving, to);

                if moving.piece_type() == PieceType::Pawn {
                    self.state_mut().fifty_rule = 0;
                    let delta = to.index() as i32 - from.index() as i32;
                    if delta == 2 * up.offset() as i32 {
                        self.state_mut().ep = from.shifted(up);
                    }
                }
            }
            MoveKind::Promotion => {
                let captured = self.board[to.index()];
                if !captured.is_none() {
                    self.remove_piece(to);
                    let st = self.state_mut();
                    st.captured = captured;
                    st.hash ^= zobrist::piece_key(captured, to);
                }
                let promoted = Piece::new(side, m.promotion());
                self.remove_piece(from);
                self.put_piece(promoted, to);
                let st = self.state_mut();
                st.hash ^= zobrist::piece_key(moving, from) ^ zobrist::piece_key(promoted, to);
                st.fifty_rule = 0;
            }
            MoveKind::EnPassant => {
                let cap_sq = to.shifted(side.down());
                let captured = self.remove_piece(cap_sq);
                self.move_piece(from, to);
                let st = self.state_mut();
                st.captured = captured;
                st.hash ^= zobrist::piece_key(captured, cap_sq)
                    ^ zobrist::piece_key(moving, from)
                    ^ zobrist::piece_key(moving, to);
                st.fifty_rule = 0;
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = castle_rook_squares(side, to);
                let rook = self.board[rook_from.index()];
                self.move_piece(from, to);
                self.move_piece(rook_from, rook_to);
                let st = self.state_mut();
                st.hash ^= zobrist::piece_key(moving, from)
                    ^ zobrist::piece_key(moving, to)
                    ^ zobrist::piece_key(rook, rook_from)
                    ^ zobrist::piece_key(rook, rook_to);
                st.fifty_rule = 0;
            }
        }

        let keep = CASTLE_KEEP_MASK[from.index()] & CASTLE_KEEP_MASK[to.index()];
        self.state_mut().castle_rights.restrict(keep);

        self.side = them;
        self.move_count += 1;

        self.detect_repetition();
        self.update_internal_state();
    }

    /// Reverts the last `make_move`.
    pub fn unmake_move(&mut self, m: Move) {
        debug_assert!(self.states.len() > 1, "unmake with an empty move stack");
        let st = self.states.pop().expect("unmake with an empty move stack");
        self.side = self.side.opposite();
        self.move_count -= 1;

        let side = self.side;
        let from = m.from();
        let to = m.to();

        match m.kind() {
            MoveKind::Normal => {
                self.move_piece(to, from);
                if !st.captured.is_none() {
                    self.put_piece(st.captured, to);
                }
            }
            MoveKind::Promotion => {
                self.remove_piece(to);
                self.put_piece(Piece::new(side, PieceType::Pawn), from);
                if !st.captured.is_none() {
                    self.put_piece(st.captured, to);
                }
            }
            MoveKind::EnPassant => {
                self.move_piece(to, from);
                self.put_piece(st.captured, to.shifted(side.down()));
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = castle_rook_squares(side, to);
                self.move_piece(to, from);
                self.move_piece(rook_to, rook_from);
            }
        }
    }

    /// Skips the side to move. Never legal in a real game; the search is
    /// responsible for deciding when a null move is sound.
    pub fn make_null_move(&mut self) {
        self.side = self.side.opposite();
        self.push_next_state();
        let st = self.state_mut();
        st.hash ^= zobrist::NULL_MOVE_KEY;
        st.moves_from_null = 0;
        self.update_internal_state();
    }

    pub fn unmake_null_move(&mut self) {
        debug_assert!(self.states.len() > 1, "unmake null with an empty move stack");
        self.side = self.side.opposite();
        self.states.pop();
    }

    /// Scans the state stack for an earlier occurrence of the current
    /// position, two plies at a time and never past an irreversible move or
    /// a null move.
    fn detect_repetition(&mut self) {
        let top = self.states.len() - 1;
        let st = self.states[top];
        let limit = (st.fifty_rule as u32).min(st.moves_from_null) as usize;

        let mut d = 4;
        while d <= limit && d <= top {
            let prev = &self.states[top - d];
            if prev.hash == st.hash && prev.ep == st.ep && prev.castle_rights == st.castle_rights {
                self.states[top].last_repetition = d as u16;
                return;
            }
            d += 2;
        }
    }

    ///  PIN / CHECK METADATA  ///

    fn update_internal_state(&mut self) {
        let side = self.side;
        let king = self.king_sq(side);
        self.state_mut().check_givers = self.attackers_of(side.opposite(), king, self.all_pieces());
        self.update_blockers(Color::White);
        self.update_blockers(Color::Black);
    }

    /// Recomputes `check_blockers[side]` and the pinners against that side's
    /// king: enemy sliders aligned with the king with exactly one piece in
    /// between.
    fn update_blockers(&mut self, side: Color) {
        let t = attacks::tables();
        let king = self.king_sq(side);
        let them = side.opposite();

        let snipers = (t.pseudo(PieceType::Bishop, king) & self.bishops_and_queens(them))
            | (t.pseudo(PieceType::Rook, king) & self.rooks_and_queens(them));
        let occupancy = self.all_pieces() ^ snipers;

        let mut blockers = BitBoard::EMPTY;
        let mut pinners = BitBoard::EMPTY;
        for sniper in snipers.squares() {
            let between = t.between(king, sniper) & occupancy;
            if between.any() && !between.more_than_one() {
                blockers |= between;
                if (between & self.by_color(side)).any() {
                    pinners.set(sniper);
                }
            }
        }

        let st = self.state_mut();
        st.check_blockers[side.index()] = blockers;
        st.pinners[them.index()] = pinners;
    }

    ///  LEGALITY  ///

    /// Whether a pseudo-legal move leaves the own king safe.
    pub fn is_legal(&self, m: Move) -> bool {
        let side = self.side;
        let them = side.opposite();
        let from = m.from();
        let to = m.to();
        let king = self.king_sq(side);
        let t = attacks::tables();

        match m.kind() {
            MoveKind::EnPassant => {
                // Two pawns vanish and one appears; retest the king directly.
                let cap_sq = to.shifted(side.down());
                let occ = (self.all_pieces()
                    ^ BitBoard::from_square(from)
                    ^ BitBoard::from_square(cap_sq))
                    | BitBoard::from_square(to);
                let attackers = (t.rook_attacks(king, occ) & self.rooks_and_queens(them))
                    | (t.bishop_attacks(king, occ) & self.bishops_and_queens(them))
                    | (t.pseudo(PieceType::Knight, king) & self.knights(them))
                    | (t.pawn_attacks(side, king)
                        & self.pawns(them)
                        & !BitBoard::from_square(cap_sq));
                attackers.is_empty()
            }
            // Path safety was verified at generation time.
            MoveKind::Castle => true,
            _ if from == king => {
                // The destination must stay safe once the king has vacated
                // its own square.
                let occ = self.all_pieces() ^ BitBoard::from_square(from);
                self.attackers_of(them, to, occ).is_empty()
            }
            _ => !self.check_blockers(side).test(from) || t.aligned(king, from).test(to),
        }
    }

    /// Does the moved piece attack the enemy king from its destination?
    /// Discovered checks are not considered.
    pub fn gives_direct_check(&self, m: Move) -> bool {
        let side = self.side;
        let enemy_king = self.king_sq(side.opposite());
        let t = attacks::tables();
        let pt = if m.kind() == MoveKind::Promotion {
            m.promotion()
        } else {
            self.board[m.from().index()].piece_type()
        };
        let occ =
            (self.all_pieces() ^ BitBoard::from_square(m.from())) | BitBoard::from_square(m.to());

        match pt {
            PieceType::Pawn => t.pawn_attacks(side, m.to()).test(enemy_king),
            PieceType::King => false,
            _ => t.attacks_of(pt, m.to(), occ).test(enemy_king),
        }
    }

    ///  MOVE GENERATION FRONT END  ///

    /// Appends pseudo-legal moves for the current side into `out`.
    pub fn generate_moves(&self, mode: GenMode, out: &mut MoveList) {
        crate::moves::generate_moves(self, mode, out);
    }

    /// Parses a long-algebraic move string against this position, returning
    /// `None` when it does not correspond to a legal move.
    pub fn move_from_string(&self, s: &str) -> Option<Move> {
        if s == "0000" {
            return None;
        }
        let bytes = s.as_bytes();
        if bytes.len() != 4 && bytes.len() != 5 {
            return None;
        }
        let from = parse_square(&s[0..2])?;
        let to = parse_square(&s[2..4])?;
        let promo = if bytes.len() == 5 {
            Some(match bytes[4] {
                b'n' => PieceType::Knight,
                b'b' => PieceType::Bishop,
                b'r' => PieceType::Rook,
                b'q' => PieceType::Queen,
                _ => return None,
            })
        } else {
            None
        };

        let mut moves = MoveList::new();
        self.generate_moves(GenMode::AllMoves, &mut moves);
        moves.iter().copied().find(|m| {
            m.from() == from
                && m.to() == to
                && match promo {
                    Some(pt) => m.kind() == MoveKind::Promotion && m.promotion() == pt,
                    None => m.kind() != MoveKind::Promotion,
                }
                && self.is_legal(*m)
        })
    }

    ///  GAME RESULT  ///

    /// Neither side can win: no pawns and both sides below rook strength.
    pub fn low_material_draw(&self) -> bool {
        if self.by_piece_type(PieceType::Pawn).any() {
            return false;
        }
        self.material[0] < 5 && self.material[1] < 5
    }

    pub fn fifty_rule_draw(&self) -> bool {
        self.state().fifty_rule >= 100
    }

    /// A recurrence of the current position was recorded on the state stack.
    /// A single recurrence already counts: the search prunes two-fold
    /// repetitions, and the game front end adjudicates them the same way.
    pub fn repetition_draw(&self, _ply: i32) -> bool {
        self.state().last_repetition != 0
    }

    pub fn is_draw(&self, ply: i32) -> bool {
        self.low_material_draw() || self.fifty_rule_draw() || self.repetition_draw(ply)
    }

    /// Full game adjudication; generates moves, so not meant for search
    /// inner loops.
    pub fn compute_game_result(&self) -> GameResult {
        if self.is_draw(0) {
            return GameResult::Draw;
        }

        let mut moves = MoveList::new();
        self.generate_moves(GenMode::AllMoves, &mut moves);
        if moves.iter().any(|&m| self.is_legal(m)) {
            return GameResult::None;
        }

        if self.in_check() {
            match self.side {
                Color::White => GameResult::BlackWon,
                Color::Black => GameResult::WhiteWon,
            }
        } else {
            GameResult::Draw
        }
    }
}

/// Rook source and destination for a castling king landing on `king_to`.
#[inline]
fn castle_rook_squares(side: Color, king_to: Square) -> (Square, Square) {
    match (side, king_to) {
        (Color::White, Square::G1) => (Square::H1, Square::F1),
        (Color::White, _) => (Square::A1, Square::D1),
        (Color::Black, Square::G8) => (Square::H8, Square::F8),
        (Color::Black, _) => (Square::A8, Square::D8),
    }
}

pub fn parse_square(s: &str) -> Option<Square> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    if !(b'a'..=b'h').contains(&bytes[0]) || !(b'1'..=b'8').contains(&bytes[1]) {
        return None;
    }
    Some(Square::make(
        File::from_index(bytes[0] - b'a'),
        Rank::from_index(bytes[1] - b'1'),
    ))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = Square::make(File::from_index(file), Rank::from_index(rank));
                write!(f, " {}", self.board[sq.index()].to_char())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(
            f,
            "{} to move",
            if self.side == Color::White { "white" } else { "black" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init;

    #[test]
    fn test_square_geometry() {
        assert_eq!(Square::make(File::A, Rank::R1), Square::A1);
        assert_eq!(Square::E4.file().index(), 4);
        assert_eq!(Square::E4.rank().index(), 3);
        assert_eq!(Square::A1.flip_rank(), Square::A8);
        assert_eq!(Square::A1.mirror_file(), Square::H1);
        assert_eq!(Square::distance(Square::A1, Square::H8), 7);
        assert_eq!(Square::manhattan_closeness(Square::E4, Square::E4), 7);
        assert_eq!(Square::manhattan_closeness(Square::A1, Square::H8), -7);
    }

    #[test]
    fn test_piece_packing() {
        for color in [Color::White, Color::Black] {
            for pt in [
                PieceType::Pawn,
                PieceType::Knight,
                PieceType::Bishop,
                PieceType::Rook,
                PieceType::Queen,
                PieceType::King,
            ] {
                let piece = Piece::new(color, pt);
                assert_eq!(piece.color(), color);
                assert_eq!(piece.piece_type(), pt);
            }
        }
        assert!(Piece::NONE.is_none());
    }

    #[test]
    fn test_start_position_counts() {
        init();
        let board = Board::start_position();
        assert_eq!(board.all_pieces().popcount(), 32);
        assert_eq!(board.pawns(Color::White).popcount(), 8);
        assert_eq!(board.king_sq(Color::White), Square::E1);
        assert_eq!(board.king_sq(Color::Black), Square::E8);
        assert_eq!(board.material(Color::White), 31);
        assert_eq!(board.material(Color::Black), 31);
        assert!(!board.in_check());
    }

    #[test]
    fn test_fen_round_trip() {
        init();
        let fens = [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/4K3/4P3/8/8/8/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        ];
        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.to_fen(), fen);
        }
    }

    #[test]
    fn test_fen_rejects_garbage() {
        init();
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8 w KQkq - 0 1").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        // Two white kings.
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/2K1K3 w - - 0 1").is_err());
        // Pawn on the first rank.
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/P3K3 w - - 0 1").is_err());
        // The side that just moved is still in check.
        assert!(Board::from_fen("4k3/8/8/8/8/8/4R3/4K3 w - - 0 1").is_err());
    }

    #[test]
    fn test_make_unmake_restores_everything() {
        init();
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board_before = Board::from_fen(fen).unwrap();
        let mut board = Board::from_fen(fen).unwrap();

        let mut moves = MoveList::new();
        board.generate_moves(GenMode::AllMoves, &mut moves);
        for &m in moves.iter() {
            if !board.is_legal(m) {
                continue;
            }
            board.make_move(m);
            board.unmake_move(m);

            assert_eq!(board.to_fen(), board_before.to_fen(), "move {}", m);
            assert_eq!(board.compute_hash(), board_before.compute_hash(), "move {}", m);
            assert_eq!(board.state_count(), board_before.state_count(), "move {}", m);
            for color in [Color::White, Color::Black] {
                assert_eq!(board.material(color), board_before.material(color));
                assert_eq!(board.score(color), board_before.score(color));
            }
        }
    }

    #[test]
    fn test_incremental_hash_matches_scratch() {
        init();
        let mut board = Board::start_position();
        for mv in ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "g8f6", "e1g1"] {
            let m = board.move_from_string(mv).unwrap();
            board.make_move(m);
            assert_eq!(board.compute_hash(), board.hash_from_scratch(), "after {}", mv);
        }
    }

    #[test]
    fn test_color_bitboards_stay_consistent() {
        init();
        let mut board = Board::start_position();
        for mv in ["d2d4", "d7d5", "c1f4", "c8f5"] {
            let m = board.move_from_string(mv).unwrap();
            board.make_move(m);
            assert!((board.by_color(Color::White) & board.by_color(Color::Black)).is_empty());
            let mut union = BitBoard::EMPTY;
            for sq in Square::iter() {
                let piece = board.piece_on(sq);
                if !piece.is_none() {
                    union.set(sq);
                    assert!(board.by_piece(piece).test(sq));
                }
            }
            assert_eq!(union, board.all_pieces());
        }
    }

    #[test]
    fn test_null_move_round_trip() {
        init();
        let mut board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let hash = board.compute_hash();
        board.make_null_move();
        assert_eq!(board.side(), Color::Black);
        assert_ne!(board.compute_hash(), hash);
        assert_eq!(board.state().moves_from_null, 0);
        board.unmake_null_move();
        assert_eq!(board.side(), Color::White);
        assert_eq!(board.compute_hash(), hash);
    }

    #[test]
    fn test_repetition_detection() {
        init();
        let mut board = Board::start_position();
        for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            let m = board.move_from_string(mv).unwrap();
            board.make_move(m);
        }
        assert_eq!(board.state().last_repetition, 4);
        assert!(board.is_draw(0));
    }

    #[test]
    fn test_castle_rights_follow_rook_and_king() {
        init();
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let m = board.move_from_string("a1a2").unwrap();
        board.make_move(m);
        assert!(!board.castle_rights().has(CastleRights::WHITE_QUEEN));
        assert!(board.castle_rights().has(CastleRights::WHITE_KING));

        let m = board.move_from_string("e8d8").unwrap();
        board.make_move(m);
        assert!(!board.castle_rights().has(CastleRights::BLACK_KING));
        assert!(!board.castle_rights().has(CastleRights::BLACK_QUEEN));
    }

    #[test]
    fn test_stalemate_and_mate_results() {
        init();
        let stalemate = Board::from_fen("7k/5K2/6Q1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(stalemate.compute_game_result(), GameResult::Draw);

        let back_rank = Board::from_fen("R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(back_rank.compute_game_result(), GameResult::WhiteWon);

        let low_material = Board::from_fen("8/8/4k3/8/8/2N5/8/4K3 b - - 0 1").unwrap();
        assert_eq!(low_material.compute_game_result(), GameResult::Draw);

        let ongoing = Board::start_position();
        assert_eq!(ongoing.compute_game_result(), GameResult::None);
    }
}
