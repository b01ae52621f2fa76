use minimax_chess::core::{Board, BoardError, Rules};
use minimax_chess::engine::eval::evaluate;
use minimax_chess::engine::search::{
    INFINITY, MATE_SCORE, Score, SearchConfig, SearchError, Searcher,
};
use minimax_chess::engine::tt::{Bound, NodeRole};
use shakmaty::{Bitboard, CastlingMode, Color, Move, MoveList, Piece, Square};

fn from_fen(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

fn searcher(depth: u32) -> Searcher<Board> {
    Searcher::new(SearchConfig::new(depth).unwrap())
}

/// Plain minimax without pruning or caching, side-to-move relative.
fn minimax(board: &mut Board, depth: u32) -> Score {
    if depth == 0 {
        let sign = if board.turn() == Color::White { 1 } else { -1 };
        return sign * evaluate(board);
    }
    let moves = board.legal_moves();
    if moves.is_empty() {
        return if board.is_check() {
            -(MATE_SCORE + depth as Score)
        } else {
            0
        };
    }
    let mut best = -INFINITY;
    for mv in moves.iter() {
        board.push(mv).unwrap();
        best = best.max(-minimax(board, depth - 1));
        board.pop().unwrap();
    }
    best
}

const SINGLE_MOVE: &str = "7k/8/8/8/p7/8/P4q2/7K w - - 0 1";
const STALEMATE: &str = "7k/8/8/8/8/8/5q2/7K w - - 0 1";
const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

#[test]
fn test_single_legal_move_every_depth() {
    for depth in 1..=4 {
        let mut board = from_fen(SINGLE_MOVE);
        assert_eq!(board.legal_moves().len(), 1);
        let mv = searcher(depth).select_move(&mut board).unwrap();
        assert_eq!(uci(&mv), "a2a3", "depth {depth}");
    }
}

#[test]
fn test_alpha_beta_matches_minimax() {
    let fens = [
        "4k3/8/8/3q4/8/2N5/8/4K2R w K - 0 1",
        "r3k3/1p6/8/3n4/4P3/8/5PP1/4K2R b K - 0 1",
        "6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1",
        "4k3/8/3p4/2b5/3N4/8/8/4K3 b - - 0 1",
    ];
    for fen in fens {
        for depth in 1..=3 {
            let mut board = from_fen(fen);
            let expected = minimax(&mut board, depth);
            let (score, mv) = searcher(depth).search_root(&mut board, depth).unwrap();
            assert_eq!(score, expected, "{fen} at depth {depth}");
            assert!(mv.is_some());
        }
    }
}

#[test]
fn test_transposition_reuse_at_shallower_depth() {
    let fen = "7k/8/8/3q4/8/8/8/3RK3 w - - 0 1";
    let mut board = from_fen(fen);
    let mut deep = searcher(4);
    let mv = deep.select_move(&mut board).unwrap();
    assert_eq!(uci(&mv), "d1d5");

    let key = board.key();
    let entry = deep.tt().get(&key).unwrap().clone();
    assert_eq!(entry.depth, 4);
    assert_eq!(entry.bound, Bound::Exact);

    let cached = deep
        .tt()
        .probe(&key, 2, -INFINITY, INFINITY, NodeRole::Max)
        .unwrap();

    let nodes_before = deep.stats().nodes;
    let reused = deep.search_root(&mut board, 2).unwrap();
    assert_eq!(deep.stats().nodes, nodes_before + 1);
    assert_eq!(reused, cached);

    let fresh = searcher(2).search_root(&mut from_fen(fen), 2).unwrap();
    assert_eq!(fresh, cached);
    assert_eq!(fresh.0, 60);
}

#[test]
fn test_stored_bounds_agree_with_minimax() {
    let fens = [
        "r3k3/1p6/8/3n4/4P3/8/5PP1/4K2R b K - 0 1",
        "4k3/8/3p4/2b5/3N4/8/8/4K3 b - - 0 1",
        "4k3/8/8/3q4/8/2N5/8/4K2R w K - 0 1",
    ];
    for fen in fens {
        let mut s = searcher(3);
        s.search_root(&mut from_fen(fen), 3).unwrap();
        assert!(!s.tt().is_empty());

        for (key, entry) in s.tt().iter() {
            let mut board = from_fen(key);
            let sign = if board.turn() == Color::White { 1 } else { -1 };
            let exact = sign * minimax(&mut board, entry.depth);
            match entry.bound {
                Bound::Exact => assert_eq!(entry.score, exact, "{key}"),
                Bound::LowerBound => assert!(entry.score <= exact, "{key}"),
                Bound::UpperBound => assert!(entry.score >= exact, "{key}"),
            }
        }
    }
}

/// Board whose `push` starts failing once `fail_at` moves are on the stack.
struct FailingBoard {
    inner: Board,
    fail_at: usize,
}

impl Rules for FailingBoard {
    type Key = String;

    fn turn(&self) -> Color {
        self.inner.turn()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.inner.piece_at(square)
    }

    fn occupied(&self) -> Bitboard {
        self.inner.occupied()
    }

    fn legal_moves(&self) -> MoveList {
        self.inner.legal_moves()
    }

    fn is_capture(&self, mv: &Move) -> bool {
        self.inner.is_capture(mv)
    }

    fn is_en_passant(&self, mv: &Move) -> bool {
        self.inner.is_en_passant(mv)
    }

    fn is_check(&self) -> bool {
        self.inner.is_check()
    }

    fn push(&mut self, mv: &Move) -> Result<(), BoardError> {
        if self.inner.move_stack().len() >= self.fail_at {
            return Err(BoardError::IllegalMove {
                uci: uci(mv),
                fen: self.inner.fen_key(),
            });
        }
        self.inner.push(mv)
    }

    fn pop(&mut self) -> Result<Move, BoardError> {
        self.inner.pop()
    }

    fn key(&self) -> String {
        self.inner.key()
    }
}

#[test]
fn test_failed_push_unwinds_every_move() {
    for fail_at in 0..3 {
        let mut board = FailingBoard {
            inner: Board::startpos(),
            fail_at,
        };
        let mut s: Searcher<FailingBoard> = Searcher::new(SearchConfig::new(3).unwrap());
        let result = s.select_move(&mut board);
        assert!(
            matches!(result, Err(SearchError::Rules(BoardError::IllegalMove { .. }))),
            "fail_at {fail_at}: {result:?}"
        );
        assert!(board.inner.move_stack().is_empty());
        assert_eq!(board.inner.key(), Board::startpos().key());
    }
}

#[test]
fn test_search_startpos_depth_two() {
    let mut board = Board::startpos();
    let legal = board.legal_moves();
    let mv = searcher(2).select_move(&mut board).unwrap();
    assert!(legal.contains(&mv));
}

#[test]
fn test_search_is_deterministic() {
    let a = searcher(2).select_move(&mut Board::startpos()).unwrap();
    let b = searcher(2).select_move(&mut Board::startpos()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_returned_move_is_legal() {
    let fens = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "8/8/4k3/8/2p5/8/B5K1/8 b - - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    ];
    for fen in fens {
        let mut board = from_fen(fen);
        let legal = board.legal_moves();
        let mv = searcher(3).select_move(&mut board).unwrap();
        assert!(legal.contains(&mv), "{fen}: {}", uci(&mv));
    }
}

#[test]
fn test_position_restored_after_search() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let mut board = from_fen(fen);
    searcher(3).select_move(&mut board).unwrap();
    assert_eq!(board.fen_key(), fen);
    assert!(board.move_stack().is_empty());
}

#[test]
fn test_stalemate_has_no_move() {
    let mut board = from_fen(STALEMATE);
    assert_eq!(
        searcher(2).select_move(&mut board),
        Err(SearchError::NoLegalMove)
    );
}

#[test]
fn test_checkmate_has_no_move() {
    let mut board = from_fen(FOOLS_MATE);
    assert_eq!(
        searcher(1).select_move(&mut board),
        Err(SearchError::NoLegalMove)
    );
}

#[test]
fn test_zero_depth_rejected() {
    let mut s: Searcher<Board> = Searcher::default();
    assert_eq!(
        s.search(&mut Board::startpos(), 0),
        Err(SearchError::DepthTooLow)
    );
}

#[test]
fn test_finds_mate_in_one() {
    for depth in 2..=3 {
        let mut board = from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1");
        let mut s = searcher(depth);
        let mv = s.select_move(&mut board).unwrap();
        assert_eq!(uci(&mv), "e1e8");
        let last = s.reports().last().unwrap();
        assert!(last.score >= MATE_SCORE);
    }
}

#[test]
fn test_black_finds_mate_in_one() {
    let mut board = from_fen("4q2k/8/8/8/8/8/5PPP/6K1 b - - 0 1");
    let mv = searcher(2).select_move(&mut board).unwrap();
    assert_eq!(uci(&mv), "e8e1");
}

#[test]
fn test_avoids_stalemate_when_ahead() {
    let mut board = from_fen("7k/8/6K1/8/8/8/8/6Q1 w - - 0 1");
    let mv = searcher(2).select_move(&mut board).unwrap();
    board.push(&mv).unwrap();
    let stalemated = board.legal_moves().is_empty() && !board.is_check();
    assert!(!stalemated, "{} stalemates", uci(&mv));
}

#[test]
fn test_takes_hanging_queen() {
    let mut board = from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
    let mv = searcher(2).select_move(&mut board).unwrap();
    assert_eq!(uci(&mv), "d1d5");
}

#[test]
fn test_reports_one_per_depth() {
    let mut board = Board::startpos();
    let mut s = searcher(3);
    s.select_move(&mut board).unwrap();
    let depths: Vec<u32> = s.reports().iter().map(|r| r.depth).collect();
    assert_eq!(depths, [1, 2, 3]);
    assert!(s.reports().iter().all(|r| r.best_move.is_some()));
    let last = s.reports().last().unwrap();
    assert!(!last.pv.is_empty() && last.pv.len() <= 3);
    assert_eq!(last.pv.first(), last.best_move.as_ref());
}

#[test]
fn test_killers_and_cutoffs_recorded() {
    let mut board = Board::startpos();
    let mut s = searcher(3);
    s.select_move(&mut board).unwrap();
    assert!(s.stats().cutoffs > 0);
    assert!(s.killers().get(1).is_some());
}

#[test]
fn test_table_persists_until_clear() {
    let mut board = Board::startpos();
    let mut s = searcher(2);
    s.select_move(&mut board).unwrap();
    let after_first = s.tt().len();
    assert!(after_first > 0);

    s.select_move(&mut board).unwrap();
    assert!(s.tt().len() >= after_first);

    s.clear();
    assert!(s.tt().is_empty());
    assert!(s.killers().get(1).is_none());
    assert!(s.reports().is_empty());
}

#[test]
fn test_instances_do_not_share_tables() {
    let mut used = searcher(2);
    used.select_move(&mut Board::startpos()).unwrap();
    let fresh = searcher(2);
    assert!(!used.tt().is_empty());
    assert!(fresh.tt().is_empty());
}
