use std::io::{self, BufRead, Write};

use shakmaty::CastlingMode;
use vampirc_uci::uci::UciSearchControl;
use vampirc_uci::{UciMessage, parser};

use crate::core::{Board, Rules};
use crate::engine::eval::evaluate;
use crate::engine::search::{
    IterationReport, MATE_SCORE, Preset, Score, SearchConfig, SearchError, Searcher, pv,
};

pub struct UCI {
    pub board: Board,
    searcher: Searcher<Board>,
}

impl UCI {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        UCI {
            board: Board::startpos(),
            searcher: Searcher::new(config),
        }
    }

    /// Depth the next `go` without an explicit depth will search to.
    pub fn max_depth(&self) -> u32 {
        self.searcher.config().max_depth
    }

    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        self.run_with(stdin.lock(), &mut stdout)
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub fn run_with<I: BufRead, W: Write>(&mut self, input: I, out: &mut W) -> io::Result<()> {
        for line in input.lines() {
            if !self.handle_line(&line?, out)? {
                break;
            }
            out.flush()?;
        }
        out.flush()
    }

    /// Handles one command line. Returns `false` on `quit`.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }

        match parser::parse_one(line) {
            UciMessage::Uci => self.cmd_uci(out)?,
            UciMessage::IsReady => writeln!(out, "readyok")?,
            UciMessage::SetOption { name, value } => {
                self.apply_setoption(name.trim(), value.as_deref());
            }
            UciMessage::UciNewGame => self.cmd_ucinewgame(),
            UciMessage::Position {
                startpos,
                fen,
                moves,
            } => {
                let fen_str = fen.as_ref().map(|f| f.as_str());
                let move_strs: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
                let refs: Vec<&str> = move_strs.iter().map(String::as_str).collect();
                self.apply_position(startpos, fen_str, &refs);
            }
            UciMessage::Go {
                time_control,
                search_control,
            } => {
                if time_control.is_some() {
                    log::debug!("time controls are not supported, searching to fixed depth");
                }
                self.do_go(go_depth(search_control.as_ref()), out)?;
            }
            UciMessage::Stop => {}
            UciMessage::Quit => return Ok(false),
            UciMessage::Unknown(ref s, _) => match s.split_whitespace().next() {
                Some("d") | Some("display") => self.cmd_display(out)?,
                Some("eval") => self.cmd_eval(out)?,
                _ => log::debug!("ignoring unknown command: {s}"),
            },
            _ => {}
        }
        Ok(true)
    }

    fn cmd_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name MinimaxChess 0.1.0")?;
        writeln!(out, "id author MinimaxChess developers")?;
        writeln!(out)?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max {}",
            self.max_depth(),
            crate::engine::search::MAX_DEPTH
        )?;
        writeln!(
            out,
            "option name Strength type combo default medium var easy var medium var hard"
        )?;
        writeln!(out, "uciok")
    }

    /// Applies a `setoption` by name and value.
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) {
        let opt = name.to_lowercase().replace([' ', '_'], "");
        let value = value.unwrap_or("").trim();
        let result = match opt.as_str() {
            "depth" => value
                .parse::<u32>()
                .map_err(|e| e.to_string())
                .and_then(|d| self.searcher.set_max_depth(d).map_err(|e| e.to_string())),
            "strength" => value
                .parse::<Preset>()
                .and_then(|p| self.searcher.set_max_depth(p.depth()))
                .map_err(|e| e.to_string()),
            _ => Err(format!("unknown option {name:?}")),
        };
        match result {
            Ok(()) => log::debug!("option {name} set, max depth {}", self.max_depth()),
            Err(e) => log::warn!("setoption {name}: {e}"),
        }
    }

    pub fn cmd_ucinewgame(&mut self) {
        self.board = Board::startpos();
        self.searcher.clear();
    }

    /// Sets up a position and plays `move_strs` on it. An invalid FEN keeps
    /// the current position; move application stops at the first bad move.
    pub fn apply_position(&mut self, startpos: bool, fen: Option<&str>, move_strs: &[&str]) {
        if startpos {
            self.board = Board::startpos();
        } else if let Some(fen_str) = fen {
            match Board::from_fen(fen_str) {
                Ok(board) => self.board = board,
                Err(e) => {
                    log::warn!("{e}");
                    return;
                }
            }
        }

        for &s in move_strs {
            let applied = match self.board.parse_uci_move(s) {
                Some(mv) => self.board.push(&mv).map_err(|e| e.to_string()),
                None => Err(format!("illegal or malformed move {s}")),
            };
            if let Err(e) = applied {
                log::warn!("position: {e}");
                break;
            }
        }
    }

    /// Searches the current position and prints `info` lines and `bestmove`.
    fn do_go<W: Write>(&mut self, depth: Option<u32>, out: &mut W) -> io::Result<()> {
        let depth = match depth.map(SearchConfig::new) {
            Some(Ok(config)) => config.max_depth,
            Some(Err(e)) => {
                log::warn!("go: {e}, searching to depth {}", self.max_depth());
                self.max_depth()
            }
            None => self.max_depth(),
        };
        match self.searcher.search(&mut self.board, depth) {
            Ok(mv) => {
                for report in self.searcher.reports() {
                    writeln!(out, "{}", format_info(report))?;
                }
                writeln!(out, "bestmove {}", mv.to_uci(CastlingMode::Standard))
            }
            Err(SearchError::NoLegalMove) => {
                log::warn!("{}", SearchError::NoLegalMove);
                writeln!(out, "bestmove 0000")
            }
            Err(e) => {
                log::error!("search failed: {e}");
                writeln!(out, "bestmove 0000")
            }
        }
    }

    fn cmd_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n{}", self.board)
    }

    fn cmd_eval<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Evaluation: {}", evaluate(&self.board))?;
        writeln!(out, "(Positive = White advantage, material only)")
    }
}

fn go_depth(search_control: Option<&UciSearchControl>) -> Option<u32> {
    search_control.and_then(|sc| sc.depth).map(u32::from)
}

/// `cp N` for material scores, `mate N` once a forced mate is seen.
pub fn format_score(score: Score, depth: u32) -> String {
    if score.abs() >= MATE_SCORE {
        let plies = (depth as Score - (score.abs() - MATE_SCORE)).max(1);
        let moves = (plies + 1) / 2;
        format!("mate {}", if score > 0 { moves } else { -moves })
    } else {
        format!("cp {}", score)
    }
}

fn format_info(report: &IterationReport) -> String {
    format!(
        "info depth {} score {} nodes {} pv {}",
        report.depth,
        format_score(report.score, report.depth),
        report.nodes,
        pv::format_line(&report.pv)
    )
}

impl Default for UCI {
    fn default() -> Self {
        Self::new()
    }
}
