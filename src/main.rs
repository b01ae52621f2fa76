//! MinimaxChess UCI engine

use minimax_chess::uci::UCI;

fn main() -> std::io::Result<()> {
    env_logger::init();
    println!("MinimaxChess v0.1.0 - UCI Chess Engine");
    println!("Type 'uci' to start UCI mode, 'd' to display board, 'quit' to exit");

    let mut uci = UCI::new();
    uci.run()
}
