// Simple command-line application to play chess through the tap protocol

use std::io::{self, BufRead, Write};

use tapchess::{board::PrettyStyle, Chess, State, Team};

fn main() {
    let mut stdin = io::stdin().lock();

    let mut game = Chess::new();

    loop {
        println!("{}", game.board().pretty(PrettyStyle::Ascii));
        println!(
            "White: {}  Black: {}",
            game.white_turns(),
            game.black_turns()
        );

        match game.state() {
            State::Checkmate => {
                let winner = match game.whose_turn() {
                    Team::White => "Black",
                    Team::Black => "White",
                };
                println!("Checkmate! {} wins.", winner);
                break;
            }
            State::Draw => {
                println!("Stalemate.");
                break;
            }
            State::Check => println!("Check!"),
            State::InProgress => {}
        }

        let side = match game.whose_turn() {
            Team::White => "White",
            Team::Black => "Black",
        };
        match game.selected() {
            Some(sel) => print!(
                "{} tap ({}, {}) selected, next tap: ",
                side,
                sel.row(),
                sel.col()
            ),
            None => print!("{} tap (row col): ", side),
        }
        io::stdout().flush().unwrap();

        let mut line = String::new();
        if stdin.read_line(&mut line).unwrap() == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "new" => {
                game.new_game();
                continue;
            }
            "quit" => break,
            _ => {}
        }

        let mut parts = line.split_whitespace().map(str::parse::<usize>);
        let (row, col) = match (parts.next(), parts.next()) {
            (Some(Ok(row)), Some(Ok(col))) => (row, col),
            _ => {
                println!("Enter a tap as `row col` (0-7 each), `new` or `quit`.");
                println!();
                continue;
            }
        };

        // Illegal taps are silently ignored by the engine, just like in a UI.
        game.select(row, col);

        if let Some(moves) = game.possible_moves() {
            let targets: Vec<String> = moves
                .iter()
                .map(|mv| format!("({}, {})", mv.to().row(), mv.to().col()))
                .collect();
            println!("Possible: {}", targets.join(" "));
        }
        println!();
    }
}
