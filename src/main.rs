use catchking::{GameState, PieceKind, Player, DIMENSION};
use std::io::{self, BufRead, Write};
use tracing::info;

const NORTH_TINT: &str = "\x1b[31m";
const SOUTH_TINT: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

fn main() -> io::Result<()> {
    let file_appender = tracing_appender::rolling::daily("./logs", "catchking.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Catch the king!");
    let random = prompt_number(&mut input, "Board layout, 0 periodic / 1 random: ")? != 0;
    let mut game = if random {
        GameState::new_random()
    } else {
        GameState::new()
    };
    info!(random, "game created");

    run_setup(&mut game, &mut input)?;
    run_game(&mut game, &mut input)?;

    render(&game);
    if let Some(winner) = game.winner() {
        println!("{winner} caught the king and wins!");
        info!(winner = %winner, "game over");
    }
    match serde_json::to_string(&game) {
        Ok(snapshot) => info!(%snapshot, "final state"),
        Err(err) => tracing::warn!(%err, "could not serialize the final state"),
    }
    Ok(())
}

fn run_setup(game: &mut GameState, input: &mut impl BufRead) -> io::Result<()> {
    while let Some(kind) = game.piece_to_place() {
        render(game);
        let player = game.current_player();
        let name = match kind {
            PieceKind::King => "king",
            PieceKind::Pawn => "pawn",
        };
        println!("{player} places a {name} on one of the two home lines");
        let (line, column) = prompt_square(input, "square")?;
        match game.place_piece(line, column) {
            Ok(()) => info!(%player, name, line, column, "piece placed"),
            Err(err) => println!("rejected: {err}"),
        }
    }
    Ok(())
}

fn run_game(game: &mut GameState, input: &mut impl BufRead) -> io::Result<()> {
    while game.winner().is_none() {
        render(game);
        let player = game.current_player();
        let prescribed = game.prescribed_digit();
        if prescribed > 0 {
            println!("{player} to play, prescribed digit {prescribed}");
        } else {
            println!("{player} to play, any piece");
        }

        let restriction_dropped = prescribed > 0 && !game.has_prescribed_move();
        if restriction_dropped {
            println!("no {player} piece on digit {prescribed} can move, the restriction is dropped");
        }

        if !any_move_exists(game) {
            if game.reserve(player) == 0 {
                println!("{player} has no legal move and no pawn to bring back");
                break;
            }
            println!("{player} has no legal move and must bring back a caught pawn");
            insert_pawn(game, input, player, prescribed)?;
            continue;
        }

        if restriction_dropped && game.reserve(player) > 0 {
            let choice = prompt_number(input, "1 to bring back a caught pawn, 0 to move: ")?;
            if choice != 0 {
                insert_pawn(game, input, player, prescribed)?;
                continue;
            }
        }

        let (line, column) = prompt_square(input, "piece to move")?;
        let (target_line, target_column) = prompt_square(input, "target square")?;
        match game.quick_move(line, column, target_line, target_column) {
            Ok(()) => info!(%player, line, column, target_line, target_column, "move played"),
            Err(err) => println!("rejected: {err}"),
        }
    }
    Ok(())
}

fn insert_pawn(
    game: &mut GameState,
    input: &mut impl BufRead,
    player: Player,
    prescribed: i32,
) -> io::Result<()> {
    println!("choose an empty square bearing the digit {prescribed}");
    let (line, column) = prompt_square(input, "insertion square")?;
    match game.insert_pawn(line, column) {
        Ok(()) => info!(%player, line, column, "pawn brought back"),
        Err(err) => println!("rejected: {err}"),
    }
    Ok(())
}

fn any_move_exists(game: &GameState) -> bool {
    (0..DIMENSION as i32)
        .any(|line| (0..DIMENSION as i32).any(|column| game.can_select(line, column)))
}

fn render(game: &GameState) {
    print!("   ");
    for column in 0..DIMENSION as i32 {
        print!(" {column} ");
    }
    println!();
    for line in 0..DIMENSION as i32 {
        print!(" {line} ");
        for column in 0..DIMENSION as i32 {
            let digit = game.digit_at(line, column);
            match game.holder_at(line, column) {
                Some(player) => {
                    let tint = if player == Player::North {
                        NORTH_TINT
                    } else {
                        SOUTH_TINT
                    };
                    let glyph = if game.is_king_at(line, column) {
                        '♚'
                    } else {
                        '♟'
                    };
                    print!("{tint}{glyph}{digit}{RESET}");
                }
                None => print!("·{digit}"),
            }
            print!(" ");
        }
        println!();
    }
    println!(
        "caught pawns waiting: {} {NORTH_TINT}♟{RESET}, {} {SOUTH_TINT}♟{RESET}",
        game.reserve(Player::North),
        game.reserve(Player::South),
    );
}

fn prompt_square(input: &mut impl BufRead, label: &str) -> io::Result<(i32, i32)> {
    println!("{label}:");
    // Column first, matching the on-screen header order
    let column = prompt_number(input, "  column: ")?;
    let line = prompt_number(input, "  line: ")?;
    Ok((line, column))
}

fn prompt_number(input: &mut impl BufRead, label: &str) -> io::Result<i32> {
    loop {
        print!("{label}");
        io::stdout().flush()?;
        let mut text = String::new();
        if input.read_line(&mut text)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        match text.trim().parse::<i32>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("please enter a number"),
        }
    }
}
