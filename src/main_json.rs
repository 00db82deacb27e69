// Copyright (C) 2020-2026 Andy Kurnia.

use std::io::Read;
use wordbot::rack::RackAccess;
use wordbot::{
    board, error, game_config, lexicon, move_picker, rack, return_error, tile, turn_engine,
};

// lexicon: path to a word list, one word per line.
// prefixes: replaces the built-in prefix list when given.
// rack: letters, eg "CATXXXX".
// board: one string per row, '.' for empty, letters for tiles already in
//   play. 15x15 gets the standard premiums, any other size is plain.
// tier: 0 to 3.
// seed: for the random tiers.
// max_ticks: frames to run before giving up.
#[derive(serde::Deserialize)]
struct Question {
    lexicon: String,
    #[serde(default)]
    prefixes: Option<Vec<String>>,
    rack: String,
    board: Vec<String>,
    #[serde(default)]
    tier: move_picker::Tier,
    #[serde(default)]
    seed: u64,
    #[serde(default = "default_max_ticks")]
    max_ticks: usize,
}

fn default_max_ticks() -> usize {
    1000
}

#[derive(serde::Serialize)]
struct AnswerTile {
    letter: String,
    col: i8,
    row: i8,
    from_rack: bool,
}

#[derive(serde::Serialize)]
struct Answer {
    state: String,
    word: Option<String>,
    score: i16,
    tiles: Vec<AnswerTile>,
    attempts: Vec<String>,
    ticks: usize,
    rack_left: String,
}

// reads the question from the file named on the command line, or stdin.
pub fn main() -> error::Returns<()> {
    let _logger = wordbot::logging::init("warn")?;
    let data = match std::env::args().nth(1) {
        Some(path) if path != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s)?;
            s
        }
    };
    let question = serde_json::from_str::<Question>(&data)?;

    let game_config = if question.board.len() == 15 {
        game_config::make_english_game_config()
    } else {
        let cols = question.board.first().map_or(0, |row| row.chars().count());
        if question.board.is_empty() || question.board.len() > 127 || cols > 127 {
            return_error!(format!(
                "board: unsupported size {}x{}",
                question.board.len(),
                cols
            ));
        }
        game_config::make_plain_english_game_config(question.board.len() as i8, cols as i8)
    };
    let alphabet = game_config.alphabet();

    let mut lexicon =
        lexicon::Lexicon::from_text(alphabet, &std::fs::read_to_string(&question.lexicon)?)?;
    if let Some(prefixes) = &question.prefixes {
        lexicon.set_prefixes(alphabet, prefixes.iter().map(|s| s.as_str()))?;
    }

    let Some(rack_letters) = alphabet.parse_word(&question.rack) else {
        return_error!(format!("rack: invalid letter in {:?}", question.rack));
    };
    if rack_letters.len() > game_config.rack_size() as usize {
        return_error!(format!(
            "rack: at most {} tiles, found {}",
            game_config.rack_size(),
            rack_letters.len()
        ));
    }

    let mut tile_ids = tile::TileIds::new();
    let mut board = board::Board::from_rows(
        game_config.board_layout().clone(),
        alphabet,
        &mut tile_ids,
        &question.board,
    )?;
    let mut rack = rack::Rack::new();
    for &letter in &rack_letters {
        rack.insert(tile_ids.make(letter, alphabet.score(letter), Some(tile::PlayerId(0))));
    }
    let rack_ids = rack.tiles().iter().map(|t| t.id).collect::<Vec<_>>();

    let mut engine =
        turn_engine::TurnEngine::new(alphabet, &lexicon, question.tier, question.seed);
    engine.begin_turn();
    let mut ticks = 0;
    while ticks < question.max_ticks {
        ticks += 1;
        if engine.advance_tick(&mut board, &mut rack).is_terminal() {
            break;
        }
        rack.tick();
    }

    let answer = Answer {
        state: format!("{:?}", engine.current_state()),
        word: engine.last_word(),
        score: engine.score_of_last_selection(),
        tiles: engine
            .last_selection()
            .unwrap_or_default()
            .iter()
            .map(|t| AnswerTile {
                letter: alphabet.fmt_word(&[t.letter]),
                col: t.coord.col,
                row: t.coord.row,
                from_rack: rack_ids.contains(&t.id),
            })
            .collect(),
        attempts: engine
            .attempts()
            .iter()
            .map(|w| alphabet.fmt_word(w))
            .collect(),
        ticks,
        rack_left: alphabet.fmt_word(&rack.letters()),
    };
    println!("{}", serde_json::to_string(&answer)?);

    Ok(())
}
