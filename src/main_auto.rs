// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use wordbot::{
    display, error, game_config, game_state, lexicon, move_picker, rack::RackAccess, return_error,
    turn_engine,
};

// omits 01IOl
static BASE57: &[u8; 57] = b"\
23456789\
ABCDEFGHJKLMNPQRSTUVWXYZ\
abcdefghijkmnopqrstuvwxyz\
";

const GAME_ID_LEN: usize = 8;

// one turn is never allowed more frames than this
const MAX_TICKS_PER_TURN: usize = 1000;

enum CSVRow<T1, T2> {
    Log(T1),
    Game(T2),
}

fn game_id(rng: &mut dyn RngCore) -> String {
    (0..GAME_ID_LEN)
        .map(|_| BASE57[rng.random_range(0..BASE57.len())] as char)
        .collect()
}

pub fn main() -> error::Returns<()> {
    let _logger = wordbot::logging::init("info")?;
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() <= 1 {
        return_error!("usage: auto LEXICON_FILE [NUM_GAMES] [SEED]".into());
    }
    let num_games = match args.get(2) {
        Some(s) => s.parse::<usize>()?,
        None => 1_000,
    };
    let base_seed = match args.get(3) {
        Some(s) => s.parse::<u64>()?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_secs(),
    };
    let game_config = std::sync::Arc::new(game_config::make_english_game_config());
    let lexicon = std::sync::Arc::new(lexicon::Lexicon::from_text(
        game_config.alphabet(),
        &std::fs::read_to_string(&args[1])?,
    )?);
    log::info!("{} words from {}, seed {}", lexicon.len(), args[1], base_seed);
    let player_aliases = std::sync::Arc::new(
        (1..=game_config.num_players())
            .map(|x| format!("p{}", x))
            .collect::<Box<[String]>>(),
    );

    let num_threads = num_cpus::get();
    let num_processed_games = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut threads = vec![];
    let (tx, rx) = std::sync::mpsc::channel();
    for thread_idx in 0..num_threads {
        let tx = tx.clone();
        let game_config = std::sync::Arc::clone(&game_config);
        let lexicon = std::sync::Arc::clone(&lexicon);
        let player_aliases = std::sync::Arc::clone(&player_aliases);
        let num_processed_games = std::sync::Arc::clone(&num_processed_games);
        threads.push(std::thread::spawn(move || -> error::Returns<()> {
            let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(base_seed + thread_idx as u64);
            let alphabet = game_config.alphabet();
            let num_players = game_config.num_players() as usize;
            loop {
                if num_processed_games.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
                    >= num_games
                {
                    num_processed_games.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
                    break;
                }

                let game_id = game_id(&mut rng);
                let mut game_state = game_state::GameState::new(&game_config);
                game_state.deal(&mut rng);
                let opening = game_state.seed_opening(&lexicon, &mut rng)?;
                let mut engines = Vec::with_capacity(num_players);
                for player in game_state.players.iter_mut() {
                    let level = rng.random_range(0..=move_picker::Tier::MAX);
                    player.tier = move_picker::Tier::new(level).unwrap_or_default();
                    engines.push(turn_engine::TurnEngine::new(
                        alphabet,
                        &lexicon,
                        player.tier,
                        rng.random(),
                    ));
                }
                let went_first = rng.random_range(0..game_config.num_players());
                game_state.turn = went_first;
                log::debug!(
                    "game {} opens with {}",
                    game_id,
                    alphabet.fmt_word(&opening)
                );

                let mut num_moves = 0;
                let mut num_passes = vec![0; num_players];
                loop {
                    num_moves += 1;
                    let turn = game_state.turn as usize;
                    let rack_before = game_state.rack_label(alphabet, turn);
                    let old_bag_len = game_state.bag.len();
                    let engine = &mut engines[turn];
                    engine.begin_turn();
                    let (board, rack) = game_state.board_and_rack();
                    let rack_len_before = rack.len();
                    let mut state = engine.current_state();
                    for _ in 0..MAX_TICKS_PER_TURN {
                        state = engine.advance_tick(board, rack);
                        if state.is_terminal() {
                            break;
                        }
                        rack.tick();
                    }
                    let (play_fmt, play_score, tiles_played) = match state {
                        turn_engine::AiState::Finishing => {
                            let placed = engine.last_selection().unwrap_or_default();
                            let tiles_played = rack_len_before - rack.len();
                            let axis = match placed {
                                [a, b, ..] if a.coord.row != b.coord.row => {
                                    wordbot::matrix::Axis::Vertical
                                }
                                _ => wordbot::matrix::Axis::Horizontal,
                            };
                            let at = placed
                                .first()
                                .map_or(String::new(), |t| t.coord.fmt_at(axis));
                            (
                                format!("{} {}", at, engine.last_word().unwrap_or_default()),
                                engine.score_of_last_selection(),
                                tiles_played,
                            )
                        }
                        other => {
                            if other != turn_engine::AiState::Pass {
                                log::warn!(
                                    "game {}: turn ran out of ticks in {:?}",
                                    game_id,
                                    other
                                );
                            }
                            num_passes[turn] += 1;
                            ("(Pass)".to_string(), 0, 0)
                        }
                    };
                    let rack_after = rack.letters();
                    let rack_after = alphabet.fmt_word(&rack_after);
                    game_state.finish_turn(play_score);
                    let total_score = game_state.players[turn].score;

                    let ended = game_state.check_game_ended();
                    if let Some(end) = ended {
                        game_state.settle(end);
                    }
                    game_state.next_turn();
                    tx.send(CSVRow::Log((
                        player_aliases[turn].clone(),
                        game_id.clone(),
                        num_moves,
                        game_state.players[turn].tier.level(),
                        rack_before,
                        play_fmt,
                        play_score,
                        total_score,
                        tiles_played,
                        rack_after,
                        old_bag_len,
                        game_state.players[game_state.turn as usize].score,
                    )))?;
                    if ended.is_some() {
                        log::debug!(
                            "game {} final board:\n{}",
                            game_id,
                            display::fmt_board(alphabet, &game_state.board)
                        );
                        tx.send(CSVRow::Game((
                            game_id.clone(),
                            game_state
                                .players
                                .iter()
                                .map(|p| p.score)
                                .collect::<Box<_>>(),
                            game_state
                                .players
                                .iter()
                                .map(|p| p.tier.level())
                                .collect::<Box<_>>(),
                            num_passes.clone(),
                            player_aliases[went_first as usize].clone(),
                        )))?;
                        break;
                    }
                }
            }
            Ok(())
        }));
    }
    drop(tx);

    let run_identifier = format!("log-{:08x}", base_seed);
    println!("logging to {}", run_identifier);
    let mut csv_log = csv::Writer::from_path(&run_identifier)?;
    let mut csv_game = csv::Writer::from_path(format!("games-{}", run_identifier))?;
    csv_log.serialize((
        "playerID",
        "gameID",
        "turn",
        "tier",
        "rack",
        "play",
        "score",
        "totalscore",
        "tilesplayed",
        "leave",
        "tilesremaining",
        "oppscore",
    ))?;
    csv_game.serialize((
        "gameID",
        player_aliases
            .iter()
            .map(|x| format!("{}_score", x))
            .collect::<Box<[String]>>(),
        player_aliases
            .iter()
            .map(|x| format!("{}_tier", x))
            .collect::<Box<[String]>>(),
        player_aliases
            .iter()
            .map(|x| format!("{}_passes", x))
            .collect::<Box<[String]>>(),
        "first",
    ))?;
    let mut completed_games = 0u64;
    let mut completed_moves = 0u64;
    let t0 = std::time::Instant::now();
    let mut last_report = 0;
    for row in rx.iter() {
        match row {
            CSVRow::Log(r) => {
                csv_log.serialize(r)?;
                completed_moves += 1;
            }
            CSVRow::Game(r) => {
                csv_game.serialize(r)?;
                completed_games += 1;
                let elapsed_secs = t0.elapsed().as_secs();
                if elapsed_secs >= last_report + 10 {
                    last_report = elapsed_secs;
                    log::info!(
                        "After {} seconds, have logged {} games ({} moves) into {}",
                        elapsed_secs,
                        completed_games,
                        completed_moves,
                        run_identifier
                    );
                }
            }
        }
    }
    csv_log.flush()?;
    csv_game.flush()?;
    println!(
        "After {} seconds, have logged {} games ({} moves) into {}",
        t0.elapsed().as_secs(),
        completed_games,
        completed_moves,
        run_identifier
    );

    for thread in threads {
        match thread.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::error!("worker failed: {}", e),
            Err(e) => log::error!("worker panicked: {:?}", e),
        }
    }

    Ok(())
}
