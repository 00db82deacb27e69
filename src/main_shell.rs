// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use wordbot::{
    display, error, game_config, game_state, lexicon, matrix, move_picker, return_error, rlhelper,
    turn_engine,
};

static COMMANDS: &[&str] = &[
    "help", "exit", "source", "load", "new", "board", "rack", "place", "pass", "ai", "tier",
];

static HELP: &str = "\
load FILE [PREFIXFILE]  word list, one word per line
new [SEED]              new game, you move first
board                   show the board and scores
rack                    show your rack
place POS WORD          eg place 8h CATS (across) or place h8 CATS (down)
pass                    skip your turn
ai                      let the computer move for you
tier N                  computer strength, 0 to 3
source FILE             run commands from a file
exit";

const MAX_TICKS_PER_TURN: usize = 1000;

struct Shell<'a> {
    game_config: &'a game_config::GameConfig<'a>,
    lexicon: Option<lexicon::Lexicon>,
    game: Option<game_state::GameState<'a>>,
    ai_tier: move_picker::Tier,
    rng: rand_chacha::ChaCha20Rng,
}

impl<'a> Shell<'a> {
    fn load(&mut self, args: &[String]) -> error::Returns<()> {
        let Some(path) = args.get(1) else {
            return_error!("need a file name".into());
        };
        let alphabet = self.game_config.alphabet();
        let text = std::fs::read_to_string(path)?;
        let mut lexicon = lexicon::Lexicon::from_text(alphabet, &text)?;
        if let Some(prefix_path) = args.get(2) {
            let text = std::fs::read_to_string(prefix_path)?;
            lexicon.set_prefixes(alphabet, text.lines())?;
        }
        println!("{} words", lexicon.len());
        self.lexicon = Some(lexicon);
        Ok(())
    }

    fn new_game(&mut self, args: &[String]) -> error::Returns<()> {
        let Some(lexicon) = &self.lexicon else {
            return_error!("load a word list first".into());
        };
        if let Some(seed) = args.get(1) {
            self.rng = rand_chacha::ChaCha20Rng::seed_from_u64(seed.parse()?);
        }
        let mut game = game_state::GameState::new(self.game_config);
        game.deal(&mut self.rng);
        let opening = game.seed_opening(lexicon, &mut self.rng)?;
        println!(
            "opening word: {}",
            self.game_config.alphabet().fmt_word(&opening)
        );
        game.players[1].tier = self.ai_tier;
        self.game = Some(game);
        self.show_board();
        Ok(())
    }

    fn show_board(&self) {
        let Some(game) = &self.game else {
            println!("no game, try new");
            return;
        };
        display::print_board(self.game_config.alphabet(), &game.board);
        for (i, player) in (1..).zip(game.players.iter()) {
            print!("player {}: {}, ", i, player.score);
        }
        println!("turn: player {}", game.turn + 1);
        self.show_rack();
    }

    fn show_rack(&self) {
        if let Some(game) = &self.game {
            println!(
                "your rack: {}",
                game.rack_label(self.game_config.alphabet(), 0)
            );
        }
    }

    fn place(&mut self, args: &[String]) -> error::Returns<()> {
        let (Some(lexicon), Some(game)) = (&self.lexicon, &mut self.game) else {
            return_error!("no game, try new".into());
        };
        if game.turn != 0 {
            return_error!("not your turn".into());
        }
        let (Some(pos), Some(word)) = (args.get(1), args.get(2)) else {
            return_error!("usage: place POS WORD".into());
        };
        let Some((start, axis)) = matrix::Coord::parse_at(pos) else {
            return_error!(format!("bad position {:?}", pos));
        };
        let score = game.play_word(lexicon, word, start, axis)?;
        println!("{} {} scores {}", start.fmt_at(axis), word.to_uppercase(), score);
        self.end_turn(score)
    }

    fn pass(&mut self) -> error::Returns<()> {
        match self.game.as_ref().map(|game| game.turn) {
            Some(0) => self.end_turn(0),
            Some(_) => {
                return_error!("not your turn".into());
            }
            None => {
                return_error!("no game, try new".into());
            }
        }
    }

    // Runs the turn engine for whoever is to move.
    fn ai_move(&mut self) -> error::Returns<i16> {
        let (Some(lexicon), Some(game)) = (&self.lexicon, &mut self.game) else {
            return_error!("no game, try new".into());
        };
        let alphabet = self.game_config.alphabet();
        let tier = game.current_player().tier;
        let seed = self.rng.random();
        let mut engine = turn_engine::TurnEngine::new(alphabet, lexicon, tier, seed);
        engine.begin_turn();
        let (board, rack) = game.board_and_rack();
        let mut state = engine.current_state();
        for _ in 0..MAX_TICKS_PER_TURN {
            state = engine.advance_tick(board, rack);
            if state.is_terminal() {
                break;
            }
            rack.tick();
        }
        match state {
            turn_engine::AiState::Finishing => {
                let word = engine.last_word().unwrap_or_default();
                let score = engine.score_of_last_selection();
                let at = engine
                    .last_selection()
                    .and_then(|placed| placed.first())
                    .map(|t| t.coord)
                    .unwrap_or_default();
                let axis = match engine.last_selection() {
                    Some([a, b, ..]) if a.coord.row != b.coord.row => matrix::Axis::Vertical,
                    _ => matrix::Axis::Horizontal,
                };
                println!(
                    "player {} plays {} {} for {}",
                    game.turn + 1,
                    at.fmt_at(axis),
                    word,
                    score
                );
                Ok(score)
            }
            other => {
                log::debug!("ai stopped in {:?}", other);
                println!("player {} passes", game.turn + 1);
                Ok(0)
            }
        }
    }

    fn end_turn(&mut self, score: i16) -> error::Returns<()> {
        let mut score = score;
        loop {
            let Some(game) = &mut self.game else {
                return Ok(());
            };
            game.finish_turn(score);
            if let Some(end) = game.check_game_ended() {
                game.settle(end);
                self.show_board();
                println!("game over ({:?})", end);
                self.game = None;
                return Ok(());
            }
            game.next_turn();
            if game.turn == 0 {
                break;
            }
            score = self.ai_move()?;
        }
        self.show_board();
        Ok(())
    }

    fn set_tier(&mut self, args: &[String]) -> error::Returns<()> {
        let Some(level) = args.get(1) else {
            println!("tier {}", self.ai_tier.level());
            return Ok(());
        };
        self.ai_tier = move_picker::Tier::try_from(level.parse::<u8>()?)?;
        if let Some(game) = &mut self.game {
            game.players[1].tier = self.ai_tier;
        }
        Ok(())
    }

    fn run(&mut self, strings: &[String]) -> error::Returns<()> {
        match strings[0].as_str() {
            "help" => println!("{}", HELP),
            "load" => self.load(strings)?,
            "new" => self.new_game(strings)?,
            "board" => self.show_board(),
            "rack" => self.show_rack(),
            "place" => self.place(strings)?,
            "pass" => self.pass()?,
            "ai" => {
                if self.game.as_ref().is_some_and(|game| game.turn == 0) {
                    let score = self.ai_move()?;
                    self.end_turn(score)?;
                } else {
                    return_error!("no game or not your turn".into());
                }
            }
            "tier" => self.set_tier(strings)?,
            _ => println!("invalid input, help for help"),
        }
        Ok(())
    }
}

pub fn main() -> error::Returns<()> {
    let _logger = wordbot::logging::init("warn")?;
    let game_config = game_config::make_english_game_config();
    let mut shell = Shell {
        game_config: &game_config,
        lexicon: None,
        game: None,
        ai_tier: move_picker::Tier::default(),
        rng: rand_chacha::ChaCha20Rng::from_os_rng(),
    };
    let mut rl = rlhelper::new_rl_editor(COMMANDS)?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            match shell_words::split(&line) {
                Ok(strings) => {
                    if strings.is_empty() {
                        continue;
                    }
                    match strings[0].as_str() {
                        "exit" => {
                            break;
                        }
                        "source" => {
                            if strings.len() > 1 {
                                match std::fs::read_to_string(&strings[1]) {
                                    Ok(whole_file) => {
                                        let v = cmd_stack.len();
                                        for (line_num, line) in whole_file.lines().enumerate() {
                                            cmd_stack.push((
                                                line.to_string(),
                                                Some((strings[1].clone(), line_num + 1)),
                                            ));
                                        }
                                        cmd_stack[v..].reverse();
                                    }
                                    Err(err) => {
                                        println!("cannot open file: {:?}", err);
                                    }
                                }
                            } else {
                                println!("need another arg");
                            }
                        }
                        _ => {
                            if let Err(err) = shell.run(&strings) {
                                println!("{}", err);
                            }
                        }
                    }
                }
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}
