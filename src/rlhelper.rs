// Copyright (C) 2020-2026 Andy Kurnia.

// Line editor helper for the shell: the first word completes to a command,
// later words complete to file names (for load and source).

#[derive(
    rustyline_derive::Helper,
    rustyline_derive::Hinter,
    rustyline_derive::Highlighter,
    rustyline_derive::Validator,
)]
pub struct ShellHelper {
    commands: &'static [&'static str],
    files: rustyline::completion::FilenameCompleter,
}

impl ShellHelper {
    pub fn new(commands: &'static [&'static str]) -> Self {
        Self {
            commands,
            files: rustyline::completion::FilenameCompleter::new(),
        }
    }
}

impl rustyline::completion::Completer for ShellHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<rustyline::completion::Pair>)> {
        let head = &line[..pos];
        let start = head.len() - head.trim_start().len();
        if head[start..].contains(char::is_whitespace) {
            return self.files.complete(line, pos, ctx);
        }
        let typed = &head[start..];
        Ok((
            start,
            self.commands
                .iter()
                .filter(|cmd| cmd.starts_with(typed))
                .map(|&cmd| rustyline::completion::Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                })
                .collect(),
        ))
    }
}

pub fn new_rl_editor(
    commands: &'static [&'static str],
) -> rustyline::Result<rustyline::Editor<ShellHelper, rustyline::history::DefaultHistory>> {
    let mut rl = rustyline::Editor::new()?;
    rl.set_helper(Some(ShellHelper::new(commands)));
    Ok(rl)
}
