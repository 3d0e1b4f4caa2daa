//! Binary entry point: wires together the environment, built-in table,
//! and line editor, runs `~/.aisharc`, then drives the interactive loop.

mod prompt;
mod repl;
mod startup;

use aisha_editor::{Editor, RealTerminal};
use aisha_env::{Env, RealSystem};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    if let Err(e) = aisha_env::signal::install() {
        eprintln!("aisha: failed to install signal handlers: {e}");
        return ExitCode::FAILURE;
    }

    let arg0 = std::env::args().next().unwrap_or_else(|| "aisha".to_owned());
    let mut env = Env::new(RealSystem, nix::unistd::getpid(), arg0);
    let builtins = aisha_builtin::default_table();

    let history_path = dirs::home_dir().map(|home| home.join(".aisha_history"));
    if let Some(path) = &history_path {
        if let Err(e) = env.history.load(path) {
            log::warn!("could not load history from {}: {e}", path.display());
        }
    }
    env.history_path = history_path;

    if let Some(path) = startup::init_file::default_path() {
        startup::init_file::run(&mut env, &builtins, &path);
    }

    let mut editor = Editor::new(RealTerminal);
    let status = repl::run(&mut env, &builtins, &mut editor);

    ExitCode::from(status.clamp(0, 255) as u8)
}
