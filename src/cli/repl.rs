//! Line-oriented chat loop.

use std::io::{BufRead, Write};

use tracing::warn;

use crate::agent::ChatSession;
use crate::error::LumoError;

pub const GOODBYE: &str = "Bye bye for now! It was fun playing with you!";
pub const NUDGE: &str = "Did you say something? I couldn't hear you!";
pub const BUSY: &str = "(Lumo is thinking...)";
pub const HISTORY_UNAVAILABLE: &str = "-- history is unavailable right now --";

const SPEAKER: &str = "Lumo";
const PROMPT: &str = "You: ";

/// What one input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Nudge,
    Reset,
    ShowPersona,
    SetPersona(String),
    DefaultPersona,
    History,
    Say(String),
}

/// Classify one line, without its trailing newline.
///
/// An empty line is forwarded as-is. Whitespace-only lines are not.
pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        return ReplCommand::Quit;
    }
    if !line.is_empty() && trimmed.is_empty() {
        return ReplCommand::Nudge;
    }
    match trimmed {
        "/reset" => ReplCommand::Reset,
        "/history" => ReplCommand::History,
        "/persona" => ReplCommand::ShowPersona,
        "/persona default" => ReplCommand::DefaultPersona,
        _ => match trimmed.strip_prefix("/persona ") {
            Some(text) => ReplCommand::SetPersona(text.trim().to_string()),
            None => ReplCommand::Say(line.to_string()),
        },
    }
}

/// Greet, then read lines until `quit` or end of input.
pub async fn run_repl<R, W>(
    session: &mut ChatSession,
    mut input: R,
    output: &mut W,
) -> Result<(), LumoError>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{BUSY}")?;
    let greeting = session.start().await;
    say(output, &greeting.display_text)?;

    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            say(output, GOODBYE)?;
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match parse_line(line) {
            ReplCommand::Quit => {
                say(output, GOODBYE)?;
                break;
            }
            ReplCommand::Nudge => say(output, NUDGE)?,
            ReplCommand::Reset => {
                writeln!(output, "{BUSY}")?;
                let (id, greeting) = session.reset().await;
                writeln!(output, "-- new conversation {id} --")?;
                say(output, &greeting)?;
            }
            ReplCommand::ShowPersona => writeln!(output, "{}", session.persona())?,
            ReplCommand::SetPersona(text) => {
                session.apply_persona(text);
                writeln!(output, "-- persona updated --")?;
            }
            ReplCommand::DefaultPersona => {
                session.restore_default_persona();
                writeln!(output, "-- persona restored --")?;
            }
            ReplCommand::History => match session.history() {
                Ok(messages) => {
                    for message in messages {
                        writeln!(output, "[{}] {}", message.role, message.content)?;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Could not read conversation history");
                    writeln!(output, "{HISTORY_UNAVAILABLE}")?;
                }
            },
            ReplCommand::Say(text) => {
                writeln!(output, "{BUSY}")?;
                let reply = session.submit(&text).await;
                say(output, &reply)?;
            }
        }
    }
    Ok(())
}

fn say<W: Write>(output: &mut W, text: &str) -> std::io::Result<()> {
    writeln!(output, "{SPEAKER}: {text}")
}
