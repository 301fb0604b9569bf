//! Terminal input for the client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

/// Typed command that ends the session
pub const QUIT_COMMAND: &str = "/quit";

/// One event from the user's terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// A line to send as a chat message
    Line(String),
    /// The user wants to leave
    Quit,
}

/// Redisplay the prompt after printing a received line
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}

/// Classify one line typed by the user; `None` for blank input
pub fn parse_input(line: &str) -> Option<UserInput> {
    let line = line.trim_end();
    if line.trim().is_empty() {
        None
    } else if line.trim() == QUIT_COMMAND {
        Some(UserInput::Quit)
    } else {
        Some(UserInput::Line(line.to_string()))
    }
}

/// Read lines with rustyline on a dedicated thread.
///
/// The thread sends [`UserInput::Quit`] on `/quit`, Ctrl+C or Ctrl+D and
/// then exits. It also exits once the receiver is dropped and the next line
/// is entered.
pub fn spawn_input_thread(prompt: String) -> mpsc::UnboundedReceiver<UserInput> {
    let (input_tx, input_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                let _ = input_tx.send(UserInput::Quit);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let Some(input) = parse_input(&line) else {
                        continue;
                    };
                    let quit = input == UserInput::Quit;
                    if !quit {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(input).is_err() || quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    let _ = input_tx.send(UserInput::Quit);
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    let _ = input_tx.send(UserInput::Quit);
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    let _ = input_tx.send(UserInput::Quit);
                    break;
                }
            }
        }
    });

    input_rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        // テスト項目: 入力行がメッセージ・終了コマンド・空行に分類される
        // given (前提条件):
        let cases = [
            ("hello world  ", Some(UserInput::Line("hello world".to_string()))),
            ("  indented", Some(UserInput::Line("  indented".to_string()))),
            ("/quit", Some(UserInput::Quit)),
            ("   ", None),
            ("", None),
        ];

        for (line, expected) in cases {
            // when (操作):
            let input = parse_input(line);

            // then (期待する結果):
            assert_eq!(input, expected, "input: {line:?}");
        }
    }
}
