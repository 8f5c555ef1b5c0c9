use crate::utils::error::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

/// What one line typed at the terminal means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Bare Enter: the activate key.
    Activate,
    Start,
    Quit,
    Unknown(String),
}

impl InputCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "" => InputCommand::Activate,
            "s" | "start" => InputCommand::Start,
            "q" | "quit" | "exit" => InputCommand::Quit,
            _ => InputCommand::Unknown(line.trim().to_string()),
        }
    }
}

/// Read lines until EOF, a quit command, or the receiver going away,
/// forwarding each as a command. EOF is reported as `Quit`.
pub async fn read_commands<R>(reader: R, tx: mpsc::UnboundedSender<InputCommand>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let command = InputCommand::parse(&line);
        let quit = command == InputCommand::Quit;
        if tx.send(command).is_err() || quit {
            return Ok(());
        }
    }

    tracing::debug!("Input closed");
    let _ = tx.send(InputCommand::Quit);
    Ok(())
}
