//! Interactive shell: one command per input line, panes redrawn after each.
//!
//! Assistant replies arrive on their own schedule and are printed as soon as
//! they land, between commands.

use scribe::{render, Author, Command, Flow, Layout, TranscriptUpdate};
use tokio::{
    io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    sync::broadcast::error::RecvError,
};
use tracing::{debug, info};

const PROMPT: &str = "scribe> ";

/// Drive `layout` from `input` until `quit` or end of input.
///
/// Pending assistant replies are cancelled when the session ends.
pub async fn run<R, W>(layout: &mut Layout, input: R, output: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("shell session started");
    let mut updates = layout.subscribe();
    let mut lines = input.lines();

    write_block(output, &render::layout(layout)).await?;
    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("input closed");
                    break;
                };
                if line.trim().is_empty() {
                    output.write_all(PROMPT.as_bytes()).await?;
                    output.flush().await?;
                    continue;
                }
                if execute(layout, &line, output).await? == Flow::Quit {
                    break;
                }
                output.write_all(PROMPT.as_bytes()).await?;
                output.flush().await?;
            },
            update = updates.recv() => match update {
                Ok(TranscriptUpdate::MessageAdded(msg)) if msg.author == Author::Assistant => {
                    output.write_all(b"\n").await?;
                    write_block(output, &render::arrival(&msg)).await?;
                    output.write_all(PROMPT.as_bytes()).await?;
                    output.flush().await?;
                },
                Ok(_) => {},
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "missed transcript updates"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    layout.shutdown();
    info!("shell session ended");
    Ok(())
}

/// Parse and apply one line, writing whatever it produces.
async fn execute<W>(layout: &mut Layout, line: &str, output: &mut W) -> io::Result<Flow>
where
    W: AsyncWrite + Unpin,
{
    let command = match line.parse::<Command>().map_err(scribe::Error::from) {
        Ok(command) => command,
        Err(e) => {
            write_block(output, &format!("error: {e}")).await?;
            return Ok(Flow::Continue);
        },
    };
    debug!(?command, "executing");

    if command == Command::Help {
        write_block(output, &help()).await?;
        return Ok(Flow::Continue);
    }

    let redraw = command.redraws();
    let flow = layout.apply(command);
    if redraw {
        write_block(output, &render::layout(layout)).await?;
    }
    Ok(flow)
}

fn help() -> String {
    Command::USAGE
        .iter()
        .map(|(usage, about)| format!("  {usage:<26}{about}"))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn write_block<W>(output: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await
}
