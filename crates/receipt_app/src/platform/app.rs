use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use receipt_core::{update, Msg, NavTarget, ViewState};
use receipt_logging::{receipt_debug, receipt_info, receipt_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::input::{self, Command};
use super::ui::render;

/// Everything the main loop reacts to. Producers are the stdin thread and the
/// engine event thread; the loop itself is the only consumer.
pub enum LoopEvent {
    Msg(Msg),
    Notice(Vec<String>),
    Quit,
}

pub fn run_app(config: &AppConfig) -> anyhow::Result<()> {
    receipt_info!("Starting receipt client against {}", config.server_url);

    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(config.client_settings(), loop_tx.clone())?;
    spawn_input_reader(loop_tx);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut state = ViewState::new();
    print_lines(&mut out, &render::render(&state.view()))?;

    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Quit => break,
            LoopEvent::Notice(lines) => print_lines(&mut out, &lines)?,
            LoopEvent::Msg(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    print_lines(&mut out, &render::render(&state.view()))?;
                }
            }
        }
    }

    receipt_info!("Receipt client exiting");
    Ok(())
}

fn spawn_input_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        forward_input(stdin.lock(), &loop_tx);
        // stdin closed
        let _ = loop_tx.send(LoopEvent::Quit);
    });
}

/// Forwards one event per command line until `reader` ends, a `quit` is read
/// or the loop has gone away. Bytes that are not UTF-8 are replaced, not fatal.
fn forward_input(mut reader: impl BufRead, loop_tx: &mpsc::Sender<LoopEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return,
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                receipt_warn!("Reading stdin failed: {}", err);
                return;
            }
        }
        let line = String::from_utf8_lossy(&buf);
        let Some(event) = event_for(input::parse_command(&line)) else {
            continue;
        };
        let quit = matches!(event, LoopEvent::Quit);
        if loop_tx.send(event).is_err() || quit {
            return;
        }
    }
}

fn event_for(command: Command) -> Option<LoopEvent> {
    let event = match command {
        Command::Upload(path) => {
            let image = path.as_deref().and_then(input::load_image);
            if image.is_none() {
                receipt_debug!("Upload requested without a readable file");
            }
            LoopEvent::Msg(Msg::UploadRequested(image))
        }
        Command::History => LoopEvent::Msg(Msg::Navigate(NavTarget::History)),
        Command::Refresh => LoopEvent::Msg(Msg::RefreshHistory),
        Command::Home => LoopEvent::Msg(Msg::Navigate(NavTarget::Upload)),
        Command::Dismiss => LoopEvent::Msg(Msg::ErrorDismissed),
        Command::Help => LoopEvent::Notice(render::help()),
        Command::Quit => LoopEvent::Quit,
        Command::Unknown(text) => {
            let mut lines = vec![format!("Unknown command: {text}")];
            lines.extend(render::help());
            LoopEvent::Notice(lines)
        }
        Command::Empty => return None,
    };
    Some(event)
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    writeln!(out)?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    write!(out, "> ")?;
    out.flush()
}
