use crate::api::BackendClient;
use crate::chat_view::ChatView;
use crate::config::Config;
use crate::constants::TICK_RATE_MS;
use crate::errors::{AssistantError, AssistantResult};
use crate::key_handlers::{handle_chat_input, Action};
use crate::status_indicator::StatusIndicator;
use crate::ui::{self, chat::MessageLines};
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

pub struct App {
    pub view: ChatView,
    pub status_indicator: StatusIndicator,
    pub message_lines: MessageLines,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> App {
        App {
            view: ChatView::new(config.greeting.clone()),
            status_indicator: StatusIndicator::new(),
            message_lines: MessageLines::new(),
            should_quit: false,
        }
    }

    /// Applies a key press. Returns the text to send when a submission was
    /// accepted.
    pub fn handle_key(&mut self, key: event::KeyEvent) -> Option<String> {
        match handle_chat_input(key, &mut self.view) {
            Action::Send(text) => {
                self.status_indicator.set_thinking(true);
                Some(text)
            }
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::None => None,
        }
    }

    pub fn on_reply(&mut self, reply: String) {
        self.view.complete(reply);
        self.status_indicator.set_thinking(self.view.is_in_flight());
    }

    pub fn on_tick(&mut self) {
        self.status_indicator.tick();
    }
}

/// Runs `restore` when dropped, so the terminal is put back on early
/// returns and while unwinding from a panic.
pub struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> TerminalGuard<F> {
    pub fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    // Best effort: never fail while restoring.
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

/// Restores the terminal before the panic message is printed, otherwise it
/// lands on the alternate screen and is lost.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}

/// Sets up the terminal, runs the chat until the user quits, then restores
/// the terminal however the loop ended.
pub async fn run(config: &Config) -> AssistantResult<()> {
    let client = BackendClient::from_config(config)?;
    log::info!("Using backend {}", client.url());

    install_panic_hook();
    enable_raw_mode()?;
    let _guard = TerminalGuard::new(restore_terminal);

    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    run_app(&mut terminal, App::new(config), client).await
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: App,
    client: BackendClient,
) -> AssistantResult<()> {
    let (input_tx, input_rx) = mpsc::channel::<Event>(100);

    // crossterm reads block, so they live on their own thread.
    tokio::task::spawn_blocking(move || loop {
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if input_tx.blocking_send(ev).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    log::error!("Failed to read terminal event: {}", e);
                    return;
                }
            },
            Ok(false) => {
                if input_tx.is_closed() {
                    return;
                }
            }
            Err(e) => {
                log::error!("Failed to poll terminal events: {}", e);
                return;
            }
        }
    });

    event_loop(terminal, app, client, input_rx).await
}

/// Drives the app from terminal events until the user quits. Fails when the
/// event source closes, since no quit key can arrive after that.
pub async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    client: BackendClient,
    mut input_rx: mpsc::Receiver<Event>,
) -> AssistantResult<()> {
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_RATE_MS));

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        tokio::select! {
            ev = input_rx.recv() => {
                let Some(ev) = ev else {
                    log::error!("Terminal event reader stopped");
                    return Err(AssistantError::terminal_error("terminal event reader stopped"));
                };
                if let Event::Key(key) = ev {
                    if let Some(text) = app.handle_key(key) {
                        log::debug!("Submitting {} chars", text.chars().count());
                        let client = client.clone();
                        let reply_tx = reply_tx.clone();
                        tokio::spawn(async move {
                            let reply = client.send_message(&text).await;
                            let _ = reply_tx.send(reply);
                        });
                    }
                }
            }
            Some(reply) = reply_rx.recv() => {
                app.on_reply(reply);
            }
            _ = ticker.tick() => {
                app.on_tick();
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
