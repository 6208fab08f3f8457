use crate::{
    api::WebhookClient,
    chat_widget::{ChatWidget, Reply},
    config::Config,
    constants::{INPUT_POLL_MS, TICK_RATE_MS},
    dispatcher::Dispatcher,
    errors::HookchatResult,
    highlight::SyntectHighlighter,
    key_handlers::{handle_key, handle_mouse, KeyOutcome},
    session::SessionId,
    ui::{self, Chrome, Hitboxes},
};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Events produced by the terminal reader thread.
enum Event {
    Input(CEvent),
    Tick,
}

pub struct App {
    pub widget: ChatWidget,
    chrome: Chrome,
    highlighter: SyntectHighlighter,
    hitboxes: Hitboxes,
    should_quit: bool,
}

impl App {
    pub fn new(widget: ChatWidget, config: &Config) -> App {
        App {
            widget,
            chrome: Chrome::from_config(config),
            highlighter: SyntectHighlighter::new(config.code_theme.clone()),
            hitboxes: Hitboxes::default(),
            should_quit: false,
        }
    }

    fn handle_input(&mut self, event: CEvent) {
        match event {
            CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut self.widget, key) == KeyOutcome::Quit {
                    self.should_quit = true;
                }
            }
            CEvent::Mouse(mouse) => handle_mouse(&mut self.widget, mouse, &self.hitboxes),
            _ => {}
        }
    }
}

/// Builds a widget from `config` and runs it full-screen until the user quits.
pub async fn run(config: Config) -> HookchatResult<()> {
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
    let client = WebhookClient::from_config(&config)?;
    let session_id = SessionId::generate();
    log::info!("widget session {}", session_id);

    let widget = ChatWidget::new(
        Dispatcher::new(client, session_id),
        config.quick_replies.clone(),
        reply_tx,
    );
    let mut app = App::new(widget, &config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut reply_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        log::error!("widget loop failed: {}", e);
    }
    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    replies: &mut mpsc::UnboundedReceiver<Reply>,
) -> HookchatResult<()> {
    let (tx, rx) = mpsc::channel::<Event>(100);
    spawn_event_reader(tx);
    event_loop(terminal, app, rx, replies).await
}

/// Draws and dispatches until the user quits or the terminal event source
/// goes away.
async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut events: mpsc::Receiver<Event>,
    replies: &mut mpsc::UnboundedReceiver<Reply>,
) -> HookchatResult<()> {
    loop {
        {
            let App {
                widget,
                chrome,
                highlighter,
                hitboxes,
                ..
            } = &mut *app;
            terminal.draw(|f| *hitboxes = ui::draw(f, widget, &*chrome, &*highlighter))?;
        }

        tokio::select! {
            event = events.recv() => match event {
                Some(Event::Input(event)) => app.handle_input(event),
                Some(Event::Tick) => app.widget.tick(),
                None => {
                    log::warn!("terminal event reader stopped, leaving the widget");
                    break;
                }
            },
            Some(reply) = replies.recv() => app.widget.apply_reply(reply),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Polls the terminal on a blocking thread so requests and redraws never
/// wait on input.
fn spawn_event_reader(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        let tick_rate = Duration::from_millis(TICK_RATE_MS);
        let mut last_tick = Instant::now();
        loop {
            match event::poll(Duration::from_millis(INPUT_POLL_MS)) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if tx.blocking_send(Event::Input(event)).is_err() {
                            return;
                        }
                    }
                    Err(e) => log::warn!("failed to read terminal event: {}", e),
                },
                Ok(false) => {}
                Err(e) => {
                    log::error!("terminal polling failed: {}", e);
                    return;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });
}
