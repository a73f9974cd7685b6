use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::advisory::SubmittedFlag;
use crate::app_core::AppCore;
use crate::background::live::LiveHandler;
use crate::client::SubmitClient;
use crate::config::Settings;
use crate::input::KeyEvent;
use crate::logging::init_logging;
use crate::state::FormState;

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        let log = init_logging()?;

        tracing::info!(server_url = %self.settings.server_url, "inquiry-form starting");

        // Read once; later runs see what this run persisted
        let flag = SubmittedFlag::in_config_dir()?;
        let already_submitted = flag.is_set();
        tracing::info!(already_submitted, "Loaded submitted flag");

        let client = SubmitClient::new(&self.settings.server_url, self.settings.request_timeout())?;
        let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();

        let state = FormState::new(self.settings.destination.clone(), already_submitted)
            .with_redirect_delay(self.settings.redirect_delay());
        let mut core = AppCore::new(LiveHandler::new(client, flag, events_tx), state);

        // Following the link is what brings the visitor here
        core.open_prompt();

        let mut terminal = self.init()?;
        let mut event_stream = EventStream::new();
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));

        tracing::info!("Entering main event loop");

        while !core.should_quit() {
            terminal.draw(|f| {
                crate::ui::render_app(f, core.state());
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = core.state_mut().loading_state() {
                        throbber_state.calc_next();
                    }
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            core.handle_key(KeyEvent::from(key));
                        }
                    }
                }
                Some(submission_event) = events_rx.recv() => {
                    tracing::debug!("Received submission event: {:?}", submission_event);
                    core.handle_submission_event(submission_event);
                }
            }
        }

        tracing::info!("Quit requested, exiting event loop");

        self.exit(terminal)?;

        if let Some(destination) = &core.state().navigated_to {
            println!("Continuing to {}", destination);
        }
        println!("Log written to {}", log.path.display());

        Ok(())
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}
