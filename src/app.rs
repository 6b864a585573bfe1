use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use crossterm::event::{self, Event as TerminalEvent, KeyEvent};
use reqwest::Client;
use tokio::{
    sync::mpsc::{self, UnboundedSender},
    task::JoinHandle,
};

use crate::{
    ai::CompletionClient,
    config::AppConfig,
    infrastructure::{
        directories::ResolvedPaths,
        shutdown::{Shutdown, ShutdownListener, ShutdownReason},
        terminal::TerminalGuard,
    },
    tasks::CommandRunner,
    ui::render::render,
    widget::{map_key, ClassifierState, Command, Event, KeyAction},
};

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Terminal input forwarded from the blocking reader.
enum TerminalInput {
    Key(KeyEvent),
    Redraw,
}

pub struct MailSorterApp {
    paths: ResolvedPaths,
    config: Arc<AppConfig>,
    classifier: Arc<CompletionClient>,
    shutdown: Shutdown,
}

impl MailSorterApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths, shutdown: Shutdown) -> Result<Self> {
        let config = Arc::new(config);

        let http_client = Client::builder()
            .user_agent(format!("mail-sorter/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let classifier = Arc::new(CompletionClient::new(
            http_client,
            config.classifier.clone(),
        ));

        Ok(Self {
            paths,
            config,
            classifier,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let MailSorterApp {
            paths,
            config,
            classifier,
            shutdown,
        } = self;

        tracing::info!(
            target: "ui",
            model = classifier.model(),
            endpoint = %config.classifier.api_url,
            logs_dir = %paths.logs_dir.display(),
            "email classifier starting"
        );

        let mut guard = TerminalGuard::enter()?;
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<TerminalInput>();
        let input_reader = spawn_input_reader(input_tx, shutdown.subscribe());

        let model = classifier.model().to_string();
        let mut runner = CommandRunner::new(classifier, event_tx);
        let mut state = ClassifierState::new(config.ui.clear_delay);
        let mut shutdown_listener = shutdown.subscribe();

        let outcome: Result<ShutdownReason> = async {
            loop {
                guard
                    .terminal()
                    .draw(|frame| render(frame, &state, &model))
                    .context("failed to draw classifier")?;

                tokio::select! {
                    reason = shutdown_listener.notified() => return Ok::<_, anyhow::Error>(reason),
                    Some(event) = event_rx.recv() => {
                        dispatch(&mut state, &mut runner, event);
                    }
                    input = input_rx.recv() => match input {
                        Some(TerminalInput::Key(key)) => match map_key(key, state.focus()) {
                            Some(KeyAction::Quit) => shutdown.trigger(ShutdownReason::UserQuit),
                            Some(KeyAction::Widget(event)) => dispatch(&mut state, &mut runner, event),
                            None => {}
                        },
                        Some(TerminalInput::Redraw) => {}
                        None => return Ok::<_, anyhow::Error>(ShutdownReason::Terminate),
                    },
                }
            }
        }
        .await;

        dispatch(&mut state, &mut runner, Event::Dispose);
        drop(input_rx);
        if let Err(err) = input_reader.await {
            tracing::warn!(target: "ui", error = %err, "input reader ended abnormally");
        }
        drop(guard);

        let reason = outcome?;
        tracing::info!(
            target: "ui",
            %reason,
            filed = state.store().total(),
            "email classifier stopped"
        );
        Ok(())
    }
}

fn dispatch<C>(state: &mut ClassifierState, runner: &mut CommandRunner<C>, event: Event)
where
    C: crate::ai::EmailClassifier,
{
    for command in state.update(event) {
        if let Command::Classify { attempt, .. } = &command {
            tracing::debug!(target: "ui", attempt = *attempt, "dispatching classification");
        }
        runner.execute(command);
    }
}

/// Reads crossterm events on a blocking thread until the receiver goes away
/// or shutdown is requested.
fn spawn_input_reader(
    inputs: UnboundedSender<TerminalInput>,
    shutdown: ShutdownListener,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !inputs.is_closed() && !shutdown.is_triggered() {
            let ready = match event::poll(INPUT_POLL) {
                Ok(ready) => ready,
                Err(err) => {
                    tracing::error!(target: "ui", error = %err, "terminal poll failed");
                    break;
                }
            };
            if !ready {
                continue;
            }
            let input = match event::read() {
                Ok(TerminalEvent::Key(key)) => TerminalInput::Key(key),
                Ok(TerminalEvent::Resize(..)) => TerminalInput::Redraw,
                Ok(_) => continue,
                Err(err) => {
                    tracing::error!(target: "ui", error = %err, "terminal read failed");
                    break;
                }
            };
            if inputs.send(input).is_err() {
                break;
            }
        }
    })
}
