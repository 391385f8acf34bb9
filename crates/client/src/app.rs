//! Stdin-driven game loop.
//!
//! Commands are read line by line and forwarded to the runtime. Events are
//! printed by a separate task so timer-driven updates (resolution, reward
//! cards) show up without waiting for the next command.
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};

use quest_core::{WorldEvent, WorldInput};
use quest_runtime::{Event, Runtime, RuntimeHandle, Topic};

use crate::commands::{Command, HELP, mime_for};
use crate::presentation;

pub struct App {
    runtime: Runtime,
    json_events: bool,
}

impl App {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            json_events: false,
        }
    }

    /// Print events as JSON lines, one per event, for scripted hosts.
    pub fn json_events(mut self, enabled: bool) -> Self {
        self.json_events = enabled;
        self
    }

    pub async fn run(self) -> Result<()> {
        let handle = self.runtime.handle();
        let printer = tokio::spawn(print_events(
            handle.subscribe(Topic::Session),
            handle.subscribe(Topic::World),
            handle.subscribe(Topic::Reward),
            self.json_events,
        ));

        println!("Welcome, traveler. Type 'start' to begin or 'help' for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            if command == Command::Exit {
                break;
            }
            if let Err(e) = execute(&handle, command).await {
                tracing::warn!("Command failed: {:#}", e);
                println!("{:#}", e);
            }
        }

        drop(handle);
        self.runtime.shutdown().await?;
        // The bus closes with the worker, which ends the printer.
        printer.await?;
        Ok(())
    }
}

async fn execute(handle: &RuntimeHandle, command: Command) -> Result<()> {
    match command {
        Command::Start => handle.start_campaign().await?,
        Command::Scan(path) => {
            // The offline analyzer reads a scenario from `<photo>.json` when one exists.
            let sidecar = path.with_extension("json");
            let source = if sidecar.is_file() { sidecar } else { path };
            let image = tokio::fs::read(&source)
                .await
                .with_context(|| format!("Failed to read {}", source.display()))?;
            tracing::info!("Scanning {}", source.display());
            handle.scan_photo(image, mime_for(&source)).await?;
        }
        Command::Input(input) => {
            let events = handle.input(input).await?;
            let opened = events
                .iter()
                .any(|event| matches!(event, WorldEvent::DialogueOpened { .. }));
            if opened && let Some(text) = presentation::dialogue(&handle.snapshot().await?) {
                println!("{}", text);
            } else if events.is_empty()
                && matches!(input, WorldInput::Move(_))
                && let Some(hint) = presentation::blocked_move(&handle.snapshot().await?)
            {
                println!("{}", hint);
            }
        }
        Command::Arm(card_id) => {
            handle.arm_reward(card_id).await?;
        }
        Command::Collect => handle.collect_and_continue().await?,
        Command::Quit => handle.quit_to_menu().await?,
        Command::Status => println!("{}", presentation::hud(&handle.snapshot().await?)),
        Command::Cards => {
            let snapshot = handle.snapshot().await?;
            if snapshot.cards.is_empty() {
                println!("No cards yet.");
            }
            for card in snapshot.cards.iter() {
                println!("{}", presentation::card_line(card));
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Exit | Command::None => {}
    }
    Ok(())
}

async fn print_events(
    mut session_rx: broadcast::Receiver<Event>,
    mut world_rx: broadcast::Receiver<Event>,
    mut reward_rx: broadcast::Receiver<Event>,
    json: bool,
) {
    loop {
        let result = tokio::select! {
            result = session_rx.recv() => result,
            result = world_rx.recv() => result,
            result = reward_rx.recv() => result,
        };

        match result {
            Ok(event) if json => match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to encode event: {}", e),
            },
            Ok(event) => {
                if let Some(line) = presentation::describe(&event) {
                    println!("{}", line);
                }
            }
            Err(RecvError::Closed) => {
                tracing::debug!("Event stream closed");
                break;
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} stale events", skipped);
            }
        }
    }
}
