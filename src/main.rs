use clap::Parser;
use miette::{IntoDiagnostic, Result};
use slotcore::application::controller::LifecycleController;
use slotcore::domain::payment::Amount;
use slotcore::error::CoreError;
use slotcore::infrastructure::console::{AutoPrompt, ConsoleEngine, ConsoleNotifier, InstantGateway};
use slotcore::infrastructure::in_memory::StaticGate;
use slotcore::interfaces::csv::event_reader::{EventReader, HostEvent, HostEventKind};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input host-event CSV script
    input: PathBuf,

    /// Deny the one-time startup security validation
    #[arg(long)]
    deny_init: bool,

    /// Deny resume-time security checks
    #[arg(long)]
    deny_check: bool,

    /// Fail initiated payments instead of completing them
    #[arg(long)]
    fail_payments: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let gate = if cli.deny_init {
        StaticGate::denying_init()
    } else {
        StaticGate::passing()
    };
    if cli.deny_check {
        gate.deny_checks();
    }

    let mut controller = LifecycleController::new(
        Box::new(gate),
        Box::new(ConsoleEngine),
        Box::new(InstantGateway::new(cli.fail_payments)),
        Box::new(AutoPrompt::affirmative()),
        Box::new(ConsoleNotifier),
    );

    // Replay the script
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = EventReader::new(file);
    for event_result in reader.events() {
        match event_result {
            Ok(event) => match dispatch(&mut controller, event).await {
                Ok(()) => {}
                Err(e) if e.is_fatal() => {
                    eprintln!("Session terminated: {e}");
                    break;
                }
                Err(e) => eprintln!("Error processing event: {e}"),
            },
            Err(e) => eprintln!("Error reading event: {e}"),
        }
    }

    // Idempotent, covers scripts that never tear down explicitly.
    controller.on_teardown().await.into_diagnostic()?;
    Ok(())
}

async fn dispatch(
    controller: &mut LifecycleController,
    event: HostEvent,
) -> slotcore::error::Result<()> {
    match event.event {
        HostEventKind::Init => controller.on_foreground_init().await?,
        HostEventKind::Resume => controller.on_foreground().await?,
        HostEventKind::Pause => controller.on_background().await?,
        HostEventKind::Teardown => controller.on_teardown().await?,
        HostEventKind::Exit => {
            controller.request_exit().await?;
        }
        HostEventKind::Touch => {
            if let (Some(x), Some(y), Some(action)) = (event.x, event.y, event.action) {
                controller.on_touch(x, y, action).await;
            } else {
                return Err(CoreError::ValidationError(
                    "touch event missing coordinates or action".to_string(),
                ));
            }
        }
        HostEventKind::Key => {
            if let Some(code) = event.code {
                controller.on_key_press(code).await;
            } else {
                return Err(CoreError::ValidationError(
                    "key event missing code".to_string(),
                ));
            }
        }
        HostEventKind::Pay => {
            if let Some(raw) = event.amount {
                controller.initiate_payment(Amount::try_from(raw)?).await?;
            } else {
                return Err(CoreError::ValidationError(
                    "pay event missing amount".to_string(),
                ));
            }
        }
    }
    controller.pump_payments().await;
    Ok(())
}
