//! Detection demo
//!
//! Wires a bus with the standard channels, the trace dispatcher, the
//! detection tracker and a simulated detection service, then reads
//! `detection_handler start|stop` lines from stdin.
//!
//! ```text
//! RUST_LOG=busprobe=debug cargo run --example detection-demo
//! > detection_handler start
//! > detection_handler stop
//! ```
//!
//! Ctrl-C or end of input shuts everything down.
//!
//! Shell commands publish without waiting. A command typed while the
//! service is delivering on `DETECTION_CHAN` fails with status -16 (EBUSY)
//! and is not retried; type it again.

use std::{
    io::BufRead,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use busprobe::{
    Bus, ChannelId, Channels, DetectionCommander, DetectionShell, DetectionTracker, Listener,
    Message, Notification, Publish, TraceDispatcher, TracingSink, WaitPolicy,
    catalog::{ButtonMsg, ButtonPress, DetectionKind, DetectionMsg, DetectionResult, NetworkMsg},
    detection::ClassTable,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Commands the simulated service has seen but not yet acted on.
///
/// Listeners cannot publish on the channel they are notified from, so the
/// service only records commands here and answers from its own task.
#[derive(Default)]
struct ServiceInbox {
    start: AtomicBool,
    stop: AtomicBool,
}

impl Listener for ServiceInbox {
    fn on_notify(&self, notification: &Notification<'_>) {
        if let Message::Detection(msg) = notification.message() {
            match msg.kind {
                DetectionKind::Start => self.start.store(true, Ordering::SeqCst),
                DetectionKind::Stop => self.stop.store(true, Ordering::SeqCst),
                _ => {}
            }
        }
    }

    fn name(&self) -> &str {
        "detection-service"
    }
}

async fn detection_service(
    bus: Bus,
    channel: ChannelId,
    inbox: Arc<ServiceInbox>,
    cancel: CancellationToken,
) -> busprobe::Result {
    let origin = tokio::time::Instant::now();
    let mut interval = tokio::time::interval(Duration::from_millis(750));
    let mut running = false;
    let mut tick: u32 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            _ = interval.tick() => {}
        }
        let now = i64::try_from(origin.elapsed().as_millis()).unwrap_or(i64::MAX);

        let kind = if inbox.start.swap(false, Ordering::SeqCst) {
            running = true;
            Some(DetectionKind::Started)
        } else if inbox.stop.swap(false, Ordering::SeqCst) {
            running = false;
            Some(DetectionKind::Stopped)
        } else if running {
            tick = tick.wrapping_add(1);
            Some(DetectionKind::Result(DetectionResult {
                predicted_class: tick % 4,
                confidence: 0.55 + (tick % 5) as f32 * 0.0875,
            }))
        } else {
            None
        };

        if let Some(kind) = kind {
            bus.publish(&channel, DetectionMsg::new(kind, now).into(), WaitPolicy::Forever)?;
        }
    }
}

/// Background chatter on the other channels so the tracer has something to show.
async fn peripherals(bus: Bus, channels: Channels, cancel: CancellationToken) -> busprobe::Result {
    let mut interval = tokio::time::interval(Duration::from_secs(3));
    let mut long = false;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            _ = interval.tick() => {}
        }
        let press = if long { ButtonPress::Long } else { ButtonPress::Short };
        long = !long;
        bus.publish(&channels.button, ButtonMsg::new(1, press).into(), WaitPolicy::Forever)?;
        let quality = NetworkMsg::QualitySampleResponse { rsrp: -97, snr: 8 };
        bus.publish(&channels.network, quality.into(), WaitPolicy::Forever)?;
    }
}

/// Forwards stdin lines from a plain thread.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

async fn shell_loop(shell: DetectionShell, cancel: CancellationToken) -> std::io::Result<()> {
    let mut lines = spawn_stdin_reader();
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            line = lines.recv() => line,
        };
        let Some(line) = line else {
            cancel.cancel();
            return Ok(());
        };
        let status = shell.execute(&line, &mut std::io::stdout())?;
        match status {
            0 => {}
            -16 => println!("status {status}: detection channel busy, try again"),
            _ => println!("status {status}"),
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bus = Bus::default();
    let channels = Channels::new(&bus);

    TraceDispatcher::with_default_decoders(&channels, TracingSink::from_config(bus.config()))
        .observe(&channels.detection)
        .build()?
        .attach(&bus)?;

    let classes = ClassTable::new(["background", "person", "vehicle", "animal"]);
    let tracker = DetectionTracker::new(classes);
    tracker.attach(&bus, &channels.detection)?;

    let inbox = Arc::new(ServiceInbox::default());
    bus.add_listener(&channels.detection, inbox.clone())?;

    let shell = DetectionShell::new(DetectionCommander::new(
        bus.clone(),
        channels.detection.clone(),
    ));

    let cancel = CancellationToken::new();
    let service = tokio::spawn(detection_service(
        bus.clone(),
        channels.detection.clone(),
        inbox,
        cancel.clone(),
    ));
    let chatter = tokio::spawn(peripherals(bus.clone(), channels.clone(), cancel.clone()));
    let input = tokio::spawn(shell_loop(shell, cancel.clone()));

    tokio::select! {
        _ = tokio::signal::ctrl_c() => cancel.cancel(),
        _ = cancel.cancelled() => {}
    }

    service.await??;
    chatter.await??;
    input.await??;

    let stats = tracker.stats();
    tracing::info!(running = stats.is_running(), count = stats.count(), "shutdown");
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error while executing example: {e}");
    }
}
