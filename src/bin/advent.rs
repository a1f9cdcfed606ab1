use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use advent::{
    AnyToy, Calendar, CalendarConfig, CalendarMedia, Canvas, Clock, DoorId, ManualClock, Millis,
    Payload, Point, PressOutcome, PreviewPalette, RecordingCue, RecordingOverlay, SystemClock,
    ToyLibrary,
};

#[derive(Parser, Debug)]
#[command(name = "advent", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List doors and whether each one is unlocked.
    Check(CheckArgs),
    /// Run the frame driver headless and print door state as JSON lines.
    Simulate(SimulateArgs),
    /// Render one simulated frame to a PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Calendar JSON.
    #[arg(long)]
    config: PathBuf,

    /// Day of month to check against (defaults to today).
    #[arg(long)]
    day: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
struct DriveArgs {
    /// Calendar JSON.
    #[arg(long)]
    config: PathBuf,

    /// Day of month the clock reports (defaults to today).
    #[arg(long)]
    day: Option<u32>,

    /// Pointer presses as `X,Y@FRAME` in canvas pixels.
    #[arg(long = "press", value_parser = parse_press)]
    presses: Vec<ScheduledPress>,

    /// Frames per second used to advance the wall clock.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1000)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 1000)]
    height: u32,

    /// Report a presented video as finished after this many milliseconds.
    #[arg(long, default_value_t = 3000)]
    video_ms: u64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    drive: DriveArgs,

    /// Number of frames to run.
    #[arg(long, default_value_t = 450)]
    frames: u64,

    /// Only print frames where some door changed state.
    #[arg(long)]
    changes: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    drive: DriveArgs,

    /// Frame index (0-based) to render.
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Directory of toy PNGs (`toy_<key>.png` or `<key>.png`).
    #[arg(long)]
    toys: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScheduledPress {
    at: Point,
    frame: u64,
}

fn parse_press(s: &str) -> Result<ScheduledPress, String> {
    let (xy, frame) = s
        .split_once('@')
        .ok_or_else(|| format!("expected X,Y@FRAME, got '{s}'"))?;
    let (x, y) = xy
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y@FRAME, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    let frame: u64 = frame
        .trim()
        .parse()
        .map_err(|e| format!("bad frame '{frame}': {e}"))?;
    Ok(ScheduledPress {
        at: Point::new(x, y),
        frame,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn read_config(path: &Path) -> anyhow::Result<CalendarConfig> {
    CalendarConfig::from_path(path).with_context(|| format!("load calendar '{}'", path.display()))
}

fn resolve_today(day: Option<u32>) -> u32 {
    day.unwrap_or_else(|| SystemClock::new().day_of_month())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    let today = resolve_today(args.day);
    let resolved = config.access.resolve_day(today);

    println!(
        "resolved day {resolved} (today {today}, all_doors {}, test_day {:?})",
        config.access.all_doors, config.access.test_day
    );
    for cfg in &config.doors {
        let id = DoorId::new(cfg.id)?;
        let payload = match Payload::parse(&cfg.payload) {
            Payload::Image(key) => format!("toy {key}"),
            Payload::Video(path) => format!("video {path}"),
        };
        let state = if config.access.permits(id, today) {
            "unlocked"
        } else {
            "locked"
        };
        println!(
            "door {id:>2}  {:<7} {:<8} {payload}",
            cfg.animation_style().name(),
            state
        );
    }
    Ok(())
}

/// Headless host: a manual clock, scripted presses, and videos that end after a fixed time.
struct Driver {
    calendar: Calendar<RecordingCue, RecordingOverlay>,
    clock: ManualClock,
    presses: Vec<ScheduledPress>,
    fps: u32,
    video_ms: u64,
    playing: Option<(DoorId, Millis)>,
}

impl Driver {
    fn new(args: &DriveArgs) -> anyhow::Result<Self> {
        if args.fps == 0 {
            anyhow::bail!("--fps must be > 0");
        }
        let config = read_config(&args.config)?;
        let canvas = Canvas::new(args.width, args.height)?;
        let media = CalendarMedia {
            open_sound: Some(RecordingCue::new()),
            locked_sound: Some(RecordingCue::new()),
            overlay: RecordingOverlay::default(),
        };
        Ok(Self {
            calendar: Calendar::new(&config, canvas, media),
            clock: ManualClock::new(resolve_today(args.day)),
            presses: args.presses.clone(),
            fps: args.fps,
            video_ms: args.video_ms,
            playing: None,
        })
    }

    /// Run input, video completion and door updates for frame `index`.
    fn step(&mut self, index: u64) -> Vec<PressOutcome> {
        self.clock
            .set(Millis(index.saturating_mul(1000) / u64::from(self.fps)));
        let now = self.clock.now();

        let mut outcomes = Vec::new();
        let due: Vec<Point> = self
            .presses
            .iter()
            .filter(|p| p.frame == index)
            .map(|p| p.at)
            .collect();
        for at in due {
            let outcome = self.calendar.press(at, &self.clock);
            if let PressOutcome::Opened {
                door,
                video: Some(path),
            } = &outcome
                && !path.is_empty()
            {
                self.playing = Some((*door, now));
            }
            outcomes.push(outcome);
        }

        if let Some((door, started)) = self.playing
            && now.since(started) >= self.video_ms
        {
            self.playing = None;
            self.calendar.video_finished(door);
        }

        self.calendar.tick(now);
        outcomes
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let mut driver = Driver::new(&args.drive)?;
    let mut previous: Vec<advent::DoorState> = Vec::new();

    for index in 0..args.frames {
        let outcomes = driver.step(index);
        let states: Vec<_> = driver.calendar.doors().iter().map(|d| d.state()).collect();
        let changed = states != previous || !outcomes.is_empty();
        previous = states;
        if args.changes && !changed {
            continue;
        }

        let doors: Vec<_> = driver
            .calendar
            .doors()
            .iter()
            .map(|d| {
                serde_json::json!({
                    "id": d.id(),
                    "state": d.state(),
                    "anim_progress": d.anim_progress(),
                    "toy_progress": d.toy_progress(),
                    "toy_alpha": d.toy_alpha(),
                })
            })
            .collect();
        let line = serde_json::json!({
            "frame": index,
            "now_ms": driver.clock.now(),
            "presses": outcomes,
            "doors": doors,
        });
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mut driver = Driver::new(&args.drive)?;
    for index in 0..=args.frame {
        driver.step(index);
    }

    let toys = match &args.toys {
        Some(dir) => ToyLibrary::load_dir(dir)?,
        None => ToyLibrary::new(),
    };
    let intents = if args.toys.is_some() {
        driver.calendar.intents(&toys)
    } else {
        driver.calendar.intents(&AnyToy)
    };
    let frame = advent::render_preview(
        driver.calendar.canvas(),
        &intents,
        &toys,
        PreviewPalette::default(),
    );
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
