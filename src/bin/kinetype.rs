use std::io::Write;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use kinetype::{
    Fps, GlyphKind, RotationDef, ScrambleTuning, Scrambler, TextFrame, WallClock, WordsDef,
    clock::FrameClock as _,
};

#[derive(Parser, Debug)]
#[command(name = "kinetype", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a word rotation in the terminal.
    Play(PlayArgs),
    /// Print every frame of one transition, one line per frame.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input rotation JSON.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Comma-delimited word list (overrides the file).
    #[arg(long)]
    words: Option<String>,

    /// Delay between transitions in milliseconds (overrides the file).
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Playback frame rate (overrides the file).
    #[arg(long)]
    fps: Option<u32>,

    /// Random seed (overrides the file).
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many completed transitions (default: run until killed).
    #[arg(long)]
    cycles: Option<u64>,

    /// Disable ANSI styling of scramble glyphs.
    #[arg(long)]
    no_color: bool,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Source text.
    #[arg(long, default_value = "")]
    from: String,

    /// Target text.
    #[arg(long)]
    to: String,

    /// Random seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn load_def(args: &PlayArgs) -> anyhow::Result<RotationDef> {
    let mut def = match &args.in_path {
        Some(path) => RotationDef::from_path(path)
            .with_context(|| format!("load rotation '{}'", path.display()))?,
        None => RotationDef::default(),
    };

    if let Some(words) = &args.words {
        def.words = WordsDef::Csv(words.clone());
    }
    if let Some(ms) = args.interval_ms {
        def.interval_ms = ms;
    }
    if let Some(fps) = args.fps {
        def.fps = Fps::new(fps, 1)?;
    }
    if let Some(seed) = args.seed {
        def.seed = seed;
    }

    if def.words.resolve().is_empty() {
        anyhow::bail!("no words to rotate; pass --words or an input file");
    }
    Ok(def)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let def = load_def(&args)?;
    let mut rotation = def.build()?;
    let mut clock = WallClock::new(def.fps);
    rotation.start();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    loop {
        clock.wait_next_frame();
        if let Some(frame) = rotation.tick() {
            render_line(&mut out, &frame, args.no_color)?;
        }
        if let Some(cycles) = args.cycles
            && rotation.transitions_completed() >= cycles
        {
            rotation.stop();
        }
        if rotation.is_idle() {
            break;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn render_line(out: &mut impl Write, frame: &TextFrame, no_color: bool) -> std::io::Result<()> {
    write!(out, "\r\x1b[2K")?;
    if no_color {
        write!(out, "{frame}")?;
    } else {
        for span in frame.spans() {
            match span.kind {
                GlyphKind::Settled => write!(out, "{}", span.text)?,
                GlyphKind::Scrambling => write!(out, "\x1b[2m{}\x1b[22m", span.text)?,
            }
        }
    }
    out.flush()
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let mut scrambler = Scrambler::with_text(&args.from, args.seed, ScrambleTuning::default())?;
    scrambler.set_text(&args.to);

    let mut frame_no = 0u64;
    while let Some(frame) = scrambler.tick() {
        println!("{frame_no:>4} {}", frame.plain());
        frame_no += 1;
    }
    Ok(())
}
