use std::fmt;
use std::path::{Path, PathBuf};

use edu_core::CompletionPolicy;
use edu_core::model::{CourseId, ModuleKind, QuestionId};
use edu_core::playback::format_timestamp;
use edu_core::summary::KeyPointSummarizer;
use services::{
    CatalogService, Clock, CourseSession, DEFAULT_UPCOMING_LIMIT, LiveChat, ModuleCompleted,
};
use storage::Storage;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Simulated clip length used when walking a video module.
const WALKTHROUGH_VIDEO_SECONDS: f64 = 600.0;
const WALKTHROUGH_TICK_SECONDS: f64 = 30.0;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingCourse,
    InvalidCourseId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingCourse => write!(f, "walkthrough requires --course <id>"),
            ArgsError::InvalidCourseId { raw } => write!(f, "invalid --course value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug)]
enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- catalog     [--search <query>] [--config <toml>]");
    eprintln!("  cargo run -p app -- live        [--config <toml>]");
    eprintln!("  cargo run -p app -- walkthrough --course <id> [--config <toml>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  catalog lists every course");
    eprintln!("  completion policy: watch threshold 0.9, quiz completes when all answered");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EDU_CONFIG, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Catalog,
    Live,
    Walkthrough,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "catalog" => Some(Self::Catalog),
            "live" => Some(Self::Live),
            "walkthrough" => Some(Self::Walkthrough),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    search: Option<String>,
    course: Option<CourseId>,
}

impl Args {
    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            config: std::env::var_os("EDU_CONFIG").map(PathBuf::from),
            ..Self::default()
        };

        while let Some(arg) = args.next() {
            match (cmd, arg.as_str()) {
                (_, "--config") => {
                    parsed.config = Some(PathBuf::from(require_value(args, "--config")?));
                }
                (Command::Catalog, "--search") => {
                    parsed.search = Some(require_value(args, "--search")?);
                }
                (Command::Walkthrough, "--course") => {
                    let value = require_value(args, "--course")?;
                    let id = value
                        .parse::<CourseId>()
                        .map_err(|_| ArgsError::InvalidCourseId { raw: value.clone() })?;
                    parsed.course = Some(id);
                }
                (_, "--help" | "-h") => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg.clone())),
            }
        }

        if cmd == Command::Walkthrough && parsed.course.is_none() {
            return Err(ArgsError::MissingCourse);
        }

        Ok(parsed)
    }
}

fn load_policy(path: Option<&Path>) -> Result<CompletionPolicy, ConfigError> {
    let Some(path) = path else {
        return Ok(CompletionPolicy::default());
    };

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let policy: CompletionPolicy = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        watch_threshold = policy.watch_threshold(),
        quiz_completion = ?policy.quiz_completion(),
        "completion policy loaded"
    );
    Ok(policy)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);

    let cmd = match argv.next() {
        None => {
            print_usage();
            return Ok(());
        }
        Some(first) if first == "--help" || first == "-h" => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(&first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let parsed = Args::parse(cmd, &mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let policy = load_policy(parsed.config.as_deref())?;
    let storage = Storage::with_samples().await?;
    let catalog = CatalogService::from_storage(&storage);

    match cmd {
        Command::Catalog => print_catalog(&catalog, parsed.search.as_deref()).await,
        Command::Live => print_live(&catalog).await,
        Command::Walkthrough => {
            let course_id = parsed.course.ok_or(ArgsError::MissingCourse)?;
            let session = catalog.start_session(&course_id, policy).await?;
            walkthrough(session)
        }
    }
}

async fn print_catalog(
    catalog: &CatalogService,
    search: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let courses = catalog.search(search.unwrap_or_default()).await?;
    if courses.is_empty() {
        println!("No courses found.");
        return Ok(());
    }

    for course in &courses {
        println!(
            "[{}] {} ({}, {}, {} modules)",
            course.id(),
            course.title(),
            course.level(),
            course.meta().duration,
            course.module_count()
        );
        println!("    {}", course.description());
    }
    Ok(())
}

async fn print_live(catalog: &CatalogService) -> Result<(), Box<dyn std::error::Error>> {
    let live = catalog.live_now().await?;
    let upcoming = catalog.upcoming(DEFAULT_UPCOMING_LIMIT).await?;

    println!("Live now:");
    for class in &live {
        println!(
            "  {} with {} ({}, {})",
            class.title(),
            class.instructor(),
            class.subject(),
            class.duration()
        );
    }

    println!("Upcoming:");
    for class in &upcoming {
        println!(
            "  {} with {} at {}",
            class.title(),
            class.instructor(),
            class.scheduled_at().format("%H:%M")
        );
    }

    if let Some(class) = live.into_iter().next() {
        let chat = LiveChat::open(class, Clock::system());
        println!("Chat ({}):", chat.class().title());
        for message in chat.messages() {
            println!("  {} {}: {}", message.time_label(), message.author, message.body);
        }
    }
    Ok(())
}

fn walkthrough(mut session: CourseSession) -> Result<(), Box<dyn std::error::Error>> {
    let module_ids: Vec<_> = session
        .course()
        .modules()
        .iter()
        .map(|m| (m.id().clone(), m.kind()))
        .collect();

    for (module_id, kind) in module_ids {
        let title = session.select_module(&module_id)?.title().to_string();
        info!(module_id = %module_id, %kind, title = %title, "module opened");

        let event = match kind {
            ModuleKind::Reading => {
                let summary = session.summarize_reading(&KeyPointSummarizer)?;
                debug!(key_points = summary.key_points.len(), "reading summarized");
                println!("{}", summary.to_markdown());
                Some(session.mark_reading_complete()?)
            }
            ModuleKind::Video => watch_to_end(&mut session)?,
            ModuleKind::Quiz => answer_correctly(&mut session)?,
        };

        match event {
            Some(done) => report(&done),
            None => warn!(module_id = %module_id, "module left incomplete"),
        }
    }

    for row in session.module_statuses() {
        let mark = if row.completed { "x" } else { " " };
        println!("[{mark}] {} ({})", row.title, row.kind);
    }
    println!("Progress: {:.0}%", session.percent_complete());
    Ok(())
}

fn watch_to_end(
    session: &mut CourseSession,
) -> Result<Option<ModuleCompleted>, Box<dyn std::error::Error>> {
    {
        let video = session.video_mut()?;
        video.on_metadata(WALKTHROUGH_VIDEO_SECONDS);
        video.play();
    }

    let mut position = 0.0;
    while position <= WALKTHROUGH_VIDEO_SECONDS {
        if let Some(done) = session.video_position(position)? {
            debug!(readout = %session.video()?.time_readout(), "watch threshold reached");
            return Ok(Some(done));
        }
        position += WALKTHROUGH_TICK_SECONDS;
    }

    session.video_mut()?.on_ended();
    debug!(
        position = %format_timestamp(session.video()?.position()),
        "video ended before completion"
    );
    Ok(None)
}

fn answer_correctly(
    session: &mut CourseSession,
) -> Result<Option<ModuleCompleted>, Box<dyn std::error::Error>> {
    let answers: Vec<(QuestionId, usize)> = session
        .quiz()?
        .questions()
        .iter()
        .map(|q| (q.id().clone(), q.correct_index()))
        .collect();

    let mut completed = None;
    for (question_id, option) in answers {
        if let Some(done) = session.answer(&question_id, option)? {
            completed = Some(done);
        }
    }

    for review in session.quiz()?.review() {
        let verdict = if review.is_correct { "correct" } else { "incorrect" };
        println!("{}: {verdict}", review.question.prompt());
        println!("    {}", review.question.explanation());
    }
    Ok(completed)
}

fn report(done: &ModuleCompleted) {
    info!(
        module_id = %done.module_id,
        newly_completed = done.newly_completed,
        percent = done.percent_complete,
        "module completed"
    );
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
