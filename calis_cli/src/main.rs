use calis_core::*;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "calis")]
#[command(about = "Calisthenics workout rotation and drop-set planner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the scheduled workout (default)
    Next,

    /// Generate the scheduled workout and save it
    Generate {
        /// Workout type to generate instead of the scheduled one (upper1, lower2, ...)
        #[arg(long = "type")]
        workout_type: Option<WorkoutType>,

        /// Dry run - show the workout without saving
        #[arg(long)]
        dry_run: bool,

        /// Seed for reproducible exercise choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Log the outcome of one set
    Log {
        /// Session id, or "latest"
        session: String,

        /// Set position within the session, starting at 1
        set: usize,

        #[arg(long)]
        reps: u32,

        #[arg(long)]
        weight: Option<f64>,
    },

    /// Recommend cooldown stretches for a session
    Stretches {
        /// Session id, or "latest"
        session: String,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Complete a session and advance the rotation
    Complete {
        /// Session id, or "latest"
        session: String,

        /// 1 = too easy, 2 = tough, 3 = too hard
        #[arg(long)]
        effort: u8,

        /// Id of a stretch performed (repeatable)
        #[arg(long = "stretch")]
        stretches: Vec<StretchId>,
    },

    /// List past workouts or export them as CSV
    History {
        /// Write one row per set to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Override which workout comes next
    Schedule { workout_type: WorkoutType },

    /// List exercises and stretches with their ids
    Catalog,

    /// Edit an exercise or enable/disable it
    #[command(group(ArgGroup::new("toggle").args(["enable", "disable"])))]
    Exercise {
        id: ExerciseId,

        #[arg(long)]
        enable: bool,

        #[arg(long)]
        disable: bool,

        #[arg(long)]
        name: Option<String>,

        /// Difficulty tier (novice, beginner, intermediate, advanced, expert, master)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        #[arg(long)]
        target_reps: Option<u32>,

        #[arg(long)]
        target_weight: Option<f64>,

        /// Mark whether the exercise is loaded with external weight
        #[arg(long)]
        requires_weight: Option<bool>,
    },

    /// Edit a stretch or enable/disable it
    #[command(group(ArgGroup::new("toggle").args(["enable", "disable"])))]
    Stretch {
        id: StretchId,

        #[arg(long)]
        enable: bool,

        #[arg(long)]
        disable: bool,

        #[arg(long)]
        name: Option<String>,

        /// Body position (standing, kneeling, lying-back, lying-front, seated)
        #[arg(long)]
        position: Option<Position>,

        /// Muscle tag (repeatable, replaces all existing tags)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Discard all history and reseed the database
    Reset,
}

fn main() {
    let cli = Cli::parse();
    calis_core::logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }

    let errors = get_default_catalog().validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let db_path = config.database_path();
    tracing::debug!("Using database {:?}", db_path);

    match cli.command.unwrap_or(Commands::Next) {
        Commands::Next => cmd_next(&db_path, &config),
        Commands::Generate {
            workout_type,
            dry_run,
            seed,
        } => cmd_generate(&db_path, &config, workout_type, dry_run, seed),
        Commands::Log {
            session,
            set,
            reps,
            weight,
        } => cmd_log(&db_path, &config, &session, set, reps, weight),
        Commands::Stretches { session, seed } => cmd_stretches(&db_path, &config, &session, seed),
        Commands::Complete {
            session,
            effort,
            stretches,
        } => cmd_complete(&db_path, &config, &session, effort, stretches),
        Commands::History { csv } => cmd_history(&db_path, &config, csv),
        Commands::Schedule { workout_type } => {
            Database::update(&db_path, &config, |db| {
                db.set_current_workout_type(workout_type)
            })?;
            println!("✓ Next workout set to {}", workout_type);
            Ok(())
        }
        Commands::Catalog => cmd_catalog(&db_path, &config),
        Commands::Exercise {
            id,
            enable,
            disable,
            name,
            difficulty,
            target_reps,
            target_weight,
            requires_weight,
        } => cmd_exercise(
            &db_path,
            &config,
            id,
            ExercisePatch {
                name,
                difficulty,
                target_reps,
                target_weight,
                requires_weight,
                active: toggle(enable, disable),
            },
        ),
        Commands::Stretch {
            id,
            enable,
            disable,
            name,
            position,
            tags,
        } => cmd_stretch(
            &db_path,
            &config,
            id,
            StretchPatch {
                name,
                position,
                muscle_tags: (!tags.is_empty()).then_some(tags),
                active: toggle(enable, disable),
            },
        ),
        Commands::Reset => cmd_reset(&db_path, &config),
    }
}

fn toggle(enable: bool, disable: bool) -> Option<bool> {
    match (enable, disable) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Resolve "latest" or a UUID to a stored session id
fn resolve_session(db: &Database, session: &str) -> Result<SessionId> {
    if session.eq_ignore_ascii_case("latest") {
        return db
            .latest_session()
            .map(|s| s.id)
            .ok_or_else(|| Error::Validation("No workouts recorded yet".into()));
    }

    Uuid::parse_str(session)
        .map_err(|e| Error::Validation(format!("Invalid session id '{}': {}", session, e)))
}

fn cmd_next(db_path: &Path, config: &Config) -> Result<()> {
    let db = Database::load_or_seed(db_path, config)?;
    let workout_type = db.settings()?.current_workout_type;

    println!("Next workout: {}", workout_type);
    for muscle_group in workout_type.muscle_chains() {
        println!("  - {}", muscle_group);
    }
    println!("Rest between sets: {}s", db.settings.rest_timer_seconds);

    Ok(())
}

fn cmd_generate(
    db_path: &Path,
    config: &Config,
    workout_type: Option<WorkoutType>,
    dry_run: bool,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = make_rng(seed);
    let mut generate = |db: &mut Database| -> Result<WorkoutSession> {
        let workout_type = match workout_type {
            Some(t) => t,
            None => db.settings()?.current_workout_type,
        };
        generate_workout(db, workout_type, &mut rng, Utc::now())
    };

    if dry_run {
        let mut db = Database::load_or_seed(db_path, config)?;
        let session = generate(&mut db)?;
        display_workout(&session);
        println!("\n[Dry run - workout not saved]");
        return Ok(());
    }

    let session = Database::update(db_path, config, generate)?;
    display_workout(&session);
    println!("\n✓ Workout saved");
    Ok(())
}

fn cmd_log(
    db_path: &Path,
    config: &Config,
    session: &str,
    set: usize,
    reps: u32,
    weight: Option<f64>,
) -> Result<()> {
    let set_index = set
        .checked_sub(1)
        .ok_or_else(|| Error::Validation("Set positions start at 1".into()))?;

    let logged = Database::update(db_path, config, |db| {
        let session_id = resolve_session(db, session)?;
        record_set(db, session_id, set_index, Some(reps), weight, Utc::now())
    })?;

    match logged.weight {
        Some(w) => println!(
            "✓ Set {} logged: {} x {} @ {}",
            logged.set_number, logged.exercise_name, reps, w
        ),
        None => println!(
            "✓ Set {} logged: {} x {}",
            logged.set_number, logged.exercise_name, reps
        ),
    }
    Ok(())
}

fn cmd_stretches(db_path: &Path, config: &Config, session: &str, seed: Option<u64>) -> Result<()> {
    let db = Database::load_or_seed(db_path, config)?;
    let session_id = resolve_session(&db, session)?;
    let session = db
        .session(session_id)?
        .ok_or_else(|| Error::RecordNotFound {
            kind: "Session",
            id: session_id.to_string(),
        })?;

    let stretches = recommend_stretches(&db, &session.muscle_groups, &mut make_rng(seed))?;
    if stretches.is_empty() {
        println!("No matching stretches are enabled.");
        return Ok(());
    }

    println!("Cooldown for {}:", session.workout_type);
    for stretch in stretches {
        println!(
            "  [{}] {} ({}): {}",
            stretch.id,
            stretch.name,
            stretch.position,
            stretch.muscle_tags.join(", ")
        );
    }
    Ok(())
}

fn cmd_complete(
    db_path: &Path,
    config: &Config,
    session: &str,
    effort: u8,
    stretches: Vec<StretchId>,
) -> Result<()> {
    let next = Database::update(db_path, config, |db| {
        let session_id = resolve_session(db, session)?;
        complete_workout_with_rating(db, session_id, effort, stretches)
    })?;

    println!("✓ Workout completed!");
    println!("  Next workout: {}", next);
    Ok(())
}

fn cmd_history(db_path: &Path, config: &Config, csv: Option<PathBuf>) -> Result<()> {
    let db = Database::load_or_seed(db_path, config)?;
    let sessions = db.sessions_newest_first();

    if let Some(path) = csv {
        let rows = export_csv_to_path(sessions, &path)?;
        println!("✓ Exported {} sets to {}", rows, path.display());
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No workouts recorded yet.");
        return Ok(());
    }

    for session in sessions {
        let status = match session.effort_rating {
            Some(effort) => effort.label(),
            None if session.completed => "completed",
            None => "in progress",
        };
        println!(
            "{}  {:<9} {:<12} {}",
            session.date.format("%Y-%m-%d %H:%M"),
            session.workout_type.label(),
            status,
            session.id
        );
    }
    Ok(())
}

fn cmd_catalog(db_path: &Path, config: &Config) -> Result<()> {
    let db = Database::load_or_seed(db_path, config)?;

    println!("Exercises:");
    for exercise in &db.exercises {
        println!(
            "  [{:>2}] {:<32} {:<20} {:<14} {}{}",
            exercise.id,
            exercise.name,
            exercise.muscle_group,
            exercise.exercise_class,
            exercise.difficulty,
            if exercise.active { "" } else { "  (disabled)" }
        );
    }

    println!("\nStretches:");
    for stretch in &db.stretches {
        println!(
            "  [{:>2}] {:<32} {}{}",
            stretch.id,
            stretch.name,
            stretch.position,
            if stretch.active { "" } else { "  (disabled)" }
        );
    }
    Ok(())
}

fn cmd_exercise(db_path: &Path, config: &Config, id: ExerciseId, patch: ExercisePatch) -> Result<()> {
    if patch.is_empty() {
        return Err(Error::Validation(
            "Nothing to change: pass --enable, --disable or a field to edit".into(),
        ));
    }

    let exercise = Database::update(db_path, config, |db| {
        db.update_exercise(id, patch)?;
        Ok(db.exercises.iter().find(|e| e.id == id).cloned())
    })?;

    println!("✓ Exercise {} updated", id);
    if let Some(exercise) = exercise {
        println!(
            "  {} ({}, {}){}",
            exercise.name,
            exercise.exercise_class,
            exercise.difficulty,
            if exercise.active { "" } else { "  (disabled)" }
        );
    }
    Ok(())
}

fn cmd_stretch(db_path: &Path, config: &Config, id: StretchId, patch: StretchPatch) -> Result<()> {
    if patch.is_empty() {
        return Err(Error::Validation(
            "Nothing to change: pass --enable, --disable or a field to edit".into(),
        ));
    }

    let stretch = Database::update(db_path, config, |db| {
        db.update_stretch(id, patch)?;
        Ok(db.stretches.iter().find(|s| s.id == id).cloned())
    })?;

    println!("✓ Stretch {} updated", id);
    if let Some(stretch) = stretch {
        println!(
            "  {} ({}): {}{}",
            stretch.name,
            stretch.position,
            stretch.muscle_tags.join(", "),
            if stretch.active { "" } else { "  (disabled)" }
        );
    }
    Ok(())
}

fn cmd_reset(db_path: &Path, config: &Config) -> Result<()> {
    let catalog = get_default_catalog();

    // An unreadable snapshot is the one case where discarding it is wanted
    let mut db = match Database::load(db_path) {
        Ok(Some(db)) => db,
        Ok(None) => Database::seeded(catalog, config.workout.rest_timer_seconds),
        Err(Error::Json(e)) => {
            tracing::warn!("Replacing unreadable database {:?}: {}", db_path, e);
            Database::seeded(catalog, config.workout.rest_timer_seconds)
        }
        Err(e) => return Err(e),
    };

    db.reset(catalog);
    db.save(db_path)?;

    println!("✓ Database reset");
    println!("  Next workout: {}", db.settings.current_workout_type);
    Ok(())
}

fn display_workout(session: &WorkoutSession) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} WORKOUT", session.workout_type.label().to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!("  Session: {}", session.id);

    // Each drop set restarts at set 1, in muscle group order
    let mut muscle_groups = session.muscle_groups.iter();
    for set in &session.sets {
        if set.set_number == 1 {
            if let Some(muscle_group) = muscle_groups.next() {
                println!();
                println!("  {}", muscle_group);
            }
        }
        println!(
            "    {}. {:<32} {} reps ({})",
            set.set_number,
            set.exercise_name,
            set.target_rep_range.range(),
            set.target_rep_range.label()
        );
    }
    println!();
}
