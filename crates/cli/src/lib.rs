mod session;
mod view;

use clap::{ArgAction, Parser, Subcommand};
use lookloader_api::UvSource;
use lookloader_core::LoaderConfig;
use lookloader_core::look::ApplyReport;
use session::{Session, look_paths};
use std::path::PathBuf;
use tracing::info;
use view::StandinRow;

#[derive(Parser)]
#[command(
    name = "lookloader",
    version,
    about = "Attach published looks to render standins",
    long_about = "Lookloader inspects the standins of a scene, discovers the look files published \
                  for their assets and keeps look bindings and geometry sources up to date."
)]
pub struct Cli {
    /// Project root holding assets/<name>/..., overrides CURRENT_PROJECT_DIR and the config file
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Scene document (JSON) to operate on
    #[arg(long, global = true, value_name = "FILE")]
    pub scene: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the standins of the scene with their look and UV status
    List,
    /// Show the look catalog of a standin
    Looks {
        #[arg(value_name = "OBJECT")]
        object: String,
    },
    /// Attach looks to a standin
    #[command(
        long_about = "Attaches looks given by catalog name or file path. In replace mode the first \
                      look found in the catalog replaces every other bound look."
    )]
    Attach {
        #[arg(value_name = "OBJECT")]
        object: String,
        #[arg(value_name = "LOOK", required = true)]
        looks: Vec<String>,
        /// Replace the bound looks
        #[arg(long, conflicts_with = "no_replace")]
        replace: bool,
        /// Keep the bound looks, overriding the configured default
        #[arg(long)]
        no_replace: bool,
    },
    /// Plug missing mandatory looks and bump lagging ones to their latest version
    UpdateLooks {
        #[arg(value_name = "OBJECT")]
        object: String,
    },
    /// Point a standin at its latest geometry source
    UpdateUvs {
        #[arg(value_name = "OBJECT")]
        object: String,
    },
    /// Show or persist the configuration
    Config {
        /// Default of the replace toggle
        #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
        replace_looks: Option<bool>,
        /// Project root used when CURRENT_PROJECT_DIR is unset
        #[arg(long, value_name = "DIR")]
        project_root: Option<PathBuf>,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = lookloader_core::logging::init_logging("cli", cli.verbose);

    let command = match cli.command {
        Commands::Config {
            replace_looks,
            project_root,
        } => return configure(replace_looks, project_root),
        command => command,
    };

    let mut config = LoaderConfig::load()?;
    if let Some(root) = cli.root {
        config.project_root = Some(root);
    }
    let scene_path = cli.scene.ok_or("--scene <FILE> is required")?;
    let mut session = Session::open(config, scene_path)?;
    run_scene(command, &mut session)
}

/// Dispatch a command that works on an opened scene.
fn run_scene(command: Commands, session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::List => list(session),
        Commands::Looks { object } => {
            let standin = session.standin(&object)?;
            println!("{}", view::render_catalog(standin.catalog()));
            Ok(())
        }
        Commands::Attach {
            object,
            looks,
            replace,
            no_replace,
        } => {
            let replace_mode = replace_mode(replace, no_replace, session.config.replace_looks);
            attach(session, &object, &looks, replace_mode)
        }
        Commands::UpdateLooks { object } => update_looks(session, &object),
        Commands::UpdateUvs { object } => update_uvs(session, &object),
        Commands::Config { .. } => Err("config does not operate on a scene".into()),
    }
}

fn replace_mode(replace: bool, no_replace: bool, configured: bool) -> bool {
    if replace {
        true
    } else if no_replace {
        false
    } else {
        configured
    }
}

fn list(session: &Session) -> Result<(), Box<dyn std::error::Error>> {
    let standins = session.factory().collect(&session.scene, &session.scene);
    if standins.is_empty() {
        println!("No look standins found.");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(standins.len());
    for standin in standins.values() {
        let uv_status = if standin.profile().resolves_uvs {
            Some(standin.is_uv_up_to_date(&session.scene)?)
        } else {
            None
        };
        rows.push(StandinRow::from_standin(standin, uv_status));
    }
    println!("{}", view::render_standins(rows));
    Ok(())
}

fn attach(
    session: &mut Session,
    object: &str,
    looks: &[String],
    replace_mode: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut standin = session.standin(object)?;
    let paths = look_paths(standin.catalog(), looks)?;

    let report = standin.attach_looks(&paths, replace_mode, &mut session.scene)?;
    finish(session, object, &report)?;

    standin.refresh_looks(session.root(), &session.scene)?;
    println!("{}", view::render_catalog(standin.catalog()));
    Ok(())
}

fn update_looks(session: &mut Session, object: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut standin = session.standin(object)?;
    if standin.is_looks_up_to_date() {
        println!("Looks of {} are up to date.", object);
        return Ok(());
    }

    let report = standin.update_existing_looks(&mut session.scene)?;
    finish(session, object, &report)?;

    standin.refresh_looks(session.root(), &session.scene)?;
    println!("{}", view::render_catalog(standin.catalog()));
    Ok(())
}

fn update_uvs(session: &mut Session, object: &str) -> Result<(), Box<dyn std::error::Error>> {
    let standin = session.standin(object)?;
    if !standin.profile().resolves_uvs {
        println!("{} has no UV source to update.", object);
        return Ok(());
    }

    if standin.is_uv_up_to_date(&session.scene)? {
        println!("Geometry source of {} is up to date.", object);
        return Ok(());
    }

    if standin.update_uvs(&mut session.scene)? {
        session.save()?;
        println!("Geometry source of {} set to {}", object, latest(standin.uvs()));
    }
    Ok(())
}

fn latest(uvs: &UvSource) -> &str {
    uvs.head().map_or("-", |candidate| candidate.path.as_str())
}

/// Persist the scene after a pass and report what happened.
///
/// A pass always clears the selection, so the scene is saved even when the
/// plan itself was empty.
fn finish(
    session: &Session,
    object: &str,
    report: &ApplyReport,
) -> Result<(), Box<dyn std::error::Error>> {
    session.save()?;
    println!("{}", summary(object, report));
    if !report.is_noop() {
        info!("Applied look changes to {}: {:?}", object, report);
    }
    Ok(())
}

fn summary(object: &str, report: &ApplyReport) -> String {
    if report.is_noop() {
        return format!("Nothing to do for {}.", object);
    }
    format!(
        "{}: {} created, {} retargeted, {} renamed, {} disconnected",
        object,
        report.created.len(),
        report.retargeted,
        report.renamed,
        report.disconnected
    )
}

fn configure(
    replace_looks: Option<bool>,
    project_root: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = LoaderConfig::default_path();
    // The file alone, so that the environment never gets persisted
    let mut config = LoaderConfig::load_from(&path)?;

    let changed = replace_looks.is_some() || project_root.is_some();
    if let Some(replace_looks) = replace_looks {
        config.replace_looks = replace_looks;
    }
    if let Some(root) = project_root {
        config.project_root = Some(root);
    }
    if changed {
        config.save_to(&path)?;
        info!("Saved configuration to {}", path.display());
    }

    println!("Config file:   {}", path.display());
    println!(
        "Project root:  {}",
        config
            .project_root
            .as_ref()
            .map_or_else(|| "-".to_string(), |p| p.display().to_string())
    );
    println!("Replace looks: {}", config.replace_looks);
    println!("Skip prefixes: {}", config.skip_prefixes.join(", "));
    Ok(())
}
