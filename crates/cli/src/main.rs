//! ca-journey CLI - track progress through the CA curriculum.

mod render;

use std::path::PathBuf;
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use journey_core::{
    AttemptId, CourseLevel, Date, EntryRoute, OwnerId, PeerProfile, RequirementId, SpomSet, Status, TrainingSlot,
};
use journey_progress::{
    onboard, peer_profile, AttemptDraft, OnboardingDetails, ProfileEditor, StudyChoice,
};
use journey_storage::{Storage, StorageConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ca-journey")]
#[command(about = "Track your way through the CA curriculum", long_about = None)]
struct Cli {
    /// Directory for locally stored profiles
    #[arg(long, global = true, default_value = ".ca-journey")]
    storage: PathBuf,

    /// Whose profile to work on
    #[arg(long, global = true, default_value = "default")]
    owner: String,

    /// Remote profile store base URL (overrides --storage)
    #[arg(long, global = true)]
    remote: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a profile
    Init {
        /// Student name
        #[arg(long)]
        name: String,
        /// State of residence
        #[arg(long)]
        state: String,
        /// Entry route (foundation, direct)
        #[arg(long, default_value = "foundation")]
        route: String,
        /// Registration date (YYYY-MM-DD)
        #[arg(long)]
        registered: Date,
        /// What you are studying for now (foundation, intermediate, final)
        #[arg(long, default_value = "foundation")]
        studying: String,
        /// Replace an existing profile
        #[arg(long)]
        force: bool,
    },
    /// Show overall progress and the timeline
    Status,
    /// List subjects and their statuses
    Subjects {
        /// Only this level
        #[arg(long)]
        level: Option<String>,
    },
    /// Update a paper or subject
    Subject {
        /// Subject ID (e.g. F1, I4, Fin2)
        id: String,
        /// New status
        status: String,
        /// Marks scored (0-100)
        #[arg(long)]
        marks: Option<u8>,
    },
    /// Update a self-paced online module set
    Spom {
        /// Set (A, B, C, D)
        set: String,
        /// New status
        status: String,
        /// Marks scored (0-100)
        #[arg(long)]
        marks: Option<u8>,
    },
    /// Update ICITSS or Advanced ICITSS
    Training {
        /// Module (icitss, adv-icitss)
        module: String,
        /// New status
        status: Option<String>,
        /// Start date
        #[arg(long)]
        start: Option<Date>,
        /// End date
        #[arg(long)]
        end: Option<Date>,
    },
    /// Manage the articleship
    Articleship {
        #[command(subcommand)]
        command: ArticleshipCommands,
    },
    /// Move to another course level
    Level {
        /// Level (foundation, intermediate, final)
        level: String,
    },
    /// Manage the exam attempt log
    Attempt {
        #[command(subcommand)]
        command: AttemptCommands,
    },
    /// List other students
    Peers,
    /// View another student's journey
    Peer {
        /// Owner name
        name: String,
    },
}

#[derive(Subcommand)]
enum ArticleshipCommands {
    /// Start the articleship; the end date is set two years later
    Start {
        /// Start date (YYYY-MM-DD)
        date: Date,
    },
    /// Set or clear the end date
    End {
        /// End date (YYYY-MM-DD); omit to clear
        date: Option<Date>,
    },
    /// Set the articleship status
    Status {
        /// New status
        status: String,
    },
    /// Record leaves taken
    Leaves {
        /// Number of days
        days: u32,
    },
    /// Toggle industrial training
    Industrial {
        /// Enabled
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

#[derive(Subcommand)]
enum AttemptCommands {
    /// Log an exam attempt
    Add {
        /// Level sat
        #[arg(long)]
        level: String,
        /// Term (e.g. "May 2024")
        #[arg(long)]
        term: String,
        /// Subject marks as ID=MARKS
        #[arg(long = "marks", value_parser = parse_mark)]
        marks: Vec<(String, u8)>,
    },
    /// List logged attempts
    List {
        /// Only this level
        #[arg(long)]
        level: Option<String>,
    },
    /// Delete an attempt
    Delete {
        /// Attempt ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = StorageConfig {
        root: cli.storage.clone(),
        remote_url: cli.remote.clone(),
        ..Default::default()
    };
    let mut storage = config.open().await.context("Failed to open storage")?;
    let owner = OwnerId::new(cli.owner.clone());

    match cli.command {
        Commands::Init { name, state, route, registered, studying, force } => {
            if !force && storage.load(&owner).await?.is_some() {
                bail!("A profile for {} already exists (use --force to replace it)", owner);
            }
            let details = OnboardingDetails {
                name,
                state,
                entry_route: route.parse::<EntryRoute>().map_err(|e| anyhow!(e))?,
                registration_date: registered,
            };
            let choice = studying.parse::<StudyChoice>().map_err(|e| anyhow!(e))?;
            let profile = onboard(details, choice)?;
            storage.save(&owner, &profile).await.context("Failed to save profile")?;
            println!("Created profile for {} ({})", profile.name, profile.entry_route);
        }
        Commands::Status => {
            let editor = open_editor(storage.as_ref(), &owner).await?;
            render::summary(&editor);
        }
        Commands::Subjects { level } => {
            let editor = open_editor(storage.as_ref(), &owner).await?;
            let levels = match level {
                Some(level) => vec![parse_level(&level)?],
                None => vec![CourseLevel::Foundation, CourseLevel::Intermediate, CourseLevel::Final],
            };
            render::subjects(editor.profile(), &levels);
        }
        Commands::Subject { id, status, marks } => {
            let mut editor = open_editor(storage.as_ref(), &owner).await?;
            let id = RequirementId::new(id);
            let status = parse_status(&status)?;
            let rolled_up = editor.set_subject(&id, status, marks)?;
            save(storage.as_mut(), &owner, &editor).await?;
            println!("{} -> {} (now {})", id, format_status(status), format_status(rolled_up));
        }
        Commands::Spom { set, status, marks } => {
            let mut editor = open_editor(storage.as_ref(), &owner).await?;
            let set = set.parse::<SpomSet>().map_err(|e| anyhow!(e))?;
            let status = parse_status(&status)?;
            editor.set_self_paced(set, status, marks)?;
            save(storage.as_mut(), &owner, &editor).await?;
            println!("SPOM set {:?} -> {}", set, format_status(status));
        }
        Commands::Training { module, status, start, end } => {
            let mut editor = open_editor(storage.as_ref(), &owner).await?;
            let slot = parse_training(&module)?;
            if let Some(status) = status {
                editor.set_training_status(slot, parse_status(&status)?)?;
            }
            if start.is_some() || end.is_some() {
                let current = editor.profile().training(slot);
                let start = start.or(current.start_date);
                let end = end.or(current.end_date);
                editor.set_training_dates(slot, start, end)?;
            }
            save(storage.as_mut(), &owner, &editor).await?;
            let module = editor.profile().training(slot);
            println!("{} is {}", module.name, format_status(module.status));
        }
        Commands::Articleship { command } => {
            let mut editor = open_editor(storage.as_ref(), &owner).await?;
            match command {
                ArticleshipCommands::Start { date } => editor.start_articleship(date)?,
                ArticleshipCommands::End { date } => editor.set_articleship_end(date)?,
                ArticleshipCommands::Status { status } => editor.set_articleship_status(parse_status(&status)?)?,
                ArticleshipCommands::Leaves { days } => editor.set_articleship_leaves(days)?,
                ArticleshipCommands::Industrial { enabled } => editor.set_industrial_training(enabled)?,
            }
            save(storage.as_mut(), &owner, &editor).await?;
            render::articleship(&editor.profile().articleship);
        }
        Commands::Level { level } => {
            let mut editor = open_editor(storage.as_ref(), &owner).await?;
            let level = parse_level(&level)?;
            editor.set_current_level(level)?;
            save(storage.as_mut(), &owner, &editor).await?;
            println!("Current level: {}", level);
        }
        Commands::Attempt { command } => match command {
            AttemptCommands::Add { level, term, marks } => {
                let mut editor = open_editor(storage.as_ref(), &owner).await?;
                let draft = marks
                    .into_iter()
                    .fold(AttemptDraft::new(parse_level(&level)?, term), |draft, (id, m)| {
                        draft.with_marks(id.as_str(), m)
                    });
                let attempt = editor.log_attempt(&draft)?.clone();
                save(storage.as_mut(), &owner, &editor).await?;
                render::attempt(&attempt);
            }
            AttemptCommands::List { level } => {
                let editor = open_editor(storage.as_ref(), &owner).await?;
                let level = level.map(|l| parse_level(&l)).transpose()?;
                let attempts: Vec<_> = editor
                    .profile()
                    .attempts
                    .iter()
                    .filter(|a| level.map_or(true, |l| a.level == l))
                    .collect();
                println!("Attempts ({})", attempts.len());
                for attempt in attempts {
                    render::attempt(attempt);
                }
            }
            AttemptCommands::Delete { id } => {
                let mut editor = open_editor(storage.as_ref(), &owner).await?;
                let id: AttemptId = id.parse()?;
                let removed = editor.delete_attempt(&id)?;
                save(storage.as_mut(), &owner, &editor).await?;
                println!("Deleted {} attempt {} ({})", removed.level, removed.attempt_number, removed.term);
            }
        },
        Commands::Peers => {
            let peers = list_peers(storage.as_ref()).await?;
            println!("Students ({})", peers.len());
            for shared in peers {
                println!(
                    "  {} | {} | {} | {}%",
                    shared.id,
                    shared.profile().name,
                    shared.profile().current_level,
                    shared.progress_percentage
                );
            }
        }
        Commands::Peer { name } => {
            let peer = OwnerId::new(name);
            let profile = storage
                .load(&peer)
                .await?
                .ok_or_else(|| anyhow!("No profile found for {}", peer))?;
            let shared = peer_profile(peer, &profile);
            let view = ProfileEditor::read_only(shared.into_view())?;
            info!("Viewing {} read-only", profile.name);
            render::summary(&view);
        }
    }

    Ok(())
}

async fn open_editor(storage: &dyn Storage, owner: &OwnerId) -> Result<ProfileEditor> {
    let profile = storage
        .load(owner)
        .await
        .with_context(|| format!("Failed to load profile for {}", owner))?
        .ok_or_else(|| anyhow!("No profile for {}; run `ca-journey init` first", owner))?;
    Ok(ProfileEditor::new(profile)?)
}

/// Every readable profile, shared as a peer. Unreadable documents are skipped.
async fn list_peers(storage: &dyn Storage) -> Result<Vec<PeerProfile>> {
    let mut peers = Vec::new();
    for owner in storage.list_owners().await? {
        match storage.load(&owner).await {
            Ok(Some(profile)) => peers.push(peer_profile(owner, &profile)),
            Ok(None) => {}
            Err(e) => warn!("Skipping {}: {}", owner, e),
        }
    }
    Ok(peers)
}

async fn save(storage: &mut dyn Storage, owner: &OwnerId, editor: &ProfileEditor) -> Result<()> {
    storage
        .save(owner, editor.profile())
        .await
        .with_context(|| format!("Failed to save profile for {}", owner))
}

fn parse_status(s: &str) -> Result<Status> {
    s.parse().map_err(|e: String| anyhow!(e))
}

fn parse_level(s: &str) -> Result<CourseLevel> {
    s.parse().map_err(|e: String| anyhow!(e))
}

fn parse_training(s: &str) -> Result<TrainingSlot> {
    match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
        "icitss" => Ok(TrainingSlot::Icitss),
        "advicitss" | "advancedicitss" => Ok(TrainingSlot::AdvancedIcitss),
        other => bail!("Unknown training module: {}", other),
    }
}

fn parse_mark(s: &str) -> std::result::Result<(String, u8), String> {
    let (id, marks) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=MARKS, got {:?}", s))?;
    let marks = marks
        .trim()
        .parse::<u8>()
        .map_err(|e| format!("invalid marks {:?}: {}", marks, e))?;
    Ok((id.trim().to_string(), marks))
}

fn format_status(status: Status) -> &'static str {
    match status {
        Status::Pending => "PENDING",
        Status::InProgress => "IN PROGRESS",
        Status::Completed => "COMPLETED",
        Status::Exempted => "EXEMPTED",
        Status::Failed => "FAILED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use journey_storage::JsonStorage;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_mark() {
        assert_eq!(parse_mark("I1=72"), Ok(("I1".to_string(), 72)));
        assert!(parse_mark("I1").is_err());
        assert!(parse_mark("I1=300").is_err());
    }

    #[test]
    fn test_parse_training() {
        assert_eq!(parse_training("adv-icitss").unwrap(), TrainingSlot::AdvancedIcitss);
        assert_eq!(parse_training("ICITSS").unwrap(), TrainingSlot::Icitss);
        assert!(parse_training("gmcs").is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["ca-journey", "status", "--owner", "meera", "--remote", "https://x.test"]).unwrap();
        assert_eq!(cli.owner, "meera");
        assert_eq!(cli.remote.as_deref(), Some("https://x.test"));
        assert_eq!(cli.storage, PathBuf::from(".ca-journey"));
    }

    #[tokio::test]
    async fn test_list_peers_skips_broken_documents() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        let details = OnboardingDetails {
            name: "Asha".to_string(),
            state: "Goa".to_string(),
            entry_route: EntryRoute::Foundation,
            registration_date: Date::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        let profile = onboard(details, StudyChoice::Intermediate).unwrap();
        storage.save(&OwnerId::new("asha"), &profile).await.unwrap();
        std::fs::write(dir.path().join("profiles").join("broken.json"), "{\"name\":").unwrap();

        let peers = list_peers(&storage).await.unwrap();
        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].id, OwnerId::new("asha"));
        assert!(peers[0].profile().attempts.is_empty());
    }

    #[test]
    fn test_attempt_marks_flag() {
        let cli = Cli::try_parse_from([
            "ca-journey", "attempt", "add", "--level", "inter", "--term", "May 2024", "--marks", "I1=55", "--marks", "I2=40",
        ])
        .unwrap();
        let Commands::Attempt { command: AttemptCommands::Add { marks, .. } } = cli.command else {
            panic!("expected attempt add");
        };
        assert_eq!(marks, vec![("I1".to_string(), 55), ("I2".to_string(), 40)]);
    }
}
