use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use archives_xfer_lib::{build_app_state, init_tracing_subscriber, resolve_config_path};
use clap::{Parser, Subcommand};
use xfer_app::{AdminEntry, AppState, FetchOutcome};
use xfer_core::AccessionId;

#[derive(Parser)]
#[command(name = "xferctl")]
#[command(about = "Console for the archives transfer service", long_about = None)]
struct Cli {
    /// Config file (defaults to $XFER_CONFIG, then ./xfer.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show genres, media carriers, transfer methods and record types
    ReferenceData,
    /// Allocate a new submission identifier
    Identifier,
    /// Look a submitter up by email
    Lookup { email: String },
    /// Mail the verification link for a registration token again
    ResendVerification { token: String },
    /// List accessions
    Accessions {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Free-text filter
        #[arg(short, long)]
        query: Option<String>,
        /// Genre filter
        #[arg(short, long)]
        genre: Option<String>,
    },
    /// Show one accession and its notes
    Accession { id: i64 },
    /// Add a note to an accession
    Note { id: i64, body: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.config);
    let config = xfer_infra::load_config(&config_path)?;
    init_tracing_subscriber(config.log_dir.as_deref())?;
    let state = build_app_state(&config)?;

    match cli.command {
        Commands::ReferenceData => {
            state.submission.load_reference_data().await;
            let data = state.submission.reference_data().await;
            print_names("genres", data.genres.iter().map(|g| &g.name));
            print_names("media carriers", data.media_carriers.iter().map(|m| &m.name));
            print_names("transfer methods", data.transfer_methods.iter().map(|m| &m.name));
            print_names("digital record types", data.digital_record_types.iter().map(|t| &t.name));
            print_names("physical record types", data.physical_record_types.iter().map(|t| &t.name));
            check_errors(&state)
        }
        Commands::Identifier => {
            expect_applied(&state, state.submission.request_submission_identifier().await?)?;
            let id = state
                .submission
                .submission_id()
                .await
                .ok_or_else(|| anyhow!("no identifier allocated"))?;
            println!("{id}");
            Ok(())
        }
        Commands::Lookup { email } => {
            state.session.lookup_user(&email).await;
            check_errors(&state)?;
            let user = state.session.current_user().await;
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(())
        }
        Commands::ResendVerification { token } => {
            expect_applied(&state, state.session.resend_verification(&token).await?)?;
            println!("verification email resent");
            Ok(())
        }
        Commands::Accessions { page, query, genre } => {
            require_admin(&state, "admin").await?;
            if let Some(query) = query {
                state.admin.set_query(query).await;
            }
            if let Some(genre) = genre {
                state.admin.set_genre_filter(genre).await;
            }
            expect_applied(&state, state.admin.fetch_page().await)?;
            // The first response tells us how many pages there are.
            while state.admin.window().await.page() < page {
                let before = state.admin.window().await.page();
                expect_applied(&state, state.admin.next_page().await)?;
                if state.admin.window().await.page() == before {
                    break;
                }
            }

            let window = state.admin.window().await;
            println!(
                "page {}/{} ({} total, {} matching)",
                window.page(),
                window.last_page(),
                window.total_count(),
                window.filtered_count()
            );
            for row in state.admin.accessions().await {
                println!(
                    "{:>6}  {}  {}  {}",
                    row.id, row.accession_id, row.submitter, row.description
                );
            }
            Ok(())
        }
        Commands::Accession { id } => {
            require_admin(&state, &format!("admin/accessions/{id}")).await?;
            expect_applied(&state, state.admin.fetch_detail(AccessionId::new(id)).await)?;
            check_errors(&state)?;
            let detail = state.admin.detail().await;
            println!("{}", serde_json::to_string_pretty(&detail)?);
            for note in state.admin.notes().await {
                println!("-- {} ({}): {}", note.user_name, note.created_at, note.body);
            }
            Ok(())
        }
        Commands::Note { id, body } => {
            require_admin(&state, &format!("admin/accessions/{id}")).await?;
            expect_applied(&state, state.admin.fetch_detail(AccessionId::new(id)).await)?;
            expect_applied(&state, state.admin.add_note(&body).await?)?;
            println!("note added to accession {id}");
            Ok(())
        }
    }
}

async fn require_admin(state: &AppState, path: &str) -> Result<()> {
    match state.auth.enter_admin(path).await? {
        AdminEntry::Proceed => Ok(()),
        AdminEntry::Redirect(url) => Err(anyhow!("not signed in; authenticate at {url}")),
    }
}

fn expect_applied(state: &AppState, outcome: FetchOutcome) -> Result<()> {
    match outcome {
        FetchOutcome::Applied => Ok(()),
        _ => Err(anyhow!(state
            .errors
            .message()
            .unwrap_or_else(|| format!("request {outcome:?}")))),
    }
}

fn check_errors(state: &AppState) -> Result<()> {
    match state.errors.message() {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}

fn print_names<'a>(label: &str, names: impl Iterator<Item = &'a String>) {
    let names: Vec<&str> = names.map(String::as_str).collect();
    println!("{label}: {}", names.join(", "));
}
