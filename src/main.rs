use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cv_gen::{
    export, load_fonts, DirectorySink, ResumeDocument, ResumeStore, SectionVisibility,
    TemplateConfig,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "cv-gen", version)]
#[command(about = "Lay out résumés as paginated PDFs")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file holding saved résumés
    #[arg(long, global = true, default_value = "resumes.json")]
    store: PathBuf,

    /// TOML template configuration; the built-in template when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Render a résumé JSON file to PDF
    Render {
        document: PathBuf,
        /// JSON map of section name to visibility; every section is shown when omitted
        #[arg(long)]
        visibility: Option<PathBuf>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Save a résumé JSON file in the store under a name, replacing any with that name
    Save { name: String, document: PathBuf },
    /// List saved résumés
    List,
    /// Print a saved résumé as JSON
    Show { id: Uuid },
    /// Delete a saved résumé
    Delete { id: Uuid },
    /// Render a saved résumé to PDF
    Export {
        id: Uuid,
        #[arg(long)]
        visibility: Option<PathBuf>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn render(
    document: &ResumeDocument,
    visibility: Option<&Path>,
    config: &TemplateConfig,
    out_dir: PathBuf,
) -> Result<()> {
    let visibility = match visibility {
        Some(path) => read_json::<SectionVisibility>(path)?,
        None => SectionVisibility::all(),
    };
    let fonts = load_fonts(config).context("Failed to load embedded fonts")?;
    let mut sink = DirectorySink::new(out_dir);
    let filename = export(document, &visibility, config, &fonts, &mut sink)
        .context("Failed to export résumé")?;
    println!("{}", sink.path_of(&filename).display());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => TemplateConfig::load(path)
            .with_context(|| format!("Failed to load template {}", path.display()))?,
        None => TemplateConfig::default(),
    };
    let store = ResumeStore::open(&cli.store);

    match cli.command {
        Command::Render {
            document,
            visibility,
            out_dir,
        } => {
            let document: ResumeDocument = read_json(&document)?;
            render(&document, visibility.as_deref(), &config, out_dir)?;
        }
        Command::Save { name, document } => {
            let document: ResumeDocument = read_json(&document)?;
            let saved = store.save(&name, document)?;
            println!("{}", saved.id);
        }
        Command::List => {
            for summary in store.list()? {
                println!(
                    "{}  {}  {}",
                    summary.id,
                    summary.updated_at.format("%Y-%m-%d %H:%M"),
                    summary.name
                );
            }
        }
        Command::Show { id } => {
            let saved = store.get(id)?;
            println!("{}", serde_json::to_string_pretty(&saved.document)?);
        }
        Command::Delete { id } => {
            if store.delete(id)? {
                info!(%id, "deleted");
            } else {
                anyhow::bail!("No saved résumé with id {id}");
            }
        }
        Command::Export {
            id,
            visibility,
            out_dir,
        } => {
            let saved = store.get(id)?;
            render(&saved.document, visibility.as_deref(), &config, out_dir)?;
        }
    }

    Ok(())
}
