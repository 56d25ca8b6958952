use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use railcase_core::config::DEFAULT_OUTPUT_FILE;
use railcase_core::interchange::convert_files;
use railcase_core::remote::{ResultBatch, TitledResult};
use railcase_core::{
    generate_case_file, CaseIdIndex, Catalog, Config, DelimitedCodec, DescriptionStyle,
    Orchestrator, OutputFormat, RunId, Strictness, TestRailClient,
};

#[derive(Parser)]
#[command(name = "railcase")]
#[command(about = "Sync Go tests with a TestRail case catalog", long_about = None)]
struct Cli {
    /// Config file (defaults to ./railcase.toml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log and continue on bad statuses and undecodable responses
    #[arg(long, global = true)]
    lenient: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Jsonl,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Delimited,
            Format::Jsonl => OutputFormat::JsonLines,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a Go source tree and write a case file
    Scan {
        /// Root of the source tree
        dir: PathBuf,
        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,
        /// Prefix descriptions with the test file name
        #[arg(long)]
        file_qualified: bool,
    },
    /// Convert delimited case files to JSON lines
    Convert {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Upload a case file into a section
    Upload {
        file: PathBuf,
        /// Section name
        #[arg(long)]
        section: String,
    },
    /// Show the configured project
    Project,
    /// Look up a suite ID by name
    Suite { name: String },
    /// Look up a section ID by name
    Section { name: String },
    /// List the cases of the configured suite
    Cases,
    /// Create a run
    Run {
        /// Environment label used in the run name
        #[arg(long, default_value = "")]
        env: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Case titles to include (all cases when omitted)
        #[arg(long = "case")]
        cases: Vec<String>,
    },
    /// Post results to a run
    Results {
        #[arg(long)]
        run: u64,
        /// JSON results file
        #[arg(long)]
        file: PathBuf,
        /// Results are keyed by case title instead of case ID
        #[arg(long)]
        by_title: bool,
    },
    /// Print the default configuration
    Config,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "railcase=debug" } else { "railcase=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    if cli.lenient {
        config.remote.strictness = Strictness::Lenient;
    }
    Ok(config)
}

fn client(config: &Config) -> Result<TestRailClient> {
    TestRailClient::from_config(&config.remote).context("creating TestRail client")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let remote = &config.remote;

    match cli.command {
        Commands::Scan {
            dir,
            output,
            format,
            file_qualified,
        } => {
            let mut config = config.clone();
            if file_qualified {
                config.cases.description_style = DescriptionStyle::FileQualified;
            }
            let summary = generate_case_file(&config, &dir, &output, format.into())?;
            println!(
                "Wrote {} cases from {} files to {}",
                summary.cases,
                summary.files,
                output.display()
            );
            println!("  mac: {}  linux: {}", summary.mac, summary.linux);
        }
        Commands::Convert { inputs, out_dir } => {
            let codec = DelimitedCodec::new(config.interchange.delimiter_byte()?);
            let written = convert_files(&codec, &inputs, &out_dir)?;
            for path in written {
                println!("{}", path.display());
            }
        }
        Commands::Upload { file, section } => {
            let client = client(&config)?;
            let codec = DelimitedCodec::new(config.interchange.delimiter_byte()?);
            let report = Orchestrator::new(&client)
                .upload_file(&codec, &file, &section, remote.project_id, remote.suite_id)
                .await?;

            println!("Created {} cases", report.created.len());
            for (title, reason) in &report.failed {
                println!("  failed: {} ({})", title, reason);
            }
            if !report.is_complete() {
                bail!("{} cases failed to upload", report.failed.len());
            }
        }
        Commands::Project => {
            let project = client(&config)?.get_project(remote.project_id).await?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        Commands::Suite { name } => {
            let id = client(&config)?
                .suite_id_by_name(&name, remote.project_id)
                .await?;
            println!("{}", id);
        }
        Commands::Section { name } => {
            let found = client(&config)?
                .section_id_by_name(&name, remote.project_id, remote.suite_id)
                .await?;
            match found {
                Some(id) => println!("{}", id),
                None => bail!("section {:?} not found", name),
            }
        }
        Commands::Cases => {
            let cases = client(&config)?
                .get_cases(remote.project_id, remote.suite_id)
                .await?;
            for case in cases {
                println!("{}\t{}", case.id, case.title);
            }
        }
        Commands::Run {
            env,
            description,
            cases,
        } => {
            let client = client(&config)?;
            let index = CaseIdIndex::load(&client, remote.project_id, remote.suite_id).await?;

            let case_ids = if cases.is_empty() {
                index.all_ids()
            } else {
                let (ids, missing) = index.ids_for(cases.iter().map(String::as_str));
                for title in &missing {
                    warn!(%title, "no case with this title");
                }
                ids
            };

            let run_id = Orchestrator::new(&client)
                .with_run_name_prefix(config.run.name_prefix.clone())
                .create_run(&env, remote.project_id, remote.suite_id, &case_ids, &description)
                .await?;
            if !run_id.is_valid() {
                bail!("the service did not return a run ID");
            }
            println!("{}", run_id);
        }
        Commands::Results {
            run,
            file,
            by_title,
        } => {
            let client = client(&config)?;
            let orchestrator = Orchestrator::new(&client);
            let run_id = RunId(run);

            if by_title {
                let titled: Vec<TitledResult> = read_json(&file)?;
                let index = CaseIdIndex::load(&client, remote.project_id, remote.suite_id).await?;
                let skipped = orchestrator
                    .post_titled_results(run_id, &index, titled)
                    .await?;
                if !skipped.is_empty() {
                    println!("Skipped {} results with unknown titles", skipped.len());
                }
            } else {
                let batch: ResultBatch = read_json(&file)?;
                orchestrator.post_results(run_id, &batch).await?;
            }
            info!(run, "results posted");
        }
        Commands::Config => {
            print!("{}", Config::default_config_string());
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
