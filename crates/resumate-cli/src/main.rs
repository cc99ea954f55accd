use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use resumate_application::ResumateApp;
use resumate_infrastructure::{ConfigOverrides, ConfigService};

mod commands;
mod logging;
mod render;

#[derive(Parser)]
#[command(name = "resumate")]
#[command(about = "Resumate - analyze how well a resume matches a job description", long_about = None)]
struct Cli {
    /// Path to an alternative config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config and RESUMATE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for (without echo) when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Prompted for (without echo) when omitted
        #[arg(long)]
        password: Option<String>,
        /// Prompted for (without echo) when omitted
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Exchange the refresh token for a new session
    Refresh,
    /// Analyze a resume against a job description
    Analyze(AnalyzeArgs),
    /// Browse saved analyses
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show or change the color theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Check backend health
    Health,
    /// List the skills the backend can match
    Skills {
        /// Show at most this many skills
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Args)]
#[group(id = "resume", required = true, multiple = false, args = ["resume_file", "resume_text", "resume_text_file"])]
struct AnalyzeArgs {
    /// PDF or TXT resume to upload
    #[arg(long)]
    resume_file: Option<PathBuf>,
    /// Resume text
    #[arg(long)]
    resume_text: Option<String>,
    /// File containing the resume text
    #[arg(long)]
    resume_text_file: Option<PathBuf>,
    /// Job description text
    #[arg(long, conflicts_with = "jd_text_file")]
    jd_text: Option<String>,
    /// File containing the job description
    #[arg(long)]
    jd_text_file: Option<PathBuf>,
    /// LinkedIn/Internshala job link
    #[arg(long)]
    jd_url: Option<String>,
    /// Save the result to history
    #[arg(long)]
    save: bool,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved analyses, most recent first
    List,
    /// Show a saved analysis
    Show { id: i64 },
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Toggle,
    Light,
    Dark,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", render::error_message(&e).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_service = ConfigService::new(ConfigOverrides {
        config_file: cli.config,
        api_url: cli.api_url,
    });
    let config = match config_service.get_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init(None);
            return Err(e.into());
        }
    };
    logging::init(Some(&config.logging.level));

    let app = ResumateApp::from_config(config)?;
    let theme = app.preferences.theme();

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&app, &email, password, theme).await?
        }
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            commands::auth::register(&app, &name, &email, password, confirm_password, theme).await?
        }
        Commands::Logout => commands::auth::logout(&app)?,
        Commands::Whoami => commands::auth::whoami(&app, theme),
        Commands::Refresh => commands::auth::refresh(&app, theme).await?,
        Commands::Analyze(args) => {
            let input = commands::analyze::AnalyzeInput {
                resume_file: args.resume_file,
                resume_text: args.resume_text,
                resume_text_file: args.resume_text_file,
                jd_text: args.jd_text,
                jd_text_file: args.jd_text_file,
                jd_url: args.jd_url,
                save: args.save,
            };
            commands::analyze::run(&app, input, theme).await?
        }
        Commands::History { action } => match action {
            HistoryAction::List => commands::history::list(&app, theme)?,
            HistoryAction::Show { id } => commands::history::show(&app, id, theme)?,
        },
        Commands::Theme { action } => {
            let action = match action {
                None | Some(ThemeAction::Show) => commands::theme::ThemeCommand::Show,
                Some(ThemeAction::Toggle) => commands::theme::ThemeCommand::Toggle,
                Some(ThemeAction::Light) => commands::theme::ThemeCommand::Light,
                Some(ThemeAction::Dark) => commands::theme::ThemeCommand::Dark,
            };
            commands::theme::run(&app, action)?
        }
        Commands::Health => commands::server::health(&app).await?,
        Commands::Skills { limit } => commands::server::skills(&app, limit, theme).await?,
    }

    Ok(())
}
