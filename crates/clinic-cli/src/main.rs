use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clinic_infrastructure::{BackendSeed, ClinicPaths, ConfigService};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic HMS - doctor session and prescription harness", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/clinic/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emulator seed file (defaults to ~/.config/clinic/seed.toml)
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as a registered doctor
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a doctor account and profile
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Consume a one-time code
    RedeemCode {
        #[arg(long)]
        code: String,
    },
    /// Send a password-reset email
    ResetPassword {
        #[arg(long)]
        email: String,
    },
    /// Sign in, then delete the account everywhere
    DeleteAccount {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in, then change the password
    ChangePassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        new_password: String,
    },
    /// Compose and commit a prescription
    Prescribe {
        #[arg(long)]
        patient: String,
        /// Medicine as NAME:DOSAGE, repeatable
        #[arg(long = "medicine", required = true)]
        medicines: Vec<String>,
        #[arg(long)]
        instructions: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
    logging::init(&config.logging);

    let seed_path = match cli.seed {
        Some(path) => path,
        None => ClinicPaths::seed_file()?,
    };
    let seed = BackendSeed::load(&seed_path)
        .await
        .with_context(|| format!("Failed to load seed {}", seed_path.display()))?;

    let harness = commands::Harness::new(&config, &seed)?;

    match cli.command {
        Commands::SignIn { email, password } => harness.sign_in(&email, &password).await?,
        Commands::SignUp { email, password } => harness.sign_up(&email, &password).await?,
        Commands::RedeemCode { code } => harness.redeem_code(&code).await?,
        Commands::ResetPassword { email } => harness.reset_password(&email).await?,
        Commands::DeleteAccount { email, password } => {
            harness.delete_account(&email, &password).await?
        }
        Commands::ChangePassword {
            email,
            password,
            new_password,
        } => {
            harness
                .change_password(&email, &password, &new_password)
                .await?
        }
        Commands::Prescribe {
            patient,
            medicines,
            instructions,
        } => harness.prescribe(&patient, &medicines, &instructions).await?,
    }

    Ok(())
}
