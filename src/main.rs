use clap::Parser;
use sector_form::domain::model::SessionState;
use sector_form::domain::ports::ConfigProvider;
use sector_form::utils::error::{FormError, EXIT_INVALID_FORM};
use sector_form::utils::logger::{self, LogFormat};
use sector_form::utils::validation::Validate;
use sector_form::{
    AppConfig, CliConfig, Command, FileStorage, FormController, HttpSubmissionApi, SessionStore,
    SubmitOutcome,
};

type Controller = FormController<HttpSubmissionApi, FileStorage>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(cli.verbose, log_format);

    tracing::info!("Starting sector-form CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            report_and_exit(e);
        }
    };

    let mut form = match build_controller(&config) {
        Ok(form) => form,
        Err(e) => report_and_exit(e),
    };

    match cli.command {
        Command::Sectors => list_sectors(&mut form).await,
        Command::Show => show(&mut form).await?,
        Command::Submit {
            username,
            sectors,
            agree_terms,
        } => submit(&mut form, username, sectors, agree_terms).await?,
        Command::Logout => {
            if let Err(e) = form.destroy_session() {
                report_and_exit(e);
            }
            println!("👋 Session destroyed, form reset");
        }
    }

    Ok(())
}

fn build_controller(config: &AppConfig) -> sector_form::Result<Controller> {
    let api = HttpSubmissionApi::from_config(config)?;
    let session = SessionStore::with_key(
        FileStorage::new(config.storage_path()),
        config.session_key(),
    );
    tracing::debug!(
        "Using API {} and storage {}",
        config.api_endpoint(),
        config.storage_path()
    );
    Ok(FormController::with_options(
        api,
        session,
        config.sector_options(),
    ))
}

async fn list_sectors(form: &mut Controller) {
    if let Err(e) = form.load_sectors().await {
        report_and_exit(e);
    }

    for sector in form.sectors() {
        println!("{:>6}  {}", sector.id, sector.name);
    }
}

async fn show(form: &mut Controller) -> anyhow::Result<()> {
    form.init().await;

    match form.session_state()?.session_id() {
        Some(id) => println!("Session: {}", id),
        None => println!("Session: none"),
    }

    let state = form.form();
    println!("Name: {}", state.username);
    println!(
        "Agree of terms: {}",
        if state.agree_of_terms { "yes" } else { "no" }
    );
    println!("Sectors:");
    for sector in form.sectors() {
        let mark = if state.selected_sectors.contains(&sector.id) {
            "[x]"
        } else {
            "[ ]"
        };
        println!("  {} {}", mark, sector.name);
    }

    Ok(())
}

async fn submit(
    form: &mut Controller,
    username: Option<String>,
    sectors: Vec<i64>,
    agree_terms: bool,
) -> anyhow::Result<()> {
    // 先載入既有 session 的值，再套用命令列輸入
    if let SessionState::SessionActive(id) = form.session_state()? {
        let _ = form.load_values_by_session(&id).await;
    }

    if let Some(username) = username {
        form.set_username(username);
    }
    if !sectors.is_empty() {
        form.set_selected_sectors(sectors);
    }
    if agree_terms {
        form.set_agree_of_terms(true);
    }

    match form.submit().await {
        SubmitOutcome::Invalid => {
            eprintln!("❌ The form has errors:");
            for error in &form.form().errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_INVALID_FORM);
        }
        SubmitOutcome::Created(id) => {
            println!("✅ Submission saved, new session {}", id);
        }
        SubmitOutcome::Updated(id) => {
            println!("✅ Submission updated for session {}", id);
        }
        SubmitOutcome::Failed(e) => report_and_exit(e),
    }

    if let Some(at) = form.form().submitted_at {
        println!("🕒 Submitted at {}", at.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}

fn report_and_exit(e: FormError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
