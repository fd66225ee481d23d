// crates/intl-sync-cli/src/main.rs
// ============================================================================
// Module: Intl Sync CLI Entry Point
// Description: Command dispatcher for the intl-sync binary.
// Purpose: Wire config, git, discovery, and the orchestrator together.
// Dependencies: clap, intl-sync-config, intl-sync-core, intl-sync-provider
// ============================================================================

//! ## Overview
//! Running `intl-sync` with no subcommand executes the commit-time gate:
//! staged default-locale files are discovered, out-of-sync translations
//! are regenerated concurrently, and (when invoked from the installed
//! pre-commit hook) the regenerated files are re-staged so they join the
//! commit in flight. The gate reports failures but always exits
//! successfully so a provider outage can never block a commit.
//! `translate` runs the same pipeline over the whole tree and does fail
//! the run on task failures; `generate` scaffolds a config file; `hook`
//! manages the pre-commit hook.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use intl_sync_cli::git;
use intl_sync_cli::git::GitError;
use intl_sync_cli::i18n::Locale;
use intl_sync_cli::i18n::set_locale;
use intl_sync_cli::store::JsonFileStore;
use intl_sync_cli::t;
use intl_sync_config::API_KEY_ENV;
use intl_sync_config::CONFIG_FILE_NAME;
use intl_sync_config::SyncConfig;
use intl_sync_core::BatchReport;
use intl_sync_core::DiscoveryScope;
use intl_sync_core::Orchestrator;
use intl_sync_core::TaskOutcome;
use intl_sync_core::TranslationTask;
use intl_sync_core::discover_tasks;
use intl_sync_provider::OpenAiConfig;
use intl_sync_provider::OpenAiTranslator;
use intl_sync_provider::openai::DEFAULT_TIMEOUT_MS;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the CLI output language.
const LANG_ENV: &str = "INTL_SYNC_LANG";

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Command-line interface for the locale synchronization tool.
#[derive(Parser, Debug)]
#[command(name = "intl-sync", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `INTL_SYNC_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Set by the installed pre-commit hook; re-stages generated files.
    #[arg(long = "from-git-hook", action = ArgAction::SetTrue, hide = true)]
    from_git_hook: bool,
    /// Optional config file path (defaults to intl-sync.config.json).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate every out-of-sync translation, staged or not.
    Translate,
    /// Write a starter intl-sync.config.json.
    Generate(GenerateCommand),
    /// Manage the git pre-commit hook.
    Hook {
        /// Selected hook subcommand.
        #[command(subcommand)]
        command: HookCommand,
    },
}

/// Arguments for the `generate` scaffold command.
#[derive(Args, Debug)]
struct GenerateCommand {
    /// Root directory holding the locale files.
    #[arg(long, value_name = "DIR", default_value = "./src/locales")]
    translations_path: String,
    /// Source-of-truth locale code.
    #[arg(long, value_name = "LOCALE", default_value = "en-US")]
    default_locale: String,
    /// Target locale code; repeat for multiple locales.
    #[arg(long = "locale", value_name = "LOCALE")]
    locales: Vec<String>,
}

/// Hook management subcommands.
#[derive(Subcommand, Debug)]
enum HookCommand {
    /// Install the pre-commit hook.
    Install,
    /// Remove the pre-commit hook if it is ours.
    Uninstall,
}

/// CLI output language selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LangArg {
    /// English.
    En,
    /// Italian.
    It,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::It => Self::It,
        }
    }
}

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Terminal CLI error carrying a user-facing message.
#[derive(Debug)]
struct CliError {
    /// Localized message for stderr.
    message: String,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl CliError {
    /// Wraps a message in a terminal error.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Installs the stderr tracing subscriber honoring `RUST_LOG`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command {
        None => command_gate(cli.from_git_hook, cli.config.as_deref()).await,
        Some(Commands::Translate) => command_translate(cli.config.as_deref()).await,
        Some(Commands::Generate(command)) => command_generate(&command),
        Some(Commands::Hook {
            command,
        }) => command_hook(&command),
    }
}

// ============================================================================
// SECTION: Gate Command
// ============================================================================

/// Executes the commit-time gate (the default command).
async fn command_gate(from_git_hook: bool, config_path: Option<&Path>) -> CliResult<ExitCode> {
    let config = load_config(config_path)?;
    assert_repository()?;

    let staged = git::staged_files(&config.gate_scope())
        .map_err(|err| CliError::new(err.to_string()))?;
    if staged.is_empty() {
        write_stdout_line(&t!("gate.up_to_date"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let scope = DiscoveryScope::from_paths(staged);
    let tasks = discover(&config, Some(&scope))?;
    if tasks.is_empty() {
        write_stdout_line(&t!("gate.no_tasks"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    write_stdout_line(&t!("gate.tasks_found", count = tasks.len()))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;

    let report = run_batch(&config, tasks).await?;
    if from_git_hook {
        restage_written(&report);
    }

    // Task failures are reported above; the gate never blocks a commit.
    Ok(ExitCode::SUCCESS)
}

/// Re-stages every successfully written translation. Best effort.
fn restage_written(report: &BatchReport) {
    for path in report.written_paths() {
        if let Err(err) = git::restage(&path) {
            let _ = write_stderr_line(&t!(
                "restage.failed",
                path = path.display(),
                reason = err
            ));
        }
    }
}

// ============================================================================
// SECTION: Translate Command
// ============================================================================

/// Executes the `translate` command over the whole tree.
async fn command_translate(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let config = load_config(config_path)?;
    let tasks = discover(&config, None)?;
    if tasks.is_empty() {
        write_stdout_line(&t!("gate.up_to_date"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let report = run_batch(&config, tasks).await?;
    if report.all_succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        write_stderr_line(&t!("run.failures", failed = report.failed()))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        Ok(ExitCode::FAILURE)
    }
}

// ============================================================================
// SECTION: Generate Command
// ============================================================================

/// Executes the `generate` scaffold command.
fn command_generate(command: &GenerateCommand) -> CliResult<ExitCode> {
    intl_sync_config::write_scaffold(
        Path::new(CONFIG_FILE_NAME),
        &command.translations_path,
        &command.default_locale,
        &command.locales,
    )
    .map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&t!("generate.ok", path = CONFIG_FILE_NAME))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Hook Command
// ============================================================================

/// Executes the `hook` management commands.
fn command_hook(command: &HookCommand) -> CliResult<ExitCode> {
    assert_repository()?;
    let path = git::hook_path().map_err(|err| CliError::new(err.to_string()))?;
    match command {
        HookCommand::Install => {
            git::install_hook(&path).map_err(|err| CliError::new(hook_error(&err, &path)))?;
            write_stdout_line(&t!("hook.installed", path = path.display()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        HookCommand::Uninstall => {
            git::uninstall_hook(&path).map_err(|err| CliError::new(hook_error(&err, &path)))?;
            write_stdout_line(&t!("hook.uninstalled", path = path.display()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Localizes hook management failures.
fn hook_error(error: &GitError, path: &Path) -> String {
    match error {
        GitError::ForeignHook {
            ..
        } => t!("hook.foreign", path = path.display()),
        GitError::HookMissing {
            ..
        } => t!("hook.missing", path = path.display()),
        other => other.to_string(),
    }
}

// ============================================================================
// SECTION: Pipeline Helpers
// ============================================================================

/// Loads the configuration, mapping failures to terminal errors.
fn load_config(path: Option<&Path>) -> CliResult<SyncConfig> {
    intl_sync_config::load(path).map_err(|err| CliError::new(err.to_string()))
}

/// Asserts we are inside a git repository, localizing the common case.
fn assert_repository() -> CliResult<()> {
    git::assert_repository().map_err(|err| match err {
        GitError::NotARepository => CliError::new(t!("git.not_a_repository")),
        other => CliError::new(other.to_string()),
    })
}

/// Runs task discovery for the configured tree.
fn discover(
    config: &SyncConfig,
    scope: Option<&DiscoveryScope>,
) -> CliResult<Vec<TranslationTask>> {
    discover_tasks(&config.translations_path, &config.default_locale, &config.locales, scope)
        .map_err(|err| CliError::new(err.to_string()))
}

/// Builds the chat-completion translator from the configuration.
fn build_translator(config: &SyncConfig) -> CliResult<Arc<OpenAiTranslator>> {
    let Some(api_key) = config.resolved_api_key() else {
        return Err(CliError::new(t!(
            "apikey.missing",
            env = API_KEY_ENV,
            file = CONFIG_FILE_NAME
        )));
    };
    let translator = OpenAiTranslator::new(OpenAiConfig {
        api_key,
        model: config.model.clone(),
        api_base: config.api_base.clone(),
        timeout_ms: DEFAULT_TIMEOUT_MS,
    })
    .map_err(|err| CliError::new(err.to_string()))?;
    Ok(Arc::new(translator))
}

/// Runs the orchestrator over `tasks` and reports every settlement.
async fn run_batch(config: &SyncConfig, tasks: Vec<TranslationTask>) -> CliResult<BatchReport> {
    let translator = build_translator(config)?;
    let store = Arc::new(JsonFileStore::new());
    let orchestrator = Orchestrator::new(store, translator);
    let report = orchestrator.run(tasks).await;
    report_outcomes(&report)?;
    Ok(report)
}

/// Prints one line per settled task plus a summary.
fn report_outcomes(report: &BatchReport) -> CliResult<()> {
    for settled in &report.reports {
        let file = settled.task.file_name();
        let locale = settled.task.locale.as_str();
        match &settled.outcome {
            TaskOutcome::Success => {
                write_stdout_line(&t!("task.success", file = file, locale = locale))
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
            TaskOutcome::Skipped => {
                write_stdout_line(&t!("task.skipped", file = file, locale = locale))
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
            TaskOutcome::Failed(reason) => {
                write_stderr_line(&t!(
                    "task.failed",
                    file = file,
                    locale = locale,
                    reason = reason
                ))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            }
        }
    }
    write_stdout_line(&t!(
        "run.summary",
        succeeded = report.succeeded(),
        skipped = report.skipped(),
        failed = report.failed()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Locale Resolution
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes one line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits a terminal error to stderr and returns the failure code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
