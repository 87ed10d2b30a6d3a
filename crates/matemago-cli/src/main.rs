use matemago::render::{Visualizer, render_page, repair_diagram_text, wrap_document};
use matemago::{
    ClientConfig, ClientError, ConfigError, ExplanationClient, FormError, QueryPhase,
    QuerySession, validate_form,
};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Form(FormError),
    Config(ConfigError),
    Client(ClientError),
    Json(serde_json::Error),
    Query(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) | CliError::Form(_) | CliError::Config(_) => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Form(err) => write!(f, "{err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::Client(err) => write!(f, "{}", err.user_message()),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Query(msg) => write!(f, "¡Ups! Algo salió mal: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<FormError> for CliError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ClientError> for CliError {
    fn from(value: ClientError) -> Self {
        Self::Client(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Ask,
    Render,
    Repair,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    concept: Option<String>,
    age: Option<String>,
    api_base: Option<String>,
    visual_type: Option<String>,
    json: bool,
    pretty: bool,
    page: bool,
    input: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "matemago-cli\n\
\n\
USAGE:\n\
  matemago-cli ask --concept <text> --age <n> [--api-base <url>] [--json] [--pretty] [--out <path>]\n\
  matemago-cli render --type svg|mermaid|chartjs [--page] [--out <path>] [<path>|-]\n\
  matemago-cli repair [<path>|-]\n\
\n\
NOTES:\n\
  - ask prints a standalone HTML page; --json prints the service response instead.\n\
  - The service base defaults to $MATEMAGO_API_BASE, then http://127.0.0.1:8000/api/v1/tutor.\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - render prints the HTML fragment of the visual; --page wraps it in a full document.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "ask" => args.command = Command::Ask,
            "render" => args.command = Command::Render,
            "repair" => args.command = Command::Repair,
            "--json" => args.json = true,
            "--pretty" => args.pretty = true,
            "--page" => args.page = true,
            "--concept" | "--age" | "--api-base" | "--type" | "--out" => {
                let Some(value) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let slot = match a.as_str() {
                    "--concept" => &mut args.concept,
                    "--age" => &mut args.age,
                    "--api-base" => &mut args.api_base,
                    "--type" => &mut args.visual_type,
                    _ => &mut args.out,
                };
                *slot = Some(value.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    write_text(&text, out)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn run_ask(args: &Args) -> Result<(), CliError> {
    let request = validate_form(
        args.concept.as_deref().unwrap_or_default(),
        args.age.as_deref().unwrap_or_default(),
    )?;
    let config = ClientConfig::resolve(args.api_base.as_deref())?;
    tracing::debug!(url = %config.explain_url(), "querying explanation service");
    let client = ExplanationClient::new(config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    if args.json {
        let response = runtime.block_on(client.explain(&request))?;
        return write_json(&response, args.pretty, args.out.as_deref());
    }

    let mut session = QuerySession::new();
    runtime.block_on(session.ask(&client, &request));
    if let QueryPhase::Failed(message) = session.phase() {
        return Err(CliError::Query(message.clone()));
    }

    let mut visualizer = Visualizer::new();
    let page = render_page(&session, &mut visualizer);
    write_text(&page, args.out.as_deref())
}

fn run_render(args: &Args) -> Result<(), CliError> {
    let Some(kind) = args.visual_type.as_deref() else {
        return Err(CliError::Usage(usage()));
    };
    let payload = read_input(args.input.as_deref())?;

    let mut visualizer = Visualizer::new();
    let state = visualizer.render(kind, &payload);
    tracing::debug!(?state, "render finished");

    let fragment = visualizer.surface().as_html();
    if args.page {
        write_text(&wrap_document(fragment), args.out.as_deref())
    } else {
        write_text(&format!("{fragment}\n"), args.out.as_deref())
    }
}

fn run_repair(args: &Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut repaired = repair_diagram_text(&text);
    repaired.push('\n');
    write_text(&repaired, args.out.as_deref())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Ask => run_ask(&args),
        Command::Render => run_render(&args),
        Command::Repair => run_repair(&args),
    }
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("matemago-cli")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn ask_is_the_default_command() {
        let args = parse_args(&argv(&["--concept", "sumas", "--age", "7"])).unwrap();
        assert_eq!(args.command, Command::Ask);
        assert_eq!(args.concept.as_deref(), Some("sumas"));
        assert_eq!(args.age.as_deref(), Some("7"));
    }

    #[test]
    fn render_takes_type_and_path() {
        let args = parse_args(&argv(&["render", "--type", "mermaid", "--page", "diagram.mmd"]))
            .unwrap();
        assert_eq!(args.command, Command::Render);
        assert_eq!(args.visual_type.as_deref(), Some("mermaid"));
        assert!(args.page);
        assert_eq!(args.input.as_deref(), Some("diagram.mmd"));
    }

    #[test]
    fn dash_reads_stdin() {
        let args = parse_args(&argv(&["repair", "-"])).unwrap();
        assert_eq!(args.input.as_deref(), Some("-"));
    }

    #[test]
    fn missing_flag_value_is_usage_error() {
        let err = parse_args(&argv(&["ask", "--age"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_flag_and_second_path_are_rejected() {
        assert!(parse_args(&argv(&["render", "--verbose"])).is_err());
        assert!(parse_args(&argv(&["repair", "a.mmd", "b.mmd"])).is_err());
    }

    #[test]
    fn validation_errors_exit_with_two() {
        let err = CliError::from(validate_form("", "8").unwrap_err());
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            CliError::Query("Bad Gateway".to_string()).exit_code(),
            1
        );
    }
}
