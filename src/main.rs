use clap::{Args, Parser, Subcommand};
use quiz_client::api::ApiError;
use quiz_client::config::ConfigError;
use quiz_client::session::{Role, SessionError};
use quiz_client::{ClientConfig, QuizClient};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("request failed: {0}")]
    Api(#[from] ApiError),
    #[error("not logged in; run `quiz login` first")]
    NotLoggedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "quiz", about = "Quiz backend client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login(Credentials),
    Signup {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        role: Option<Role>,
    },
    Logout,
    Whoami,
    Refresh,
    Quizzes(QuizzesCommand),
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long, env = "QUIZ_EMAIL")]
    email: String,
    #[arg(long, env = "QUIZ_PASSWORD")]
    password: String,
}

#[derive(Args, Debug)]
struct QuizzesCommand {
    #[command(subcommand)]
    command: QuizzesSubcommand,
}

#[derive(Subcommand, Debug)]
enum QuizzesSubcommand {
    List,
    Show { quiz_id: String },
    Questions { quiz_id: String },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Stats,
    Users,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig::from_env()?;
    let client = QuizClient::from_config(&config)?;
    client.session().initialize().await;

    match cli.command {
        Command::Login(Credentials { email, password }) => {
            let user = client.session().login(&email, &password).await?;
            println!("logged in as {} ({})", user.email, role_label(user.role));
        }
        Command::Signup { credentials, role } => {
            let user = client.session().signup(&credentials.email, &credentials.password, role).await?;
            println!("signed up as {} ({})", user.email, role_label(user.role));
        }
        Command::Logout => {
            client.session().logout().await;
            println!("logged out");
        }
        Command::Whoami => {
            let user = client.session().user().ok_or(CliError::NotLoggedIn)?;
            print_json(&user)?;
        }
        Command::Refresh => {
            require_login(&client)?;
            client.session().refresh().await?;
            println!("session refreshed");
        }
        Command::Quizzes(quizzes) => run_quizzes(&client, quizzes).await?,
        Command::Admin(admin) => {
            require_login(&client)?;
            run_admin(&client, admin).await?;
        }
    }
    Ok(())
}

async fn run_quizzes(client: &QuizClient, quizzes: QuizzesCommand) -> Result<(), CliError> {
    let service = client.quizzes();
    match quizzes.command {
        QuizzesSubcommand::List => print_json(&service.list_quizzes().await?),
        QuizzesSubcommand::Show { quiz_id } => print_json(&service.get_quiz(&quiz_id).await?),
        QuizzesSubcommand::Questions { quiz_id } => print_json(&service.get_questions(&quiz_id).await?),
    }
}

async fn run_admin(client: &QuizClient, admin: AdminCommand) -> Result<(), CliError> {
    let service = client.admin();
    match admin.command {
        AdminSubcommand::Stats => print_json(&service.stats().await?),
        AdminSubcommand::Users => print_json(&service.list_users().await?),
    }
}

fn require_login(client: &QuizClient) -> Result<(), CliError> {
    if client.session().is_authenticated() { Ok(()) } else { Err(CliError::NotLoggedIn) }
}

fn role_label(role: Option<Role>) -> String {
    role.map_or_else(|| "no role".to_owned(), |r| r.to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
