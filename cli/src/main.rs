mod http;
mod prompt;
mod token_file;

use std::io;
use std::path::PathBuf;

use auth::flow::{AuthFlow, AuthStep};
use auth::profile::{ProfileEditor, ProfileEffect};
use auth::types::AvatarUpload;
use auth::{ApiConfig, Notice, NoticeKind, Session};
use clap::{ArgGroup, Args, Parser, Subcommand};
use serde::Serialize;

use crate::http::{ReqwestAuthApi, content_type_for};
use crate::token_file::{DEFAULT_TOKEN_FILE, FileTokenStore};

type CliSession = Session<FileTokenStore>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `studio login` first")]
    NotSignedIn,
    #[error("no account for {0}; run `studio signup` to create one")]
    NoAccount(String),
    #[error("{0} already has an account; run `studio login` instead")]
    AccountExists(String),
    #[error("{0}")]
    Rejected(String),
    #[error("refusing to delete the account without --yes")]
    ConfirmationRequired,
    #[error("input cancelled")]
    Cancelled,
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "studio", about = "Studio account CLI")]
struct Cli {
    #[arg(long, env = "STUDIO_API_URL", default_value = auth::api::DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, env = "STUDIO_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    token_file: PathBuf,

    /// Log request and state transitions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with an existing account.
    Login {
        #[arg(long)]
        email: String,
        /// Prompted for, without echo, when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and sign in.
    Signup(SignupArgs),
    /// Ask for a password reset email.
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Print the signed-in user.
    Whoami,
    /// Forget the stored token.
    Logout,
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    username: String,
    #[arg(long)]
    full_name: String,
    /// Date of birth, `YYYY-MM-DD`.
    #[arg(long)]
    dob: String,
    #[arg(long)]
    password: Option<String>,
    #[arg(long)]
    confirm_password: Option<String>,
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    /// Change display name and/or username.
    #[command(group(ArgGroup::new("fields").required(true).multiple(true).args(["full_name", "username"])))]
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        username: Option<String>,
    },
    /// Upload a new profile picture.
    Avatar { path: PathBuf },
    /// Permanently delete the account.
    Delete {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    let api = ReqwestAuthApi::new(ApiConfig::new(&cli.api_url));
    let mut session = Session::new(FileTokenStore::new(cli.token_file));

    match cli.command {
        Command::Login { email, password } => run_login(&api, &mut session, email, password).await,
        Command::Signup(args) => run_signup(&api, &mut session, args).await,
        Command::ForgotPassword { email } => run_forgot_password(&api, email).await,
        Command::Whoami => run_whoami(&api, &mut session).await,
        Command::Logout => {
            session.logout();
            println!("Signed out.");
            Ok(())
        }
        Command::Profile(profile) => run_profile(&api, &mut session, profile).await,
    }
}

async fn run_login(
    api: &ReqwestAuthApi,
    session: &mut CliSession,
    email: String,
    password: Option<String>,
) -> Result<(), CliError> {
    let mut flow = AuthFlow::new();
    flow.form_mut().email = email;
    flow.run(api, session).await;
    report(flow.notice())?;
    if flow.step() == AuthStep::Signup {
        return Err(CliError::NoAccount(flow.form().email.trim().to_owned()));
    }

    flow.form_mut().password = match password {
        Some(password) => password,
        None => read_password("Password: ")?,
    };
    let done = flow.run(api, session).await;
    report(flow.notice())?;
    if let Some(done) = done {
        print_json(&done.user)?;
    }
    Ok(())
}

async fn run_signup(api: &ReqwestAuthApi, session: &mut CliSession, args: SignupArgs) -> Result<(), CliError> {
    let mut flow = AuthFlow::new();
    flow.form_mut().email = args.email;
    flow.run(api, session).await;
    report(flow.notice())?;
    if flow.step() == AuthStep::Signin {
        return Err(CliError::AccountExists(flow.form().email.trim().to_owned()));
    }

    let password = match args.password {
        Some(password) => password,
        None => read_password("Password: ")?,
    };
    let confirm_password = match args.confirm_password {
        Some(confirm) => confirm,
        None => read_password("Confirm password: ")?,
    };
    let form = flow.form_mut();
    form.username = args.username;
    form.full_name = args.full_name;
    form.dob = args.dob;
    form.password = password;
    form.confirm_password = confirm_password;

    let done = flow.run(api, session).await;
    report(flow.notice())?;
    if let Some(done) = done {
        print_json(&done.user)?;
    }
    Ok(())
}

async fn run_forgot_password(api: &ReqwestAuthApi, email: String) -> Result<(), CliError> {
    let mut flow = AuthFlow::new();
    flow.form_mut().email = email;
    let Some(submission) = flow.request_password_reset() else {
        return report(flow.notice());
    };
    let result = auth::flow::dispatch(api, &submission).await;
    flow.finish(result);
    report(flow.notice())
}

async fn run_whoami(api: &ReqwestAuthApi, session: &mut CliSession) -> Result<(), CliError> {
    let user = signed_in(api, session).await?;
    print_json(user)
}

async fn run_profile(api: &ReqwestAuthApi, session: &mut CliSession, profile: ProfileCommand) -> Result<(), CliError> {
    let mut editor = ProfileEditor::from_user(Some(signed_in(api, session).await?));

    let request = match profile.command {
        ProfileSubcommand::Update { full_name, username } => {
            if let Some(full_name) = full_name {
                editor.display_name = full_name;
            }
            if let Some(username) = username {
                editor.username = username;
            }
            editor.save()
        }
        ProfileSubcommand::Avatar { path } => {
            let size = std::fs::metadata(&path)?.len();
            if !editor.check_avatar_size(size) {
                return report(editor.notice());
            }
            let avatar = AvatarUpload {
                file_name: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                content_type: content_type_for(&path).to_owned(),
                bytes: std::fs::read(&path)?,
            };
            editor.upload_avatar(avatar)
        }
        ProfileSubcommand::Delete { yes } => {
            if !yes {
                return Err(CliError::ConfirmationRequired);
            }
            editor.request_delete();
            editor.confirm_delete()
        }
    };

    let Some(request) = request else {
        return report(editor.notice());
    };
    let effect = editor.run(request, api, session).await;
    report(editor.notice())?;
    match effect {
        Some(ProfileEffect::AccountDeleted) => println!("Account deleted."),
        Some(ProfileEffect::Saved { .. } | ProfileEffect::AvatarUpdated) => {
            if let Some(user) = session.user() {
                print_json(user)?;
            }
        }
        None => {}
    }
    Ok(())
}

/// Resolve the stored token into a user.
async fn signed_in<'a>(api: &ReqwestAuthApi, session: &'a mut CliSession) -> Result<&'a auth::User, CliError> {
    session.restore(api).await;
    session.user().ok_or(CliError::NotSignedIn)
}

/// Print a notice; error notices become the command's failure.
fn report(notice: Option<&Notice>) -> Result<(), CliError> {
    match notice {
        Some(notice) if notice.kind == NoticeKind::Error => Err(CliError::Rejected(notice.message.clone())),
        Some(notice) => {
            println!("{}", notice.message);
            Ok(())
        }
        None => Ok(()),
    }
}

fn read_password(label: &str) -> Result<String, CliError> {
    prompt::read_secret(label)?.ok_or(CliError::Cancelled)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
