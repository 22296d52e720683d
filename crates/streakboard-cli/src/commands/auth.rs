use clap::Subcommand;
use streakboard_core::{Session, SignupForm};

use crate::common::{api_client, config_dir, load_config, load_session, runtime, CliResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account (a verification email is sent)
    Signup {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm_password: String,
        /// Optional sharing code shown on your profile
        #[arg(long)]
        sharing_code: Option<String>,
    },
    /// Log in and remember the session
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Confirm an email address with the token from the verification link
    Verify { token: String },
    /// Send the verification email again
    Resend { email: String },
    /// Show who is logged in
    Status,
}

pub fn run(action: AuthAction) -> CliResult {
    let config = load_config()?;
    let dir = config_dir()?;

    match action {
        AuthAction::Signup {
            username,
            email,
            password,
            confirm_password,
            sharing_code,
        } => {
            let form = SignupForm {
                username,
                email,
                password,
                confirm_password,
                sharing_code,
            };
            form.validate()?;
            let api = api_client(&config, None)?;
            let resp = runtime()?.block_on(api.signup(&form))?;
            println!("{}", resp.message);
        }
        AuthAction::Login { username, password } => {
            let mut api = api_client(&config, None)?;
            let resp = runtime()?.block_on(api.login(&username, &password))?;
            let session = Session {
                access_token: resp.access_token,
                user: resp.user,
            };
            session.save_to(&dir)?;
            println!("Logged in as {} ({})", session.user.username, session.user.badge);
        }
        AuthAction::Logout => {
            Session::clear_in(&dir)?;
            println!("Logged out");
        }
        AuthAction::Verify { token } => {
            let api = api_client(&config, None)?;
            let resp = runtime()?.block_on(api.verify_email(&token))?;
            println!("{}", resp.message);
        }
        AuthAction::Resend { email } => {
            let api = api_client(&config, None)?;
            let resp = runtime()?.block_on(api.resend_verification(&email))?;
            println!("{}", resp.message);
        }
        AuthAction::Status => match load_session()? {
            Some(session) => println!("Logged in as {}", session.user.username),
            None => println!("Not logged in"),
        },
    }
    Ok(())
}
