use anyhow::{Result, bail};
use sarathi_interaction::{AuthClient, Authenticator};

use super::utils;

pub async fn run(email: Option<String>, remember: bool) -> Result<()> {
    let config = utils::load_config()?;
    let session = utils::open_session()?;
    let client = AuthClient::new(config.login_url()).with_timeout(config.request_timeout());
    let authenticator = Authenticator::new(client, session);

    let email = match email {
        Some(email) => email,
        None => prompt_email(authenticator.remembered_email())?,
    };
    if !email.contains('@') {
        bail!("'{email}' does not look like an email address");
    }

    let password = utils::prompt("Password: ")?;
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    // The remember choice applies even when the sign-in itself fails.
    if remember {
        authenticator.remember_email(&email);
    } else {
        authenticator.forget_email();
    }

    match authenticator.sign_in(&email, &password).await {
        Ok(body) => {
            println!(
                "✅ Signed in to {} as {} (token valid for {}s)",
                config.app_name, body.email, body.expires_in
            );
            Ok(())
        }
        // The error's Display text is already user-facing wording.
        Err(err) => bail!("{err}"),
    }
}

pub fn logout() -> Result<()> {
    let session = utils::open_session()?;
    session.clear();
    println!("✅ Signed out");
    Ok(())
}

fn prompt_email(remembered: Option<String>) -> Result<String> {
    match remembered {
        Some(remembered) => {
            let input = utils::prompt(&format!("Email [{remembered}]: "))?;
            Ok(if input.is_empty() { remembered } else { input })
        }
        None => {
            let input = utils::prompt("Email: ")?;
            if input.is_empty() {
                bail!("Email must not be empty");
            }
            Ok(input)
        }
    }
}
