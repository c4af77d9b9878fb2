use anyhow::Result;
use sarathi_core::session::DEFAULT_TOKEN_KIND;

use super::utils;

pub fn run() -> Result<()> {
    let session = utils::open_session()?;

    // An expired record is purged by this check, so status doubles as the
    // cleanup pass.
    if session.is_authenticated() {
        let principal = session
            .principal()
            .unwrap_or_else(|| "<unknown>".to_string());
        let kind = session
            .token_kind()
            .unwrap_or_else(|| DEFAULT_TOKEN_KIND.to_string());
        println!("✅ Signed in as {principal}");
        println!("   Token kind: {kind}");
    } else {
        println!("❌ Not signed in");
    }

    if let Some(email) = session.remembered_email() {
        println!("   Remembered email: {email}");
    }

    Ok(())
}
