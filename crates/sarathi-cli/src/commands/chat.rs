use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use sarathi_core::chat::AnswerSource;
use sarathi_interaction::canned::GREETING;
use sarathi_interaction::{CannedResponder, ChatController, HttpAnswerSource, SubmitOutcome};

use super::utils;

pub async fn ask(question: String, offline: bool) -> Result<()> {
    if question.trim().is_empty() {
        bail!("Nothing to ask");
    }

    let controller = build_controller(offline)?;
    if let SubmitOutcome::Answered { reply } = controller.submit(&question).await {
        println!("{}", reply.text);
    }

    Ok(())
}

pub async fn run(offline: bool) -> Result<()> {
    let controller = build_controller(offline)?;
    controller.seed_greeting(GREETING).await;
    println!("sarathi> {GREETING}");
    println!("(type /quit to leave)");

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            break; // EOF
        }

        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }

        // Strip the read artifact but keep the text otherwise untouched;
        // the transcript records input exactly as typed.
        let input = line.strip_suffix('\n').unwrap_or(&line);
        let input = input.strip_suffix('\r').unwrap_or(input);

        match controller.submit(input).await {
            SubmitOutcome::Answered { reply } => println!("sarathi> {}", reply.text),
            SubmitOutcome::Ignored => continue,
            SubmitOutcome::Disposed => break,
        }
    }

    controller.dispose();
    println!("👋 Goodbye");
    Ok(())
}

fn build_controller(offline: bool) -> Result<ChatController> {
    let config = utils::load_config()?;

    let source: Arc<dyn AnswerSource> = if offline {
        Arc::new(CannedResponder::with_delay_ms(
            config.reply_delay.min_ms,
            config.reply_delay.max_ms,
        ))
    } else {
        let session = utils::open_session()?;
        if !session.is_authenticated() {
            bail!("You are not signed in. Run `sarathi login` first, or pass --offline.");
        }
        Arc::new(
            HttpAnswerSource::new(config.questions_url(), session)
                .with_timeout(config.request_timeout()),
        )
    };

    Ok(ChatController::new(source))
}
