use std::io::Write;

use anyhow::Context;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;

use crate::configuration::Settings;
use crate::social::SocialConfig;
use crate::status::MessageKind;
use crate::status::MessageSlot;
use crate::submission::SubmissionController;

/// Prompt label while the program is ready for input.
const IDLE_LABEL: &str = "Notify Me";

/// Printed while a submission is in flight; input typed during this window is
/// buffered and handled afterwards, one submission at a time.
const BUSY_LABEL: &str = "Submitting...";

/// The assembled program: one controller, one set of social links. Built once
/// from `Settings`, then driven by `run_until_stopped`.
pub struct Application {
    controller: SubmissionController,
    social: SocialConfig,
}

impl Application {
    pub fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let store = cfg.fallback.store();
        match store.pending() {
            Ok(pending) if !pending.is_empty() => {
                tracing::info!(
                    count = pending.len(),
                    "fallback store holds submissions awaiting redelivery"
                );
            }
            Ok(_) => {}
            Err(e) => {
                // not fatal; the store is only needed once a delivery fails
                tracing::warn!(e.cause_chain=?e, "could not inspect the fallback store");
            }
        }

        let controller = SubmissionController::new(cfg.notify.client(), store);
        let social = cfg.social.load();

        Ok(Self { controller, social })
    }

    pub fn controller(&self) -> &SubmissionController { &self.controller }

    pub fn social(&self) -> &SocialConfig { &self.social }

    /// Read email addresses from stdin until EOF, one submission per line.
    /// Because this consumes `self`, this should be the final function call.
    pub async fn run_until_stopped(self) -> Result<(), anyhow::Error> {
        for (platform, url) in self.social.active_links() {
            println!("{platform}: {url}");
        }

        let mut messages = MessageSlot::default();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        prompt(IDLE_LABEL)?;
        while let Some(line) = lines
            .next_line()
            .await
            .context("could not read from stdin")?
        {
            println!("{BUSY_LABEL}");
            let outcome = self.controller.submit(&line).await;
            messages.show(outcome.status());
            if let Some(message) = messages.current() {
                match message.kind {
                    MessageKind::Success => println!("{}", message.text),
                    MessageKind::Error => eprintln!("{}", message.text),
                }
            }
            prompt(IDLE_LABEL)?;
        }
        Ok(())
    }
}

fn prompt(label: &str) -> Result<(), anyhow::Error> {
    let mut out = std::io::stdout();
    write!(out, "[{label}] email: ")?;
    out.flush()?;
    Ok(())
}
