//! Terminal session mirroring the web page: selectors, a text prompt, a
//! generate action and a log viewer.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Input, Select};

use triage_core::{Assistant, AssistantError, IncidentRequest, Role, Tone};

use crate::config::Selection;

const ACTIONS: &[&str] = &[
    "Generate AI response",
    "View past logs",
    "Change assistant mode",
    "Change response tone",
    "Quit",
];

pub async fn handle_interactive(assistant: &Assistant, initial: Selection) -> Result<()> {
    let mut selection = initial;

    eprintln!("{}", "GenAI Incident Assistant".bold());
    eprintln!(
        "{}",
        "AI-powered tool to help DevOps & SRE teams troubleshoot faster".dimmed()
    );
    eprintln!();

    loop {
        eprintln!(
            "{} {}  {} {}",
            "Mode:".dimmed(),
            selection.role.label().bright_cyan(),
            "Tone:".dimmed(),
            selection.tone.label().bright_cyan()
        );

        let action = Select::new()
            .with_prompt("What would you like to do?")
            .items(ACTIONS)
            .default(0)
            .interact()
            .context("Failed to read selection")?;

        match action {
            0 => generate(assistant, selection).await?,
            1 => show_logs(assistant),
            2 => selection.role = pick_role(selection.role)?,
            3 => selection.tone = pick_tone(selection.tone)?,
            _ => break,
        }
        eprintln!();
    }

    Ok(())
}

async fn generate(assistant: &Assistant, selection: Selection) -> Result<()> {
    let description: String = Input::new()
        .with_prompt("Describe the incident or issue")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read incident description")?;

    let request = IncidentRequest::new(selection.role, selection.tone, description);
    if !request.is_blank() {
        eprintln!("{}", "Analyzing incident and generating insights...".dimmed());
    }

    match assistant.resolve(&request).await {
        Ok(resolution) => {
            eprintln!();
            eprintln!("{}", "Suggested Resolution:".bold());
            println!("{}", resolution.response);
            if let Some(error) = resolution.log_failure {
                eprintln!("{} {}", "✗".bright_red(), error.to_string().bright_red());
            }
        }
        Err(AssistantError::EmptyInput) => {
            eprintln!(
                "{} {}",
                "⚠".bright_yellow(),
                AssistantError::EmptyInput.to_string().yellow()
            );
        }
        Err(e) => {
            eprintln!("{} {}", "✗".bright_red(), e.to_string().bright_red());
        }
    }

    Ok(())
}

fn show_logs(assistant: &Assistant) {
    match assistant.read_log() {
        Ok(content) => println!("{}", content),
        Err(e) if e.is_informational() => eprintln!("{} {}", "ℹ".bright_blue(), e),
        Err(e) => eprintln!("{} {}", "✗".bright_red(), e.to_string().bright_red()),
    }
}

fn pick_role(current: Role) -> Result<Role> {
    let labels: Vec<&str> = Role::ALL.iter().map(|r| r.label()).collect();
    let default = Role::ALL.iter().position(|r| *r == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt("Choose Assistant Mode")
        .items(&labels)
        .default(default)
        .interact()
        .context("Failed to read assistant mode")?;
    Ok(Role::ALL[index])
}

fn pick_tone(current: Tone) -> Result<Tone> {
    let labels: Vec<&str> = Tone::ALL.iter().map(|t| t.label()).collect();
    let default = Tone::ALL.iter().position(|t| *t == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt("Response Tone")
        .items(&labels)
        .default(default)
        .interact()
        .context("Failed to read response tone")?;
    Ok(Tone::ALL[index])
}
