//! Demonstrates composing and sending a message
//!
//! Run with: cargo run --example send_message
//!
//! Set SMTP_HOST (and friends) with MAIL_BACKEND=smtp to deliver for real.

use std::io::Write;

use tideway_mail::{ConfigBuilder, MessageBuilder, mailer_from_config};

#[tokio::main]
async fn main() -> tideway_mail::Result<()> {
    let config = ConfigBuilder::new().from_env().build()?;
    tideway_mail::init_tracing_with_config(&config);

    let mailer = mailer_from_config(&config)?;

    // Something to attach
    let mut report = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .map_err(|e| tideway_mail::MailError::config(format!("Failed to create demo file: {}", e)))?;
    writeln!(report, "Signups: 42").ok();

    let mut welcome = MessageBuilder::new();
    welcome
        .set_from("noreply@myapp.com")
        .set_subject("Welcome to {}, {}!", &[&"MyApp", &"Ada"])
        .set_recipient(["ada@example.com"])
        .set_text("Thanks for signing up! We're excited to have you.")
        .set_html("<h1>Welcome!</h1><p>Thanks for signing up!</p>");

    println!("\nSending welcome message...\n");
    welcome.send(mailer.as_ref()).await?;

    let mut newsletter = MessageBuilder::new();
    newsletter
        .set_from("newsletter@myapp.com")
        .set_subject("Monthly newsletter #{}", &[&7])
        .set_recipient(["subscriber1@example.com", "subscriber2@example.com"])
        .set_cc(["marketing@myapp.com"])
        .set_bcc(["archive@myapp.com"])
        .set_text("Here's what's new this month...")
        .add_attachment(report.path(), Some("stats.txt"))?;

    // Replaces the CC list set above
    newsletter.set_cc(Vec::<String>::new());

    println!("\nSending newsletter...\n");
    newsletter.send(mailer.as_ref()).await?;

    println!("\nMailer healthy: {}", mailer.is_healthy());

    Ok(())
}
