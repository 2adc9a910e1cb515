//! Tests for building and sending messages

use std::path::PathBuf;
use std::sync::Arc;

use tideway_mail::{
    ConfigBuilder, ConsoleMailer, FormatError, MailError, MailerBackend, Mailer, MemoryMailer,
    Message, MessageBuilder, mailer_from_config,
};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_builder_populates_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let report = write_file(&dir, "report.csv", b"a,b\n1,2\n");

    let mut builder = MessageBuilder::new();
    builder
        .set_from("from@test.com")
        .set_subject("Report for {}", &[&"March"])
        .set_recipient(["to1@test.com", "to2@test.com"])
        .set_cc(["cc@test.com"])
        .set_bcc(["bcc@test.com"])
        .set_reply_to("reply@test.com")
        .set_charset("iso-8859-1")
        .add_header("X-Report", "monthly")
        .set_text("Plain text body")
        .set_html("<p>HTML body</p>")
        .add_attachment(&report, Some("March.csv"))
        .unwrap();

    let message = builder.build();
    assert_eq!(message.from.as_deref(), Some("from@test.com"));
    assert_eq!(message.rendered_subject().unwrap(), "Report for March");
    assert_eq!(message.to.as_slice(), ["to1@test.com", "to2@test.com"]);
    assert_eq!(message.cc.as_slice(), ["cc@test.com"]);
    assert_eq!(message.bcc.as_slice(), ["bcc@test.com"]);
    assert_eq!(message.reply_to.as_deref(), Some("reply@test.com"));
    assert_eq!(message.charset.as_deref(), Some("iso-8859-1"));
    assert_eq!(message.text.as_deref(), Some("Plain text body"));
    assert_eq!(message.html.as_deref(), Some("<p>HTML body</p>"));
    assert_eq!(message.attachments.len(), 1);
    assert_eq!(message.attachments[0].display_name(), "March.csv");
}

#[test]
fn test_only_last_recipient_call_survives() {
    let calls: [&[&str]; 3] = [
        &["a@test.com", "b@test.com"],
        &["c@test.com"],
        &["d@test.com", "e@test.com", "f@test.com"],
    ];

    let mut builder = MessageBuilder::new();
    for call in calls {
        builder.set_recipient(call.iter().copied());
    }

    let to = &builder.message().to;
    assert_eq!(to.len(), 3);
    for address in ["d@test.com", "e@test.com", "f@test.com"] {
        assert!(to.contains(address));
    }
    for address in ["a@test.com", "b@test.com", "c@test.com"] {
        assert!(!to.contains(address));
    }
}

#[test]
fn test_attachments_keep_call_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut builder = MessageBuilder::new();
    for i in 0..5 {
        let path = write_file(&dir, &format!("file-{}.txt", i), b"x");
        builder.add_attachment(path, None).unwrap();
    }

    let names: Vec<String> = builder
        .message()
        .attachments
        .iter()
        .map(|a| a.display_name())
        .collect();
    assert_eq!(
        names,
        ["file-0.txt", "file-1.txt", "file-2.txt", "file-3.txt", "file-4.txt"]
    );
}

#[test]
fn test_missing_attachment_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut builder = MessageBuilder::new();
    builder.set_recipient(["to@test.com"]);
    let before: Message = builder.message().clone();

    let err = builder
        .add_attachment(dir.path().join("does-not-exist.pdf"), None)
        .unwrap_err();

    match err {
        MailError::InvalidAttachment { ref path, .. } => {
            assert!(path.ends_with("does-not-exist.pdf"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(builder.message(), &before);
}

#[tokio::test]
async fn test_memory_mailer_receives_rendered_subject() {
    let mailer = MemoryMailer::new();

    let mut builder = MessageBuilder::new();
    builder
        .set_subject("Hello {}", &[&"World"])
        .set_recipient(["to@test.com"]);
    builder.send(&mailer).await.unwrap();

    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].rendered_subject().unwrap(), "Hello World");
}

#[tokio::test]
async fn test_format_error_surfaces_at_send() {
    let mailer = MemoryMailer::new();

    let mut builder = MessageBuilder::new();
    builder
        .set_subject("Unclosed {", &[&"x"])
        .set_recipient(["to@test.com"]);

    let err = builder.send(&mailer).await.unwrap_err();
    assert!(matches!(
        err,
        MailError::Format(FormatError::UnclosedPlaceholder { .. })
    ));
    assert!(mailer.is_empty().await);
}

#[tokio::test]
async fn test_message_without_recipients_is_rejected() {
    let mailer = ConsoleMailer::new();

    let mut builder = MessageBuilder::new();
    builder.set_subject("Nobody", &[]).set_recipient(Vec::<String>::new());

    let err = builder.send(&mailer).await.unwrap_err();
    assert!(matches!(err, MailError::MissingField("recipient")));
}

#[tokio::test]
async fn test_send_through_trait_object() {
    let memory = MemoryMailer::new();
    let mailer: Arc<dyn Mailer> = Arc::new(memory.clone());

    let mut builder = MessageBuilder::new();
    builder.set_recipient(["to@test.com"]).set_text("body");
    builder.send(mailer.as_ref()).await.unwrap();

    assert_eq!(memory.len().await, 1);
}

#[tokio::test]
async fn test_configured_console_mailer_sends() {
    let config = ConfigBuilder::new()
        .with_backend(MailerBackend::Console)
        .build()
        .unwrap();
    let mailer = mailer_from_config(&config).unwrap();

    let mut builder = MessageBuilder::new();
    builder
        .set_subject("Ping {}", &[&1])
        .set_recipient(["to@test.com"])
        .set_text("pong");

    assert!(builder.send(mailer.as_ref()).await.is_ok());
}
