//! Demonstrates the dedup layers with an in-memory store and notifier.
//!
//! Run with: cargo run -p notify-worker --example dedup_demo

use database::Database;
use mock_analyzer::RecordingNotifier;
use notify_worker::{DispatcherConfig, NotificationDispatcher};
use sorucoz_core::PushPayload;

fn coach_message(message_id: &str, conversation_id: &str, body: &str) -> PushPayload {
    PushPayload::CoachMessage {
        message_id: Some(message_id.to_string()),
        conversation_id: Some(conversation_id.to_string()),
        title: "Koçunuzdan mesaj".to_string(),
        body: body.to_string(),
        icon: None,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let db = Database::connect("sqlite::memory:").await?;
    db.migrate().await?;

    let dispatcher =
        NotificationDispatcher::new(RecordingNotifier::new(), db, DispatcherConfig::default());

    // The same message delivered twice, then two more for one conversation.
    let deliveries = vec![
        coach_message("m1", "c1", "Merhaba!"),
        coach_message("m1", "c1", "Merhaba!"),
        coach_message("m2", "c1", "Soru çözümünü gönderdim."),
        coach_message("m3", "c2", "Yarın görüşelim."),
    ];

    for payload in deliveries {
        let outcome = dispatcher.dispatch(payload).await;
        println!("-> {:?}", outcome);
    }

    let visible = dispatcher.notifier().visible().await;
    println!();
    println!("Visible notifications: {}", visible.len());
    for n in visible {
        println!("  [{}] {:?}: {}", n.handle, n.display.tag, n.display.body);
    }

    Ok(())
}
