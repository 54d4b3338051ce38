//! BDD step definitions for Telegram delivery

use std::sync::Arc;

use cucumber::{given, then, when};

use homework_watch::telegram::TelegramNotifier;

use crate::steps::cycle_steps::{ScriptedHttpClient, TelegramBehaviour, TELEGRAM_API};
use crate::world::WatchWorld;

async fn notifier_with(world: &mut WatchWorld, chat_id: &str, behaviour: TelegramBehaviour) {
    let http = Arc::new(ScriptedHttpClient::default());
    *http.telegram.write().await = behaviour;
    let notifier = TelegramNotifier::new(TELEGRAM_API, "bot-token", chat_id, http.clone());
    world.notifier = Some(Box::new(notifier));
    world.http = Some(http);
}

#[given(expr = "a Telegram notifier for chat {string}")]
async fn telegram_notifier(world: &mut WatchWorld, chat_id: String) {
    notifier_with(world, &chat_id, TelegramBehaviour::Ok).await;
}

#[given(expr = "a Telegram notifier that returns HTTP {int}")]
async fn telegram_notifier_status(world: &mut WatchWorld, status: u16) {
    notifier_with(world, "42", TelegramBehaviour::Status(status)).await;
}

#[given("a Telegram notifier that is unreachable")]
async fn telegram_notifier_unreachable(world: &mut WatchWorld) {
    notifier_with(world, "42", TelegramBehaviour::Unreachable).await;
}

#[when(expr = "the message {string} is sent")]
async fn message_sent(world: &mut WatchWorld, message: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    world.notification_result = Some(notifier.notify(&message).await);
}

#[then("the delivery should succeed")]
fn delivery_succeeds(world: &mut WatchWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    assert!(result.is_ok(), "{:?}", result);
}

#[then("the delivery should fail")]
fn delivery_fails(world: &mut WatchWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    assert!(result.is_err());
}

#[then(expr = "chat {string} should have received {string}")]
async fn chat_received(world: &mut WatchWorld, chat_id: String, text: String) {
    let http = world.http.as_ref().expect("no HTTP client");
    let posts = http.recorded("POST").await;
    assert!(
        posts
            .iter()
            .any(|p| p.param("chat_id") == Some(chat_id.as_str())
                && p.param("text") == Some(text.as_str())),
        "recorded: {:?}",
        posts
    );
}
