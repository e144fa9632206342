use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockito::{Matcher, Server};
use recipe_finder::{DiscordWebhook, FinderError, Notifier, RecipeFinder, RecipeRecord};
use serde_json::json;

fn sample_recipe() -> RecipeRecord {
    RecipeRecord {
        id: "1110012345".to_string(),
        title: "とろとろなすの煮びたし".to_string(),
        url: "https://recipe.rakuten.co.jp/recipe/1110012345/".to_string(),
        image_url: "https://image.space.rakuten.co.jp/d/strg/ctrl/3/a.jpg".to_string(),
        description: "冷やしても美味しい".to_string(),
        cooking_time: "約15分".to_string(),
        cost: "100円以下".to_string(),
    }
}

#[tokio::test]
async fn test_webhook_receives_embed() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/webhooks/1/token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "embeds": [{
                "title": "とろとろなすの煮びたし",
                "url": "https://recipe.rakuten.co.jp/recipe/1110012345/",
                "image": {"url": "https://image.space.rakuten.co.jp/d/strg/ctrl/3/a.jpg"},
                "description": "今日の献立案です！",
                "color": 15548997
            }]
        })))
        .with_status(204)
        .create_async()
        .await;

    let webhook =
        DiscordWebhook::new(format!("{}/api/webhooks/1/token", server.url()), None).unwrap();
    webhook.notify(&sample_recipe()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_webhook_failure_is_non_fatal_notification_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/webhooks/1/token")
        .with_status(404)
        .with_body(r#"{"message": "Unknown Webhook", "code": 10015}"#)
        .create_async()
        .await;

    let finder = RecipeFinder::builder()
        .application_id("test-app-id")
        .webhook_url(format!("{}/api/webhooks/1/token", server.url()))
        .build()
        .unwrap();

    let err = finder.send(&sample_recipe()).await.unwrap_err();
    match &err {
        FinderError::Notification(message) => {
            assert!(message.contains("404"));
            assert!(message.contains("Unknown Webhook"));
        }
        other => panic!("Expected Notification error, got {:?}", other),
    }
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn test_unreachable_webhook_is_notification_error() {
    let webhook = DiscordWebhook::new("http://127.0.0.1:1/webhook".to_string(), None).unwrap();
    let err = webhook.notify(&sample_recipe()).await.unwrap_err();
    assert!(matches!(err, FinderError::Notification(_)));
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, recipe: &RecipeRecord) -> Result<(), FinderError> {
        self.sent.lock().unwrap().push(recipe.id.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_custom_notifier_replaces_webhook() {
    let notifier = RecordingNotifier::default();
    let sent = Arc::clone(&notifier.sent);

    let finder = RecipeFinder::builder()
        .application_id("test-app-id")
        .notifier(Box::new(notifier))
        .build()
        .unwrap();

    finder.send(&sample_recipe()).await.unwrap();
    assert_eq!(*sent.lock().unwrap(), vec!["1110012345".to_string()]);
}
