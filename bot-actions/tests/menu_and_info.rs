mod common;

use bot_actions::actions::{BotMessage, Tracker};
use bot_actions::{ActionRequest, ErrorCode};
use common::{RecordingNotifier, TestEnv};

const MENU: &str = r#"{
    "thali": [
        {"name": "Roti Thali", "price": 150, "description": "3 rotis, dal, sabzi"},
        {"name": "Rice Thali", "price": 140}
    ],
    "hot_beverages": [
        {"name": "Masala Chai", "price": 25}
    ]
}"#;

#[tokio::test]
async fn test_show_menu() {
    let env = TestEnv::new(RecordingNotifier::delivered());
    env.write_menu(MENU);

    let response = env.run("action_show_menu", Tracker::default()).await;

    assert_eq!(response.responses.len(), 3);
    assert_eq!(
        response.texts(),
        vec![
            "Thali:\n - Roti Thali — ₹150 (3 rotis, dal, sabzi)\n - Rice Thali — ₹140\n\nHot Beverages:\n - Masala Chai — ₹25",
            "You can ask for details or ask the price of any dish, e.g., 'price of Roti Thali'.",
        ]
    );

    let BotMessage::Custom { custom } = &response.responses[1] else {
        panic!("expected cards");
    };
    assert_eq!(custom["type"], "cards");
    let cards = custom["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[2]["category"], "hot_beverages");
    assert_eq!(cards[2]["buttons"][0]["payload"], r#"/ask_details{"dish_name":"Masala Chai"}"#);
}

#[tokio::test]
async fn test_show_menu_without_file() {
    let env = TestEnv::new(RecordingNotifier::delivered());

    let response = env.run("action_show_menu", Tracker::default()).await;

    assert_eq!(response.texts(), vec!["Sorry, the menu is not available right now."]);
    // operator-owned file is never created
    assert!(!env.menu_path().exists());
}

#[tokio::test]
async fn test_dish_details() {
    let env = TestEnv::new(RecordingNotifier::delivered());
    env.write_menu(MENU);

    let response = env
        .run("action_dish_details", Tracker::default().with_slot("dish_name", "chai"))
        .await;
    assert_eq!(
        response.texts(),
        vec!["Masala Chai — ₹25\nCategory: Hot Beverages"]
    );

    let response = env
        .run("action_dish_details", Tracker::default().with_slot("dish_name", "Biryani"))
        .await;
    assert_eq!(
        response.texts(),
        vec!["Sorry, I couldn't find 'Biryani' on our menu."]
    );

    let response = env.run("action_dish_details", Tracker::default()).await;
    assert_eq!(response.texts(), vec!["Which dish would you like to know about?"]);
}

#[tokio::test]
async fn test_location() {
    let env = TestEnv::new(RecordingNotifier::delivered());
    let response = env.run("action_location", Tracker::default()).await;

    let text = response.texts()[0];
    assert!(text.starts_with("Our address:\n"));
    assert!(text.contains("Open in Google Maps: https://"));
    assert!(text.contains("For directions or phone support call: "));
}

#[tokio::test]
async fn test_additional_info_uses_configured_hours() {
    let env = TestEnv::new(RecordingNotifier::delivered());
    let response = env.run("action_additional_info", Tracker::default()).await;

    let text = response.texts()[0];
    assert!(text.starts_with("Working hours: Daily 07:30 AM - 01:30 AM (next day)"));
    assert!(text.contains("Cancellation policy: No cancellation available."));
    assert!(text.contains("Payment: "));
    assert!(text.contains("Parking: "));
}

#[tokio::test]
async fn test_unknown_action() {
    let env = TestEnv::new(RecordingNotifier::delivered());
    let request = ActionRequest::new("action_order_item", Tracker::default());

    let err = bot_actions::dispatch(&env.state, &request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ActionNotFound);
}
