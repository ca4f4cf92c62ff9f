use std::sync::Arc;

use orla_config::Config;
use orla_protocols::{ErrorTag, Message, MessageSender, ReplyToken, TabId};
use serde_json::Value;

use super::*;
use crate::test_support::MockBrowser;

fn start(browser: &Arc<MockBrowser>) -> (tokio::task::JoinHandle<()>, EventLoopHandle) {
    let coordinator = Coordinator::new(browser.services(), &Config::default());
    let (event_loop, handle) = EventLoop::new(coordinator, 16);
    (tokio::spawn(event_loop.run()), handle)
}

#[tokio::test]
async fn test_request_round_trip() {
    let browser = MockBrowser::new();
    browser.open(1, "https://example.com", "Example");
    let (task, handle) = start(&browser);

    let reply = handle
        .request(Message::RequestPageInfoFromContentScript)
        .await
        .unwrap();
    let info = reply.into_page_info().unwrap();
    assert_eq!(info.info.title, "Example");

    handle.shutdown();
    task.await.unwrap();
}

#[tokio::test]
async fn test_request_without_tab_still_answered() {
    let browser = MockBrowser::new();
    let (task, handle) = start(&browser);

    let reply = handle
        .request(Message::RequestPageTextFromContentScript)
        .await
        .unwrap();
    assert_eq!(reply.into_page_text().unwrap().error, Some(ErrorTag::NoActiveTab));

    handle.shutdown();
    task.await.unwrap();
}

#[tokio::test]
async fn test_unanswered_message_closes_channel() {
    let browser = MockBrowser::new();
    let (task, handle) = start(&browser);

    let err = handle.request(Message::PingContentScript).await.unwrap_err();
    assert_eq!(err, ChannelError::Closed);

    handle.shutdown();
    task.await.unwrap();
}

#[tokio::test]
async fn test_queued_events_finish_on_shutdown() {
    let browser = MockBrowser::new();
    let tab = browser.open(1, "https://example.com", "Example");
    let (task, handle) = start(&browser);

    handle
        .send(BackgroundEvent::ActionClicked(tab.clone()))
        .await
        .unwrap();
    handle.send(BackgroundEvent::Installed).await.unwrap();
    handle.shutdown();
    task.await.unwrap();

    assert_eq!(*browser.panels.lock(), vec![tab.id]);
    assert_eq!(browser.broadcasts().len(), 1);
    assert_eq!(
        browser.storage.lock().get("sidebarOpen"),
        Some(&Value::Bool(false))
    );
}

#[tokio::test]
async fn test_tab_events() {
    let browser = MockBrowser::new();
    let first = browser.open(1, "https://first.test", "First");
    let second = browser.open(2, "https://second.test", "Second");
    let (task, handle) = start(&browser);

    handle
        .send(BackgroundEvent::TabUpdated(second.clone()))
        .await
        .unwrap();
    handle
        .send(BackgroundEvent::TabActivated(first.id))
        .await
        .unwrap();
    handle.shutdown();
    task.await.unwrap();

    assert_eq!(browser.injection_count(), 2);
}

#[tokio::test]
async fn test_send_after_stop_fails() {
    let browser = MockBrowser::new();
    let (task, handle) = start(&browser);
    handle.shutdown();
    assert!(handle.is_shutdown());
    task.await.unwrap();

    let err = handle
        .send(BackgroundEvent::TabActivated(TabId(1)))
        .await
        .unwrap_err();
    assert_eq!(err, ChannelError::NoReceiver);
}

#[tokio::test]
async fn test_content_script_message_gets_no_reply() {
    let browser = MockBrowser::new();
    browser.open(1, "https://example.com", "Example");
    let (task, handle) = start(&browser);

    let (reply, pending) = ReplyToken::channel();
    handle
        .send(BackgroundEvent::Message {
            message: Message::GetPageText,
            sender: MessageSender::content_script(TabId(1)),
            reply,
        })
        .await
        .unwrap();
    assert_eq!(pending.recv().await.unwrap_err(), ChannelError::Closed);

    handle.shutdown();
    task.await.unwrap();
}

#[test]
fn test_event_names() {
    assert_eq!(BackgroundEvent::Installed.name(), "installed");
    assert_eq!(BackgroundEvent::TabActivated(TabId(3)).name(), "tab_activated");
    let (reply, _pending) = ReplyToken::channel();
    let event = BackgroundEvent::Message {
        message: Message::ToggleSidebar,
        sender: MessageSender::sidebar_ui(),
        reply,
    };
    assert_eq!(event.name(), "TOGGLE_SIDEBAR");
}
