//! End-to-end dispatcher tests against an in-process WebSocket server
//! standing in for the scheduling server.

use std::future::Future;
use std::time::Duration;

use assert_matches::assert_matches;
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use shiftboard_core::calendar::ViewGranularity;
use shiftboard_core::filters::ScheduleFilters;
use shiftboard_dispatch::reconnect::ReconnectConfig;
use shiftboard_dispatch::{BoardEvent, CommandDispatcher, DispatchConfig, DispatchError};
use shiftboard_protocol::command::{AssignWorker, FetchSchedule};
use shiftboard_protocol::{Command, OpCode, SchedulePayload};

type ServerSocket = WebSocketStream<TcpStream>;

/// Bind a throwaway local WebSocket server; each accepted connection is
/// handed to a fresh invocation of `handler`.
async fn spawn_server<H, Fut>(handler: H) -> String
where
    H: Fn(ServerSocket) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let socket = tokio_tungstenite::accept_async(stream).await.unwrap();
            handler(socket).await;
        }
    });
    format!("ws://{addr}/")
}

fn start_dispatcher(ws_url: &str) -> std::sync::Arc<CommandDispatcher> {
    let mut config = DispatchConfig::new(ws_url);
    config.command_timeout = Duration::from_millis(500);
    config.reconnect = ReconnectConfig {
        initial_delay: Duration::from_millis(20),
        max_delay: Duration::from_millis(100),
        multiplier: 2.0,
    };
    CommandDispatcher::start(config)
}

async fn wait_connected(dispatcher: &CommandDispatcher) {
    for _ in 0..200 {
        if dispatcher.is_connected().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("dispatcher never connected");
}

fn fetch_command() -> Command {
    Command::FetchSchedule(FetchSchedule {
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
        end_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        view_type: ViewGranularity::Week,
        filters: ScheduleFilters::default(),
    })
}

fn assign_command() -> Command {
    Command::AssignWorker(AssignWorker {
        shift_id: 31,
        worker_id: 7,
        role_assigned: shiftboard_core::roles::Role::Stagehand,
    })
}

/// Read the next text frame and return its parsed JSON.
async fn next_request(socket: &mut ServerSocket) -> serde_json::Value {
    loop {
        match socket.next().await {
            Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
            Some(Ok(_)) => continue,
            other => panic!("server expected a text frame, got {other:?}"),
        }
    }
}

async fn send_json(socket: &mut ServerSocket, value: serde_json::Value) {
    socket
        .send(Message::Text(value.to_string()))
        .await
        .unwrap();
}

#[tokio::test]
async fn fetch_round_trips_through_the_channel() {
    let url = spawn_server(|mut socket| async move {
        let request = next_request(&mut socket).await;
        assert_eq!(request["request_id"], 2001);
        assert_eq!(request["data"]["view_type"], "week");
        send_json(
            &mut socket,
            serde_json::json!({
                "request_id": 2001,
                "success": true,
                "data": {"shifts": [{"id": 4, "shift_start_datetime": "2024-03-04T09:00:00"}]}
            }),
        )
        .await;
    })
    .await;

    let dispatcher = start_dispatcher(&url);
    wait_connected(&dispatcher).await;

    let envelope = dispatcher.dispatch(&fetch_command()).await.unwrap();
    let payload: SchedulePayload = envelope.data_as().unwrap();
    assert_eq!(payload.shifts.len(), 1);
    assert_eq!(payload.shifts[0].id, Some(4));

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn rejected_response_carries_server_text_verbatim() {
    let url = spawn_server(|mut socket| async move {
        let request = next_request(&mut socket).await;
        send_json(
            &mut socket,
            serde_json::json!({
                "request_id": request["request_id"],
                "success": false,
                "error": "Shift is locked by another manager"
            }),
        )
        .await;
    })
    .await;

    let dispatcher = start_dispatcher(&url);
    wait_connected(&dispatcher).await;

    let result = dispatcher.dispatch(&assign_command()).await;
    assert_matches!(result, Err(DispatchError::Rejected(text)) => {
        assert_eq!(text, "Shift is locked by another manager");
    });

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn dispatch_while_disconnected_fails_immediately() {
    // Nothing listens on this port; the dispatcher stays in its
    // reconnect loop and the channel never opens.
    let dispatcher = start_dispatcher("ws://127.0.0.1:9");

    let started = std::time::Instant::now();
    let result = dispatcher.dispatch(&fetch_command()).await;
    assert_matches!(result, Err(DispatchError::NotConnected));
    // Rejected locally, not after a network timeout.
    assert!(started.elapsed() < Duration::from_millis(200));

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn timeout_clears_the_slot_for_the_next_command() {
    let url = spawn_server(|mut socket| async move {
        // Swallow the first request entirely, answer the second.
        let _ = next_request(&mut socket).await;
        let request = next_request(&mut socket).await;
        send_json(
            &mut socket,
            serde_json::json!({"request_id": request["request_id"], "success": true, "data": {}}),
        )
        .await;
    })
    .await;

    let dispatcher = start_dispatcher(&url);
    wait_connected(&dispatcher).await;

    let first = dispatcher.dispatch(&fetch_command()).await;
    assert_matches!(first, Err(DispatchError::Timeout(OpCode::FetchSchedule)));

    let second = dispatcher.dispatch(&fetch_command()).await;
    assert!(second.is_ok(), "slot should be free after the timeout");

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn newer_command_supersedes_the_same_code() {
    let url = spawn_server(|mut socket| async move {
        // Two requests with the same code arrive; only the second is
        // answered.
        let _ = next_request(&mut socket).await;
        let request = next_request(&mut socket).await;
        send_json(
            &mut socket,
            serde_json::json!({"request_id": request["request_id"], "success": true, "data": {}}),
        )
        .await;
    })
    .await;

    let dispatcher = start_dispatcher(&url);
    wait_connected(&dispatcher).await;

    let racing = {
        let dispatcher = std::sync::Arc::clone(&dispatcher);
        tokio::spawn(async move { dispatcher.dispatch(&fetch_command()).await })
    };
    // Let the first dispatch register its slot before the second fires.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let second = dispatcher.dispatch(&fetch_command()).await;
    assert!(second.is_ok());

    let first = racing.await.unwrap();
    assert_matches!(first, Err(DispatchError::Superseded(OpCode::FetchSchedule)));

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn unknown_code_and_malformed_frames_are_dropped() {
    let url = spawn_server(|mut socket| async move {
        let request = next_request(&mut socket).await;
        // Noise first: an unknown operation code and a non-JSON frame.
        send_json(
            &mut socket,
            serde_json::json!({"request_id": 9999, "success": true}),
        )
        .await;
        socket
            .send(Message::Text("definitely not json".to_string()))
            .await
            .unwrap();
        // Then the real answer.
        send_json(
            &mut socket,
            serde_json::json!({"request_id": request["request_id"], "success": true, "data": {}}),
        )
        .await;
        // Hold the channel open like a real server; it closes when the
        // client disconnects during shutdown.
        let _ = socket.next().await;
    })
    .await;

    let dispatcher = start_dispatcher(&url);
    wait_connected(&dispatcher).await;

    let result = dispatcher.dispatch(&fetch_command()).await;
    assert!(result.is_ok(), "noise frames must not break correlation");
    assert!(dispatcher.is_connected().await);

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn dropped_connection_fails_outstanding_commands_and_reconnects() {
    let url = spawn_server(|mut socket| async move {
        // Close as soon as the first request arrives. Later connections
        // answer normally.
        match next_request(&mut socket).await["request_id"].as_u64() {
            Some(2001) => { /* drop the socket */ }
            other => panic!("unexpected request {other:?}"),
        }
    })
    .await;

    let dispatcher = start_dispatcher(&url);
    wait_connected(&dispatcher).await;
    let mut events = dispatcher.subscribe();

    let result = dispatcher.dispatch(&fetch_command()).await;
    assert_matches!(
        result,
        Err(DispatchError::ConnectionClosed) | Err(DispatchError::Timeout(_))
    );

    // ChannelDown fires, then the loop reconnects to the same server.
    loop {
        match events.recv().await.unwrap() {
            BoardEvent::ChannelDown => break,
            _ => continue,
        }
    }
    wait_connected(&dispatcher).await;

    dispatcher.shutdown().await;
}
