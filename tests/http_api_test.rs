//! Tests for the HTTP routes, driven in-process.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use minigames::{GameTable, Role, router};
use tower::ServiceExt;

async fn get(app: &Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, String) {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn token_from(body: &str) -> String {
    body.lines()
        .find_map(|line| line.strip_prefix("Token: "))
        .expect("join response carries a token")
        .to_string()
}

async fn join(app: &Router, name: &str) -> String {
    let (status, body) = get(app, &format!("/join/{name}"), &[]).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    token_from(&body)
}

async fn play(app: &Router, player: &str, token: &str, cell: &str) -> (StatusCode, String) {
    get(
        app,
        &format!("/move/{cell}"),
        &[("Player", player), ("Authorization", token)],
    )
    .await
}

#[tokio::test]
async fn test_join_welcomes_player() {
    let app = router(GameTable::new());
    let (status, body) = get(&app, "/join/Alice", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Server received join request, welcome Alice"));
    assert!(body.contains("Role: A"));
    assert!(!token_from(&body).is_empty());
}

#[tokio::test]
async fn test_join_errors() {
    let app = router(GameTable::new());

    let (status, _) = get(&app, "/join/", &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    join(&app, "Alice").await;
    let (status, body) = get(&app, "/join/Alice", &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "Player already joined");

    join(&app, "Bob").await;
    let (status, body) = get(&app, "/join/Carol", &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Lobby is full");
}

#[tokio::test]
async fn test_join_by_query_parameter() {
    let app = router(GameTable::new());
    let (status, body) = get(&app, "/join/?player=Alice", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("welcome Alice"));
}

#[tokio::test]
async fn test_full_game_alice_wins() {
    let table = GameTable::new();
    let app = router(table.clone());
    let alice = join(&app, "Alice").await;
    let bob = join(&app, "Bob").await;

    for (player, token, cell) in [
        ("Alice", &alice, "0"),
        ("Bob", &bob, "3"),
        ("Alice", &alice, "1"),
        ("Bob", &bob, "4"),
    ] {
        let (status, body) = play(&app, player, token, cell).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert!(body.starts_with("Server received move request."));
        assert!(body.contains("│ TIC │ TAC │ TOE │"));
    }

    let (status, body) = play(&app, "Alice", &alice, "2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("3 in a row! Alice wins."), "{body}");
    assert!(body.contains("│ A   │ A   │ A   │"));

    assert_eq!(table.snapshot().winner_name(), Some("Alice"));

    let (status, _) = play(&app, "Bob", &bob, "5").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_full_game_ends_in_draw() {
    let table = GameTable::new();
    let app = router(table.clone());
    let alice = join(&app, "Alice").await;
    let bob = join(&app, "Bob").await;

    // A B A / A B B / B A A
    let cells = ["0", "1", "2", "4", "3", "5", "7", "6"];
    for (turn, cell) in cells.into_iter().enumerate() {
        let (player, token) = if turn % 2 == 0 { ("Alice", &alice) } else { ("Bob", &bob) };
        let (status, body) = play(&app, player, token, cell).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert!(body.starts_with("Server received move request."), "{body}");
    }

    let (status, body) = play(&app, "Alice", &alice, "8").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body.starts_with("Board is full, it's a draw. Sending board state:\n\n"),
        "{body}"
    );
    assert!(body.contains("│ B   │ A   │ A   │"));
    assert_eq!(*table.snapshot().status(), minigames::GameStatus::Draw);

    let (status, body) = play(&app, "Bob", &bob, "4").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "game is already over");

    let (_, body) = get(&app, "/board/", &[]).await;
    assert!(body.starts_with("Phase: drawn\n"), "{body}");
}

#[tokio::test]
async fn test_move_to_claimed_cell_conflicts() {
    let table = GameTable::new();
    let app = router(table.clone());
    let alice = join(&app, "Alice").await;
    let bob = join(&app, "Bob").await;
    play(&app, "Alice", &alice, "4").await;

    let (status, body) = play(&app, "Bob", &bob, "4").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "cell 4 (center) is already claimed");
    assert_eq!(*table.snapshot().to_move(), Role::B);
}

#[tokio::test]
async fn test_move_out_of_range() {
    let app = router(GameTable::new());
    let alice = join(&app, "Alice").await;
    let (status, _) = play(&app, "Alice", &alice, "9").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = play(&app, "Alice", &alice, "abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_move_by_unknown_player_unauthorized() {
    let app = router(GameTable::new());
    join(&app, "Alice").await;
    let (status, body) = play(&app, "Mallory", "123", "0").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "Unauthorized");

    let (status, _) = get(&app, "/move/0", &[]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_move_out_of_turn_unauthorized() {
    let app = router(GameTable::new());
    join(&app, "Alice").await;
    let bob = join(&app, "Bob").await;
    let (status, body) = play(&app, "Bob", &bob, "4").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "It is not your turn");
}

#[tokio::test]
async fn test_bearer_token_accepted() {
    let app = router(GameTable::new());
    let alice = join(&app, "Alice").await;
    let (status, _) = play(&app, "Alice", &format!("Bearer {alice}"), "4").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_move_by_query_parameter() {
    let app = router(GameTable::new());
    let alice = join(&app, "Alice").await;
    let (status, _) = get(
        &app,
        "/move/?position=4",
        &[("Player", "Alice"), ("Authorization", alice.as_str())],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_reset_clears_board_keeps_players() {
    let table = GameTable::new();
    let app = router(table.clone());
    let alice = join(&app, "Alice").await;
    join(&app, "Bob").await;
    play(&app, "Alice", &alice, "4").await;

    let (status, body) = get(&app, "/reset/", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Server received reset request. Resetting game.");

    let snapshot = table.snapshot();
    assert_eq!(*snapshot.to_move(), Role::A);
    assert_eq!(snapshot.seats().len(), 2);
    assert_eq!(snapshot.board(), &minigames::Board::new());
}

#[tokio::test]
async fn test_board_query() {
    let app = router(GameTable::new());
    let (status, body) = get(&app, "/board/", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Phase: lobby\nTurn: A\nPlayers: (none)\n"));

    join(&app, "Alice").await;
    join(&app, "Bob").await;
    let (_, body) = get(&app, "/board", &[]).await;
    assert!(body.contains("Players: Alice (A), Bob (B)"));
    assert!(body.contains("Phase: in play"));
}
