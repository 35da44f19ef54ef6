//! API integration tests
//!
//! These run against a live server with a fresh database:
//! `cargo run` in one shell, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000/api";

/// Register a throwaway student and return (token, roll_no)
async fn register_student(client: &Client, tag: &str) -> (String, String) {
    let roll_no = format!("STU-{}", tag);
    let response = client
        .post(format!("{}/students/register", BASE_URL))
        .json(&json!({
            "roll_no": roll_no,
            "first_name": "Test",
            "last_name": "Student",
            "email": format!("{}@students.example.com", tag),
            "phone": "9876543210",
            "birthdate": "2000-01-01",
            "password": "student123"
        }))
        .send()
        .await
        .expect("Failed to send registration request");

    assert_eq!(response.status(), 201, "student registration failed");
    let body: Value = response.json().await.expect("Failed to parse registration response");
    (
        body["token"].as_str().expect("No token in response").to_string(),
        roll_no,
    )
}

/// Register a throwaway librarian and return its token
async fn register_librarian(client: &Client, tag: &str) -> String {
    let response = client
        .post(format!("{}/librarians/register", BASE_URL))
        .json(&json!({
            "employee_id": format!("EID-{}", tag),
            "name": "Test Librarian",
            "email": format!("{}@staff.example.com", tag),
            "phone": "9991112222",
            "birthdate": "1985-06-10",
            "employment_date": "2020-01-01",
            "shift": "9am-5pm",
            "password": "lib123456"
        }))
        .send()
        .await
        .expect("Failed to send registration request");

    assert_eq!(response.status(), 201, "librarian registration failed");
    let body: Value = response.json().await.expect("Failed to parse registration response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Create a book as a librarian; returns the book id
async fn create_book(client: &Client, librarian_token: &str, isbn: &str, copies: i32) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", librarian_token))
        .json(&json!({
            "isbn": isbn,
            "title": format!("Test Book {}", isbn),
            "genre": "Testing",
            "total_copies": copies
        }))
        .send()
        .await
        .expect("Failed to send create-book request");

    assert_eq!(response.status(), 201, "book creation failed");
    let body: Value = response.json().await.expect("Failed to parse create-book response");
    body["id"].as_i64().expect("No book id")
}

/// Fetch a book's row from the public listing
async fn fetch_book(client: &Client, book_id: i64) -> Value {
    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to list books");
    let body: Value = response.json().await.expect("Failed to parse book list");
    body.as_array()
        .expect("book list is not an array")
        .iter()
        .find(|b| b["id"].as_i64() == Some(book_id))
        .cloned()
        .expect("book not found in listing")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get("http://localhost:3000/api/health")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/login", BASE_URL))
        .json(&json!({
            "email": "nobody@example.com",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_reserve_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .json(&json!({"book_id": 1}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_student_cannot_create_books() {
    let client = Client::new();
    let (token, _) = register_student(&client, "role-gate").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "isbn": "9999999999999",
            "title": "Forbidden",
            "total_copies": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_registration_validation_reports_fields() {
    let client = Client::new();

    let response = client
        .post(format!("{}/students/register", BASE_URL))
        .json(&json!({
            "roll_no": "STU-bad",
            "first_name": "Bad",
            "last_name": "Input",
            "email": "not-an-email",
            "phone": "9876543210",
            "birthdate": "2000-01-01",
            "password": "short"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["errors"].as_array().expect("no errors array");
    let fields: Vec<&str> = errors.iter().filter_map(|e| e["field"].as_str()).collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
#[ignore]
async fn test_reserve_and_return_round_trip() {
    let client = Client::new();
    let librarian = register_librarian(&client, "roundtrip-lib").await;
    let (student, _) = register_student(&client, "roundtrip-stu").await;
    let book_id = create_book(&client, &librarian, "9780451524935", 1).await;

    let before = fetch_book(&client, book_id).await;
    assert_eq!(before["available_copies"], 1);

    // Reserve: available drops to 0
    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .json(&json!({"book_id": book_id}))
        .send()
        .await
        .expect("Failed to reserve");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse reserve response");
    let reservation_id = body["reservation_id"].as_i64().expect("No reservation id");

    let reserved = fetch_book(&client, book_id).await;
    assert_eq!(reserved["available_copies"], 0);
    assert_eq!(reserved["total_copies"], 1);

    // A second reserve on the same exhausted book fails, counters unchanged
    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .json(&json!({"book_id": book_id}))
        .send()
        .await
        .expect("Failed to reserve");
    assert_eq!(response.status(), 400);
    assert_eq!(fetch_book(&client, book_id).await["available_copies"], 0);

    // Return: available back to 1, reservation gone
    let response = client
        .post(format!("{}/reservations/return", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .json(&json!({"reservation_id": reservation_id}))
        .send()
        .await
        .expect("Failed to return");
    assert_eq!(response.status(), 200);

    let returned = fetch_book(&client, book_id).await;
    assert_eq!(returned["available_copies"], 1);

    let response = client
        .get(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to list reservations");
    let body: Value = response.json().await.expect("Failed to parse reservations");
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["id"].as_i64() != Some(reservation_id)));

    // Issued-count round-trips back to its pre-reserve value
    let response = client
        .get(format!("{}/students/profile", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to fetch profile");
    let profile: Value = response.json().await.expect("Failed to parse profile");
    assert_eq!(profile["total_books_issued"], 0);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_reserves_never_overdraw() {
    let client = Client::new();
    let librarian = register_librarian(&client, "race-lib").await;
    let (a, _) = register_student(&client, "race-a").await;
    let (b, _) = register_student(&client, "race-b").await;
    let book_id = create_book(&client, &librarian, "9780439554930", 1).await;

    let reserve = |token: String| {
        let client = client.clone();
        async move {
            client
                .post(format!("{}/reservations", BASE_URL))
                .header("Authorization", format!("Bearer {}", token))
                .json(&json!({"book_id": book_id}))
                .send()
                .await
                .expect("Failed to reserve")
                .status()
        }
    };

    let (first, second) = tokio::join!(reserve(a), reserve(b));

    let outcomes = [first.as_u16(), second.as_u16()];
    assert!(
        outcomes.contains(&201) && outcomes.contains(&400),
        "expected exactly one success and one rejection, got {:?}",
        outcomes
    );

    let book = fetch_book(&client, book_id).await;
    assert_eq!(book["available_copies"], 0);
}

#[tokio::test]
#[ignore]
async fn test_fine_lifecycle() {
    let client = Client::new();
    let librarian = register_librarian(&client, "fine-lib").await;
    let (student, roll_no) = register_student(&client, "fine-stu").await;

    // Issue by roll number
    let response = client
        .post(format!("{}/fines", BASE_URL))
        .header("Authorization", format!("Bearer {}", librarian))
        .json(&json!({
            "roll_no": roll_no,
            "amount": "5.00",
            "reason": "Late return"
        }))
        .send()
        .await
        .expect("Failed to issue fine");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse fine response");
    let fine_id = body["fine_id"].as_i64().expect("No fine id");

    // Listed as unpaid
    let response = client
        .get(format!("{}/fines", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to list fines");
    let fines: Value = response.json().await.expect("Failed to parse fines");
    let mine = fines
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["id"].as_i64() == Some(fine_id))
        .expect("fine not listed");
    assert_eq!(mine["payment_status"], "unpaid");
    assert!(mine["paid_at"].is_null());

    // Pay it
    let response = client
        .post(format!("{}/fines/pay", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .json(&json!({"fine_id": fine_id}))
        .send()
        .await
        .expect("Failed to pay fine");
    assert_eq!(response.status(), 200);

    // Paying again is rejected, not repeated
    let response = client
        .post(format!("{}/fines/pay", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .json(&json!({"fine_id": fine_id}))
        .send()
        .await
        .expect("Failed to re-pay fine");
    assert_eq!(response.status(), 409);

    // Still listed, now paid with a timestamp
    let response = client
        .get(format!("{}/fines", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to list fines");
    let fines: Value = response.json().await.expect("Failed to parse fines");
    let mine = fines
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["id"].as_i64() == Some(fine_id))
        .expect("paid fine disappeared from listing");
    assert_eq!(mine["payment_status"], "paid");
    assert!(mine["paid_at"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_soft_deleted_fine_is_hidden_but_retained() {
    let client = Client::new();
    let librarian = register_librarian(&client, "softdel-lib").await;
    let (student, roll_no) = register_student(&client, "softdel-stu").await;

    let response = client
        .post(format!("{}/fines", BASE_URL))
        .header("Authorization", format!("Bearer {}", librarian))
        .json(&json!({"roll_no": roll_no, "amount": "10.00", "reason": "Damaged book"}))
        .send()
        .await
        .expect("Failed to issue fine");
    let fine_id = response.json::<Value>().await.unwrap()["fine_id"]
        .as_i64()
        .expect("No fine id");

    let response = client
        .delete(format!("{}/fines/{}", BASE_URL, fine_id))
        .header("Authorization", format!("Bearer {}", librarian))
        .send()
        .await
        .expect("Failed to delete fine");
    assert_eq!(response.status(), 200);

    // Hidden from the student's default listing
    let fines: Value = client
        .get(format!("{}/fines", BASE_URL))
        .header("Authorization", format!("Bearer {}", student))
        .send()
        .await
        .expect("Failed to list fines")
        .json()
        .await
        .unwrap();
    assert!(fines
        .as_array()
        .unwrap()
        .iter()
        .all(|f| f["id"].as_i64() != Some(fine_id)));

    // Present when the librarian asks for history
    let fines: Value = client
        .get(format!("{}/fines/all?include_deleted=true", BASE_URL))
        .header("Authorization", format!("Bearer {}", librarian))
        .send()
        .await
        .expect("Failed to list all fines")
        .json()
        .await
        .unwrap();
    let entry = fines
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["id"].as_i64() == Some(fine_id))
        .expect("soft-deleted fine missing from history listing");
    assert!(entry["deleted_at"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_admin_delete_missing_reservation_is_404() {
    let client = Client::new();
    let librarian = register_librarian(&client, "admdel-lib").await;

    let response = client
        .delete(format!("{}/reservations/999999999", BASE_URL))
        .header("Authorization", format!("Bearer {}", librarian))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_gd_booking_rejects_overlap() {
    let client = Client::new();
    let librarian = register_librarian(&client, "gd-lib").await;
    let (a, _) = register_student(&client, "gd-a").await;
    let (b, _) = register_student(&client, "gd-b").await;

    let response = client
        .post(format!("{}/gd/rooms", BASE_URL))
        .header("Authorization", format!("Bearer {}", librarian))
        .json(&json!({"name": "Test GD Room", "capacity": 6}))
        .send()
        .await
        .expect("Failed to create room");
    assert_eq!(response.status(), 201);
    let room_id = response.json::<Value>().await.unwrap()["room_id"]
        .as_i64()
        .expect("No room id");

    let response = client
        .post(format!("{}/gd", BASE_URL))
        .header("Authorization", format!("Bearer {}", a))
        .json(&json!({
            "room_id": room_id,
            "start_time": "2099-01-01T10:00:00Z",
            "duration_minutes": 60
        }))
        .send()
        .await
        .expect("Failed to book room");
    assert_eq!(response.status(), 201);

    // Overlapping window on the same room is rejected
    let response = client
        .post(format!("{}/gd", BASE_URL))
        .header("Authorization", format!("Bearer {}", b))
        .json(&json!({
            "room_id": room_id,
            "start_time": "2099-01-01T10:30:00Z",
            "duration_minutes": 60
        }))
        .send()
        .await
        .expect("Failed to book room");
    assert_eq!(response.status(), 409);

    // A later slot is fine
    let response = client
        .post(format!("{}/gd", BASE_URL))
        .header("Authorization", format!("Bearer {}", b))
        .json(&json!({
            "room_id": room_id,
            "start_time": "2099-01-01T11:00:00Z",
            "duration_minutes": 30
        }))
        .send()
        .await
        .expect("Failed to book room");
    assert_eq!(response.status(), 201);
}
