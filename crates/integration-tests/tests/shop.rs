//! Browsing, cart and checkout through the storefront.

use bookstore_core::BookId;
use bookstore_integration_tests::TestApp;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

#[tokio::test]
async fn test_home_lists_catalog() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    for title in ["Python Basics", "Data Science", "Web Development", "Cyber Security"] {
        assert!(body.contains(title), "missing {title}");
    }
    assert!(body.contains("Rs.500.00"));
    assert!(body.contains("Cart (0)"));
}

#[tokio::test]
async fn test_search_is_case_insensitive_over_descriptions() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/search?q=VISUALIZATION").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Found 1 books:"));
    assert!(body.contains("Data Science"));
    assert!(!body.contains("Python Basics"));

    let (_, body) = app.get("/search?q=gardening").await;
    assert!(body.contains("No books found matching your search."));
}

#[tokio::test]
async fn test_purchase_decrements_stock_and_records_sale() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post_form("/cart/add", &[("book_id", "2"), ("quantity", "3")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("to cart"));
    assert!(body.contains(r#"<span class="cart-total">Rs.1200.00</span>"#));
    assert!(body.contains("Cart (3)"));

    let (status, body) = app
        .post_form("/checkout", &[("name", "Ann"), ("email", "a@x.com")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Thank you for your purchase!"));
    assert!(body.contains(r#"<span class="receipt-total">Rs.1200.00</span>"#));
    assert!(body.contains("Ann (a@x.com)"));

    let store = app.store().await;
    assert_eq!(store.catalog().find(BookId::new(2)).map(|b| b.stock), Some(2));
    assert_eq!(store.sales().len(), 1);
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn test_add_beyond_stock_is_rejected() {
    let app = TestApp::spawn().await;

    let (_, body) = app
        .post_form("/cart/add", &[("book_id", "5"), ("quantity", "5")])
        .await;
    assert!(body.contains("in stock (5 requested)"));
    assert!(body.contains("Your cart is empty"));

    let (_, body) = app
        .post_form("/cart/add", &[("book_id", "42"), ("quantity", "1")])
        .await;
    assert!(body.contains("Book 42 not found"));

    let (_, body) = app
        .post_form("/cart/add", &[("book_id", "1"), ("quantity", "0")])
        .await;
    assert!(body.contains("Quantity must be at least 1"));
    assert!(app.store().await.cart().is_empty());
}

#[tokio::test]
async fn test_remove_from_cart() {
    let app = TestApp::spawn().await;

    app.post_form("/cart/add", &[("book_id", "1"), ("quantity", "2")])
        .await;
    app.post_form("/cart/add", &[("book_id", "3"), ("quantity", "1")])
        .await;
    let (_, body) = app.post_form("/cart/remove", &[("book_id", "1")]).await;

    assert!(body.contains("Removed"));
    assert!(body.contains(r#"<span class="cart-total">Rs.300.00</span>"#));
    assert_eq!(app.store().await.cart().len(), 1);
}

#[tokio::test]
async fn test_checkout_requires_items_and_valid_details() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post_form("/checkout", &[("name", "Ann"), ("email", "a@x.com")])
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is empty"));

    app.post_form("/cart/add", &[("book_id", "1"), ("quantity", "1")])
        .await;
    let (status, body) = app
        .post_form("/checkout", &[("name", "Ann"), ("email", "not-an-email")])
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Invalid email"));

    let store = app.store().await;
    assert!(store.sales().is_empty());
    assert_eq!(store.catalog().find(BookId::new(1)).map(|b| b.stock), Some(10));
}
