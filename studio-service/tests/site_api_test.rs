mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn json_of(response: reqwest::Response) -> Value {
    response.json().await.expect("Failed to parse JSON")
}

#[tokio::test]
async fn portfolio_crud_round_trip() {
    let app = TestApp::spawn().await;

    let response = app
        .admin_post(
            "/api/portfolio",
            &json!({"title": "Kente Co. rebrand", "category": "Logo Design"}),
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_of(response).await;
    assert_eq!(created["success"], true);
    let id = created["projectId"].as_str().unwrap().to_string();
    assert_eq!(created["project"]["id"], id.as_str());

    let response = app
        .admin_put(
            &format!("/api/portfolio/{}", id),
            &json!({"description": "Full identity refresh"}),
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_of(response).await;
    assert_eq!(updated["project"]["title"], "Kente Co. rebrand");
    assert_eq!(updated["project"]["description"], "Full identity refresh");

    let listed = json_of(app.get("/api/portfolio").send().await.unwrap()).await;
    assert_eq!(listed["projects"].as_array().unwrap().len(), 1);
    assert_eq!(listed["projects"][0], updated["project"]);

    let response = app
        .admin_delete(&format!("/api/portfolio/{}", id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let listed = json_of(app.get("/api/portfolio").send().await.unwrap()).await;
    assert_eq!(listed["projects"], json!([]));
}

#[tokio::test]
async fn updating_unknown_project_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .admin_put("/api/portfolio/does-not-exist", &json!({"title": "New"}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn portfolio_writes_require_admin_key() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/portfolio", &json!({"title": "Logo", "category": "Branding"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Missing title would be 422 for an admin.
    let response = app
        .post("/api/portfolio", &json!({"category": "Branding"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn testimonial_rating_out_of_range_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .admin_post(
            "/api/testimonials",
            &json!({"clientName": "Ama Mensah", "testimonial": "Superb", "rating": 6}),
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .admin_post(
            "/api/testimonials",
            &json!({
                "clientName": "Ama Mensah",
                "clientCompany": "Kente Co",
                "testimonial": "Superb",
                "rating": 5
            }),
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_of(response).await;
    let id = created["testimonialId"].as_str().unwrap().to_string();

    let listed = json_of(app.get("/api/testimonials").send().await.unwrap()).await;
    assert_eq!(listed["testimonials"].as_array().unwrap().len(), 1);
    assert_eq!(listed["testimonials"][0]["rating"], 5);

    let response = app
        .admin_delete(&format!("/api/testimonials/{}", id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let listed = json_of(app.get("/api/testimonials").send().await.unwrap()).await;
    assert_eq!(listed["testimonials"], json!([]));
}

#[tokio::test]
async fn content_defaults_until_replaced() {
    let app = TestApp::spawn().await;

    let initial = json_of(app.get("/api/content").send().await.unwrap()).await;
    assert_eq!(
        initial["content"]["hero"]["tagline"],
        "Visuals that speak. Brands that breathe."
    );

    let mut replacement = initial["content"].clone();
    replacement["hero"]["tagline"] = json!("Design for the bold");

    let response = app
        .put("/api/content", &replacement)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .admin_put("/api/content", &replacement)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let current = json_of(app.get("/api/content").send().await.unwrap()).await;
    assert_eq!(current["content"], replacement);
}

#[tokio::test]
async fn contact_form_validates_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/api/contact",
            &json!({"name": "Kofi", "email": "not-an-email", "message": "Hello"}),
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.store.is_empty().await);

    let response = app
        .post(
            "/api/contact",
            &json!({
                "name": "Kofi",
                "email": "kofi@example.com",
                "subject": "Logo quote",
                "message": "Hello"
            }),
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_of(response).await["success"], true);
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn tracked_page_views_show_in_stats() {
    let app = TestApp::spawn().await;

    for event in ["page_view", "page_view", "portfolio_click"] {
        let response = app
            .post("/api/analytics/track", &json!({"event": event, "data": {"page": "/"}}))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);
    }
    app.admin_post("/api/portfolio", &json!({"title": "Logo", "category": "Branding"}))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .get("/api/analytics/stats")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let stats = json_of(app.admin_get("/api/analytics/stats").send().await.unwrap()).await;
    assert_eq!(
        stats["stats"],
        json!({
            "totalProjects": 1,
            "totalInvoices": 0,
            "totalTestimonials": 0,
            "totalViews": 2
        })
    );
}
