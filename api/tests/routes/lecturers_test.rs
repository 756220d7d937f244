#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use serial_test::serial;

    use crate::helpers::{admin_token, lecturer_token, make_test_app, send, submission_payload};

    fn lecturer_body(email: &str) -> serde_json::Value {
        json!({ "name": "Dr. Rao", "email": email, "password": "secret1" })
    }

    /// Test Case: Admin creates a lecturer; a second account with the same email conflicts
    #[tokio::test]
    #[serial]
    async fn test_create_lecturer_and_duplicate() {
        let app = make_test_app().await;
        let token = admin_token(&app.state);

        let (status, json) = send(
            &app.router,
            Method::POST,
            "/api/lecturers",
            Some(&token),
            Some(lecturer_body("Rao@College.edu")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["email"], "rao@college.edu");
        assert!(json["data"].get("password_hash").is_none());

        let (status, json) = send(
            &app.router,
            Method::POST,
            "/api/lecturers",
            Some(&token),
            Some(lecturer_body("rao@college.edu")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "A lecturer with this email already exists");
    }

    #[tokio::test]
    #[serial]
    async fn test_create_lecturer_short_password() {
        let app = make_test_app().await;
        let token = admin_token(&app.state);
        let body = json!({ "name": "Dr. Rao", "email": "rao@college.edu", "password": "123" });

        let (status, json) =
            send(&app.router, Method::POST, "/api/lecturers", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("Password"));
    }

    /// Test Case: Lecturer routes are admin-only
    #[tokio::test]
    #[serial]
    async fn test_lecturers_require_admin() {
        let app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;

        let (status, _) = send(&app.router, Method::GET, "/api/lecturers", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = lecturer_token(&app.state, lecturer.id);
        let (status, json) =
            send(&app.router, Method::GET, "/api/lecturers", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Admin access required");
    }

    #[tokio::test]
    #[serial]
    async fn test_list_lecturers() {
        let app = make_test_app().await;
        app.create_lecturer("rao@college.edu").await;
        app.create_lecturer("iyer@college.edu").await;
        let token = admin_token(&app.state);

        let (status, json) =
            send(&app.router, Method::GET, "/api/lecturers", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        let lecturers = json["data"].as_array().unwrap();
        assert_eq!(lecturers.len(), 2);
        assert_eq!(lecturers[0]["email"], "rao@college.edu");
    }

    /// Test Case: Stats count submissions per reporting lecturer
    #[tokio::test]
    #[serial]
    async fn test_lecturer_stats() {
        let app = make_test_app().await;
        let rao = app.create_lecturer("rao@college.edu").await;
        let iyer = app.create_lecturer("iyer@college.edu").await;

        let rao_token = lecturer_token(&app.state, rao.id);
        for subject in ["Maths", "Physics"] {
            let (status, _) = send(
                &app.router,
                Method::POST,
                "/api/submissions",
                Some(&rao_token),
                Some(submission_payload("21CS001", subject, 60)),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let iyer_token = lecturer_token(&app.state, iyer.id);
        send(
            &app.router,
            Method::POST,
            "/api/submissions",
            Some(&iyer_token),
            Some(submission_payload("21CS002", "Maths", 70)),
        )
        .await;

        let token = admin_token(&app.state);
        let (status, json) =
            send(&app.router, Method::GET, "/api/lecturers/stats", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let stats = json["data"].as_array().unwrap();
        let count_for = |id: i64| {
            stats
                .iter()
                .find(|s| s["lecturer_id"] == id)
                .map(|s| s["submissions"].as_i64().unwrap())
        };
        assert_eq!(count_for(rao.id), Some(2));
        assert_eq!(count_for(iyer.id), Some(1));
        assert!(stats.iter().all(|s| s["name"] == "Dr. Rao"));
    }
}
