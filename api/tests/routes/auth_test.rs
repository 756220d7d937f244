#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use serial_test::serial;

    use crate::helpers::app::{ADMIN_PASSWORD, ADMIN_USERNAME};
    use crate::helpers::{make_test_app, send};

    /// Test Case: Administrator logs in with the configured credentials
    #[tokio::test]
    #[serial]
    async fn test_admin_login_success() {
        let app = make_test_app().await;
        let body = json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD });

        let (status, json) =
            send(&app.router, Method::POST, "/api/auth/admin/login", None, Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["role"], "admin");
        assert!(json["data"]["token"].as_str().is_some());
        assert!(json["data"]["expires_at"].as_str().is_some());
        assert!(json["data"].get("lecturer").is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_admin_login_wrong_password() {
        let app = make_test_app().await;
        let body = json!({ "username": ADMIN_USERNAME, "password": "nope" });

        let (status, json) =
            send(&app.router, Method::POST, "/api/auth/admin/login", None, Some(body)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials");
    }

    /// Test Case: Lecturer logs in and the token grants lecturer routes
    #[tokio::test]
    #[serial]
    async fn test_lecturer_login_success() {
        let app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;
        let body = json!({ "email": "rao@college.edu", "password": "secret1" });

        let (status, json) =
            send(&app.router, Method::POST, "/api/auth/lecturer/login", None, Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["role"], "lecturer");
        assert_eq!(json["data"]["lecturer"]["id"], lecturer.id);
        assert!(json["data"]["lecturer"].get("password_hash").is_none());

        let token = json["data"]["token"].as_str().unwrap().to_owned();
        let (status, _) = send(
            &app.router,
            Method::GET,
            "/api/submissions/mine",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    #[serial]
    async fn test_lecturer_login_wrong_password() {
        let app = make_test_app().await;
        app.create_lecturer("rao@college.edu").await;
        let body = json!({ "email": "rao@college.edu", "password": "wrong-one" });

        let (status, _) =
            send(&app.router, Method::POST, "/api/auth/lecturer/login", None, Some(body)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn test_lecturer_login_invalid_email() {
        let app = make_test_app().await;
        let body = json!({ "email": "not-an-email", "password": "secret1" });

        let (status, json) =
            send(&app.router, Method::POST, "/api/auth/lecturer/login", None, Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }
}
