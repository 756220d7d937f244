#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;
    use serial_test::serial;

    use crate::helpers::{TestApp, admin_token, make_test_app, send};

    const HEADER: &str = "name,register_number,semester,branch,attendance,email,subject_Maths,subject_Physics,subject_Chemistry,subject_English";

    async fn import(app: &TestApp, csv: &str) -> (StatusCode, serde_json::Value) {
        let token = admin_token(&app.state);
        let body = json!({
            "csv_data": STANDARD.encode(csv),
            "subjects": ["Maths", "Physics", "Chemistry", "English"]
        });
        send(&app.router, Method::POST, "/api/results/import", Some(&token), Some(body)).await
    }

    /// Test Case: Bulk import writes one result per row
    #[tokio::test]
    #[serial]
    async fn test_import_results_success() {
        let app = make_test_app().await;
        let csv = format!(
            "{HEADER}\nAsha,21CS001,S1,CSE,80,asha@example.com,90,70,80,80\nRavi,21CS002,S1,CSE,60,,30,40,0,0\n"
        );

        let (status, json) = import(&app, &csv).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["imported"], 2);
        let results = json["data"]["results"].as_array().unwrap();
        assert_eq!(results[0]["total_marks"], 320);
        assert_eq!(results[0]["pass_status"], "Pass");
        assert_eq!(results[1]["percentage"], 17.5);
        assert_eq!(results[1]["pass_status"], "Fail");
        assert_eq!(results[1]["attendance_eligibility"], "not_eligible");
    }

    /// Test Case: One bad row rejects the whole document
    #[tokio::test]
    #[serial]
    async fn test_import_invalid_row_writes_nothing() {
        let app = make_test_app().await;
        let csv = format!(
            "{HEADER}\nAsha,21CS001,S1,CSE,80,,90,70,50,50\nRavi,21CS002,S1,CSE,60,,30,abc,50,50\n"
        );

        let (status, json) = import(&app, &csv).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("line 3"));

        let token = admin_token(&app.state);
        let (_, json) = send(&app.router, Method::GET, "/api/results", Some(&token), None).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_import_missing_column() {
        let app = make_test_app().await;
        let csv = "name,register_number,semester,branch,attendance,subject_Maths\nAsha,21CS001,S1,CSE,80,90\n";

        let (status, json) = import(&app, csv).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("subject_Physics"));
    }

    /// Test Case: Imports must list exactly the configured number of subjects
    #[tokio::test]
    #[serial]
    async fn test_import_subject_count_mismatch() {
        let app = make_test_app().await;
        let token = admin_token(&app.state);
        let csv = "name,register_number,semester,branch,attendance,subject_Maths,subject_Physics\n\
                   Asha,21CS001,S1,CSE,80,100,100\n";
        let body = json!({ "csv_data": STANDARD.encode(csv), "subjects": ["Maths", "Physics"] });

        let (status, json) =
            send(&app.router, Method::POST, "/api/results/import", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("exactly 4"));
    }

    #[tokio::test]
    #[serial]
    async fn test_import_repeated_student_rejected() {
        let app = make_test_app().await;
        let csv = format!(
            "{HEADER}\nAsha,21CS001,S1,CSE,80,,90,70,50,50\nAsha,21CS001,S1,CSE,80,,10,10,10,10\n"
        );

        let (status, json) = import(&app, &csv).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("already appears on line 2"));
    }

    #[tokio::test]
    #[serial]
    async fn test_import_bad_base64() {
        let app = make_test_app().await;
        let token = admin_token(&app.state);
        let body = json!({ "csv_data": "%%%not-base64%%%", "subjects": ["Maths"] });

        let (status, _) =
            send(&app.router, Method::POST, "/api/results/import", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    /// Test Case: Students look up their own results without logging in
    #[tokio::test]
    #[serial]
    async fn test_student_lookup_is_public() {
        let app = make_test_app().await;
        let csv = format!(
            "{HEADER}\nAsha,21CS001,S1,CSE,80,,90,70,50,50\nAsha,21CS001,S2,CSE,80,,50,50,0,0\nRavi,21CS002,S1,CSE,60,,30,40,50,50\n"
        );
        import(&app, &csv).await;

        let (status, json) = send(
            &app.router,
            Method::GET,
            "/api/results/student?register_number=21CS001",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);

        let (_, json) = send(
            &app.router,
            Method::GET,
            "/api/results/student?register_number=21CS001&semester=S2",
            None,
            None,
        )
        .await;
        let results = json["data"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["total_marks"], 100);

        let (status, json) = send(
            &app.router,
            Method::GET,
            "/api/results/student?register_number=21CS999",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_list_results_requires_admin() {
        let app = make_test_app().await;

        let (status, _) = send(&app.router, Method::GET, "/api/results", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn test_delete_result() {
        let app = make_test_app().await;
        let (_, json) = import(&app, &format!("{HEADER}\nAsha,21CS001,S1,CSE,80,,90,70,50,50\n")).await;
        let id = json["data"]["results"][0]["id"].as_i64().unwrap();
        let token = admin_token(&app.state);

        let uri = format!("/api/results/{id}");
        let (status, _) = send(&app.router, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app.router, Method::DELETE, &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
