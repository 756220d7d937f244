#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;
    use serial_test::serial;

    use crate::helpers::{admin_token, lecturer_token, make_test_app, send, submission_payload};

    #[tokio::test]
    #[serial]
    async fn test_dashboard_counts() {
        let app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;
        let token = lecturer_token(&app.state, lecturer.id);
        for subject in ["Maths", "Physics"] {
            send(
                &app.router,
                Method::POST,
                "/api/submissions",
                Some(&token),
                Some(submission_payload("21CS001", subject, 60)),
            )
            .await;
        }

        let admin = admin_token(&app.state);
        let (status, json) =
            send(&app.router, Method::GET, "/api/admin/dashboard", Some(&admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total_results"], 0);
        assert_eq!(json["data"]["pending_submissions"], 2);
    }

    /// Test Case: Analytics summarise pass/fail and the average percentage
    #[tokio::test]
    #[serial]
    async fn test_analytics() {
        let app = make_test_app().await;
        let admin = admin_token(&app.state);
        let csv = "name,register_number,semester,branch,attendance,subject_A,subject_B,subject_C,subject_D\n\
                   Asha,21CS001,S1,CSE,80,90,90,90,90\n\
                   Ravi,21CS002,S1,CSE,80,30,30,30,30\n\
                   Mina,21CS003,S1,CSE,80,41,41,41,41\n";
        let body = json!({ "csv_data": STANDARD.encode(csv), "subjects": ["A", "B", "C", "D"] });
        let (status, _) =
            send(&app.router, Method::POST, "/api/results/import", Some(&admin), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) =
            send(&app.router, Method::GET, "/api/admin/analytics", Some(&admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total_students"], 3);
        assert_eq!(json["data"]["passed"], 2);
        assert_eq!(json["data"]["failed"], 1);
        assert_eq!(json["data"]["average_percentage"], 53.67);
    }

    #[tokio::test]
    #[serial]
    async fn test_admin_routes_reject_lecturers() {
        let app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;
        let token = lecturer_token(&app.state, lecturer.id);

        let (status, _) =
            send(&app.router, Method::GET, "/api/admin/dashboard", Some(&token), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
