#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use db::events::ResultEvent;
    use serial_test::serial;

    use crate::helpers::{
        TestApp, admin_token, lecturer_token, make_test_app, send, submission_payload,
    };

    const SUBJECTS: [&str; 4] = ["Maths", "Physics", "Chemistry", "English"];

    async fn submit(app: &TestApp, token: &str, register_number: &str, subject: &str, marks: i64) -> i64 {
        let (status, json) = send(
            &app.router,
            Method::POST,
            "/api/submissions",
            Some(token),
            Some(submission_payload(register_number, subject, marks)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["data"]["id"].as_i64().unwrap()
    }

    async fn approve(app: &TestApp, id: i64) -> (StatusCode, serde_json::Value) {
        let token = admin_token(&app.state);
        let uri = format!("/api/submissions/{id}/approve");
        send(&app.router, Method::PUT, &uri, Some(&token), None).await
    }

    /// Test Case: Lecturer submission is recorded as pending and attributed to the caller
    #[tokio::test]
    #[serial]
    async fn test_create_submission_success() {
        let app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;
        let token = lecturer_token(&app.state, lecturer.id);

        let mut payload = submission_payload(" 21CS001 ", "Maths", 78);
        payload["lecturer_id"] = 999.into();
        let (status, json) =
            send(&app.router, Method::POST, "/api/submissions", Some(&token), Some(payload)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["status"], "pending");
        assert_eq!(json["data"]["register_number"], "21CS001");
        assert_eq!(json["data"]["lecturer_id"], lecturer.id);
        assert_eq!(json["data"]["sessional_type"], "final");
    }

    #[tokio::test]
    #[serial]
    async fn test_create_submission_out_of_range_marks() {
        let app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;
        let token = lecturer_token(&app.state, lecturer.id);

        let (status, json) = send(
            &app.router,
            Method::POST,
            "/api/submissions",
            Some(&token),
            Some(submission_payload("21CS001", "Maths", 150)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("Marks"));
    }

    /// Test Case: Only lecturers may report marks
    #[tokio::test]
    #[serial]
    async fn test_create_submission_requires_lecturer() {
        let app = make_test_app().await;
        let payload = submission_payload("21CS001", "Maths", 50);

        let (status, _) =
            send(&app.router, Method::POST, "/api/submissions", None, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = admin_token(&app.state);
        let (status, _) =
            send(&app.router, Method::POST, "/api/submissions", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    #[serial]
    async fn test_deleted_lecturer_token_is_rejected() {
        let app = make_test_app().await;
        let token = lecturer_token(&app.state, 42);

        let (status, _) =
            send(&app.router, Method::GET, "/api/submissions/mine", Some(&token), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn test_list_my_submissions_only_returns_own() {
        let app = make_test_app().await;
        let rao = app.create_lecturer("rao@college.edu").await;
        let iyer = app.create_lecturer("iyer@college.edu").await;
        let rao_token = lecturer_token(&app.state, rao.id);
        let iyer_token = lecturer_token(&app.state, iyer.id);

        submit(&app, &rao_token, "21CS001", "Maths", 60).await;
        submit(&app, &iyer_token, "21CS001", "Physics", 60).await;

        let (status, json) =
            send(&app.router, Method::GET, "/api/submissions/mine", Some(&rao_token), None).await;

        assert_eq!(status, StatusCode::OK);
        let mine = json["data"].as_array().unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0]["subject_name"], "Maths");
    }

    /// Test Case: The result appears only once every expected subject is approved
    #[tokio::test]
    #[serial]
    async fn test_approval_flow_finalizes_result() {
        let mut app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;
        let token = lecturer_token(&app.state, lecturer.id);

        let mut ids = Vec::new();
        for (subject, marks) in SUBJECTS.iter().zip([40, 41, 39, 40]) {
            ids.push(submit(&app, &token, "21CS001", subject, marks).await);
        }

        let admin = admin_token(&app.state);
        let (status, json) =
            send(&app.router, Method::GET, "/api/submissions/pending", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 4);

        for id in &ids[..3] {
            let (status, json) = approve(&app, *id).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["data"]["complete"], false);
            assert!(json["data"]["result"].is_null());
            assert_eq!(json["data"]["submission"]["status"], "approved");
        }
        assert!(app.events.try_recv().is_err());

        let (status, json) = approve(&app, ids[3]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["complete"], true);
        assert_eq!(json["message"], "Submission approved and result updated");

        let result = &json["data"]["result"];
        assert_eq!(result["total_marks"], 160);
        assert_eq!(result["percentage"], 40.0);
        assert_eq!(result["pass_status"], "Pass");
        assert_eq!(result["attendance_eligibility"], "eligible");
        assert_eq!(result["subjects"].as_array().unwrap().len(), 4);
        assert_eq!(result["subjects"][0]["subject_name"], "Maths");

        match app.events.try_recv() {
            Ok(ResultEvent::Finalized(n)) => assert_eq!(n.register_number, "21CS001"),
            other => panic!("expected a finalized event, got {other:?}"),
        }

        let (_, json) =
            send(&app.router, Method::GET, "/api/submissions/pending", Some(&admin), None).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn test_repeated_approval_is_harmless() {
        let app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;
        let token = lecturer_token(&app.state, lecturer.id);
        let id = submit(&app, &token, "21CS001", "Maths", 50).await;

        let (first, _) = approve(&app, id).await;
        let (second, json) = approve(&app, id).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::OK);
        assert_eq!(json["data"]["submission"]["status"], "approved");
    }

    /// Test Case: Terminal states cannot be changed
    #[tokio::test]
    #[serial]
    async fn test_reject_after_approve_conflicts() {
        let app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;
        let token = lecturer_token(&app.state, lecturer.id);
        let approved = submit(&app, &token, "21CS001", "Maths", 50).await;
        let rejected = submit(&app, &token, "21CS001", "Physics", 50).await;
        let admin = admin_token(&app.state);

        approve(&app, approved).await;
        let uri = format!("/api/submissions/{approved}/reject");
        let (status, json) = send(&app.router, Method::PUT, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);

        let uri = format!("/api/submissions/{rejected}/reject");
        let (status, json) = send(&app.router, Method::PUT, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "rejected");

        let (status, _) = approve(&app, rejected).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    #[serial]
    async fn test_unknown_submission_not_found() {
        let app = make_test_app().await;
        let admin = admin_token(&app.state);

        let (status, _) = approve(&app, 9999).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            send(&app.router, Method::PUT, "/api/submissions/9999/reject", Some(&admin), None)
                .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Test Case: Admin lists one student's submissions, optionally by status
    #[tokio::test]
    #[serial]
    async fn test_list_submissions_by_key() {
        let app = make_test_app().await;
        let lecturer = app.create_lecturer("rao@college.edu").await;
        let token = lecturer_token(&app.state, lecturer.id);
        let first = submit(&app, &token, "21CS001", "Maths", 50).await;
        submit(&app, &token, "21CS001", "Physics", 50).await;
        submit(&app, &token, "21CS002", "Maths", 50).await;
        approve(&app, first).await;

        let admin = admin_token(&app.state);
        let (status, json) = send(
            &app.router,
            Method::GET,
            "/api/submissions?register_number=21CS001&semester=S1&branch=CSE",
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);

        let (_, json) = send(
            &app.router,
            Method::GET,
            "/api/submissions?register_number=21CS001&semester=S1&branch=CSE&status=approved",
            Some(&admin),
            None,
        )
        .await;
        let approved = json["data"].as_array().unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0]["id"], first);
    }
}
