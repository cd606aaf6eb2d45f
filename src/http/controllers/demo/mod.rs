use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Mutex;

use crate::demo;
use crate::http::Error;

/// The demo endpoints keep their historical fixed paths; they are not
/// mounted under the configurable prefix.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/getAllUsers", web::get().to(list)).service(
        web::scope("/api/v1/user")
            .route("/create", web::post().to(create))
            .route("/delete/{id}", web::delete().to(delete)),
    );
}

type Store = web::Data<Mutex<demo::Store>>;

#[tracing::instrument(skip_all)]
pub async fn list(store: Store) -> Result<HttpResponse, Error> {
    let data = demo::lock(&store)?.list();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": data,
    })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[tracing::instrument(skip_all)]
pub async fn create(store: Store, form: web::Json<CreateRequest>) -> Result<HttpResponse, Error> {
    let user = demo::lock(&store)?.create(form.name.as_deref(), form.email.as_deref())?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "data": user,
    })))
}

#[tracing::instrument(skip_all)]
pub async fn delete(store: Store, path: web::Path<String>) -> Result<HttpResponse, Error> {
    // Reject non-numeric and non-positive ids before touching the
    // store, so they read as bad input instead of a missing record. A
    // run of digits too large for i64 is still a positive integer, just
    // one that cannot possibly be in the store.
    let id = match path.parse::<i64>() {
        Ok(id) if id > 0 => id as u64,
        Err(_) if !path.is_empty() && path.chars().all(|c| c.is_ascii_digit()) => {
            return Err(Error::not_found());
        }
        _ => return Err(Error::validation("Invalid user ID")),
    };

    demo::lock(&store)?.delete(id)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "User deleted successfully",
    })))
}

#[cfg(test)]
mod tests {
    use actix_web::body::MessageBody;
    use actix_web::dev::ServiceResponse;
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    use crate::demo;
    use crate::http::util::handle_json_error;

    macro_rules! spawn_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data($store)
                    .app_data(web::JsonConfig::default().error_handler(handle_json_error))
                    .configure(super::configure),
            )
            .await
        };
    }

    fn store() -> web::Data<Mutex<demo::Store>> {
        web::Data::new(Mutex::new(demo::Store::new()))
    }

    async fn body<B: MessageBody>(response: ServiceResponse<B>) -> Value {
        test::read_body_json(response).await
    }

    #[actix_web::test]
    async fn create_then_list_round_trip() {
        let app = spawn_app!(store());

        let request = test::TestRequest::post()
            .uri("/api/v1/user/create")
            .set_json(json!({"name": "John Doe", "email": "john.doe@example.com"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body(response).await;
        assert_eq!(
            created,
            json!({
                "success": true,
                "data": {"id": 1, "name": "John Doe", "email": "john.doe@example.com"},
            })
        );

        let request = test::TestRequest::get().uri("/api/getAllUsers").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let listed = body(response).await;
        assert_eq!(listed["success"], json!(true));
        assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn create_with_missing_email_is_rejected() {
        let shared = store();
        let app = spawn_app!(shared.clone());

        let request = test::TestRequest::post()
            .uri("/api/v1/user/create")
            .set_json(json!({"name": "John Doe"}))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let rejected = body(response).await;
        assert_eq!(
            rejected,
            json!({"success": false, "message": "Please provide name and email"})
        );

        // nothing got stored
        assert!(demo::lock(&shared).expect("lock store").is_empty());
    }

    #[actix_web::test]
    async fn delete_twice_turns_into_not_found() {
        let app = spawn_app!(store());

        let request = test::TestRequest::post()
            .uri("/api/v1/user/create")
            .set_json(json!({"name": "John Doe", "email": "john.doe@example.com"}))
            .to_request();
        let created = body(test::call_service(&app, request).await).await;
        let id = created["data"]["id"].as_u64().expect("created id");

        let request = test::TestRequest::delete()
            .uri(&format!("/api/v1/user/delete/{id}"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body(response).await,
            json!({"success": true, "message": "User deleted successfully"})
        );

        let request = test::TestRequest::delete()
            .uri(&format!("/api/v1/user/delete/{id}"))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn non_numeric_and_non_positive_ids_are_bad_requests() {
        let app = spawn_app!(store());

        for id in ["abc", "0", "-3"] {
            let request = test::TestRequest::delete()
                .uri(&format!("/api/v1/user/delete/{id}"))
                .to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id = {id:?}");

            assert_eq!(
                body(response).await,
                json!({"success": false, "message": "Invalid user ID"})
            );
        }
    }

    #[actix_web::test]
    async fn oversized_numeric_id_is_not_found() {
        let app = spawn_app!(store());

        // does not fit in i64, but it is a positive integer
        let request = test::TestRequest::delete()
            .uri("/api/v1/user/delete/99999999999999999999")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn malformed_json_body_uses_the_failure_envelope() {
        let app = spawn_app!(store());

        let request = test::TestRequest::post()
            .uri("/api/v1/user/create")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        assert_eq!(
            body(response).await,
            json!({"success": false, "message": "Invalid JSON body."})
        );
    }
}
