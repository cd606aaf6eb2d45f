use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::http::Error;
use crate::services::users::{self, RegisterForm};
use crate::App;

#[tracing::instrument(skip_all)]
pub async fn register(
    app: web::Data<App>,
    form: web::Json<RegisterForm>,
) -> Result<HttpResponse, Error> {
    let user = users::register(&app, form.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "User registered successfully.",
        "user": user,
    })))
}
