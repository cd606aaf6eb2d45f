use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::http::Error;
use crate::services::users;
use crate::App;

#[tracing::instrument(skip_all)]
pub async fn list(app: web::Data<App>) -> Result<HttpResponse, Error> {
    let users = users::list(&app).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "users": users,
    })))
}
