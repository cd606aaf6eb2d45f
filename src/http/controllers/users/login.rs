use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::http::Error;
use crate::services::users::{self, LoginForm};
use crate::App;

#[tracing::instrument(skip_all)]
pub async fn login(
    app: web::Data<App>,
    form: web::Json<LoginForm>,
) -> Result<HttpResponse, Error> {
    let (user, message) = users::login(&app, form.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "user": user,
        "message": message,
    })))
}
