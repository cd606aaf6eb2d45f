use actix_web::web;

pub mod demo;
pub mod users;

/// Mounts every route. User routes live under the configurable prefix;
/// the demo routes keep their fixed paths.
pub fn configure(cfg: &mut web::ServiceConfig, prefix: &str) {
    cfg.route("/", web::get().to(index)).service(
        web::scope(&format!("{prefix}/users"))
            .route("", web::post().to(users::register))
            .route("/userList", web::get().to(users::list))
            .route("/login", web::post().to(users::login)),
    );
    demo::configure(cfg);
    cfg.default_service(web::route().to(fallback));
}

async fn index() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().body("Welcome to the API!")
}

async fn fallback() -> Result<actix_web::HttpResponse, crate::http::Error> {
    Err(crate::http::Error::not_found())
}
