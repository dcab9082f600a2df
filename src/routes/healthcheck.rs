use actix_web::HttpResponse;

/// Liveness probe: answers 200 with an empty body as long as the server runs
pub async fn healthcheck() -> HttpResponse {
    HttpResponse::Ok().finish()
}
