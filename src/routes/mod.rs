//! API 라우트 설정 모듈
//!
//! 모든 API는 `/api/v1` 아래에 있고, 헬스체크만 루트에 있습니다.
//!
//! ## 인증 불필요
//! - `GET /api/v1/login`, `GET /api/v1/authcallback`
//! - `GET /api/v1/user/{username}`
//!
//! ## 인증 필요 ([`AuthMiddleware`])
//! - `GET|POST|DELETE /api/v1/user`
//! - `POST /api/v1/updategames`
//! - `POST /api/v1/updatekey` (관리자)
//!
//! ```rust,ignore
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config());
    cfg.service(health_check);

    // 공개 리소스를 먼저 등록해야 인증 스코프보다 먼저 매칭됩니다.
    cfg.service(
        web::scope("/api/v1")
            .service(handlers::auth::login)
            .service(handlers::auth::auth_callback)
            .service(handlers::users::get_user_by_name)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::users::get_self)
                    .service(handlers::users::update_user)
                    .service(handlers::users::delete_user)
                    .service(handlers::users::update_games)
                    .service(handlers::admin::update_key)
            )
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "game_time_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "providers": ["League of Legends", "Overwatch", "Steam", "RuneScape"]
        }
    }))
}
