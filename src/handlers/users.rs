//! # 사용자 프로필 핸들러
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `GET` | `/user` | 필요 | 자신의 프로필 |
//! | `GET` | `/user/{username}` | 불필요 | 공개 프로필 조회 |
//! | `POST` | `/user` | 필요 | 부분 프로필 재조정 후 저장 |
//! | `DELETE` | `/user` | 필요 | 전체 또는 필드 단위 삭제 |
//! | `POST` | `/updategames` | 필요 | 플레이 시간 강제 새로고침 |
//!
//! 변경 요청은 성공 시 `Success` 텍스트로 응답합니다.
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/user \
//!   -H "Authorization: Bearer $TOKEN" \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "johan", "overwatch": {"battleTag": "Player#1234", "platform": "pc", "region": "eu"}}'
//! ```

use actix_web::{web, HttpResponse, get, post, delete};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::users::request::{UpdateUserRequest, UserField};
use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::user_service;

const SUCCESS: &str = "Success";

#[get("/user")]
pub async fn get_self(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let stored = user_service()?.get_user_by_id(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(stored)))
}

/// 이름으로 공개 프로필을 조회합니다. 비공개이거나 없는 이름은 404입니다.
#[get("/user/{username}")]
pub async fn get_user_by_name(username: web::Path<String>) -> Result<HttpResponse, AppError> {
    let stored = user_service()?.get_user_by_name(&username).await?;

    Ok(HttpResponse::Ok().json(UserResponse::public_view(stored)))
}

/// 본문에 포함된 필드만 재조정합니다.
///
/// `games`, `totalPlayTime`, `admin`, `id`는 무시됩니다. 연결 계정 필드의
/// 명시적 `null`은 연결 해제입니다.
#[post("/user")]
pub async fn update_user(
    user: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    request.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    user_service()?.set_user(&user.user_id, request).await?;

    Ok(HttpResponse::Ok().body(SUCCESS))
}

/// 본문이 비어 있으면 사용자 전체를, 필드 배열이면 해당 필드만 삭제합니다.
#[delete("/user")]
pub async fn delete_user(
    user: AuthenticatedUser,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let fields = parse_fields(&body)?;

    user_service()?.delete_user(&user.user_id, &fields).await?;

    Ok(HttpResponse::Ok().body(SUCCESS))
}

#[post("/updategames")]
pub async fn update_games(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let games = user_service()?.update_games(&user.user_id).await?;
    log::debug!("게임 {}개 새로고침: {}", games.len(), user.user_id);

    Ok(HttpResponse::Ok().body(SUCCESS))
}

fn parse_fields(body: &[u8]) -> Result<Vec<UserField>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("invalid field list: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};
    use crate::domain::entities::accounts::RunescapeAccount;
    use crate::domain::entities::accounts::RunescapeAccountType;
    use crate::domain::entities::users::{Game, User};
    use crate::routes::configure_all_routes;
    use crate::services::auth::TokenService;
    use crate::services::users::user_service::tests::shared_store;
    use serial_test::serial;

    fn bearer(user_id: &str) -> (&'static str, String) {
        let token = TokenService::instance().generate_token(user_id).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    #[test]
    fn test_parse_fields() {
        assert!(parse_fields(b"").unwrap().is_empty());
        assert!(parse_fields(b"  \n").unwrap().is_empty());
        assert_eq!(parse_fields(br#"["lol"]"#).unwrap(), vec![UserField::Lol]);
        assert!(matches!(parse_fields(br#"["admin"]"#), Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    #[serial]
    async fn test_get_self_hides_private_fields() {
        let store = shared_store();
        let mut user = User::new("h-self");
        user.admin = true;
        user.games = vec![Game::new("Dota 2", 4).with_provider_key("570")];
        user.total_game_time = 4;
        store.insert(user);
        let app = actix_test::init_service(App::new().configure(configure_all_routes)).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/user")
            .insert_header(bearer("h-self"))
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["totalPlayTime"], 4);
        assert_eq!(body["games"][0]["game"], "Dota 2");
        assert!(body.get("admin").is_none());
        assert!(body.get("id").is_none());
    }

    #[actix_web::test]
    #[serial]
    async fn test_public_lookup_needs_no_token() {
        let store = shared_store();
        let mut visible = User::new("h-public");
        visible.name = Some("h-visible".to_string());
        visible.public = true;
        store.insert(visible);
        let mut hidden = User::new("h-private");
        hidden.name = Some("h-hidden".to_string());
        store.insert(hidden);
        let app = actix_test::init_service(App::new().configure(configure_all_routes)).await;

        let req = actix_test::TestRequest::get().uri("/api/v1/user/H-Visible").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["name"], "h-visible");
        assert!(body.get("public").is_none());

        let req = actix_test::TestRequest::get().uri("/api/v1/user/h-hidden").to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 404);
    }

    #[actix_web::test]
    #[serial]
    async fn test_update_user_saves_and_refreshes() {
        let store = shared_store();
        store.insert(User::new("h-update"));
        let app = actix_test::init_service(App::new().configure(configure_all_routes)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/user")
            .insert_header(bearer("h-update"))
            .set_json(serde_json::json!({
                "name": "HUpdater",
                "public": true,
                "admin": true,
                "runescape": {"username": "Zezima", "accountType": "normal"}
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(actix_test::read_body(resp).await, "Success");

        let saved = store.get("h-update").unwrap();
        assert_eq!(saved.name.as_deref(), Some("hupdater"));
        assert!(saved.public);
        assert!(!saved.admin);
        assert_eq!(
            saved.runescape,
            Some(RunescapeAccount::new("Zezima", RunescapeAccountType::Normal))
        );
        assert_eq!(saved.total_game_time, 20);
    }

    #[actix_web::test]
    #[serial]
    async fn test_update_user_rejects_bad_name() {
        let store = shared_store();
        store.insert(User::new("h-badname"));
        let app = actix_test::init_service(App::new().configure(configure_all_routes)).await;

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/user")
            .insert_header(bearer("h-badname"))
            .set_json(serde_json::json!({"name": "no spaces!"}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert!(body["error"].is_string());
        assert!(store.get("h-badname").unwrap().name.is_none());
    }

    #[actix_web::test]
    #[serial]
    async fn test_delete_fields_then_whole_user() {
        let store = shared_store();
        let mut user = User::new("h-delete");
        user.name = Some("h-deleted".to_string());
        user.public = true;
        store.insert(user);
        let app = actix_test::init_service(App::new().configure(configure_all_routes)).await;

        let req = actix_test::TestRequest::delete()
            .uri("/api/v1/user")
            .insert_header(bearer("h-delete"))
            .set_payload(r#"["public"]"#)
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 200);
        let remaining = store.get("h-delete").unwrap();
        assert!(!remaining.public);
        assert_eq!(remaining.name.as_deref(), Some("h-deleted"));

        let req = actix_test::TestRequest::delete()
            .uri("/api/v1/user")
            .insert_header(bearer("h-delete"))
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 200);
        assert!(store.get("h-delete").is_none());
    }

    #[actix_web::test]
    #[serial]
    async fn test_update_games_requires_token() {
        shared_store();
        let app = actix_test::init_service(App::new().configure(configure_all_routes)).await;

        let req = actix_test::TestRequest::post().uri("/api/v1/updategames").to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 401);
    }
}
