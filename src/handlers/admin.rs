//! 관리자 전용 핸들러

use actix_web::{web, HttpResponse, post};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::admin::UpdateKeyRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::user_service;

/// League of Legends API 키를 교체합니다. 호출자가 관리자가 아니면 403입니다.
#[post("/updatekey")]
pub async fn update_key(
    user: AuthenticatedUser,
    payload: web::Json<UpdateKeyRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    user_service()?.update_riot_api_key(&user.user_id, &payload.key).await?;
    log::info!("Riot API 키 교체: {}", user.user_id);

    Ok(HttpResponse::Ok().body("Success"))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use crate::domain::entities::users::User;
    use crate::routes::configure_all_routes;
    use crate::services::auth::TokenService;
    use crate::services::users::user_service::tests::shared_store;
    use serial_test::serial;

    async fn post_key(user_id: &str) -> u16 {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;
        let token = TokenService::instance().generate_token(user_id).unwrap();

        let req = test::TestRequest::post()
            .uri("/api/v1/updatekey")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(serde_json::json!({"key": "RGAPI-00000000-0000-0000-0000-000000000000"}))
            .to_request();
        test::call_service(&app, req).await.status().as_u16()
    }

    #[actix_web::test]
    #[serial]
    async fn test_non_admin_is_forbidden() {
        shared_store().insert(User::new("adm-regular"));

        assert_eq!(post_key("adm-regular").await, 403);
    }

    #[actix_web::test]
    #[serial]
    async fn test_admin_rotates_key() {
        let mut admin = User::new("adm-root");
        admin.admin = true;
        shared_store().insert(admin);

        assert_eq!(post_key("adm-root").await, 200);
    }
}
