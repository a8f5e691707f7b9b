//! 게임 플레이 시간 백엔드 메인 애플리케이션
//!
//! 환경 변수를 검사하고 MongoDB, Redis, 게임 API 클라이언트를 초기화한 뒤
//! Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use game_time_backend::caching::redis::RedisClient;
use game_time_backend::config::{missing_required_vars, RateLimitConfig, ServerConfig};
use game_time_backend::core::registry::ServiceLocator;
use game_time_backend::db::Database;
use game_time_backend::providers::GameProviders;
use game_time_backend::repositories::users::UserRepository;
use game_time_backend::routes::configure_all_routes;
use game_time_backend::services::users::UserService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 게임 플레이 시간 백엔드 시작중...");

    let missing = missing_required_vars();
    if !missing.is_empty() {
        error!("필수 환경 변수가 없습니다: {}", missing.join(", "));
        return Err(io::Error::other(format!("missing environment variables: {}", missing.join(", "))));
    }

    let (database, redis_client) = initialize_data_stores().await?;
    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    let providers = GameProviders::from_env().map_err(startup_error("게임 API 클라이언트 초기화 실패"))?;
    ServiceLocator::set(Arc::new(UserService::new(UserRepository::instance(), providers)));

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| startup_error("서비스 초기화 실패")(e.to_string()))?;

    UserRepository::instance()
        .create_indexes()
        .await
        .map_err(startup_error("인덱스 생성 실패"))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

fn startup_error<E: std::fmt::Display>(context: &'static str) -> impl Fn(E) -> io::Error {
    move |e| {
        error!("{}: {}", context, e);
        io::Error::other(format!("{}: {}", context, e))
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 레이트 리밋, CORS, 요청 로깅, 경로 정규화 미들웨어를 적용합니다.
async fn start_http_server() -> io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("invalid rate limit configuration"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second,
        rate_limit.burst_size
    );

    let allowed_origin = ServerConfig::cors_allowed_origin();

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origin))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .shutdown_timeout(ServerConfig::shutdown_timeout_secs())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// `RUST_LOG`가 없으면 `info,actix_web=info`를 사용합니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

async fn initialize_data_stores() -> io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new()
        .await
        .map_err(|e| startup_error("데이터베이스 연결 실패")(e.to_string()))?;

    let redis_client = RedisClient::new()
        .await
        .map_err(|e| startup_error("Redis 연결 실패")(e.to_string()))?;

    Ok((Arc::new(database), Arc::new(redis_client)))
}

fn configure_cors(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
