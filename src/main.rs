//! 계정 서비스 부트스트랩 바이너리
//!
//! PostgreSQL, Redis 연결을 설정하고 스키마를 마이그레이션합니다.
//! 인자로 GitHub ID가 주어지면 해당 프로필을 캐시 경유로 조회해 JSON으로 출력합니다.
//!
//! ```bash
//! PROFILE=dev account_service 583231
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use account_service::caching::redis::RedisClient;
use account_service::config::{DatabaseConfig, Environment, RedisConfig};
use account_service::db::Database;
use account_service::errors::{AppError, AppResult, ErrorContext};
use account_service::repositories::github_user::{CachePolicy, GithubUserRepository, GithubUserSql};

#[tokio::main]
async fn main() -> ExitCode {
    // 환경 설정 및 로깅 초기화
    let profile_message = load_env_file();
    init_logging();
    info!("{}", profile_message);

    info!("🚀 계정 서비스 시작중... ({:?})", Environment::current());

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let lookup_id = parse_lookup_id(std::env::args().nth(1))?;

    let (database, redis_client) = initialize_data_stores().await?;
    database
        .close_after(serve(&database, redis_client, lookup_id))
        .await
}

async fn serve(database: &Database, redis_client: Arc<RedisClient>, lookup_id: Option<i64>) -> AppResult<()> {
    database.migrate().await?;

    let repository = GithubUserRepository::new(
        Arc::new(GithubUserSql::new(database.pool().clone())),
        redis_client,
    );

    match lookup_id {
        Some(id) => print_profile(&repository, id).await,
        None => {
            info!("조회할 GitHub ID가 없어 초기화만 수행했습니다");
            Ok(())
        }
    }
}

async fn print_profile(repository: &GithubUserRepository, id: i64) -> AppResult<()> {
    println!("{}", render_profile(repository, id).await?);
    Ok(())
}

/// 캐시 경유로 프로필을 조회해 JSON 문자열로 만듭니다. 없으면 `NotFound`입니다.
async fn render_profile(repository: &GithubUserRepository, id: i64) -> AppResult<String> {
    let user = repository
        .get_by_id(id, CachePolicy::ReadThrough)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("github user {}", id)))?;

    serde_json::to_string_pretty(&user).context("profile json")
}

fn parse_lookup_id(arg: Option<String>) -> AppResult<Option<i64>> {
    arg.map(|raw| {
        raw.parse::<i64>()
            .map_err(|e| AppError::Config(format!("invalid github id {:?}: {}", raw, e)))
    })
    .transpose()
}

/// 환경별 설정 파일을 로드합니다
///
/// 로거 초기화 전에 호출되므로 결과 메시지를 반환하고, 로깅은 호출자가 합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() -> String {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => ".env.prod 파일 로드 됨".to_string(),
            Err(e) => format!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => ".env.dev 파일 로드 됨".to_string(),
            Err(e) => format!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            "기본 .env 파일 로드".to_string()
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,sqlx=warn")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,sqlx=warn"));
}

/// PostgreSQL과 Redis 연결을 초기화합니다
async fn initialize_data_stores() -> AppResult<(Database, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");
    let database = Database::connect(&DatabaseConfig::from_env()).await?;

    let redis_client = match RedisClient::new(&RedisConfig::from_env()).await {
        Ok(client) => Arc::new(client),
        Err(e) => {
            database.close().await;
            return Err(e);
        }
    };

    Ok((database, redis_client))
}
