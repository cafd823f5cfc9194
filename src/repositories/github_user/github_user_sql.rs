//! # GitHub 사용자 저장소 (PostgreSQL)
//!
//! `github_user_info` 테이블에 대한 조회와 upsert를 담당합니다.
//! 삽입/갱신 분기는 별도 조회 없이 `ON CONFLICT (id)` 단일 구문으로 처리되므로
//! 같은 ID로 동시에 저장해도 중복 키 에러가 발생하지 않습니다.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::GithubUser;
use crate::errors::AppResult;

/// upsert 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// 해당 ID의 행이 없어 새로 삽입됨
    Inserted,
    /// 기존 행이 제자리에서 갱신됨
    Updated,
}

/// GitHub 사용자 행 저장소
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GithubUserDataSource: Send + Sync {
    /// 외부 GitHub ID로 행을 조회합니다. 없으면 `None`입니다.
    async fn get_by_id(&self, id: i64) -> AppResult<Option<GithubUser>>;

    /// 행이 없으면 삽입하고, 있으면 `uid`를 제외한 모든 컬럼을 갱신합니다.
    async fn upsert(&self, user: &GithubUser) -> AppResult<SaveOutcome>;
}

const SELECT_BY_ID: &str = r#"
    SELECT uid, access_token, id, name, email, avatar, login, blog,
           location, follower_count, company
    FROM github_user_info
    WHERE id = $1
"#;

// xmax = 0 only for a tuple created by this statement's INSERT branch
const UPSERT: &str = r#"
    INSERT INTO github_user_info
        (uid, access_token, id, name, email, avatar, login, blog,
         location, follower_count, company)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
    ON CONFLICT (id) DO UPDATE SET
        access_token = EXCLUDED.access_token,
        name = EXCLUDED.name,
        email = EXCLUDED.email,
        avatar = EXCLUDED.avatar,
        login = EXCLUDED.login,
        blog = EXCLUDED.blog,
        location = EXCLUDED.location,
        follower_count = EXCLUDED.follower_count,
        company = EXCLUDED.company
    RETURNING (xmax = 0) AS inserted
"#;

/// PostgreSQL 기반 [`GithubUserDataSource`] 구현
pub struct GithubUserSql {
    pool: PgPool,
}

impl GithubUserSql {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GithubUserDataSource for GithubUserSql {
    async fn get_by_id(&self, id: i64) -> AppResult<Option<GithubUser>> {
        let user = sqlx::query_as::<_, GithubUser>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn upsert(&self, user: &GithubUser) -> AppResult<SaveOutcome> {
        let inserted = sqlx::query_scalar::<_, bool>(UPSERT)
            .bind(user.uid)
            .bind(&user.access_token)
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.avatar)
            .bind(&user.login)
            .bind(&user.blog)
            .bind(&user.location)
            .bind(user.follower_count)
            .bind(&user.company)
            .fetch_one(&self.pool)
            .await?;

        Ok(if inserted {
            SaveOutcome::Inserted
        } else {
            SaveOutcome::Updated
        })
    }
}
