//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::types::UserRole;

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 公共路由判定
///
/// - 登录/注册/健康检查无需令牌
/// - 餐厅和社区的 GET 接口允许匿名访问 (私有社区的成员校验在 handler 内)
fn is_public_route(method: &http::Method, path: &str) -> bool {
    if path == "/api/auth/login" || path.starts_with("/api/auth/register/") || path == "/api/health"
    {
        return true;
    }

    method == http::Method::GET
        && (path.starts_with("/api/restaurants")
            || path.starts_with("/api/communities")
            || path.starts_with("/api/community/posts"))
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展 (`req.extensions_mut().insert(user)`)。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - [`is_public_route`] 匹配的公共接口 (若带有令牌仍会校验并注入用户)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let public = is_public_route(req.method(), &path);

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|h| h.to_string());

    let token = match auth_header {
        Some(header) => match JwtService::extract_from_header(&header) {
            Some(token) => token.to_string(),
            None => return Err(AppError::invalid_token("Invalid authorization header")),
        },
        None => {
            if public {
                return Ok(next.run(req).await);
            }
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    let jwt_service = state.jwt_service();
    match jwt_service.validate_token(&token) {
        Ok(claims) => {
            let user = CurrentUser::try_from(claims)
                .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 角色检查中间件 - 要求特定账号角色
///
/// 管理员放行所有角色检查。
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/restaurants", post(handler::create))
///     .layer(middleware::from_fn(require_role(UserRole::Business)));
/// ```
///
/// # 错误
///
/// 角色不匹配返回 403 Forbidden
pub fn require_role(
    role: UserRole,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_role(role) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id,
                    required_role = role.as_str()
                );
                return Err(AppError::forbidden(format!(
                    "This action requires the {role} role"
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
