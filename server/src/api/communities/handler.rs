//! Community API Handlers
//!
//! Community CRUD, membership and the image upload. Reads are anonymous
//! for public communities; the service layer guards private content.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use sha2::{Digest, Sha256};
use std::fs;

use crate::auth::{CurrentUser, OptionalUser};
use crate::core::ServerState;
use crate::db::repository::community as community_repo;
use crate::services::community;
use crate::utils::validation::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_TITLE_LEN};
use crate::utils::{AppError, AppResult, validation};
use shared::models::{Community, CommunityCreate, CommunityDetail, Member, PostCreate, PostWithAuthor};

/// Maximum image size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// JPEG quality for re-encoded community images
const JPEG_QUALITY: u8 = 85;

/// GET /api/communities - 获取所有社区
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Community>>> {
    let communities = community_repo::find_all(state.pool()).await?;
    Ok(Json(communities))
}

/// GET /api/communities/:id - 社区详情 (含成员)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CommunityDetail>> {
    let detail = community::get_community(state.pool(), id).await?;
    Ok(Json(detail))
}

/// POST /api/communities - 创建社区
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CommunityCreate>,
) -> AppResult<(StatusCode, Json<Community>)> {
    validation::validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validation::validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;

    let created = community::create_community(state.pool(), &user, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/communities/:id/members - 加入社区
pub async fn join(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Member>)> {
    let member = community::join_community(state.pool(), &user, id).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub member_role: shared::types::MemberRole,
}

/// PUT /api/communities/:id/members/:user_id - 调整成员角色 (仅 OWNER)
pub async fn update_member_role(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, user_id)): Path<(i64, i64)>,
    Json(payload): Json<UpdateMemberRoleRequest>,
) -> AppResult<Json<Member>> {
    let updated =
        community::update_member_role(state.pool(), &user, id, user_id, payload.member_role)
            .await?;
    Ok(Json(updated))
}

/// DELETE /api/communities/:id/members/:user_id - 移除成员 (或退出)
pub async fn remove_member(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, user_id)): Path<(i64, i64)>,
) -> AppResult<StatusCode> {
    community::remove_member(state.pool(), &user, id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/communities/:id/posts - 社区帖子列表
pub async fn list_posts(
    State(state): State<ServerState>,
    OptionalUser(viewer): OptionalUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<PostWithAuthor>>> {
    let posts = community::list_posts(state.pool(), viewer.as_ref(), id).await?;
    Ok(Json(posts))
}

/// POST /api/communities/:id/posts - 发布帖子
pub async fn create_post(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<PostCreate>,
) -> AppResult<(StatusCode, Json<PostWithAuthor>)> {
    validation::validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validation::validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;

    let created = community::create_post(state.pool(), &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ── Image upload ────────────────────────────────────────────────────

/// Validate and re-encode an uploaded image as JPEG
fn process_image(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }
    Ok(buffer)
}

/// POST /api/communities/:id/image - 上传社区头图
///
/// Accepts PNG/JPEG/WebP in a `file` multipart field, re-encodes to JPEG
/// and stores it content-addressed (same image, same file).
pub async fn upload_image(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<Community>> {
    // OWNER/ADMIN only
    community::check_image_access(state.pool(), &user, id).await?;

    // Find the file field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = f.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(
                f.bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data.ok_or_else(|| {
        AppError::validation("No 'file' field found. Field name must be 'file'".to_string())
    })?;
    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field".to_string()))?;

    if data.is_empty() {
        return Err(AppError::validation("Empty file provided".to_string()));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    // The extension must look like an image before we even try to decode
    let looks_like_image = mime_guess::from_path(&filename)
        .first()
        .map(|m| m.type_() == mime_guess::mime::IMAGE)
        .unwrap_or(false);
    if !looks_like_image {
        return Err(AppError::validation(format!(
            "Unsupported file type for '{}'",
            filename
        )));
    }

    let compressed = process_image(&data)?;

    // Content-addressed filename: re-uploading the same image is a no-op
    let file_hash = hex::encode(Sha256::digest(&compressed));
    let new_filename = format!("{}.jpg", file_hash);

    let images_dir = state.work_dir().join("uploads/communities");
    fs::create_dir_all(&images_dir)
        .map_err(|e| AppError::internal(format!("Failed to create images directory: {}", e)))?;

    let file_path = images_dir.join(&new_filename);
    if !file_path.exists() {
        fs::write(&file_path, &compressed)
            .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;
    }

    let image_url = format!("/uploads/communities/{}", new_filename);
    community_repo::set_image_url(state.pool(), id, &image_url).await?;

    tracing::info!(
        community_id = id,
        original_name = %filename,
        size = compressed.len(),
        hash = %file_hash,
        "Community image updated"
    );

    let updated = community_repo::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Community {id} not found")))?;
    Ok(Json(updated))
}
