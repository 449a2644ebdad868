//! 商户资料与团队管理 API 处理器

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, ChangePasswordRequest, CreateMemberRequest, JsonBody, MerchantProfileView,
        TeamList, UpdateMemberRequest, non_empty,
    },
    error::{ApiError, Result},
    models::{MemberStatus, MerchantProfilePatch, TeamMember, TeamRole},
    state::AppState,
};

/// 组装商户资料，终端数量实时统计
fn profile_view(state: &AppState) -> MerchantProfileView {
    let (active_terminals, total_terminals) = state.terminal_counts();
    MerchantProfileView {
        profile: state.merchant.read().clone(),
        active_terminals,
        total_terminals,
    }
}

fn parse_role(raw: &str) -> Result<TeamRole> {
    raw.parse()
        .map_err(|_| ApiError::validation("role: Admin|Manager|Operator"))
}

/// 获取商户资料
///
/// GET /profile/merchant
#[instrument(skip(state))]
pub async fn get_merchant(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<MerchantProfileView>>> {
    Ok(Json(ApiResponse::success(profile_view(&state))))
}

/// 修改商户资料
///
/// PUT /profile/merchant
#[instrument(skip_all)]
pub async fn update_merchant(
    State(state): State<AppState>,
    JsonBody(patch): JsonBody<MerchantProfilePatch>,
) -> Result<Json<ApiResponse<MerchantProfileView>>> {
    state.merchant.write().apply(patch);
    info!("商户资料已更新");

    Ok(Json(ApiResponse::with_message(
        profile_view(&state),
        "Profil güncellendi",
    )))
}

/// 修改密码（演示接口，只校验参数）
///
/// POST /profile/change-password
#[instrument(skip_all)]
pub async fn change_password(
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>> {
    req.validate()?;
    info!("密码已修改");
    Ok(Json(ApiResponse::message("Şifre güncellendi")))
}

/// 团队成员列表
///
/// GET /profile/team
#[instrument(skip(state))]
pub async fn list_team(State(state): State<AppState>) -> Result<Json<ApiResponse<TeamList>>> {
    Ok(Json(ApiResponse::success(TeamList {
        team_members: state.team.list(),
    })))
}

/// 新增团队成员
///
/// POST /profile/team
#[instrument(skip_all)]
pub async fn create_member(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateMemberRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TeamMember>>)> {
    req.validate()?;
    let CreateMemberRequest {
        name: Some(name),
        email: Some(email),
        role: Some(role),
    } = req
    else {
        return Err(ApiError::validation("name, email, role gerekli"));
    };
    let role = parse_role(&role)?;

    let member = TeamMember {
        id: state.next_member_id(),
        name,
        email,
        role,
        status: MemberStatus::Active,
        created_at: Utc::now(),
        last_login: None,
    };
    state.team.push(member.clone());

    info!(member_id = %member.id, role = %member.role, "团队成员已添加");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(member, "Ekip üyesi eklendi")),
    ))
}

/// 修改团队成员
///
/// PUT /profile/team/{id}
#[instrument(skip(state, req))]
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateMemberRequest>,
) -> Result<Json<ApiResponse<TeamMember>>> {
    if !state.team.contains(&id) {
        return Err(ApiError::MemberNotFound(id));
    }

    let name = non_empty(req.name);
    let role = non_empty(req.role).as_deref().map(parse_role).transpose()?;
    let status = non_empty(req.status)
        .map(|raw| raw.parse::<MemberStatus>())
        .transpose()
        .map_err(|_| ApiError::validation("status: ACTIVE|INACTIVE"))?;

    let member = state
        .team
        .update(&id, |m| {
            if let Some(name) = name {
                m.name = name;
            }
            if let Some(role) = role {
                m.role = role;
            }
            if let Some(status) = status {
                m.status = status;
            }
        })
        .ok_or_else(|| ApiError::MemberNotFound(id.clone()))?;

    info!(member_id = %id, "团队成员已更新");
    Ok(Json(ApiResponse::with_message(member, "Ekip üyesi güncellendi")))
}

/// 删除团队成员（物理删除）
///
/// DELETE /profile/team/{id}
#[instrument(skip(state))]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state
        .team
        .remove(&id)
        .ok_or_else(|| ApiError::MemberNotFound(id.clone()))?;

    info!(member_id = %id, "团队成员已删除");
    Ok(Json(ApiResponse::message("Ekip üyesi silindi")))
}
