//! 终端管理 API 处理器
//!
//! 实现终端的查询、创建、修改、软删除以及远程指令

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, CreateTerminalRequest, CreatedTerminal, FirmwareUpdate,
        FirmwareUpdateRequest, Hardware, JsonBody, Network, PeriodStat, QueryParams,
        RestartCommand, TerminalDetail, TerminalList, TerminalListQuery, TerminalStatistics,
        TerminalSummary, TransactionBrief, UpdateTerminalRequest, UpdatedTerminal, non_empty,
    },
    error::{ApiError, Result},
    generators::reference::{CONNECTIONS, FIRMWARE_VERSIONS, HARDWARE_MANUFACTURER, PROVIDERS},
    models::terminal::terminal_id,
    models::{Terminal, TerminalStatus, Transaction},
    rng::Mulberry32,
    state::AppState,
    stats::{PageLimits, TimeWindow, TransactionFilter, paginate, sum_in_range},
};

/// 终端详情中展示的最近交易数量
const RECENT_TRANSACTION_COUNT: usize = 10;

/// 固件升级预计耗时（秒）
const FIRMWARE_UPDATE_SECS: u32 = 300;

/// 新终端的最近交易时间取很久以前
const NEW_TERMINAL_IDLE_DAYS: i64 = 999;

/// 解析列表接口的状态过滤条件，`all` 表示不过滤
fn status_filter(raw: Option<&str>) -> Result<Option<TerminalStatus>> {
    let raw = raw.filter(|s| !s.is_empty()).unwrap_or("all");
    if raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| ApiError::validation("status: active|inactive|maintenance|all"))
}

/// 4 位随机数，1000-9999
fn four_digits(rng: &mut Mulberry32) -> u32 {
    rng.below(9000) + 1000
}

/// 6 位随机指令编号，100000-999999
fn six_digits(rng: &mut Mulberry32) -> u32 {
    rng.below(900_000) + 100_000
}

/// 终端列表
///
/// GET /terminals?status=active|inactive|maintenance|all&search&limit&offset
#[instrument(skip(state))]
pub async fn list_terminals(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<TerminalListQuery>,
) -> Result<Json<ApiResponse<TerminalList>>> {
    let status = status_filter(query.status.as_deref())?;
    let search = query
        .search
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    let params = query.page.resolve(PageLimits::TERMINALS);

    let list = state.terminals.read(|terminals| {
        let filtered: Vec<&Terminal> = terminals
            .iter()
            .filter(|t| status.is_none_or(|s| t.status == s))
            .filter(|t| search.is_empty() || t.matches_search(&search))
            .collect();
        let (page, pagination) = paginate(&filtered, params);

        TerminalList {
            terminals: page.into_iter().cloned().collect(),
            pagination,
            summary: TerminalSummary::from_terminals(terminals),
        }
    });

    Ok(Json(ApiResponse::success(list)))
}

/// 终端详情
///
/// GET /terminals/{id}
#[instrument(skip(state))]
pub async fn get_terminal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TerminalDetail>>> {
    let terminal = state
        .terminals
        .get(&id)
        .ok_or_else(|| ApiError::TerminalNotFound(id.clone()))?;

    // 网络信息和 IMEI 每次请求重新随机
    let online = terminal.status.is_online();
    let (network, imei) = state.with_rng(|rng| {
        let network = if online {
            let provider = *rng.pick(&PROVIDERS);
            let connection_type = *rng.pick(&CONNECTIONS);
            let subnet = rng.below(10);
            let host = rng.below(200) + 10;
            Network {
                connection_type,
                ip_address: Some(format!("192.168.{subnet}.{host}")),
                provider: Some(provider),
            }
        } else {
            Network {
                connection_type: "NONE",
                ip_address: None,
                provider: None,
            }
        };
        let imei = format!("1234567890{:06}", rng.below(1_000_000));
        (network, imei)
    });

    let mut recent: Vec<&Transaction> = state
        .transactions
        .iter()
        .filter(|tx| tx.terminal_id == id)
        .collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let recent_transactions = recent
        .into_iter()
        .take(RECENT_TRANSACTION_COUNT)
        .map(TransactionBrief::from)
        .collect();

    let today = Utc::now().date_naive();
    let filter = TransactionFilter::success().with_terminal(id.as_str());
    let stat = |window: TimeWindow| {
        let sum = sum_in_range(&state.transactions, &window, &filter);
        PeriodStat {
            transactions: sum.count,
            sales: sum.total_sales,
        }
    };
    let statistics = TerminalStatistics {
        today: stat(TimeWindow::day(today)),
        week: stat(TimeWindow::trailing_days(today, 7)),
        month: stat(TimeWindow::trailing_days(today, 30)),
    };

    Ok(Json(ApiResponse::success(TerminalDetail {
        hardware: Hardware {
            manufacturer: HARDWARE_MANUFACTURER,
            model: terminal.model.clone(),
            serial_number: terminal.serial_number.clone(),
            imei,
        },
        terminal,
        network,
        recent_transactions,
        statistics,
    })))
}

/// 新增终端
///
/// POST /terminals
#[instrument(skip_all)]
pub async fn create_terminal(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateTerminalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedTerminal>>)> {
    req.validate()?;
    let CreateTerminalRequest {
        name: Some(name),
        serial_number: Some(serial_number),
        model: Some(model),
        location: Some(location),
        imei,
    } = req
    else {
        return Err(ApiError::validation("Eksik alan(lar)"));
    };

    let (activation_code, firmware_version) = state.with_rng(|rng| {
        let code = format!(
            "ACT-{:04}-{:04}-{:04}",
            four_digits(rng),
            four_digits(rng),
            four_digits(rng)
        );
        (code, rng.pick(&FIRMWARE_VERSIONS).to_string())
    });

    let now = Utc::now();
    let terminal = state.terminals.push_with(|len| Terminal {
        id: terminal_id(len + 1),
        name,
        serial_number,
        model,
        status: TerminalStatus::Inactive,
        location,
        last_transaction: now - Duration::days(NEW_TERMINAL_IDLE_DAYS),
        daily_transactions: 0,
        daily_sales: 0.0,
        battery: 0,
        signal_strength: 0,
        firmware_version,
        activation_date: now,
    });

    info!(terminal_id = %terminal.id, imei = ?imei, "终端已创建");

    let created = CreatedTerminal {
        id: terminal.id,
        name: terminal.name,
        serial_number: terminal.serial_number,
        model: terminal.model,
        status: terminal.status,
        location: terminal.location,
        activation_date: terminal.activation_date,
        activation_code,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(created, "Terminal başarıyla eklendi")),
    ))
}

/// 修改终端名称、位置或状态
///
/// PUT /terminals/{id}
#[instrument(skip(state, req))]
pub async fn update_terminal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateTerminalRequest>,
) -> Result<Json<ApiResponse<UpdatedTerminal>>> {
    if !state.terminals.contains(&id) {
        return Err(ApiError::TerminalNotFound(id));
    }

    let status = non_empty(req.status)
        .map(|raw| raw.parse::<TerminalStatus>())
        .transpose()
        .map_err(|_| ApiError::validation("status: ACTIVE|INACTIVE|MAINTENANCE"))?;
    let name = non_empty(req.name);
    let location = non_empty(req.location);

    let terminal = state
        .terminals
        .update(&id, |t| {
            if let Some(name) = name {
                t.name = name;
            }
            if let Some(location) = location {
                t.location = location;
            }
            if let Some(status) = status {
                t.status = status;
            }
        })
        .ok_or_else(|| ApiError::TerminalNotFound(id.clone()))?;

    info!(terminal_id = %id, status = %terminal.status, "终端已更新");

    Ok(Json(ApiResponse::with_message(
        UpdatedTerminal {
            id: terminal.id,
            name: terminal.name,
            location: terminal.location,
            status: terminal.status,
            updated_at: Utc::now(),
        },
        "Terminal başarıyla güncellendi",
    )))
}

/// 删除终端（软删除，状态置为 INACTIVE）
///
/// DELETE /terminals/{id}
#[instrument(skip(state))]
pub async fn delete_terminal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state
        .terminals
        .update(&id, |t| t.status = TerminalStatus::Inactive)
        .ok_or_else(|| ApiError::TerminalNotFound(id.clone()))?;

    info!(terminal_id = %id, "终端已停用");
    Ok(Json(ApiResponse::message("Terminal başarıyla silindi")))
}

/// 远程重启，仅在线终端可用
///
/// POST /terminals/{id}/restart
#[instrument(skip(state))]
pub async fn restart_terminal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RestartCommand>>> {
    let terminal = state
        .terminals
        .get(&id)
        .ok_or_else(|| ApiError::TerminalNotFound(id.clone()))?;

    if !terminal.status.is_online() {
        warn!(terminal_id = %id, status = %terminal.status, "终端不在线，无法重启");
        return Err(ApiError::TerminalOffline(id));
    }

    let command_id = format!("cmd_{:06}", state.with_rng(six_digits));
    info!(terminal_id = %id, command_id = %command_id, "重启指令已下发");

    Ok(Json(ApiResponse::with_message(
        RestartCommand {
            command_id,
            status: "PENDING",
            sent_at: Utc::now(),
        },
        "Terminal yeniden başlatma komutu gönderildi",
    )))
}

/// 固件升级
///
/// POST /terminals/{id}/update-firmware
#[instrument(skip(state, req))]
pub async fn update_firmware(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<FirmwareUpdateRequest>,
) -> Result<Json<ApiResponse<FirmwareUpdate>>> {
    if !state.terminals.contains(&id) {
        return Err(ApiError::TerminalNotFound(id));
    }
    req.validate()?;
    let target_version = req.version.unwrap_or_default();

    let mut current_version = String::new();
    state
        .terminals
        .update(&id, |t| {
            current_version = std::mem::replace(&mut t.firmware_version, target_version.clone());
        })
        .ok_or_else(|| ApiError::TerminalNotFound(id.clone()))?;

    let update_id = format!("upd_{:06}", state.with_rng(six_digits));
    info!(
        terminal_id = %id,
        from = %current_version,
        to = %target_version,
        "固件升级已开始"
    );

    Ok(Json(ApiResponse::with_message(
        FirmwareUpdate {
            current_version,
            target_version,
            update_id,
            estimated_time: FIRMWARE_UPDATE_SECS,
        },
        "Firmware güncelleme başlatıldı",
    )))
}
